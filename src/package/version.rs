//! Version normalization for packages.
//!
//! This module turns human-written version strings ("v1.0", "2.1.0-RC1",
//! "1.0.x-dev") into the canonical form stored on packages, so that
//! lookups can compare versions as plain strings.

use crate::error::VersionParseError;

/// Component used in place of wildcards and for development branches.
pub const DEV_COMPONENT: &str = "9999999";

/// Normalized version of the default development branch.
pub const DEFAULT_BRANCH_VERSION: &str = "9999999-dev";

const DEFAULT_BRANCHES: [&str; 3] = ["master", "trunk", "default"];

/// Stability keywords in matching order (longest first), with their expansion.
/// An empty expansion means the modifier is dropped.
const STABILITIES: [(&str, &str); 9] = [
    ("stable", ""),
    ("alpha", "alpha"),
    ("beta", "beta"),
    ("patch", "patch"),
    ("pl", "patch"),
    ("rc", "RC"),
    ("a", "alpha"),
    ("b", "beta"),
    ("p", "patch"),
];

/// Converts a version string into its canonical comparable form.
#[cfg_attr(test, mockall::automock)]
pub trait VersionNormalizer {
    /// Normalize `version`, failing on malformed input.
    fn normalize(&self, version: &str) -> Result<String, VersionParseError>;
}

/// Default normalizer following Composer's version rules.
///
/// Classical versions are padded to four components (`1.0` becomes
/// `1.0.0.0`), stability suffixes are expanded (`1.0b2` becomes
/// `1.0.0.0-beta2`), wildcard branches map to `9999999` components with a
/// `-dev` suffix, and `dev-<branch>` names pass through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct VersionParser;

impl VersionParser {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a classical `major[.minor[.patch[.build]]][-stability][-dev]` version.
    fn normalize_classical(version: &str) -> Option<String> {
        let (components, rest) = split_numeric(strip_v(version))?;
        if components.len() > 4 || components[0].len() > 5 {
            return None;
        }

        let (stability, rest) = parse_stability(rest);
        let dev = parse_dev_suffix(rest)?;

        let mut normalized = pad_components(&components, "0");
        if let Some(stability) = stability {
            normalized.push('-');
            normalized.push_str(&stability);
        }
        if dev {
            normalized.push_str("-dev");
        }
        Some(normalized)
    }

    /// Normalize a wildcard branch such as `1.0.x`, `2.*` or `1.x-dev`.
    ///
    /// Wildcards and missing components become [`DEV_COMPONENT`]; the result
    /// always carries a `-dev` suffix.
    fn normalize_wildcard(version: &str) -> Option<String> {
        let body = strip_dev_suffix(strip_v(version));
        let parts: Vec<&str> = body.split('.').collect();
        if parts.is_empty() || parts.len() > 4 || !is_digits(parts[0]) {
            return None;
        }

        let mut has_wildcard = false;
        let mut components = Vec::with_capacity(4);
        for part in &parts {
            if is_wildcard(part) {
                has_wildcard = true;
                components.push(DEV_COMPONENT);
            } else if is_digits(part) {
                components.push(part);
            } else {
                return None;
            }
        }

        if !has_wildcard {
            return None;
        }

        Some(format!("{}-dev", pad_components(&components, DEV_COMPONENT)))
    }

    /// Normalize a date-based version (`20100102`, `2010-01-02`, `2010.01.02.1030`).
    fn normalize_date(version: &str) -> Option<String> {
        let groups: Vec<&str> = strip_v(version)
            .split(['.', ':', '-'])
            .collect();

        if groups.iter().any(|g| !is_digits(g)) || groups[0].len() < 4 {
            return None;
        }

        let digits: usize = groups.iter().map(|g| g.len()).sum();
        if digits < 6 {
            return None;
        }

        Some(groups.join("."))
    }
}

impl VersionNormalizer for VersionParser {
    fn normalize(&self, version: &str) -> Result<String, VersionParseError> {
        let version = version.trim();
        if version.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let lower = version.to_ascii_lowercase();
        let branch = lower.strip_prefix("dev-").unwrap_or(&lower);
        if DEFAULT_BRANCHES.contains(&branch) {
            return Ok(DEFAULT_BRANCH_VERSION.to_string());
        }

        if lower.starts_with("dev-") {
            return Ok(format!("dev-{}", &version[4..]));
        }

        Self::normalize_classical(version)
            .or_else(|| Self::normalize_wildcard(version))
            .or_else(|| Self::normalize_date(version))
            .ok_or_else(|| VersionParseError::Invalid(version.to_string()))
    }
}

fn strip_v(version: &str) -> &str {
    version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_wildcard(s: &str) -> bool {
    matches!(s, "x" | "X" | "*")
}

/// Pad `components` to four entries using `filler`, joined by dots.
fn pad_components(components: &[&str], filler: &str) -> String {
    let mut padded: Vec<&str> = components.to_vec();
    padded.resize(4, filler);
    padded.join(".")
}

/// Split leading dot-separated numeric components from the remainder.
fn split_numeric(version: &str) -> Option<(Vec<&str>, &str)> {
    let mut components = Vec::new();
    let mut rest = version;

    loop {
        let len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if len == 0 {
            break;
        }
        components.push(&rest[..len]);
        rest = &rest[len..];

        match rest.strip_prefix('.') {
            Some(next) if next.starts_with(|c: char| c.is_ascii_digit()) => rest = next,
            _ => break,
        }
    }

    if components.is_empty() {
        None
    } else {
        Some((components, rest))
    }
}

/// Parse an optional stability modifier, returning its normalized form and the remainder.
///
/// When no modifier is present, the input is returned untouched.
fn parse_stability(rest: &str) -> (Option<String>, &str) {
    let body = rest
        .strip_prefix(['-', '_', '.'])
        .unwrap_or(rest);

    for (keyword, expanded) in STABILITIES {
        let Some(head) = body.get(..keyword.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(keyword) {
            continue;
        }

        let mut after = &body[keyword.len()..];
        if let Some(next) = after.strip_prefix('.')
            && next.starts_with(|c: char| c.is_ascii_digit())
        {
            after = next;
        }
        let len = after.bytes().take_while(u8::is_ascii_digit).count();
        let number = &after[..len];
        let remainder = &after[len..];

        // "b" followed by a letter is not a stability (e.g. "1.0-bogus")
        if remainder.starts_with(|c: char| c.is_ascii_alphabetic()) {
            continue;
        }

        if expanded.is_empty() {
            return (None, remainder);
        }
        return (Some(format!("{}{}", expanded, number)), remainder);
    }

    (None, rest)
}

/// Accepts an empty remainder or a `dev` marker; `Some(true)` when the marker is present.
fn parse_dev_suffix(rest: &str) -> Option<bool> {
    if rest.is_empty() {
        return Some(false);
    }
    let body = rest.strip_prefix(['-', '.', '_']).unwrap_or(rest);
    body.eq_ignore_ascii_case("dev").then_some(true)
}

fn strip_dev_suffix(version: &str) -> &str {
    let len = version.len();
    if len >= 4 && version.is_char_boundary(len - 4) {
        let (head, tail) = version.split_at(len - 4);
        if matches!(tail.as_bytes()[0], b'-' | b'.' | b'_') && tail[1..].eq_ignore_ascii_case("dev")
        {
            return head;
        }
    }
    version
}
