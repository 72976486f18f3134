//! File system reads.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn read_to_string_impl(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn exists_impl(&self, path: &Path) -> bool {
        path.exists()
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn is_dir_impl(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use crate::runtime::{RealRuntime, Runtime};
    use tempfile::tempdir;

    #[test]
    fn test_real_runtime_file_ops() {
        let runtime = RealRuntime;
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("packages.json");

        assert!(!runtime.exists(&file_path));
        std::fs::write(&file_path, "[]").unwrap();

        assert!(runtime.exists(&file_path));
        assert!(!runtime.is_dir(&file_path));
        assert!(runtime.is_dir(dir.path()));
        assert_eq!(runtime.read_to_string(&file_path).unwrap(), "[]");
    }

    #[test]
    fn test_real_runtime_read_missing_file() {
        let runtime = RealRuntime;
        let result = runtime.read_to_string(std::path::Path::new("/nonexistent/path/packages.json"));

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
