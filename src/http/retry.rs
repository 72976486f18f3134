//! Retry policy for listing downloads.

use reqwest::StatusCode;

/// Maximum number of attempts for a request.
pub const MAX_RETRIES: usize = 3;

/// Default delay between attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// Failures that will not go away by asking again.
#[derive(Debug, thiserror::Error)]
pub enum NonRetryableError {
    /// HTTP 429
    #[error("Rate limit exceeded: {0}. Try again later or set PKGREPO_TOKEN.")]
    RateLimitExceeded(String),
    /// HTTP 401
    #[error("Authentication failed: {0}. Check your PKGREPO_TOKEN.")]
    AuthenticationFailed(String),
    /// HTTP 404
    #[error("Listing not found: {0}")]
    NotFound(String),
    /// HTTP 403
    #[error("Access forbidden: {0}. The listing may require PKGREPO_TOKEN.")]
    Forbidden(String),
    /// Any other 4xx
    #[error("Request error: {0}")]
    ClientError(String),
}

/// Classifies an error as retryable (`Ok`) or not.
pub fn classify_error(error: &reqwest::Error) -> Result<(), NonRetryableError> {
    let Some(status) = error.status() else {
        // Connection errors, timeouts and the like
        return Ok(());
    };

    let url = error
        .url()
        .map(|u| u.to_string())
        .unwrap_or_else(|| "unknown URL".to_string());

    match status {
        StatusCode::UNAUTHORIZED => Err(NonRetryableError::AuthenticationFailed(url)),
        StatusCode::FORBIDDEN => Err(NonRetryableError::Forbidden(url)),
        StatusCode::TOO_MANY_REQUESTS => Err(NonRetryableError::RateLimitExceeded(url)),
        StatusCode::NOT_FOUND => Err(NonRetryableError::NotFound(url)),
        s if s.is_client_error() => Err(NonRetryableError::ClientError(format!(
            "HTTP {} from {}",
            s.as_u16(),
            url
        ))),
        // 5xx
        _ => Ok(()),
    }
}

/// Maps an error from `error_for_status()` to either itself (retryable) or a
/// [`NonRetryableError`].
pub fn check_retryable(error: reqwest::Error) -> anyhow::Error {
    match classify_error(&error) {
        Ok(()) => anyhow::Error::from(error),
        Err(non_retryable) => anyhow::Error::from(non_retryable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn status_error(status: usize) -> reqwest::Error {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/packages.json")
            .with_status(status)
            .create_async()
            .await;

        let response = reqwest::Client::new()
            .get(format!("{}/packages.json", server.url()))
            .send()
            .await
            .unwrap();
        response.error_for_status().unwrap_err()
    }

    #[test]
    fn test_non_retryable_error_display() {
        let err = NonRetryableError::RateLimitExceeded("x".to_string());
        assert!(err.to_string().contains("Rate limit"));
        assert!(err.to_string().contains("PKGREPO_TOKEN"));

        let err = NonRetryableError::AuthenticationFailed("x".to_string());
        assert!(err.to_string().contains("Authentication"));

        let err = NonRetryableError::NotFound("x".to_string());
        assert!(err.to_string().contains("not found"));

        let err = NonRetryableError::ClientError("HTTP 400".to_string());
        assert_eq!(err.to_string(), "Request error: HTTP 400");
    }

    #[tokio::test]
    async fn test_classify_error_unauthorized() {
        let err = status_error(401).await;
        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::AuthenticationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_classify_error_forbidden() {
        let err = status_error(403).await;
        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::Forbidden(_))
        ));
    }

    // the status line is all reqwest reports, so a 403 whose body mentions a
    // rate limit is still a plain forbidden response
    #[tokio::test]
    async fn test_classify_error_forbidden_ignores_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(403)
            .with_body("API rate limit exceeded")
            .create_async()
            .await;

        let err = reqwest::get(server.url())
            .await
            .unwrap()
            .error_for_status()
            .unwrap_err();
        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn test_classify_error_too_many_requests() {
        let err = status_error(429).await;
        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::RateLimitExceeded(_))
        ));
    }

    #[tokio::test]
    async fn test_classify_error_not_found_mentions_url() {
        let err = status_error(404).await;
        match classify_error(&err) {
            Err(NonRetryableError::NotFound(url)) => assert!(url.ends_with("/packages.json")),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_classify_error_other_client_error() {
        let err = status_error(400).await;
        assert!(matches!(
            classify_error(&err),
            Err(NonRetryableError::ClientError(_))
        ));
    }

    #[tokio::test]
    async fn test_server_errors_are_retryable() {
        let err = status_error(503).await;
        assert!(classify_error(&err).is_ok());

        let err = check_retryable(status_error(500).await);
        assert!(err.downcast_ref::<NonRetryableError>().is_none());
    }

    #[tokio::test]
    async fn test_check_retryable_non_retryable() {
        let err = check_retryable(status_error(404).await);
        assert!(err.downcast_ref::<NonRetryableError>().is_some());
    }
}
