//! Transport plumbing shared by upstream clients.

use std::borrow::Cow;
use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::error::GeneDoseError;

pub mod cds;

const BODY_EXCERPT_LEN: usize = 200;

pub(crate) fn base_http_client() -> Result<reqwest::Client, GeneDoseError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(120))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(concat!("genedose-cli/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(GeneDoseError::HttpClientInit)
}

/// Client with transparent retry on transient failures. Retried calls are
/// always safe here: normalization is re-entrant and every response is
/// normalized independently.
pub(crate) fn retrying_http_client() -> Result<ClientWithMiddleware, GeneDoseError> {
    let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);
    Ok(ClientBuilder::new(base_http_client()?)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

pub(crate) fn env_base(default: &'static str, env_var: &str) -> Cow<'static, str> {
    match std::env::var(env_var) {
        Ok(value) if !value.trim().is_empty() => Cow::Owned(value.trim().to_string()),
        _ => Cow::Borrowed(default),
    }
}

pub(crate) fn body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.len() <= BODY_EXCERPT_LEN {
        trimmed.to_string()
    } else {
        let mut cut = BODY_EXCERPT_LEN;
        while !trimmed.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…", &trimmed[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_excerpt_truncates_long_bodies() {
        let long = "x".repeat(500);
        let excerpt = body_excerpt(long.as_bytes());
        assert!(excerpt.len() < long.len());
        assert!(excerpt.ends_with('…'));
    }

    #[test]
    fn body_excerpt_passes_short_bodies_through() {
        assert_eq!(body_excerpt(b"  not found  "), "not found");
    }

    #[test]
    fn env_base_falls_back_to_default() {
        let base = env_base("http://127.0.0.1:8000", "GENEDOSE_TEST_UNSET_BASE");
        assert_eq!(base.as_ref(), "http://127.0.0.1:8000");
    }
}
