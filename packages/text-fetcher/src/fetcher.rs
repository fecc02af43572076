//! HTTP fetcher that follows redirects and returns page text.

use reqwest::header::LOCATION;
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::config::FetcherConfig;
use crate::error::{FetchError, Result};
use crate::html::html_to_text;

/// Fetches pages and reduces them to plain text.
///
/// Redirects are followed by hand rather than by reqwest so that every hop
/// goes through the same scheme check and the hop limit from
/// [`FetcherConfig::max_redirects`].
pub struct TextFetcher {
    client: reqwest::Client,
    config: FetcherConfig,
}

impl TextFetcher {
    /// Create a fetcher with default settings (10s timeout, 10 redirect hops).
    pub fn new() -> Result<Self> {
        Self::with_config(FetcherConfig::default())
    }

    pub fn with_config(config: FetcherConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Fetch `url` and return its body as plain text.
    ///
    /// `hint` is carried along every redirect hop for callers that hand the
    /// text to a downstream consumer; it does not affect extraction.
    pub async fn fetch_text(&self, url: &str, hint: Option<&str>) -> Result<String> {
        let mut current = parse_target(url)?;
        let mut hops = 0usize;

        loop {
            debug!(url = %current, hint = ?hint, hops, "Fetching page text");

            let response = self
                .client
                .get(current.clone())
                .send()
                .await
                .map_err(|e| {
                    warn!(url = %current, error = %e, "HTTP request failed");
                    FetchError::from_transport(e, current.as_str())
                })?;

            let status = response.status();

            if status.is_redirection() {
                if let Some(location) = response.headers().get(LOCATION) {
                    if hops >= self.config.max_redirects {
                        return Err(FetchError::TooManyRedirects {
                            url: url.to_string(),
                            max: self.config.max_redirects,
                        });
                    }

                    let location = location.to_str().map_err(|_| FetchError::InvalidUrl {
                        url: String::from_utf8_lossy(location.as_bytes()).into_owned(),
                    })?;
                    let next = current.join(location).map_err(|_| FetchError::InvalidUrl {
                        url: location.to_string(),
                    })?;
                    check_scheme(&next)?;

                    debug!(from = %current, to = %next, status = status.as_u16(), "Following redirect");
                    current = next;
                    hops += 1;
                    continue;
                }
            }

            if status != StatusCode::OK {
                return Err(FetchError::Status {
                    status: status.as_u16(),
                    message: status.canonical_reason().unwrap_or("Unknown").to_string(),
                });
            }

            let body = response
                .text()
                .await
                .map_err(|e| FetchError::from_transport(e, current.as_str()))?;

            debug!(url = %current, body_length = body.len(), "Page fetched successfully");

            return Ok(html_to_text(&body));
        }
    }
}

/// Fetch `url` with a default-configured [`TextFetcher`].
pub async fn fetch_text(url: &str, hint: Option<&str>) -> Result<String> {
    TextFetcher::new()?.fetch_text(url, hint).await
}

fn parse_target(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl {
        url: url.to_string(),
    })?;
    check_scheme(&parsed)?;
    Ok(parsed)
}

/// TLS for `https`, plain TCP for `http`; nothing else is fetched.
fn check_scheme(url: &Url) -> Result<()> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(FetchError::UnsupportedScheme {
            url: url.to_string(),
            scheme: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target_accepts_http_and_https() {
        assert!(parse_target("http://example.com/page").is_ok());
        assert!(parse_target("https://example.com/page").is_ok());
    }

    #[test]
    fn test_parse_target_rejects_other_schemes() {
        let err = parse_target("ftp://example.com/file").unwrap_err();
        assert!(matches!(
            err,
            FetchError::UnsupportedScheme { ref scheme, .. } if scheme == "ftp"
        ));
    }

    #[test]
    fn test_parse_target_rejects_garbage() {
        let err = parse_target("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn test_with_config_keeps_settings() {
        let fetcher = TextFetcher::with_config(
            FetcherConfig::new()
                .with_timeout(std::time::Duration::from_secs(3))
                .with_max_redirects(2)
                .with_user_agent("Indexer/2.0"),
        )
        .unwrap();

        assert_eq!(fetcher.config().timeout, std::time::Duration::from_secs(3));
        assert_eq!(fetcher.config().max_redirects, 2);
        assert_eq!(fetcher.config().user_agent, "Indexer/2.0");

        let defaults = TextFetcher::new().unwrap();
        assert_eq!(defaults.config().max_redirects, crate::config::DEFAULT_MAX_REDIRECTS);
        assert_eq!(defaults.config().timeout, crate::config::DEFAULT_TIMEOUT);
    }

    #[tokio::test]
    async fn test_fetch_text_rejects_unsupported_scheme_without_network() {
        let fetcher = TextFetcher::new().unwrap();
        let err = fetcher
            .fetch_text("file:///etc/hosts", None)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedScheme { .. }));
    }
}
