//! `reqwest`-backed [`HttpFetch`] implementation.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, header};
use ths_core::{Charset, DataError, HttpFetch, Result};
use tracing::{debug, warn};

use crate::{PROVIDER_NAME, config::ThsConfig};

/// Fetches report pages over HTTP with a shared [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Builds a client carrying the configured user agent and timeout.
    pub fn new(config: &ThsConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Wraps a pre-configured client. The client is used as is, so it should
    /// already carry a browser-like user agent.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl ReqwestFetcher {
    async fn send(&self, request: RequestBuilder, url: &str, charset: Charset) -> Result<String> {
        debug!(url, ?charset, "Fetching");

        let response = request
            .send()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited {
                provider: PROVIDER_NAME.to_string(),
                retry_after: None,
            });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(url.to_string()));
        }

        if !status.is_success() {
            return Err(DataError::Network(format!("HTTP {status} for {url}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DataError::Network(e.to_string()))?;

        Ok(decode_body(&body, charset))
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn fetch(&self, url: &str, charset: Charset) -> Result<String> {
        self.send(self.client.get(url), url, charset).await
    }

    async fn fetch_with_user_agent(
        &self,
        url: &str,
        charset: Charset,
        user_agent: &str,
    ) -> Result<String> {
        let request = self.client.get(url).header(header::USER_AGENT, user_agent);
        self.send(request, url, charset).await
    }
}

/// Decodes a response body with the given charset, ignoring any BOM or
/// declared encoding. Malformed sequences become U+FFFD.
pub fn decode_body(body: &[u8], charset: Charset) -> String {
    let encoding = match charset {
        Charset::Utf8 => encoding_rs::UTF_8,
        Charset::Gbk => encoding_rs::GBK,
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(body);
    if had_errors {
        warn!(
            encoding = encoding.name(),
            "Response body contained malformed sequences"
        );
    }

    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gbk() {
        let (bytes, _, unmappable) = encoding_rs::GBK.encode("股东持股变动");
        assert!(!unmappable);

        assert_eq!(decode_body(&bytes, Charset::Gbk), "股东持股变动");
        assert_ne!(decode_body(&bytes, Charset::Utf8), "股东持股变动");
    }

    #[test]
    fn test_decode_utf8() {
        let text = r#"{"flashData":"{}"}"#;
        assert_eq!(decode_body(text.as_bytes(), Charset::Utf8), text);
    }

    #[test]
    fn test_decode_is_lossy() {
        let decoded = decode_body(&[b'a', 0xFF, b'b'], Charset::Utf8);
        assert_eq!(decoded, "a\u{FFFD}b");
    }

    #[test]
    fn test_new_from_config() {
        assert!(ReqwestFetcher::new(&ThsConfig::default()).is_ok());
    }
}
