//! HTTP fetch abstraction.
//!
//! Providers never talk to the network directly. They hand a URL and the
//! expected body [`Charset`] to an [`HttpFetch`] implementation and reshape the
//! decoded text it returns, which keeps the reshaping testable offline.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::Result;

/// Text encoding of a response body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Charset {
    /// UTF-8.
    #[default]
    Utf8,
    /// GBK, the superset of GB2312 served by legacy Chinese pages.
    Gbk,
}

/// A GET-only fetcher returning the decoded response body.
///
/// Implementations surface transport failures (connect errors, timeouts,
/// non-success status) as errors and never retry.
#[async_trait]
pub trait HttpFetch: Send + Sync + Debug {
    /// Fetches `url` and decodes the body using `charset`.
    async fn fetch(&self, url: &str, charset: Charset) -> Result<String>;

    /// Like [`fetch`](Self::fetch), sending `user_agent` instead of the
    /// fetcher's default. Fetchers without a user agent ignore it.
    async fn fetch_with_user_agent(
        &self,
        url: &str,
        charset: Charset,
        user_agent: &str,
    ) -> Result<String> {
        let _ = user_agent;
        self.fetch(url, charset).await
    }
}
