//! Provider configuration.

use std::time::Duration;

/// Base URL of the 10jqka company data site.
pub const DEFAULT_BASE_URL: &str = "https://basic.10jqka.com.cn";

/// User agent for HTTP requests. The site rejects clients that do not look
/// like a desktop browser.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                              AppleWebKit/537.36 (KHTML, like Gecko) \
                              Chrome/89.0.4389.90 Safari/537.36";

/// User agent for the shareholder event page.
pub const EVENT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                    AppleWebKit/537.36 (KHTML, like Gecko) \
                                    Chrome/109.0.0.0 Safari/537.36";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`ThsProvider`](crate::ThsProvider) and its HTTP client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThsConfig {
    /// Scheme and host every report URL is built on, without trailing slash.
    pub base_url: String,
    /// User agent sent with finance requests.
    pub user_agent: String,
    /// User agent sent with shareholder event requests.
    pub event_user_agent: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ThsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            event_user_agent: EVENT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ThsConfig {
    /// Sets the base URL. A trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the user agent of the shareholder event page.
    #[must_use]
    pub fn with_event_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.event_user_agent = user_agent.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
