#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ths/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! basic.10jqka.com.cn data provider.
//!
//! This crate provides [`ThsProvider`], which implements the
//! [`FinancialReportProvider`] and [`ShareholderEventProvider`] traits from
//! `ths-core`.
//!
//! # Features
//!
//! - Summary indicators unwrapped from the `p#main` element of the finance page
//! - Balance sheet, income and cash-flow statements unwrapped from the
//!   `flashData` envelope of the statement endpoints
//! - Period-indexed DataFrames led by the `报告期` column
//! - Shareholder changes decoded from the GBK event page
//!
//! # Example
//!
//! ```no_run
//! use ths_jqka::ThsProvider;
//! use ths_core::{FinancialReportProvider, Granularity, Symbol};
//!
//! # async fn example() -> ths_core::Result<()> {
//! let provider = ThsProvider::new();
//! let symbol = Symbol::new("000063");
//!
//! let df = provider
//!     .fetch_income_statement(&symbol, Granularity::BySingleQuarter)
//!     .await?;
//! println!("Fetched {} periods", df.height());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use polars::prelude::DataFrame;
use ths_core::{
    BalanceSheetGranularity, Charset, DataProvider, FinancialReportProvider, Granularity,
    HttpFetch, PeriodSelector, ReportKind, Result, ShareholderEventProvider, Symbol,
};
use tracing::debug;

/// Provider configuration.
pub mod config;
/// Shareholder-change table reconstruction.
pub mod events;
/// `reqwest`-backed fetcher.
pub mod fetch;
/// Finance payload unwrapping.
pub mod payload;
/// Sub-table reshaping.
pub mod reshape;

#[cfg(test)]
mod test_support;

pub use config::ThsConfig;
pub use fetch::ReqwestFetcher;
pub use payload::{FinancePayload, TitleEntry};

/// Provider name reported by [`DataProvider::name`].
pub const PROVIDER_NAME: &str = "10jqka";

/// 10jqka (Tonghuashun) data provider.
///
/// Implements [`DataProvider`], [`FinancialReportProvider`] and
/// [`ShareholderEventProvider`]. Every call issues exactly one request and
/// keeps no state between calls.
#[derive(Clone, Debug)]
pub struct ThsProvider {
    fetcher: Arc<dyn HttpFetch>,
    base_url: String,
    event_user_agent: String,
}

impl ThsProvider {
    /// Create a new provider with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ThsConfig::default()).expect("Failed to create HTTP client")
    }

    /// Create a new provider from a configuration.
    pub fn with_config(config: ThsConfig) -> Result<Self> {
        let fetcher = ReqwestFetcher::new(&config)?;

        Ok(Self {
            fetcher: Arc::new(fetcher),
            base_url: config.base_url,
            event_user_agent: config.event_user_agent,
        })
    }

    /// Create a new provider with a custom HTTP client.
    ///
    /// The client is used as is; it should carry a browser-like user agent.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self::with_fetcher(Arc::new(ReqwestFetcher::with_client(client)))
    }

    /// Create a new provider fetching through `fetcher`.
    #[must_use]
    pub fn with_fetcher(fetcher: Arc<dyn HttpFetch>) -> Self {
        Self {
            fetcher,
            base_url: config::DEFAULT_BASE_URL.to_string(),
            event_user_agent: config::EVENT_USER_AGENT.to_string(),
        }
    }

    /// Sets the base URL report URLs are built on.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the user agent sent to the shareholder event page.
    #[must_use]
    pub fn with_event_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.event_user_agent = user_agent.into();
        self
    }

    /// Build the request URL of a report for a symbol.
    #[must_use]
    pub fn report_url(&self, kind: ReportKind, symbol: &Symbol) -> String {
        let base = &self.base_url;
        let symbol = symbol.as_str();

        match kind {
            ReportKind::Abstract => format!("{base}/new/{symbol}/finance.html"),
            ReportKind::BalanceSheet => format!("{base}/api/stock/finance/{symbol}_debt.json"),
            ReportKind::IncomeStatement => {
                format!("{base}/api/stock/finance/{symbol}_benefit.json")
            }
            ReportKind::CashFlow => format!("{base}/api/stock/finance/{symbol}_cash.json"),
            ReportKind::ShareholderChanges => format!("{base}/new/{symbol}/event.html"),
        }
    }

    /// Fetch and unwrap the finance document behind a report.
    async fn fetch_payload(&self, kind: ReportKind, symbol: &Symbol) -> Result<FinancePayload> {
        let url = self.report_url(kind, symbol);
        debug!(report = %kind, %symbol, "Fetching finance payload");

        let body = self.fetcher.fetch(&url, Charset::Utf8).await?;
        let document = match kind {
            ReportKind::Abstract => payload::extract_main_payload(&body)?,
            _ => payload::unwrap_flash_data(&body)?,
        };

        FinancePayload::from_json(&document)
    }

    /// Fetch a finance report and reshape the sub-table picked by `selector`.
    async fn fetch_report<S: PeriodSelector>(
        &self,
        kind: ReportKind,
        symbol: &Symbol,
        selector: S,
    ) -> Result<DataFrame> {
        let payload = self.fetch_payload(kind, symbol).await?;
        let sub_table = selector.sub_table();
        debug!(
            report = %kind,
            granularity = selector.label(),
            sub_table = sub_table.key(),
            "Selected sub-table"
        );

        reshape::reshape_report(&payload, sub_table)
    }
}

impl Default for ThsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DataProvider for ThsProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn description(&self) -> &str {
        "同花顺 financial reports and shareholder events from basic.10jqka.com.cn"
    }

    fn supported_reports(&self) -> &[ReportKind] {
        &ReportKind::ALL
    }
}

#[async_trait]
impl FinancialReportProvider for ThsProvider {
    async fn fetch_abstract(
        &self,
        symbol: &Symbol,
        granularity: Granularity,
    ) -> Result<DataFrame> {
        self.fetch_report(ReportKind::Abstract, symbol, granularity)
            .await
    }

    async fn fetch_balance_sheet(
        &self,
        symbol: &Symbol,
        granularity: BalanceSheetGranularity,
    ) -> Result<DataFrame> {
        self.fetch_report(ReportKind::BalanceSheet, symbol, granularity)
            .await
    }

    async fn fetch_income_statement(
        &self,
        symbol: &Symbol,
        granularity: Granularity,
    ) -> Result<DataFrame> {
        self.fetch_report(ReportKind::IncomeStatement, symbol, granularity)
            .await
    }

    async fn fetch_cash_flow(
        &self,
        symbol: &Symbol,
        granularity: Granularity,
    ) -> Result<DataFrame> {
        self.fetch_report(ReportKind::CashFlow, symbol, granularity)
            .await
    }
}

#[async_trait]
impl ShareholderEventProvider for ThsProvider {
    async fn fetch_shareholder_changes(&self, symbol: &Symbol) -> Result<DataFrame> {
        let url = self.report_url(ReportKind::ShareholderChanges, symbol);
        debug!(%symbol, "Fetching shareholder changes");

        let html = self
            .fetcher
            .fetch_with_user_agent(&url, Charset::Gbk, &self.event_user_agent)
            .await?;
        events::parse_shareholder_changes(&html)
    }
}
