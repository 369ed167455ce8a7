//! Provider traits for fetching report tables.
//!
//! This module defines the core provider traits:
//!
//! - [`DataProvider`] - Base trait for all data providers
//! - [`FinancialReportProvider`] - Period-indexed financial reports
//! - [`ShareholderEventProvider`] - Shareholder change events

use async_trait::async_trait;
use polars::prelude::DataFrame;
use std::fmt::Debug;

use crate::{
    error::Result,
    granularity::{BalanceSheetGranularity, Granularity},
    types::{ReportKind, Symbol},
};

/// Base trait for all data providers.
pub trait DataProvider: Send + Sync + Debug {
    /// Returns the name of this provider.
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;

    /// Returns the report kinds served by this provider.
    fn supported_reports(&self) -> &[ReportKind];
}

/// Provider for period-indexed financial reports.
///
/// Every method returns a DataFrame with one row per reporting period and one
/// string column per metric, led by the [`PERIOD_COLUMN`](crate::PERIOD_COLUMN)
/// column. Rows keep the upstream period order and metric columns keep the
/// upstream title order.
#[async_trait]
pub trait FinancialReportProvider: DataProvider {
    /// Fetches the summary financial indicators (主要指标).
    async fn fetch_abstract(
        &self,
        symbol: &Symbol,
        granularity: Granularity,
    ) -> Result<DataFrame>;

    /// Fetches the balance sheet (资产负债表).
    async fn fetch_balance_sheet(
        &self,
        symbol: &Symbol,
        granularity: BalanceSheetGranularity,
    ) -> Result<DataFrame>;

    /// Fetches the income statement (利润表).
    async fn fetch_income_statement(
        &self,
        symbol: &Symbol,
        granularity: Granularity,
    ) -> Result<DataFrame>;

    /// Fetches the cash-flow statement (现金流量表).
    async fn fetch_cash_flow(
        &self,
        symbol: &Symbol,
        granularity: Granularity,
    ) -> Result<DataFrame>;
}

/// Provider for shareholder change events.
#[async_trait]
pub trait ShareholderEventProvider: DataProvider {
    /// Fetches shareholder holding changes (股东持股变动).
    ///
    /// Returns one string column per header cell of the upstream event table,
    /// one row per event. A page without the event table yields an empty
    /// DataFrame (no columns, no rows).
    async fn fetch_shareholder_changes(&self, symbol: &Symbol) -> Result<DataFrame>;
}
