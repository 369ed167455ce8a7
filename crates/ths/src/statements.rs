//! All four financial reports of a security, fetched together.

use futures::try_join;
use polars::prelude::DataFrame;
use tracing::debug;

use ths_core::{
    BalanceSheetGranularity, FinancialReportProvider, Granularity, ReportKind, Result, Symbol,
};

/// The four financial reports of one security at one granularity.
#[derive(Clone, Debug)]
pub struct FinancialStatements {
    /// Summary financial indicators (主要指标).
    pub abstract_indicators: DataFrame,
    /// Balance sheet (资产负债表).
    pub balance_sheet: DataFrame,
    /// Income statement (利润表).
    pub income_statement: DataFrame,
    /// Cash-flow statement (现金流量表).
    pub cash_flow: DataFrame,
}

impl FinancialStatements {
    /// Returns the table of a financial report kind, or `None` for
    /// [`ReportKind::ShareholderChanges`].
    #[must_use]
    pub const fn get(&self, kind: ReportKind) -> Option<&DataFrame> {
        match kind {
            ReportKind::Abstract => Some(&self.abstract_indicators),
            ReportKind::BalanceSheet => Some(&self.balance_sheet),
            ReportKind::IncomeStatement => Some(&self.income_statement),
            ReportKind::CashFlow => Some(&self.cash_flow),
            ReportKind::ShareholderChanges => None,
        }
    }
}

/// Fetches all four financial reports of `symbol` concurrently.
///
/// The balance sheet has no single-quarter view, so
/// [`Granularity::BySingleQuarter`] reads its fiscal-year view instead. The
/// first failing request fails the whole call.
pub async fn fetch_financial_statements<P>(
    provider: &P,
    symbol: &Symbol,
    granularity: Granularity,
) -> Result<FinancialStatements>
where
    P: FinancialReportProvider + ?Sized,
{
    debug!(
        provider = provider.name(),
        %symbol,
        %granularity,
        "Fetching financial statements"
    );

    let (abstract_indicators, balance_sheet, income_statement, cash_flow) = try_join!(
        provider.fetch_abstract(symbol, granularity),
        provider.fetch_balance_sheet(symbol, BalanceSheetGranularity::from(granularity)),
        provider.fetch_income_statement(symbol, granularity),
        provider.fetch_cash_flow(symbol, granularity),
    )?;

    Ok(FinancialStatements {
        abstract_indicators,
        balance_sheet,
        income_statement,
        cash_flow,
    })
}
