//! Core data types.
//!
//! - [`Symbol`] - Exchange-listed stock code
//! - [`ReportKind`] - The five upstream report endpoints
//! - [`PERIOD_COLUMN`] - Name of the leading column of every financial report table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the leading period-label column in every financial report table.
pub const PERIOD_COLUMN: &str = "报告期";

/// A stock code such as `000063` or `688981`.
///
/// The code is opaque: it is only interpolated into request URLs and is kept
/// exactly as given.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// The report endpoints a provider can serve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    /// Summary financial indicators (主要指标).
    Abstract,
    /// Balance sheet (资产负债表).
    BalanceSheet,
    /// Income statement (利润表).
    IncomeStatement,
    /// Cash-flow statement (现金流量表).
    CashFlow,
    /// Shareholder holding changes (股东持股变动).
    ShareholderChanges,
}

impl ReportKind {
    /// All report kinds, in upstream page order.
    pub const ALL: [Self; 5] = [
        Self::Abstract,
        Self::BalanceSheet,
        Self::IncomeStatement,
        Self::CashFlow,
        Self::ShareholderChanges,
    ];

    /// Returns the upstream display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Abstract => "主要指标",
            Self::BalanceSheet => "资产负债表",
            Self::IncomeStatement => "利润表",
            Self::CashFlow => "现金流量表",
            Self::ShareholderChanges => "股东持股变动",
        }
    }

    /// Returns true for the period-indexed financial reports.
    #[must_use]
    pub const fn is_financial(&self) -> bool {
        !matches!(self, Self::ShareholderChanges)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
