//! Granularity selectors and sub-table dispatch.
//!
//! Every finance payload carries the same metrics three times, once per
//! [`SubTable`]. The caller picks one through a granularity selector:
//! [`Granularity`] for the summary, income and cash-flow reports, and
//! [`BalanceSheetGranularity`] for the balance sheet, which has no
//! single-quarter view.
//!
//! Selectors parsed from their labels never fail. Anything that is not a
//! recognized label resolves to the fiscal-year view.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Label for the report-period view.
pub const BY_REPORT_PERIOD: &str = "按报告期";
/// Label for the single-quarter view.
pub const BY_SINGLE_QUARTER: &str = "按单季度";
/// Label for the fiscal-year view.
pub const BY_YEAR: &str = "按年度";

/// One of the three parallel 2-D arrays inside a finance payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubTable {
    /// Cumulative figures per published report period (`report`).
    Report,
    /// Single-quarter deltas (`simple`).
    Simple,
    /// Fiscal-year aggregates (`year`).
    Year,
}

impl SubTable {
    /// Returns the payload key holding this sub-table.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::Simple => "simple",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for SubTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A caller-facing selector that resolves to a [`SubTable`].
pub trait PeriodSelector: Copy + fmt::Debug + Send + Sync {
    /// The sub-table this selector reads.
    fn sub_table(&self) -> SubTable;

    /// The upstream label of this selector (e.g. "按报告期").
    fn label(&self) -> &'static str;
}

/// Granularity for the summary, income-statement and cash-flow reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// By report period (按报告期).
    #[default]
    ByReportPeriod,
    /// By single quarter (按单季度).
    BySingleQuarter,
    /// By fiscal year (按年度).
    ByYear,
}

impl Granularity {
    /// Resolves a selector label. Unrecognized labels fall back to [`Self::ByYear`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            BY_REPORT_PERIOD => Self::ByReportPeriod,
            BY_SINGLE_QUARTER => Self::BySingleQuarter,
            _ => Self::ByYear,
        }
    }
}

impl PeriodSelector for Granularity {
    fn sub_table(&self) -> SubTable {
        match self {
            Self::ByReportPeriod => SubTable::Report,
            Self::BySingleQuarter => SubTable::Simple,
            Self::ByYear => SubTable::Year,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::ByReportPeriod => BY_REPORT_PERIOD,
            Self::BySingleQuarter => BY_SINGLE_QUARTER,
            Self::ByYear => BY_YEAR,
        }
    }
}

impl FromStr for Granularity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Granularity for the balance sheet, which is published per report period
/// and per fiscal year only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceSheetGranularity {
    /// By report period (按报告期).
    #[default]
    ByReportPeriod,
    /// By fiscal year (按年度).
    ByYear,
}

impl BalanceSheetGranularity {
    /// Resolves a selector label. Anything but "按报告期" is [`Self::ByYear`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            BY_REPORT_PERIOD => Self::ByReportPeriod,
            _ => Self::ByYear,
        }
    }
}

impl PeriodSelector for BalanceSheetGranularity {
    fn sub_table(&self) -> SubTable {
        match self {
            Self::ByReportPeriod => SubTable::Report,
            Self::ByYear => SubTable::Year,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::ByReportPeriod => BY_REPORT_PERIOD,
            Self::ByYear => BY_YEAR,
        }
    }
}

impl From<Granularity> for BalanceSheetGranularity {
    fn from(granularity: Granularity) -> Self {
        match granularity {
            Granularity::ByReportPeriod => Self::ByReportPeriod,
            _ => Self::ByYear,
        }
    }
}

impl FromStr for BalanceSheetGranularity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl fmt::Display for BalanceSheetGranularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
