#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ths/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for the 10jqka (Tonghuashun) data extractors.
//!
//! This crate provides the abstractions shared by the provider and facade crates:
//!
//! - [`DataProvider`](provider::DataProvider) - Base trait for all providers
//! - [`FinancialReportProvider`](provider::FinancialReportProvider) - Period-indexed financial reports
//! - [`ShareholderEventProvider`](provider::ShareholderEventProvider) - Shareholder change events
//! - [`HttpFetch`](fetch::HttpFetch) - The I/O boundary every provider fetches through

/// Error types for data operations.
pub mod error;
/// HTTP fetch abstraction.
pub mod fetch;
/// Granularity selectors and sub-table dispatch.
pub mod granularity;
/// Provider traits for fetching report tables.
pub mod provider;
/// Core data types (Symbol, ReportKind).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{DataError, Result};
pub use fetch::{Charset, HttpFetch};
pub use granularity::{BalanceSheetGranularity, Granularity, PeriodSelector, SubTable};
pub use provider::{DataProvider, FinancialReportProvider, ShareholderEventProvider};
pub use types::{PERIOD_COLUMN, ReportKind, Symbol};
