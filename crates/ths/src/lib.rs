#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ths/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Unified interface for 10jqka financial data.
//!
//! This crate re-exports the core types and the [`ThsProvider`] implementation,
//! and provides [`fetch_financial_statements`] for pulling all four financial
//! reports of a security at once.
//!
//! # Example
//!
//! ```rust,ignore
//! use ths::{Granularity, Symbol, ThsProvider, fetch_financial_statements};
//!
//! #[tokio::main]
//! async fn main() -> ths::Result<()> {
//!     let provider = ThsProvider::new();
//!     let symbol = Symbol::new("000063");
//!
//!     let statements =
//!         fetch_financial_statements(&provider, &symbol, Granularity::ByYear).await?;
//!     println!("{:?}", statements.income_statement);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use ths_core::*;

// Provider
pub use ths_jqka::{ReqwestFetcher, ThsConfig, ThsProvider};

mod statements;
pub use statements::{FinancialStatements, fetch_financial_statements};
