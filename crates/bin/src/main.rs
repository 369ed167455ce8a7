//! Command-line interface for the 10jqka data extractors.
//!
//! ```text
//! ths abstract 000063 --granularity 按单季度
//! ths debt 002004 -g year --output debt.parquet
//! ths events 688981
//! ths all 000063 --output-dir ./out
//! ```
//!
//! Exits with status 2 when the site cannot be reached, rate limits or
//! does not know the symbol, and 1 for any other failure.

use std::convert::Infallible;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use polars::prelude::{DataFrame, ParquetWriter};
use ths::{
    BalanceSheetGranularity, DataError, FinancialReportProvider, Granularity, ReportKind, Result,
    ShareholderEventProvider, Symbol, ThsConfig, ThsProvider, fetch_financial_statements,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ths", version, about = "Fetch 10jqka financial reports and shareholder events")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Override the site base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summary financial indicators (主要指标).
    Abstract(ReportArgs),
    /// Balance sheet (资产负债表).
    Debt(ReportArgs),
    /// Income statement (利润表).
    Benefit(ReportArgs),
    /// Cash-flow statement (现金流量表).
    Cash(ReportArgs),
    /// Shareholder holding changes (股东持股变动).
    Events(EventArgs),
    /// All four financial reports, fetched concurrently.
    All(AllArgs),
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Stock code, e.g. 000063.
    symbol: String,

    /// 按报告期 / 按单季度 / 按年度, or report / quarter / year.
    /// Anything else reads the fiscal-year view.
    #[arg(short, long, default_value = "按报告期", value_parser = parse_granularity)]
    granularity: Granularity,

    /// Write the table to this Parquet file instead of printing it.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct EventArgs {
    /// Stock code, e.g. 688981.
    symbol: String,

    /// Write the table to this Parquet file instead of printing it.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct AllArgs {
    /// Stock code, e.g. 000063.
    symbol: String,

    /// 按报告期 / 按单季度 / 按年度, or report / quarter / year.
    #[arg(short, long, default_value = "按报告期", value_parser = parse_granularity)]
    granularity: Granularity,

    /// Write one Parquet file per report into this directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

/// Accepts the upstream labels plus short English aliases.
fn parse_granularity(value: &str) -> std::result::Result<Granularity, Infallible> {
    Ok(match value {
        "report" => Granularity::ByReportPeriod,
        "quarter" => Granularity::BySingleQuarter,
        "year" => Granularity::ByYear,
        label => Granularity::from_label(label),
    })
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit(mut df: DataFrame, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| DataError::Other(format!("{}: {e}", path.display())))?;
            ParquetWriter::new(file)
                .finish(&mut df)
                .map_err(|e| DataError::Other(e.to_string()))?;
            info!(path = %path.display(), rows = df.height(), "Wrote table");
        }
        None => println!("{df}"),
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = ThsConfig::default();
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }
    let provider = ThsProvider::with_config(config)?;

    match cli.command {
        Command::Abstract(args) => {
            let symbol = Symbol::new(args.symbol);
            let df = provider.fetch_abstract(&symbol, args.granularity).await?;
            emit(df, args.output.as_deref())
        }
        Command::Debt(args) => {
            let symbol = Symbol::new(args.symbol);
            let granularity = BalanceSheetGranularity::from(args.granularity);
            let df = provider.fetch_balance_sheet(&symbol, granularity).await?;
            emit(df, args.output.as_deref())
        }
        Command::Benefit(args) => {
            let symbol = Symbol::new(args.symbol);
            let df = provider
                .fetch_income_statement(&symbol, args.granularity)
                .await?;
            emit(df, args.output.as_deref())
        }
        Command::Cash(args) => {
            let symbol = Symbol::new(args.symbol);
            let df = provider.fetch_cash_flow(&symbol, args.granularity).await?;
            emit(df, args.output.as_deref())
        }
        Command::Events(args) => {
            let symbol = Symbol::new(args.symbol);
            let df = provider.fetch_shareholder_changes(&symbol).await?;
            if df.width() == 0 {
                info!(%symbol, "No shareholder changes published");
            }
            emit(df, args.output.as_deref())
        }
        Command::All(args) => {
            let symbol = Symbol::new(args.symbol);
            let statements =
                fetch_financial_statements(&provider, &symbol, args.granularity).await?;

            if let Some(dir) = &args.output_dir {
                fs::create_dir_all(dir)
                    .map_err(|e| DataError::Other(format!("{}: {e}", dir.display())))?;
            }

            for kind in ReportKind::ALL.into_iter().filter(ReportKind::is_financial) {
                let Some(df) = statements.get(kind) else {
                    continue;
                };
                let output = args
                    .output_dir
                    .as_ref()
                    .map(|dir| dir.join(format!("{symbol}_{}.parquet", file_stem(kind))));
                if output.is_none() {
                    println!("{kind}");
                }
                emit(df.clone(), output.as_deref())?;
            }

            Ok(())
        }
    }
}

const fn file_stem(kind: ReportKind) -> &'static str {
    match kind {
        ReportKind::Abstract => "abstract",
        ReportKind::BalanceSheet => "debt",
        ReportKind::IncomeStatement => "benefit",
        ReportKind::CashFlow => "cash",
        ReportKind::ShareholderChanges => "events",
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        if err.is_transport() {
            error!(error = %err, "Request failed");
        } else {
            error!(error = %err, "Could not read the response");
        }
        std::process::exit(exit_code(&err));
    }
}

/// 2 when the site could not be reached or refused the request, 1 otherwise.
const fn exit_code(err: &DataError) -> i32 {
    if err.is_transport() { 2 } else { 1 }
}
