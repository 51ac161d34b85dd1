// src/main.rs
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{error, info};
use portfolio_returns::models::{Portfolio, DATE_FORMAT};
use portfolio_returns::{api, loader};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
struct Cli {
    /// JSON file with the stock records.
    #[arg(long, env = "PORTFOLIO_FILE", default_value = "stock.json")]
    file: PathBuf,
    /// env_logger filter directives, e.g. `info` or `portfolio_returns=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_filter: String,

    /// Defaults to `report` with its default dates.
    #[command(subcommand)]
    command: Option<Commands>,
}

impl Cli {
    fn into_command(self) -> Commands {
        self.command
            .unwrap_or_else(|| Commands::Report(ReportArgs::parse_from(["report"])))
    }
}

#[derive(Parser, Debug, Clone, PartialEq)]
struct ReportArgs {
    #[arg(long, default_value = "2024-01-01")]
    start: NaiveDate,
    #[arg(long, default_value = "2024-06-01")]
    end: NaiveDate,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print profit and annualized return between two dates.
    Report(ReportArgs),
    /// Serve portfolio queries over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:3030")]
        address: SocketAddr,
    },
}

/// Writes the profit and annualized return lines. Returns `false` when a calculation fails.
fn report<W: Write>(
    portfolio: &Portfolio,
    range: &ReportArgs,
    out: &mut W,
) -> io::Result<bool> {
    let (start, end) = (range.start, range.end);
    let (start_str, end_str) = (start.format(DATE_FORMAT), end.format(DATE_FORMAT));

    let profit = match portfolio.profit(start, end) {
        Ok(profit) => profit,
        Err(e) => {
            writeln!(out, "Error calculating profit: {}", e)?;
            return Ok(false);
        }
    };
    writeln!(out, "Profit from {} to {}: {:.2}", start_str, end_str, profit)?;

    let rate = match portfolio.annualized_return(start, end) {
        Ok(rate) => rate,
        Err(e) => {
            writeln!(out, "Error calculating annualized return: {}", e)?;
            return Ok(false);
        }
    };
    writeln!(
        out,
        "Annualized Return from {} to {}: {:.2}%",
        start_str,
        end_str,
        rate * 100.0
    )?;
    Ok(true)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    Builder::new()
        .parse_filters(&cli.log_filter)
        .format_timestamp_secs()
        .init();

    let portfolio = match loader::load_portfolio(&cli.file) {
        Ok(portfolio) => portfolio,
        Err(e) => {
            error!("Error loading stocks: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.into_command() {
        Commands::Report(range) => match report(&portfolio, &range, &mut io::stdout()) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(e) => {
                error!("Failed to write report: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Serve { address } => {
            let routes = api::routes(Arc::new(portfolio));
            info!("Server running on http://{}", address);
            warp::serve(routes).run(address).await;
            ExitCode::SUCCESS
        }
    }
}
