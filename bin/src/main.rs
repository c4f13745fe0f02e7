//! ratelens CLI - Currency exchange-rate API server and CSV analyzer.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;

use display::Format;
use logging::LogFormat;

#[derive(Parser)]
#[command(name = "ratelens")]
#[command(about = "Currency exchange-rate API server and CSV analyzer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (only warnings and errors are logged)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format
    #[arg(long, value_enum, env = "RATELENS_LOG_FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),

    /// Analyze a Date, Currency, Rate CSV file offline
    Analyze {
        /// CSV file to analyze
        file: PathBuf,

        /// Comma-separated currency codes. Defaults to every currency in the file.
        #[arg(short, long)]
        currencies: Option<String>,

        /// Start date (YYYY-MM-DD). Defaults to the earliest date in the file.
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to the latest date in the file.
        #[arg(short, long)]
        end: Option<String>,

        /// Resampling interval (1d, 1wk, 1mo)
        #[arg(short, long, default_value = "1d")]
        interval: String,

        /// Output: the analysis report (json) or the resampled rates (csv, ndjson)
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported currencies
    Currencies {
        /// Search pattern
        #[arg(short, long)]
        search: Option<String>,

        /// Query the upstream rate source instead of the built-in list
        #[arg(long)]
        online: bool,

        /// Upstream rate source base URL
        #[arg(long, env = "RATELENS_UPSTREAM_URL")]
        upstream_url: Option<String>,
    },

    /// Write the CSV upload template
    Template {
        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is not an error.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_tracing(cli.log_format, cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve(args) => commands::serve::serve(args).await,
        Commands::Analyze {
            file,
            currencies,
            start,
            end,
            interval,
            format,
            output,
        } => {
            commands::analyze::analyze(
                &file,
                currencies.as_deref(),
                start.as_deref(),
                end.as_deref(),
                &interval,
                format,
                output.as_deref(),
            )
            .await
        }
        Commands::Currencies {
            search,
            online,
            upstream_url,
        } => {
            commands::currencies::list_currencies(
                search.as_deref(),
                online,
                upstream_url.as_deref(),
            )
            .await
        }
        Commands::Template { output } => {
            commands::template::write_template(output.as_deref()).await
        }
    }
}
