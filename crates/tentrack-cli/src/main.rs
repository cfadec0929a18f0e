//! tentrack CLI
//!
//! Terminal interface for the tent inventory API.
//! Runs the TUI by default; subcommands run headless.

use std::io;

use clap::{Parser, Subcommand};
use tracing::info;

use tentrack_cli::client::ApiClient;
use tentrack_cli::config::CliConfig;
use tentrack_cli::headless::{self, OutputFormat};
use tentrack_cli::tui;
use tentrack_core::tracing_init::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "tentrack")]
#[command(version, about = "Tent inventory terminal client", long_about = None)]
struct Cli {
    /// API base URL (overrides ~/.tentrack/config.json)
    #[arg(long, env = "TENTRACK_API_URL", global = true)]
    api_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all tents, newest first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show tent counts per status
    Stats {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Delete a tent by ID
    Delete {
        /// Tent ID
        id: String,
    },
    /// Show or persist the API URL
    Config {
        /// URL to store in ~/.tentrack/config.json
        #[arg(long = "set-api-url")]
        set_api_url: Option<String>,
    },
}

const fn output_format(json: bool) -> OutputFormat {
    if json { OutputFormat::Json } else { OutputFormat::Table }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it only logs warnings.
    let default_filter = if cli.command.is_some() {
        "tentrack=info,tentrack_cli=info"
    } else {
        "tentrack=warn,tentrack_cli=warn"
    };
    init_tracing(default_filter, cli.log_json);

    let mut config = CliConfig::load();
    let api_url = config.resolve_api_url(cli.api_url.as_deref());
    info!(version = env!("CARGO_PKG_VERSION"), %api_url, "Starting tentrack CLI");

    let mut stdout = io::stdout().lock();
    match cli.command {
        None => {
            drop(stdout);
            let api = ApiClient::new(&api_url)?;
            tui::run(api).await?;
        }
        Some(Command::List { json }) => {
            let api = ApiClient::new(&api_url)?;
            headless::list(&api, &mut stdout, output_format(json)).await?;
        }
        Some(Command::Stats { json }) => {
            let api = ApiClient::new(&api_url)?;
            headless::stats(&api, &mut stdout, output_format(json)).await?;
        }
        Some(Command::Delete { id }) => {
            let api = ApiClient::new(&api_url)?;
            headless::delete(&api, &mut stdout, &id).await?;
        }
        Some(Command::Config { set_api_url }) => {
            headless::configure(&mut config, set_api_url, &mut stdout)?;
        }
    }

    Ok(())
}
