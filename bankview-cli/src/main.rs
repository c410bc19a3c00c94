//! bankview - review bank-statement transactions from the terminal
//!
//! Usage:
//!   bankview summary                         Totals and monthly cards
//!   bankview list --month 2024-03            Filtered transactions
//!   bankview chart --type expense            Spending by category
//!   bankview categorize <id> "Food & Drinks" Assign a category
//!   bankview upload statement.pdf            Upload a statement

use anyhow::Result;
use bankview_ingest::StatementClient;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod export;
mod render;
mod state;

use commands::{App, FilterArgs};
use render::{Style, render_categories};

#[derive(Parser, Debug)]
#[command(
    name = "bankview",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BANKVIEW_BUILD_SHA"), ")"),
    about = "Review bank-statement transactions and assign categories"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Statement backend URL (overrides config.toml)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Income/expense totals, net balance and monthly cards
    Summary,

    /// List transactions matching the filters
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Expense breakdown by category
    Chart {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Assign a category to a transaction (similar merchants follow)
    Categorize {
        /// Transaction id
        id: String,
        /// Default or custom category name
        category: String,
    },

    /// Upload a PDF statement to the backend
    Upload {
        file: PathBuf,
    },

    /// Show the default categories and their colors
    Categories,

    /// Show available month and category filter values
    Filters,

    /// Write the filtered transactions to CSV
    Export {
        #[arg(long)]
        out: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Manage ~/.bankview/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();

    let mut cfg = config::load_config()?;
    if let Some(url) = cli.server {
        cfg.server.base_url = url;
    }
    let style = Style::new(cfg.display.currency_symbol.clone(), cfg.display.color && !cli.no_color);

    match &cli.command {
        Command::Categories => {
            print!("{}", render_categories(&style));
            return Ok(());
        }
        Command::Config { command } => {
            return match command {
                ConfigCommand::Init => config::init_config(),
                ConfigCommand::Show => config::show_config(&cfg),
            };
        }
        _ => {}
    }

    let app = App {
        client: StatementClient::new(&cfg.server.base_url, cfg.server.timeout())?,
        overrides: state::override_store()?,
        style,
    };

    match cli.command {
        Command::Summary => app.summary().await,
        Command::List { filters } => app.list(&filters).await,
        Command::Chart { filters } => app.chart(&filters).await,
        Command::Categorize { id, category } => app.categorize(&id, &category).await,
        Command::Upload { file } => app.upload(&file).await,
        Command::Filters => app.filters().await,
        Command::Export { out, filters } => app.export(&out, &filters).await,
        Command::Categories | Command::Config { .. } => Ok(()),
    }
}
