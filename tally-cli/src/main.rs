use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{stderr, stdout};
use std::path::PathBuf;
use tally_core::today_in;
use tally_ingest::{decode_statement, import_statement, ImportOutcome, StatementParser};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

mod config;
mod output;
mod state;
mod store;

use config::Config;
use output::{OutputFormat, Totals};
use store::JsonlStore;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TALLY_BUILD_SHA"), ")"),
    about = "Bank statement CSV ingestion"
)]
struct Cli {
    /// Config file (default: ~/.tally/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// error, warn, info, debug or trace (overrides config)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement and print the detected transactions
    Preview {
        /// Path to the bank CSV export
        #[arg(long)]
        csv: PathBuf,

        /// Output format (default from config: table)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Parse a statement and save its transactions for an owner
    Import {
        /// Path to the bank CSV export
        #[arg(long)]
        csv: PathBuf,

        /// Owning user id
        #[arg(long)]
        owner: String,

        /// JSON-lines store file (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// Config file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = config::resolve_path(cli.config.as_deref())?;
    let cfg = config::load_config(&config_path)?;

    let level = cli.log_level.as_deref().unwrap_or(&cfg.log.level);
    setup_logging(parse_log_level(level));

    match cli.command {
        Command::Preview { csv, format } => {
            let parser = build_parser(&cfg)?;
            let bytes = state::read_statement(&csv)?;
            let text = decode_statement(&bytes).with_context(|| format!("decoding {}", csv.display()))?;

            let preview = parser.preview(text);
            output::write_preview(
                &mut stdout().lock(),
                &mut stderr().lock(),
                &preview,
                format.unwrap_or(cfg.preview.format),
            )?;
            if preview.skipped > 0 {
                info!(skipped = preview.skipped, "rows without a usable amount were skipped");
            }
        }

        Command::Import { csv, owner, store } => {
            let parser = build_parser(&cfg)?;
            let store_path = match store {
                Some(p) => p,
                None => cfg.store_path()?,
            };
            let store = JsonlStore::new(store_path);

            let bytes = state::read_statement(&csv)?;
            let text = decode_statement(&bytes).with_context(|| format!("decoding {}", csv.display()))?;

            let outcome = import_statement(&parser, &store, &owner, text)
                .await
                .with_context(|| format!("importing {}", csv.display()))?;

            match outcome {
                ImportOutcome::NoTransactions => {
                    println!("No transactions detected in {}; nothing imported.", csv.display());
                    println!("Check that the header names a date, description and debit/credit or amount column.");
                }
                ImportOutcome::Imported { parsed, inserted } => {
                    let saved = store.transactions_for(&owner).await?;
                    let totals = Totals::of(&saved);
                    println!("Parsed {} transactions from {}", parsed, csv.display());
                    println!(
                        "Imported {} new ({} already present) into {}",
                        inserted,
                        parsed.saturating_sub(inserted),
                        store.path().display()
                    );
                    println!(
                        "Owner {}: {} transactions | income={:.2} | expense={:.2}",
                        owner,
                        saved.len(),
                        totals.income,
                        totals.expense
                    );
                }
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&config_path)?,
            ConfigCommand::Show => {
                println!("# {}", config_path.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn build_parser(cfg: &Config) -> Result<StatementParser> {
    let today = today_in(&cfg.ingest.timezone)
        .with_context(|| format!("config [ingest] timezone = {:?}", cfg.ingest.timezone))?;
    if cfg.categories.as_ref().is_some_and(|c| c.rules.is_empty()) {
        bail!("config [categories] has no rules; remove the section to use the defaults");
    }
    Ok(StatementParser::new(today).with_rules(cfg.category_rules()))
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'warn'", level);
            LevelFilter::WARN
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // stdout carries the rendered statement, logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_preview() {
        let cli = Cli::try_parse_from(["tally", "preview", "--csv", "s.csv", "--format", "json"]).unwrap();
        match cli.command {
            Command::Preview { csv, format } => {
                assert_eq!(csv, PathBuf::from("s.csv"));
                assert_eq!(format, Some(OutputFormat::Json));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_cli_import_requires_owner() {
        assert!(Cli::try_parse_from(["tally", "import", "--csv", "s.csv"]).is_err());
        let cli = Cli::try_parse_from(["tally", "--log-level", "debug", "import", "--csv", "s.csv", "--owner", "u1"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(parse_log_level("DEBUG"), LevelFilter::DEBUG);
        assert_eq!(parse_log_level("bogus"), LevelFilter::WARN);
    }

    #[test]
    fn test_build_parser_rejects_bad_timezone() {
        let mut cfg = Config::default();
        cfg.ingest.timezone = "Nowhere/Land".to_string();
        assert!(build_parser(&cfg).is_err());
    }

    #[test]
    fn test_build_parser_rejects_empty_rule_table() {
        let cfg = Config {
            categories: Some(config::CategoriesSection {
                fallback: "Misc".to_string(),
                rules: Vec::new(),
            }),
            ..Default::default()
        };
        assert!(build_parser(&cfg).is_err());
    }
}
