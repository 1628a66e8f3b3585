use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tally_finance::{parse_outcome, ParseOutcome};
use tally_ingest::{MissingDate, ParseOptions};
use tracing::{debug, error};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

mod config;
mod prefs;
mod state;
mod summary;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Summarize spending from bank statement CSV exports")]
struct Cli {
    /// Log verbosity when RUST_LOG is not set
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    /// Directory holding config.toml and prefs.json (default: ~/.tally)
    #[arg(long, global = true, env = "TALLY_HOME")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a statement CSV and print monthly, weekly and daily spending
    Summary {
        /// Path to the bank export
        #[arg(long)]
        csv: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also write the normalized transactions to this CSV file
        #[arg(long)]
        export: Option<PathBuf>,

        /// What to do with rows that have no date: today|discard
        #[arg(long)]
        missing_date: Option<MissingDate>,

        /// Number of transactions listed in the text report
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show or flip the dark-mode preference
    Theme {
        #[arg(long)]
        toggle: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config.toml if none exists
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level.to_string().to_lowercase());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let home = state::ensure_tally_home(cli.home.as_deref())?;

    match cli.command {
        Command::Summary {
            csv,
            json,
            export,
            missing_date,
            limit,
        } => {
            let cfg = config::load_config(&home)?;
            let text = state::read_statement(&csv)?;
            let opts = ParseOptions::default()
                .with_missing_date(missing_date.unwrap_or(cfg.parse.missing_date));

            let outcome = parse_outcome(&text, &opts);
            let mut stdout = std::io::stdout().lock();

            match &outcome {
                ParseOutcome::Unparsable(_) => summary::write_unparsable(&mut stdout, &outcome)?,
                ParseOutcome::Parsed { result, stats } => {
                    if json || cfg.output.json {
                        writeln!(stdout, "{}", result.to_json()?)?;
                    } else {
                        let limit = limit.unwrap_or(cfg.output.limit);
                        summary::write_text_report(&mut stdout, result, stats, limit)?;
                    }
                    if let Some(path) = export {
                        summary::export_transactions(&path, &result.transactions)?;
                        eprintln!("Wrote {} transactions to {}", result.transaction_count, path.display());
                    }
                }
            }
        }

        Command::Theme { toggle } => {
            let store = prefs::FileStore::new(state::prefs_path(&home));
            let mut theme = prefs::ThemeSettings::load(store, prefs::terminal_prefers_dark)?;
            if toggle {
                theme.toggle()?;
            }
            println!("dark mode: {}", if theme.dark_mode() { "on" } else { "off" });
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&home)?,
        },
    }

    Ok(())
}

/// Initializes the tracing subscriber. RUST_LOG wins when set; otherwise
/// `level` applies to the tally crates only.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "tally={level},tally_core={level},tally_ingest={level},tally_finance={level}"
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
