use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use elibrary_core::{AppConfig, ExitCode, LibraryService};

mod command;

use command::Shell;

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "elibrary",
    about = "In-memory e-library catalog: borrow, return, undo, search",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format, one object per response.
    /// Also enabled by setting ELIBRARY_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Config file to load instead of the standard location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start with an empty catalog instead of the configured seed books.
    #[arg(long, global = true)]
    no_seed: bool,

    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List all books in the catalog.
    List,

    /// Search books by title or author.
    Search { keyword: String },

    /// Run shell commands in order, e.g. `run "borrow 1984" undo`.
    /// Stops at the first failing command and exits with its code.
    Run {
        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file path.
    Path,
    /// Print the effective configuration as TOML.
    Show,
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let json_output = cli.json || std::env::var("ELIBRARY_JSON").as_deref() == Ok("1");

    let (config_path, config) = match cli.config.clone() {
        Some(path) => {
            let config = AppConfig::load_from(&path)?;
            (path, config)
        }
        None => (AppConfig::config_path(), AppConfig::load()?),
    };
    init_tracing(&config, cli.verbose)?;

    let mut service = LibraryService::new();
    if !cli.no_seed {
        config.seed(&mut service);
    }

    let stdout = io::stdout();

    match cli.command {
        None => {
            let stdin = io::stdin();
            Shell::new(&mut service, stdin.lock(), stdout.lock(), json_output).run()?;
        }

        Some(Commands::List) => {
            Shell::new(&mut service, io::empty(), stdout.lock(), json_output)
                .run_script(["list"])?;
        }

        Some(Commands::Search { keyword }) => {
            let code = Shell::new(&mut service, io::empty(), stdout.lock(), json_output)
                .run_script([search_line(&keyword)])?;
            exit_on_failure(code);
        }

        Some(Commands::Run { commands }) => {
            let code = Shell::new(&mut service, io::empty(), stdout.lock(), json_output)
                .run_script(&commands)?;
            exit_on_failure(code);
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Path => {
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":{"path":config_path}}))?;
                } else {
                    println!("{}", config_path.display());
                }
            }
            ConfigAction::Show => {
                if json_output {
                    print_json(&serde_json::json!({"status":"ok","data":config}))?;
                } else {
                    print!("{}", toml::to_string_pretty(&config)?);
                }
            }
        },
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn init_tracing(config: &AppConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        config.log_level()?
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init()
        .ok();
    Ok(())
}

/// Shell line for the one-shot `search` subcommand, so the keyword is
/// trimmed and validated exactly like `run "search ..."`.
fn search_line(keyword: &str) -> String {
    format!("search {keyword}")
}

fn exit_on_failure(code: ExitCode) {
    if code != ExitCode::Success {
        std::process::exit(code.into());
    }
}

fn json_line(val: &serde_json::Value) -> Result<String> {
    Ok(serde_json::to_string(val)?)
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", json_line(val)?);
    Ok(())
}
