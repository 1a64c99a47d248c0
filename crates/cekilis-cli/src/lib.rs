#![forbid(unsafe_code)]

mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

use cekilis_core::{
    resolve_cekilis_config_path, ConfigPathScope, Error, ExitCode, MachineError,
};
use cekilis_storefront::{init_tracing, StoreSource, StorefrontConfig};
use clap::{error::ErrorKind, ArgAction, Parser, Subcommand, ValueEnum};

use crate::output::{emit_error, OutputMode};

const CEKILIS_HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "cekilis")]
#[command(version)]
#[command(about = "Browse raffle tickets and artworks, price a ticket cart")]
#[command(help_template = CEKILIS_HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  CEKILIS_LOG_LEVEL   Log verbosity override\n  CEKILIS_CONFIG      Config file path\n  CEKILIS_STORE_ROOT  Local catalog directory\n  CEKILIS_STORE_URL   Remote catalog base URL"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, conflicts_with = "store_url")]
    store_root: Option<PathBuf>,
    #[arg(long, global = true)]
    store_url: Option<String>,
    #[arg(long, global = true)]
    page_size: Option<usize>,
    /// Category key to list; the show-all key lists everything.
    #[arg(long, global = true)]
    category: Option<String>,
    /// Fixed shuffle seed for reproducible listings.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[arg(long = "print-config-paths", default_value_t = false)]
    print_config_paths: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List tickets in shuffled display order.
    Tickets,
    /// List artworks in shuffled display order.
    Artworks,
    /// Distinct categories present in a collection.
    Categories {
        #[arg(long, value_enum, default_value_t = CollectionArg::Artworks)]
        collection: CollectionArg,
    },
    /// Days until a `dd.MM.yy` raffle date.
    Countdown {
        date: String,
        /// `YYYY-MM-DD` or RFC 3339; defaults to the current time.
        #[arg(long)]
        now: Option<String>,
    },
    /// Price a cart. Each item is `TICKET_ID` or `TICKET_ID:COUNT`; repeats merge.
    Cart {
        items: Vec<String>,
        /// `TICKET_ID:COUNT` overwrite applied after all items.
        #[arg(long = "set")]
        set: Vec<String>,
    },
    /// Field defaults applied when decoding a collection.
    Schema {
        #[arg(value_enum)]
        collection: CollectionArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum CollectionArg {
    Tickets,
    Artworks,
}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    match run() {
        Ok(()) => ProcessExitCode::from(ExitCode::Success.as_u8()),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code.as_u8())
        }
    }
}

fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(());
            }
            _ => {
                return Err(CliError {
                    exit_code: ExitCode::Usage,
                    machine: MachineError::new("usage_error", "invalid command line arguments")
                        .with_detail("error", &err.to_string()),
                });
            }
        },
    };
    let output_mode = OutputMode { json: cli.json };
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    if let Err(err) = init_tracing(false, level) {
        eprintln!("cekilis: logging disabled: {err}");
    }

    if cli.print_config_paths {
        return output::emit_config_paths(output_mode).map_err(CliError::from);
    }
    let command = cli.command.as_ref().ok_or_else(|| CliError {
        exit_code: ExitCode::Usage,
        machine: MachineError::new("usage_error", "missing command; see --help"),
    })?;

    match command {
        Commands::Countdown { date, now } => {
            commands::countdown(date, now.as_deref(), output_mode).map_err(CliError::from)
        }
        Commands::Schema { collection } => {
            commands::schema(*collection, output_mode).map_err(CliError::from)
        }
        Commands::Tickets
        | Commands::Artworks
        | Commands::Categories { .. }
        | Commands::Cart { .. } => {
            let config = load_config(&cli)?;
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| CliError::internal(format!("tokio runtime: {e}")))?;
            let ctx = commands::StoreCommand {
                config,
                category: cli.category.clone(),
                seed: cli.seed,
                output_mode,
            };
            runtime
                .block_on(commands::run_store_command(ctx, command))
                .map_err(CliError::from)
        }
    }
}

fn load_config(cli: &Cli) -> Result<StorefrontConfig, CliError> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| resolve_cekilis_config_path(ConfigPathScope::Workspace));
    let mut config = StorefrontConfig::load(Some(&path))?;
    if let Some(root) = &cli.store_root {
        config.store = StoreSource::LocalFs(root.clone());
    }
    if let Some(url) = &cli.store_url {
        config.store = StoreSource::Http(url.trim_end_matches('/').to_string());
    }
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    config.validate()?;
    Ok(config)
}

#[derive(Debug)]
pub(crate) struct CliError {
    exit_code: ExitCode,
    machine: MachineError,
}

impl CliError {
    fn internal(message: String) -> Self {
        Self {
            exit_code: ExitCode::Internal,
            machine: MachineError::new("internal_error", &message),
        }
    }
}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        Self {
            exit_code: err.exit_code(),
            machine: err.to_machine_error(),
        }
    }
}
