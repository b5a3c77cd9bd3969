//! Transformer CLI Entry Point
//!
//! # Usage
//!
//! ```bash
//! # Run every workflow once
//! transformer transform -c transformer.yaml
//!
//! # Preview what would be written
//! transformer --dry-run transform -c transformer.yaml
//!
//! # Re-run the "docs" workflows every 5 seconds
//! transformer -v watch -c transformer.yaml --workflow docs --period 5
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use log::info;

use transformer::{load_config, CancelToken, Transformer, APP_NAME, VERSION};

/// Default watch period in seconds.
const DEFAULT_PERIOD_SECS: u64 = 1;

#[derive(Parser, Debug)]
#[command(name = "transformer", version, about = "Copy and reshape repository trees")]
struct Cli {
    /// Enable debug logging and the run summary
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Report what would be written without touching the destination
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every configured workflow once
    Transform {
        /// Path to the configuration file (YAML, or JSON by extension)
        #[arg(long, short = 'c')]
        config: PathBuf,
    },
    /// Re-run the named workflows on a fixed interval
    Watch {
        /// Path to the configuration file (YAML, or JSON by extension)
        #[arg(long, short = 'c')]
        config: PathBuf,

        /// Name of the workflows to run each cycle
        #[arg(long)]
        workflow: String,

        /// Seconds between cycles
        #[arg(long, default_value_t = DEFAULT_PERIOD_SECS)]
        period: u64,
    },
}

/// Configures the logging system with appropriate formatting.
///
/// The filter admits debug records; the effective level is set by
/// [`apply_verbosity`] so the config file can still raise it after loading.
fn setup_logging(verbose: bool) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();

    apply_verbosity(verbose);
}

/// Sets the global log level to debug or info. `RUST_LOG` wins when set.
fn apply_verbosity(verbose: bool) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    log::set_max_level(level);
}

fn load(path: &Path, verbose: bool) -> Result<Transformer, String> {
    info!("Loading config: {}", path.display());
    let mut config = load_config(path).map_err(|e| format!("Config file: {}", e))?;
    config.verbose |= verbose;
    apply_verbosity(config.verbose);

    info!("Config loaded: {} workflows", config.workflows.len());
    Ok(Transformer::new(config))
}

fn run(cli: Cli) -> Result<(), String> {
    setup_logging(cli.verbose);
    info!("{} v{}", APP_NAME, VERSION);

    match cli.command {
        Command::Transform { config } => {
            let mut transformer = load(&config, cli.verbose)?;
            transformer.set_dry_run(cli.dry_run);

            let summary = transformer
                .run_once()
                .map_err(|e| format!("Transform: {}", e))?;

            if transformer.config().verbose {
                println!("{}", summary.report());
            }
        }
        Command::Watch {
            config,
            workflow,
            period,
        } => {
            let mut transformer = load(&config, cli.verbose)?;
            transformer.set_dry_run(cli.dry_run);

            info!("Watching '{}' every {}s", workflow, period);
            transformer
                .watch(
                    std::time::Duration::from_secs(period),
                    &workflow,
                    &CancelToken::new(),
                )
                .map_err(|e| format!("Watch: {}", e))?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
