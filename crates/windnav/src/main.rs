//! Binary entrypoint for windnav.
use std::{
    path::{Path, PathBuf},
    process,
};

use clap::{Parser, Subcommand};
use config::{Config, load_from_path, load_or_create, resolve_config_path};
use tracing::{debug, info};

/// Dry-run driver over recorded window snapshots.
mod simulate;
/// Config hot-reload loop.
mod watch;

use crate::simulate::Step;

#[derive(Parser, Debug)]
#[command(name = "windnav", about = "Keyboard-driven window focus navigator", version)]
/// Command-line interface for the `windnav` binary.
struct Cli {
    /// Optional subcommand.
    #[command(subcommand)]
    command: Command,

    /// Logging controls
    #[command(flatten)]
    log: logging::LogArgs,

    /// Optional path to the config file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load and validate the configuration then exit.
    Check {
        /// Path to configuration file to check (defaults to ~/.config/windnav/config.toml)
        path: Option<PathBuf>,

        /// Dump the parsed configuration as JSON to stdout
        #[arg(long)]
        dump: bool,
    },
    /// Print the default configuration file.
    Defaults,
    /// Write the default configuration file if none exists, then validate it.
    Init,
    /// Print the hotkey bindings the configuration registers.
    Bindings,
    /// Replay hotkey steps against a JSON window snapshot and print the
    /// resulting focus and HUD calls.
    Simulate {
        /// JSON file holding an array of window snapshots (see demos/desktop.json)
        #[arg(long, value_name = "FILE")]
        windows: PathBuf,

        /// Window id focused before the first step
        #[arg(long)]
        focused: Option<u32>,

        /// Steps to replay, in order
        #[arg(value_enum, required = true)]
        steps: Vec<Step>,
    },
    /// Apply the configuration, then re-apply it each time the file changes
    /// and print the resulting bindings. Stops on Ctrl-C.
    Watch,
}

/// Print a config error report and exit non-zero.
fn fail(e: &config::Error) -> ! {
    eprintln!("{}", e.pretty());
    process::exit(1);
}

/// Load the config at `path`, falling back to defaults when the file does not exist.
fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Config::default();
    }
    load_from_path(path).unwrap_or_else(|e| fail(&e))
}

/// Parse the command line and run the subcommand.
fn main() {
    let cli = Cli::parse();
    let resolved = resolve_config_path(cli.config.as_deref());

    match cli.command {
        Command::Check { path, dump } => {
            let path = path.unwrap_or(resolved);
            logging::init(&cli.log.spec("info"), config::ColorMode::Auto);
            let cfg = load_from_path(&path).unwrap_or_else(|e| fail(&e));
            if dump {
                match serde_json::to_string_pretty(&cfg) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Failed to serialize config: {e}");
                        process::exit(1);
                    }
                }
            } else {
                println!("OK");
            }
        }
        Command::Defaults => print!("{}", config::defaults::render_default_toml()),
        Command::Init => {
            logging::init(&cli.log.spec("info"), config::ColorMode::Auto);
            load_or_create(&resolved).unwrap_or_else(|e| fail(&e));
            println!("{}", resolved.display());
        }
        Command::Bindings => {
            let cfg = load_or_default(&resolved);
            logging::init_from(&cli.log, &cfg.logging);
            match windnav_engine::bindings_from_config(&cfg) {
                Ok(bindings) => {
                    for b in bindings {
                        println!("{:<6} {}", b.direction.as_str(), b.chord);
                    }
                }
                Err(windnav_engine::Error::Config(e)) => fail(&e),
                Err(e) => {
                    eprintln!("{e}");
                    process::exit(1);
                }
            }
        }
        Command::Simulate {
            windows,
            focused,
            steps,
        } => {
            let cfg = load_or_default(&resolved);
            logging::init_from(&cli.log, &cfg.logging);
            info!(steps = steps.len(), "simulating");
            if let Err(e) = simulate::run(&cfg, &windows, focused, &steps) {
                eprintln!("simulate: {e}");
                process::exit(1);
            }
        }
        Command::Watch => {
            let cfg = load_or_default(&resolved);
            logging::init_from(&cli.log, &cfg.logging);
            if let Err(e) = watch::run(&cfg, &resolved) {
                eprintln!("watch: {e}");
                process::exit(1);
            }
        }
    }
}
