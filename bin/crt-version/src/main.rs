//! ---
//! crt_section: "04-tooling"
//! crt_subsection: "binary"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "CLI printing and checking the compiled-in version metadata."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use client_runtime::common::{init_tracing, AppConfig};
use client_runtime::version::clap_long_version;
use tracing::debug;

mod satisfies;
mod show;

const SERVICE_NAME: &str = "crt-version";

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Inspect the version metadata compiled into the client runtime",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print extended version information and exit"
    )]
    version: bool,
    /// Configuration file to use instead of the default search paths.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Print the version number and version string (default)")]
    Show(show::ShowArgs),
    #[command(about = "Check the version string against a semver requirement")]
    Satisfies(satisfies::SatisfiesArgs),
}

fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let candidates = [
        PathBuf::from("crt-version.toml"),
        PathBuf::from("configs/crt-version.toml"),
    ];
    let loaded = AppConfig::load_with_source(explicit, &candidates)?;
    if let Some(source) = &loaded.source {
        debug!(config_path = %source.display(), "configuration loaded");
    }
    Ok(loaded.config)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", clap_long_version());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(cli.config.as_deref())?;
    init_tracing(SERVICE_NAME, &config.logging)?;

    match cli.command {
        None => show::run(&show::ShowArgs::default(), &config.report)?,
        Some(Commands::Show(args)) => show::run(&args, &config.report)?,
        Some(Commands::Satisfies(args)) => {
            if !satisfies::run(&args)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
