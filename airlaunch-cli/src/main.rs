//! airlaunch — start the `air` live-reloader for a nuxt-gin project.
//!
//! # Usage
//!
//! ```text
//! airlaunch [--air-bin <PATH>] [--air-config <PATH>] [--free-port] [--port <PORT>]...
//! airlaunch free-port [--port <PORT>]...
//! airlaunch which [--air-bin <PATH>] [--air-config <PATH>]
//! ```
//!
//! With no arguments, runs `~/go/bin/air -c node_modules/nuxt-gin-tools/.air.toml`
//! (plain `air` on Windows) and exits with failure if air cannot start or
//! exits non-zero.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::{free_port::FreePortArgs, launch::LaunchArgs, which::WhichArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "airlaunch",
    version,
    about = "Run the air live-reloader with the nuxt-gin-tools config",
    long_about = None,
    args_conflicts_with_subcommands = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    launch: LaunchArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Kill whatever is listening on the dev ports, then exit.
    FreePort(FreePortArgs),

    /// Print the resolved air command line without running it.
    Which(WhichArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        None => cli.launch.run(),
        Some(Commands::FreePort(args)) => args.run(),
        Some(Commands::Which(args)) => args.run(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout belongs to air.
fn init_tracing() {
    use std::io::IsTerminal;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
