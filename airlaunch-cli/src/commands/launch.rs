//! `airlaunch` (default command) — run air in the foreground.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use airlaunch_core::{launch, ports, AirCommand};

use super::server_config_in_cwd;

/// Overrides for the air invocation. Both default to the platform values.
#[derive(Args, Debug, Default)]
pub struct AirArgs {
    /// Path or name of the air binary (default: ~/go/bin/air, or air on Windows).
    #[arg(long, value_name = "PATH")]
    pub air_bin: Option<PathBuf>,

    /// Config file passed to air after `-c`.
    #[arg(long, value_name = "PATH")]
    pub air_config: Option<String>,
}

impl AirArgs {
    pub fn to_command(&self) -> AirCommand {
        let mut cmd = AirCommand::for_host();
        if let Some(bin) = &self.air_bin {
            cmd = cmd.with_program(bin);
        }
        if let Some(config) = &self.air_config {
            cmd = cmd.with_config(config.clone());
        }
        cmd
    }
}

/// Arguments for the default launch.
#[derive(Args, Debug, Default)]
pub struct LaunchArgs {
    #[command(flatten)]
    pub air: AirArgs,

    /// Release the Gin port from server.config.json before starting air.
    #[arg(long)]
    pub free_port: bool,

    /// Release this port before starting air (repeatable).
    #[arg(long = "port", value_name = "PORT")]
    pub ports: Vec<u16>,
}

impl LaunchArgs {
    pub fn run(self) -> Result<()> {
        let mut to_release: Vec<Option<u16>> = self.ports.iter().copied().map(Some).collect();
        if self.free_port {
            if let Some(config) = server_config_in_cwd() {
                if config.should_release_ports() {
                    to_release.push(config.gin_port());
                } else {
                    tracing::debug!("killPortBeforeDevelop is false; leaving ports alone");
                }
            }
        }
        if to_release.iter().any(Option::is_some) {
            ports::release_ports(&to_release);
        } else if self.free_port {
            tracing::info!("no port configured; nothing to release");
        }

        launch(&self.air.to_command())?;
        Ok(())
    }
}
