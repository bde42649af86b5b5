//! `airlaunch free-port` — release dev ports without starting air.

use anyhow::Result;
use clap::Args;

use airlaunch_core::ports;

use super::server_config_in_cwd;

/// Arguments for `airlaunch free-port`.
#[derive(Args, Debug)]
pub struct FreePortArgs {
    /// Port to release (repeatable). Defaults to ginPort from server.config.json.
    #[arg(long = "port", value_name = "PORT")]
    pub ports: Vec<u16>,
}

impl FreePortArgs {
    pub fn run(self) -> Result<()> {
        let targets: Vec<Option<u16>> = if self.ports.is_empty() {
            let config = server_config_in_cwd().unwrap_or_default();
            vec![config.gin_port()]
        } else {
            self.ports.into_iter().map(Some).collect()
        };

        if targets.iter().all(Option::is_none) {
            tracing::info!("no port configured; nothing to release");
            return Ok(());
        }

        let killed = ports::release_ports(&targets);
        if killed.is_empty() {
            tracing::info!("no listening processes found");
        }
        Ok(())
    }
}
