//! `airlaunch which` — print the command line air would be started with.

use anyhow::Result;
use clap::Args;

use super::launch::AirArgs;

/// Arguments for `airlaunch which`.
#[derive(Args, Debug)]
pub struct WhichArgs {
    #[command(flatten)]
    pub air: AirArgs,
}

impl WhichArgs {
    pub fn run(self) -> Result<()> {
        let home = dirs::home_dir();
        let resolved = self.air.to_command().resolve(home.as_deref())?;
        println!("{resolved}");
        Ok(())
    }
}

