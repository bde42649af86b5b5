//! airlaunch core library — platform defaults, the `air` launcher, errors.
//!
//! - [`types`] — [`Platform`] and the fixed invocation defaults
//! - [`launcher`] — [`AirCommand`] → [`RunningAir`] → exit status
//! - [`server_config`] — `server.config.json` loading
//! - [`ports`] — best-effort dev port release
//! - [`error`] — [`LaunchError`], [`ConfigError`]

pub mod error;
pub mod launcher;
pub mod ports;
pub mod server_config;
pub mod types;

pub use error::{ConfigError, LaunchError};
pub use launcher::{launch, AirCommand, ResolvedCommand, RunningAir};
pub use server_config::ServerConfig;
pub use types::Platform;
