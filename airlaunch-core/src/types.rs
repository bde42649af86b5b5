//! Platform detection and the fixed `air` invocation defaults.

use std::fmt;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Program used on every non-Windows host. Expanded against `$HOME`.
pub const UNIX_AIR_PROGRAM: &str = "~/go/bin/air";

/// Program used on Windows, resolved through `PATH`.
pub const WINDOWS_AIR_PROGRAM: &str = "air";

/// Flag that precedes the config path.
pub const AIR_CONFIG_FLAG: &str = "-c";

/// Config shipped inside the vendored nuxt-gin-tools package.
pub const AIR_CONFIG_PATH: &str = "node_modules/nuxt-gin-tools/.air.toml";

/// Project file holding the Gin and Nuxt dev ports.
pub const SERVER_CONFIG_FILE: &str = "server.config.json";

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Host OS family, as far as picking the `air` binary is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// The platform this process is running on.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` identifier to a platform family.
    pub fn from_os(os: &str) -> Self {
        if os.eq_ignore_ascii_case("windows") {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Default `air` program reference for this platform.
    pub fn air_program(self) -> &'static str {
        match self {
            Platform::Windows => WINDOWS_AIR_PROGRAM,
            Platform::Unix => UNIX_AIR_PROGRAM,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "windows"),
            Platform::Unix => write!(f, "unix"),
        }
    }
}
