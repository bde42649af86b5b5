pub mod free_port;
pub mod launch;
pub mod which;

use airlaunch_core::ServerConfig;

/// `server.config.json` from the working directory. Unreadable or malformed
/// files are logged and treated as absent.
pub(crate) fn server_config_in_cwd() -> Option<ServerConfig> {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            tracing::warn!(error = %err, "cannot determine working directory");
            return None;
        }
    };

    match ServerConfig::load_from(&cwd) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring server config");
            None
        }
    }
}
