//! Resolve, spawn and supervise a single `air` process.
//!
//! The lifecycle is a typestate: an [`AirCommand`] has not started yet,
//! [`AirCommand::spawn`] turns it into a [`RunningAir`], and
//! [`RunningAir::wait`] consumes that handle once the child has exited.
//! A failed spawn never produces a handle, so there is nothing to wait on.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::error::LaunchError;
use crate::types::{Platform, AIR_CONFIG_FLAG, AIR_CONFIG_PATH};

/// An `air` invocation that has not been started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl AirCommand {
    /// Default invocation for the given platform: `<air> -c <config>`.
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            program: PathBuf::from(platform.air_program()),
            args: vec![AIR_CONFIG_FLAG.to_owned(), AIR_CONFIG_PATH.to_owned()],
        }
    }

    /// Default invocation for the host platform.
    pub fn for_host() -> Self {
        Self::for_platform(Platform::current())
    }

    /// Replace the program, keeping the arguments.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Replace the config path passed after `-c`.
    pub fn with_config(mut self, config: impl Into<String>) -> Self {
        self.args = vec![AIR_CONFIG_FLAG.to_owned(), config.into()];
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Expand a leading `~` in the program against `home`.
    ///
    /// Bare names and other paths pass through untouched so that the OS
    /// executable search still applies to them.
    pub fn resolve(&self, home: Option<&Path>) -> Result<ResolvedCommand, LaunchError> {
        let program = match tilde_rest(&self.program) {
            Some(rest) => {
                let home = home.ok_or_else(|| LaunchError::HomeNotFound {
                    program: self.program.clone(),
                })?;
                if rest.as_os_str().is_empty() {
                    home.to_path_buf()
                } else {
                    home.join(rest)
                }
            }
            None => self.program.clone(),
        };

        Ok(ResolvedCommand {
            program,
            args: self.args.clone(),
        })
    }

    /// Resolve against the current user's home directory and start the child.
    pub fn spawn(&self) -> Result<RunningAir, LaunchError> {
        let home = dirs::home_dir();
        self.resolve(home.as_deref())?.spawn()
    }
}

impl Default for AirCommand {
    fn default() -> Self {
        Self::for_host()
    }
}

/// Returns the remainder after `~`, if the path starts with a `~` component.
fn tilde_rest(path: &Path) -> Option<&Path> {
    path.strip_prefix("~").ok()
}

/// An `air` invocation with its program path fully resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ResolvedCommand {
    /// Build the process command. stdout and stderr are inherited so the
    /// child writes straight to our descriptors; stdin is detached.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }

    pub fn spawn(&self) -> Result<RunningAir, LaunchError> {
        tracing::debug!(
            platform = %Platform::current(),
            program = %self.program.display(),
            args = ?self.args,
            "starting air"
        );

        let child = self
            .to_command()
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        tracing::debug!(pid = child.id(), "air started");
        Ok(RunningAir { child })
    }
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Handle to a started `air` process.
#[derive(Debug)]
pub struct RunningAir {
    child: Child,
}

impl RunningAir {
    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Block until the child exits. Non-zero or signalled exits are errors.
    pub fn wait(mut self) -> Result<ExitStatus, LaunchError> {
        let status = self
            .child
            .wait()
            .map_err(|source| LaunchError::Wait { source })?;

        tracing::debug!(%status, "air exited");
        if status.success() {
            Ok(status)
        } else {
            Err(LaunchError::Exited { status })
        }
    }
}

/// Start `air` and wait for it to finish.
pub fn launch(command: &AirCommand) -> Result<ExitStatus, LaunchError> {
    command.spawn()?.wait()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Platform::Unix, "~/go/bin/air")]
    #[case(Platform::Windows, "air")]
    fn default_program_per_platform(#[case] platform: Platform, #[case] program: &str) {
        let cmd = AirCommand::for_platform(platform);
        assert_eq!(cmd.program(), Path::new(program));
    }

    #[rstest]
    #[case(Platform::Unix)]
    #[case(Platform::Windows)]
    fn arguments_are_fixed_on_every_platform(#[case] platform: Platform) {
        let cmd = AirCommand::for_platform(platform);
        assert_eq!(cmd.args(), ["-c", "node_modules/nuxt-gin-tools/.air.toml"]);
    }

    #[test]
    fn resolve_expands_tilde_against_home() {
        let cmd = AirCommand::for_platform(Platform::Unix);
        let resolved = cmd.resolve(Some(Path::new("/home/dev"))).expect("resolve");
        assert_eq!(resolved.program, Path::new("/home/dev").join("go/bin/air"));
        assert_eq!(resolved.args, cmd.args());
    }

    #[test]
    fn resolve_leaves_bare_name_for_path_lookup() {
        let cmd = AirCommand::for_platform(Platform::Windows);
        let resolved = cmd.resolve(None).expect("resolve");
        assert_eq!(resolved.program, Path::new("air"));
    }

    #[test]
    fn resolve_without_home_is_a_start_failure() {
        let cmd = AirCommand::for_platform(Platform::Unix);
        let err = cmd.resolve(None).unwrap_err();
        assert!(matches!(err, LaunchError::HomeNotFound { .. }), "got: {err}");
        assert!(err.to_string().starts_with("Failed to start air:"));
    }

    #[test]
    fn tilde_inside_a_name_is_not_expanded() {
        let cmd = AirCommand::for_host().with_program("bin/~air");
        let resolved = cmd.resolve(Some(Path::new("/home/dev"))).expect("resolve");
        assert_eq!(resolved.program, Path::new("bin/~air"));
    }

    #[test]
    fn with_config_keeps_the_flag() {
        let cmd = AirCommand::for_host().with_config("custom/.air.toml");
        assert_eq!(cmd.args(), ["-c", "custom/.air.toml"]);
    }

    #[test]
    fn display_renders_full_command_line() {
        let resolved = ResolvedCommand {
            program: PathBuf::from("/opt/air"),
            args: vec!["-c".into(), "x.toml".into()],
        };
        assert_eq!(resolved.to_string(), "/opt/air -c x.toml");
    }

    #[test]
    fn missing_binary_reports_start_failure() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let cmd = AirCommand::for_host().with_program(dir.path().join("no-such-air"));
        let err = cmd.spawn().unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }), "got: {err}");
        assert!(err.to_string().starts_with("Failed to start air: "));
    }

    // `sh -c <config>` runs the config argument as a script, which lets the
    // fixed `-c <path>` shape drive a fake child.
    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let cmd = AirCommand::for_host().with_program("sh").with_config("exit 0");
        let status = launch(&cmd).expect("launch");
        assert!(status.success());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_reports_exit_condition() {
        let cmd = AirCommand::for_host().with_program("sh").with_config("exit 3");
        let err = launch(&cmd).unwrap_err();
        match &err {
            LaunchError::Exited { status } => assert_eq!(status.code(), Some(3)),
            other => panic!("expected Exited, got: {other}"),
        }
        let msg = err.to_string();
        assert!(msg.starts_with("Air command finished with error: "), "{msg}");
        assert!(msg.contains('3'), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn running_handle_exposes_pid() {
        let cmd = AirCommand::for_host().with_program("sh").with_config("exit 0");
        let running = cmd.spawn().expect("spawn");
        assert!(running.id() > 0);
        running.wait().expect("wait");
    }
}
