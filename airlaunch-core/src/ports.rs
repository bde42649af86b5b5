//! Best-effort release of dev ports before `air` starts.
//!
//! A previous Gin server that outlived its watcher keeps the port bound and
//! makes the rebuilt server fail on startup. Listeners are found with
//! `lsof` (Unix) or `netstat` (Windows) and killed forcibly. Nothing here
//! returns an error: a missing tool or an already-gone pid is logged and
//! skipped.

use std::collections::BTreeSet;
use std::process::{Command, Stdio};

/// Parse the output of `lsof -ti tcp:<port>`: one pid per line.
pub fn parse_lsof_pids(output: &str) -> Vec<u32> {
    let mut seen = BTreeSet::new();
    output
        .lines()
        .filter_map(|line| line.trim().parse::<u32>().ok())
        .filter(|pid| *pid > 0)
        .filter(|pid| seen.insert(*pid))
        .collect()
}

/// Parse the output of `netstat -ano -p tcp` and collect the pids whose
/// local address is bound to `port`.
pub fn parse_netstat_pids(output: &str, port: u16) -> BTreeSet<u32> {
    let mut pids = BTreeSet::new();
    for line in output.lines() {
        let trimmed = line.trim();
        if !trimmed.starts_with("TCP") {
            continue;
        }
        let parts: Vec<&str> = trimmed.split_whitespace().collect();
        if parts.len() < 5 {
            continue;
        }
        let Some(local_port) = parts[1]
            .rsplit_once(':')
            .and_then(|(_, p)| p.parse::<u16>().ok())
        else {
            continue;
        };
        let Some(pid) = parts[parts.len() - 1].parse::<u32>().ok() else {
            continue;
        };
        if local_port == port && pid > 0 {
            pids.insert(pid);
        }
    }
    pids
}

/// Kill every process listening on `port`. Returns the pids that were killed.
pub fn release_port(port: u16) -> Vec<u32> {
    if port == 0 {
        return Vec::new();
    }

    let own_pid = std::process::id();
    let mut killed = Vec::new();
    for pid in find_listeners(port) {
        if pid == own_pid {
            continue;
        }
        if kill_pid(pid) {
            tracing::info!("killed process {pid} on port {port} ({})", platform_tag());
            killed.push(pid);
        } else {
            tracing::debug!(pid, port, "process already gone or not killable");
        }
    }
    killed
}

/// Release each distinct, non-zero port in `ports`.
pub fn release_ports(ports: &[Option<u16>]) -> Vec<u32> {
    let mut seen = BTreeSet::new();
    ports
        .iter()
        .flatten()
        .copied()
        .filter(|p| *p > 0 && seen.insert(*p))
        .flat_map(release_port)
        .collect()
}

fn run_capture(program: &str, args: &[&str]) -> Option<String> {
    match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
    {
        Ok(output) => Some(String::from_utf8_lossy(&output.stdout).into_owned()),
        Err(err) => {
            tracing::debug!(program, error = %err, "port lookup tool unavailable");
            None
        }
    }
}

#[cfg(unix)]
fn find_listeners(port: u16) -> Vec<u32> {
    let target = format!("tcp:{port}");
    run_capture("lsof", &["-ti", &target])
        .map(|out| parse_lsof_pids(&out))
        .unwrap_or_default()
}

#[cfg(windows)]
fn find_listeners(port: u16) -> Vec<u32> {
    run_capture("netstat", &["-ano", "-p", "tcp"])
        .map(|out| parse_netstat_pids(&out, port).into_iter().collect())
        .unwrap_or_default()
}

#[cfg(unix)]
fn kill_pid(pid: u32) -> bool {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };
    kill(Pid::from_raw(raw), Signal::SIGKILL).is_ok()
}

#[cfg(windows)]
fn kill_pid(pid: u32) -> bool {
    let pid = pid.to_string();
    Command::new("taskkill")
        .args(["/PID", &pid, "/F"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn platform_tag() -> &'static str {
    if cfg!(windows) {
        "win32"
    } else {
        "unix"
    }
}
