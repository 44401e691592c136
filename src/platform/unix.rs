//! Unix (macOS, Linux) platform implementations.

use std::process::Command;

/// Hosts file on macOS and Linux.
pub const HOSTS_PATH: &str = "/etc/hosts";

/// True when running with effective UID 0.
pub fn is_superuser() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// `pkill -f WhatsApp`: matches the full command line, so helper processes go too.
pub fn bulk_kill_command() -> Command {
    let mut cmd = Command::new("pkill");
    cmd.args(["-f", "WhatsApp"]);
    cmd
}
