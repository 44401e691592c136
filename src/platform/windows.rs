//! Windows platform implementations.

use std::process::Command;

pub const HOSTS_PATH: &str = r"C:\Windows\System32\drivers\etc\hosts";

/// No effective UID on Windows; privilege is probed by opening the hosts file.
pub fn is_superuser() -> bool {
    false
}

pub fn bulk_kill_command() -> Command {
    let mut cmd = Command::new("taskkill");
    cmd.args(["/F", "/IM", "WhatsApp.exe"]);
    cmd
}
