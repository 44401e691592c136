//! Bloqueo - block WhatsApp through the hosts file and close the desktop app.

pub mod cli;
pub mod config;
pub mod hosts;
pub mod logging;
pub mod platform;
pub mod privilege;
pub mod process;
pub mod status;
pub mod watch;
