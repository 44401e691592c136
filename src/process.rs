//! Terminate the WhatsApp desktop app if it is running.

use std::cell::RefCell;
use std::fmt;
use std::process::Stdio;

use sysinfo::{Pid, ProcessesToUpdate, Signal, System};

use crate::platform::{ProcessEntry, ProcessTable, TerminateError};

/// Executable / bundle names of the WhatsApp desktop app.
pub const TARGET_PROCESS_NAMES: &[&str] = &["WhatsApp.exe", "WhatsApp", "WhatsApp.app"];

/// What one kill step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillReport {
    /// Per-process path: number of processes asked to terminate.
    Terminated(usize),
    /// Bulk command ran; how many processes it hit is unknown.
    BulkAttempted,
    /// Bulk command could not be started.
    BulkFailed(String),
}

impl KillReport {
    /// Line to show the user, if any.
    pub fn message(&self) -> Option<String> {
        match self {
            KillReport::Terminated(0) => None,
            KillReport::Terminated(n) => Some(format!("Procesos de WhatsApp terminados: {n}")),
            KillReport::BulkAttempted => Some("Intento de cierre de WhatsApp realizado.".to_string()),
            KillReport::BulkFailed(e) => Some(format!("No se pudo cerrar WhatsApp: {e}")),
        }
    }
}

/// Capability to terminate processes by name. Never fails as a whole.
pub trait ProcessKiller {
    fn kill_targets(&self, names: &[&str]) -> KillReport;
}

/// Which [`ProcessKiller`] implementation is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessBackend {
    /// Native process API (sysinfo).
    Native,
    /// OS bulk-kill utility (pkill / taskkill).
    Command,
}

impl fmt::Display for ProcessBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessBackend::Native => f.write_str("native"),
            ProcessBackend::Command => f.write_str("command"),
        }
    }
}

impl ProcessBackend {
    /// Probe for per-process support. BLOQUEO_PROCESS_BACKEND=native|command overrides.
    pub fn detect() -> Self {
        match std::env::var("BLOQUEO_PROCESS_BACKEND").as_deref() {
            Ok("native") => return ProcessBackend::Native,
            Ok("command") => return ProcessBackend::Command,
            Ok(other) => tracing::warn!(value = other, "unknown BLOQUEO_PROCESS_BACKEND, probing"),
            Err(_) => {}
        }
        if sysinfo::IS_SUPPORTED_SYSTEM {
            ProcessBackend::Native
        } else {
            ProcessBackend::Command
        }
    }
}

/// Get the killer for the detected backend.
pub fn default_process_killer() -> Box<dyn ProcessKiller> {
    match ProcessBackend::detect() {
        ProcessBackend::Native => Box::new(TableKiller::new(SysinfoTable::new())),
        ProcessBackend::Command => Box::new(CommandKiller),
    }
}

/// Kill every running WhatsApp process.
pub fn kill_target_processes(killer: &dyn ProcessKiller) -> KillReport {
    killer.kill_targets(TARGET_PROCESS_NAMES)
}

/// Enumerate a [`ProcessTable`] and terminate matches one by one.
pub struct TableKiller<T> {
    table: T,
}

impl<T: ProcessTable> TableKiller<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &T {
        &self.table
    }
}

impl<T: ProcessTable> ProcessKiller for TableKiller<T> {
    fn kill_targets(&self, names: &[&str]) -> KillReport {
        let mut killed = 0;
        for entry in self.table.processes() {
            if !names.contains(&entry.name.as_str()) {
                continue;
            }
            match self.table.terminate(entry.pid) {
                Ok(()) => {
                    tracing::debug!(pid = entry.pid, name = %entry.name, "terminated");
                    killed += 1;
                }
                Err(e) => tracing::debug!(error = %e, "skipping process"),
            }
        }
        KillReport::Terminated(killed)
    }
}

/// Process table backed by sysinfo.
pub struct SysinfoTable {
    system: RefCell<System>,
}

impl SysinfoTable {
    pub fn new() -> Self {
        Self {
            system: RefCell::new(System::new()),
        }
    }
}

impl Default for SysinfoTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for SysinfoTable {
    fn processes(&self) -> Vec<ProcessEntry> {
        let mut system = self.system.borrow_mut();
        system.refresh_processes(ProcessesToUpdate::All, true);
        system
            .processes()
            .iter()
            // Linux lists threads too; they share the parent's name.
            .filter(|(_, p)| p.thread_kind().is_none())
            .map(|(pid, p)| ProcessEntry {
                pid: pid.as_u32(),
                name: p.name().to_string_lossy().into_owned(),
            })
            .collect()
    }

    fn terminate(&self, pid: u32) -> Result<(), TerminateError> {
        let system = self.system.borrow();
        let process = system
            .process(Pid::from_u32(pid))
            .ok_or(TerminateError::NoSuchProcess(pid))?;
        // SIGTERM where supported; Windows only has a hard kill.
        let sent = process.kill_with(Signal::Term).unwrap_or_else(|| process.kill());
        if sent {
            Ok(())
        } else {
            Err(TerminateError::AccessDenied(pid))
        }
    }
}

/// Shell out to pkill / taskkill when processes cannot be enumerated.
pub struct CommandKiller;

impl ProcessKiller for CommandKiller {
    fn kill_targets(&self, _names: &[&str]) -> KillReport {
        let mut cmd = crate::platform::bulk_kill_command();
        match cmd.stdout(Stdio::null()).stderr(Stdio::null()).status() {
            Ok(status) => {
                tracing::debug!(?status, "bulk kill finished");
                KillReport::BulkAttempted
            }
            Err(e) => KillReport::BulkFailed(e.to_string()),
        }
    }
}
