//! Watch loop: kill WhatsApp on every tick until cancelled.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use crate::process::{kill_target_processes, KillReport, ProcessKiller};

/// Cloneable cancellation signal shared with the interrupt handler.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap_or_else(|e| e.into_inner());
        *cancelled = true;
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sleep up to `timeout`, waking early on cancel. Returns true if cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        // A timeout past the end of Instant's range means wait for cancel only.
        let deadline = Instant::now().checked_add(timeout);
        let mut cancelled = lock.lock().unwrap_or_else(|e| e.into_inner());
        while !*cancelled {
            cancelled = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    match cvar.wait_timeout(cancelled, deadline - now) {
                        Ok((guard, _)) => guard,
                        Err(e) => e.into_inner().0,
                    }
                }
                None => cvar.wait(cancelled).unwrap_or_else(|e| e.into_inner()),
            };
        }
        *cancelled
    }
}

/// Run the kill step every `interval` until `token` is cancelled.
///
/// The first kill happens immediately. `on_report` sees each step's result.
/// Returns the number of kill steps performed.
pub fn watch<F>(
    killer: &dyn ProcessKiller,
    interval: Duration,
    token: &CancelToken,
    mut on_report: F,
) -> usize
where
    F: FnMut(&KillReport),
{
    let mut ticks = 0;
    while !token.is_cancelled() {
        let report = kill_target_processes(killer);
        on_report(&report);
        ticks += 1;
        if token.wait_timeout(interval) {
            break;
        }
    }
    tracing::debug!(ticks, "watch loop stopped");
    ticks
}
