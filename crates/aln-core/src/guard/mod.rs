//! Debounce gate in front of the start action.
//!
//! A successful [`ExecutionGuard::try_acquire`] blocks further starts until [`ExecutionGuard::release`] fires.
//! Release is time based and does not wait for the submitted job: the guard throttles the button, not the executor.

use std::{
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{runtime::Handle, time::Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquire {
    Granted,
    Denied,
}

impl Acquire {
    pub fn is_granted(&self) -> bool {
        matches!(self, Acquire::Granted)
    }
}

/// Point-in-time view of the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardState {
    pub busy: bool,
    /// Deadline of the most recently scheduled release; `None` until the first one.
    pub cooldown_until: Option<Instant>,
}

struct PendingRelease {
    token: CancellationToken,
    until: Instant,
}

impl PendingRelease {
    /// Deadline reached and not yet consumed or cancelled.
    fn elapsed(&self, now: Instant) -> bool {
        !self.token.is_cancelled() && now >= self.until
    }
}

/// Every busy-to-free transition happens with `pending` locked.
struct Shared {
    busy: AtomicBool,
    pending: Mutex<Option<PendingRelease>>,
}

impl Shared {
    fn pending(&self) -> MutexGuard<'_, Option<PendingRelease>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Always starts released; nothing survives a restart.
///
/// Release timers run on the runtime given at construction, so every method can be called from any thread.
pub struct ExecutionGuard {
    shared: Arc<Shared>,
    handle: Handle,
}

impl ExecutionGuard {
    pub fn new(handle: Handle) -> Self {
        Self {
            shared: Arc::new(Shared {
                busy: AtomicBool::new(false),
                pending: Mutex::new(None),
            }),
            handle,
        }
    }

    /// Take the guard if it is free. The flag is set before this returns.
    ///
    /// A cooldown whose deadline has passed counts as free even if its timer has not fired yet.
    pub fn try_acquire(&self) -> Acquire {
        if self
            .shared
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            trace!("guard acquired");
            return Acquire::Granted;
        }

        let pending = self.shared.pending();
        match pending.as_ref() {
            Some(p) if p.elapsed(Instant::now()) => {
                // The flag stays set and now belongs to this caller; the stale timer must not clear it.
                p.token.cancel();
                trace!("guard acquired at cooldown deadline");
                Acquire::Granted
            }
            _ => {
                trace!("guard busy");
                Acquire::Denied
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        if !self.shared.busy.load(Ordering::Acquire) {
            return false;
        }
        let pending = self.shared.pending();
        !pending.as_ref().is_some_and(|p| p.elapsed(Instant::now()))
    }

    pub fn state(&self) -> GuardState {
        let cooldown_until = self.shared.pending().as_ref().map(|p| p.until);
        GuardState {
            busy: self.is_busy(),
            cooldown_until,
        }
    }

    /// Free the guard once `after` has elapsed.
    ///
    /// Replaces any release scheduled earlier. A zero delay frees the guard immediately.
    pub fn release(&self, after: Duration) {
        let token = CancellationToken::new();
        let until = Instant::now() + after;

        let mut pending = self.shared.pending();
        if let Some(previous) = pending.replace(PendingRelease {
            token: token.clone(),
            until,
        }) {
            previous.token.cancel();
        }

        if after.is_zero() {
            self.shared.busy.store(false, Ordering::Release);
            trace!("guard released");
            return;
        }
        drop(pending);

        let shared = Arc::clone(&self.shared);
        debug!(cooldown_ms = u64::try_from(after.as_millis()).unwrap_or(u64::MAX), "guard release scheduled");
        self.handle.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    trace!("scheduled release cancelled");
                }
                _ = tokio::time::sleep_until(until) => {
                    let _pending = shared.pending();
                    if !token.is_cancelled() {
                        token.cancel();
                        shared.busy.store(false, Ordering::Release);
                        trace!("guard released after cooldown");
                    }
                }
            }
        });
    }

    /// Cancel a pending release without touching the flag.
    pub fn shutdown(&self) {
        if let Some(p) = self.shared.pending().as_ref() {
            p.token.cancel();
        }
    }
}

impl Drop for ExecutionGuard {
    fn drop(&mut self) {
        self.shutdown();
    }
}
