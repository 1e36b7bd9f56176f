//! Registry of in-flight workers.
//!
//! The application layer reacts to the transition between zero and non-zero
//! active workers (showing/hiding a shared progress surface); [`WorkerSet`]
//! exposes exactly that: RAII [`Ticket`]s plus `on_busy` / `on_idle` hooks fired
//! on the 0→1 and 1→0 edges of the active count.

use parking_lot::Mutex;
use std::sync::Arc;

type Hook = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Inner {
    // Count and hooks share one lock so edge transitions are observed in order.
    // Hooks must not re-enter the set.
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    active: usize,
    on_busy: Option<Hook>,
    on_idle: Option<Hook>,
}

/// Tracks how many workers are currently running.
#[derive(Clone, Default)]
pub struct WorkerSet {
    inner: Arc<Inner>,
}

impl WorkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when the set becomes non-empty.
    pub fn on_busy(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.inner.state.lock().on_busy = Some(Box::new(hook));
    }

    /// Called when the set becomes empty again.
    pub fn on_idle(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.inner.state.lock().on_idle = Some(Box::new(hook));
    }

    pub fn active(&self) -> usize {
        self.inner.state.lock().active
    }

    pub fn is_idle(&self) -> bool {
        self.active() == 0
    }

    /// Registers one worker; the registration lasts until the ticket is dropped.
    pub fn ticket(&self) -> Ticket {
        let mut state = self.inner.state.lock();
        state.active += 1;
        tracing::debug!(active = state.active, "worker registered");
        if state.active == 1 {
            if let Some(hook) = &state.on_busy {
                hook();
            }
        }
        Ticket {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for WorkerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerSet")
            .field("active", &self.active())
            .finish()
    }
}

/// RAII registration in a [`WorkerSet`].
pub struct Ticket {
    inner: Arc<Inner>,
}

impl Drop for Ticket {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock();
        state.active = state.active.saturating_sub(1);
        tracing::debug!(active = state.active, "worker deregistered");
        if state.active == 0 {
            if let Some(hook) = &state.on_idle {
                hook();
            }
        }
    }
}
