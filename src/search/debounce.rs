//! Trailing-edge debounced callbacks on the tokio runtime
//!
//! Each [`Debouncer::call`] arms a timer and cancels the one armed before it.
//! Only the most recently armed instance may fire: the previous task is
//! aborted, and a generation counter stops a task that already woke up from
//! invoking the callback after it was superseded.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Observable debouncer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No timer armed
    Idle,
    /// A timer is armed and will fire unless replaced or cancelled
    Pending,
}

#[derive(Default)]
struct Slot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Collapses bursts of calls into a single trailing invocation
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    quiet_period: Duration,
    slot: Arc<Mutex<Slot>>,
    callback: Arc<dyn Fn(T) + Send + Sync>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(quiet_period: Duration, callback: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            quiet_period,
            slot: Arc::new(Mutex::new(Slot::default())),
            callback: Arc::new(callback),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Arm the timer with `value`, replacing any armed instance
    pub fn call(&self, value: T) {
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        let generation = slot.generation;
        if let Some(previous) = slot.handle.take() {
            previous.abort();
        }

        let shared = self.slot.clone();
        let callback = self.callback.clone();
        let quiet_period = self.quiet_period;
        slot.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            {
                let mut slot = lock(&shared);
                if slot.generation != generation {
                    return;
                }
                slot.handle = None;
            }
            callback(value);
        }));
    }

    /// Disarm the timer without firing
    pub fn cancel(&self) {
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        if let Some(handle) = slot.handle.take() {
            handle.abort();
        }
    }

    pub fn state(&self) -> DebounceState {
        if lock(&self.slot).handle.is_some() {
            DebounceState::Pending
        } else {
            DebounceState::Idle
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = lock(&self.slot).handle.take() {
            handle.abort();
        }
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
