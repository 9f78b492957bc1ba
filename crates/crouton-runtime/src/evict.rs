#![forbid(unsafe_code)]

//! Eviction timer registry.
//!
//! A dismissed toast stays in state, invisible, for a grace period so its
//! exit animation can finish; then a one-shot timer feeds a remove action
//! back through the store. This module owns those timers: at most one per
//! toast id, idempotent (a second dismissal neither duplicates the timer
//! nor resets the grace period), and cancellable when an update revives
//! the toast before the timer fires.
//!
//! Each timer is a short-lived thread parked on a condition variable, so
//! cancellation wakes it immediately instead of letting it linger until
//! the timeout.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

use crouton_core::ToastId;

/// Waiting side of a cancellation pair. Held by the timer thread.
pub(crate) struct CancelSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelSignal {
    pub(crate) fn new() -> (Self, CancelHandle) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: inner.clone(),
        };
        (signal, CancelHandle { inner })
    }

    /// Block until cancelled or until `duration` elapses.
    ///
    /// Returns `true` if cancelled, `false` on timeout. Loops on the
    /// condvar to absorb spurious wakeups.
    pub(crate) fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap();
        if *cancelled {
            return true;
        }

        let start = std::time::Instant::now();
        let mut remaining = duration;

        loop {
            let (guard, result) = cvar.wait_timeout(cancelled, remaining).unwrap();
            cancelled = guard;
            if *cancelled {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}

/// Cancelling side of the pair. Held in the registry.
pub(crate) struct CancelHandle {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancelHandle {
    pub(crate) fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap();
        *cancelled = true;
        cvar.notify_all();
    }
}

/// The per-id timer registry.
#[derive(Default)]
pub(crate) struct EvictionRegistry {
    timers: Mutex<HashMap<ToastId, CancelHandle>>,
}

impl EvictionRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Claim a timer slot for `id`.
    ///
    /// Returns the signal the timer thread should wait on, or `None` when a
    /// timer for `id` is already outstanding.
    pub(crate) fn claim(&self, id: &ToastId) -> Option<CancelSignal> {
        let mut timers = self.timers.lock().unwrap();
        if timers.contains_key(id) {
            return None;
        }
        let (signal, handle) = CancelSignal::new();
        timers.insert(id.clone(), handle);
        Some(signal)
    }

    /// Cancel and drop the timer for `id`, if any.
    pub(crate) fn cancel(&self, id: &ToastId) {
        if let Some(handle) = self.timers.lock().unwrap().remove(id) {
            handle.cancel();
        }
    }

    /// Drop the registry entry for a timer that has fired.
    pub(crate) fn release(&self, id: &ToastId) {
        self.timers.lock().unwrap().remove(id);
    }

    /// Number of outstanding timers.
    pub(crate) fn len(&self) -> usize {
        self.timers.lock().unwrap().len()
    }
}
