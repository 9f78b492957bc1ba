#![forbid(unsafe_code)]

//! The toast store: shared state, dispatch, and subscriptions.
//!
//! A [`ToastStore`] is a constructed instance, not a process singleton:
//! build one per application root (or per test) and hand out [`Toaster`]
//! handles and consumer views from it. All mutation flows through
//! [`ToastStore::dispatch`], which applies the pure reducer under the state
//! lock and then fans the fresh state out to every subscriber.
//!
//! Timer side effects live here rather than in the reducer: dispatch
//! cancels a pending eviction when an update touches its toast, and
//! schedules evictions for every toast a dismissal touches.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crouton_core::reducer::{Action, State, reduce};
use crouton_core::toast::{DismissReason, ProviderKey};
use crouton_core::view::ToastDefaults;
use crouton_core::ToastId;

use crate::clock::{Clock, SystemClock};
use crate::consumer::ConsumerView;
use crate::evict::EvictionRegistry;
use crate::toaster::Toaster;

/// Dismiss-to-remove delay, leaving room for an exit animation.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(1000);

type Listener = Arc<dyn Fn(&State) + Send + Sync>;
type Announcer = Box<dyn Fn(&str) + Send>;

/// Construction-time knobs for a store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Delay between dismissal and removal. Tests shrink this to keep
    /// timer assertions fast.
    pub grace_period: Duration,
    /// Timestamp source for toast creation and pause accounting.
    pub clock: Arc<dyn Clock>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
            clock: Arc::new(SystemClock),
        }
    }
}

pub(crate) struct Shared {
    state: Mutex<State>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    evictions: EvictionRegistry,
    grace_period: Duration,
    clock: Arc<dyn Clock>,
    announcer: Mutex<Option<Announcer>>,
}

impl Shared {
    pub(crate) fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub(crate) fn snapshot(&self) -> State {
        self.state.lock().unwrap().clone()
    }

    /// Forward an accessibility message to the configured announcer hook.
    pub(crate) fn announce(&self, message: &str) {
        if let Some(announcer) = &*self.announcer.lock().unwrap() {
            announcer(message);
        }
    }

    /// Apply an action: scheduler side effects, reduce, notify.
    pub(crate) fn dispatch(self: &Arc<Self>, action: Action) {
        trace!(action = ?action, "dispatch");

        // Side effects are decided against the pre-action state, matching
        // the original dispatch order.
        match &action {
            Action::Update(patch) => self.evictions.cancel(&patch.id),
            Action::Upsert(toast) => {
                let exists = self.state.lock().unwrap().contains(&toast.id);
                if exists {
                    self.evictions.cancel(&toast.id);
                }
            }
            Action::Dismiss { id, reason } => match id {
                Some(id) => self.schedule_eviction(id.clone(), *reason),
                None => {
                    let ids: Vec<ToastId> = {
                        let state = self.state.lock().unwrap();
                        state.toasts.iter().map(|t| t.id.clone()).collect()
                    };
                    for id in ids {
                        self.schedule_eviction(id, *reason);
                    }
                }
            },
            _ => {}
        }

        let snapshot = {
            let mut state = self.state.lock().unwrap();
            let next = reduce(&state, &action);
            *state = next.clone();
            next
        };

        // Listeners run outside the state lock against an immutable
        // snapshot, so they may re-enter the store.
        let listeners: Vec<Listener> = {
            let listeners = self.listeners.lock().unwrap();
            listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Start the one-shot eviction timer for `id`, unless one is already
    /// outstanding (a second dismissal never resets the grace period).
    fn schedule_eviction(self: &Arc<Self>, id: ToastId, reason: DismissReason) {
        let Some(signal) = self.evictions.claim(&id) else {
            return;
        };
        debug!(toast_id = %id, reason = ?reason, "eviction scheduled");

        let weak = Arc::downgrade(self);
        let grace = self.grace_period;
        thread::spawn(move || {
            if signal.wait_timeout(grace) {
                return; // cancelled: the toast was revived
            }
            let Some(shared) = weak.upgrade() else {
                return; // store gone
            };
            shared.evictions.release(&id);
            debug!(toast_id = %id, reason = ?reason, "eviction elapsed");
            shared.dispatch(Action::Remove { id: Some(id) });
        });
    }

    fn remove_listener(&self, id: u64) {
        self.listeners
            .lock()
            .unwrap()
            .retain(|(listener_id, _)| *listener_id != id);
    }
}

/// The process-facing toast state container.
pub struct ToastStore {
    shared: Arc<Shared>,
}

impl ToastStore {
    /// A store with the default grace period and the system clock.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// A store with explicit configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(1),
                evictions: EvictionRegistry::new(),
                grace_period: config.grace_period,
                clock: config.clock,
                announcer: Mutex::new(None),
            }),
        }
    }

    /// Apply one action synchronously and notify every subscriber.
    pub fn dispatch(&self, action: Action) {
        self.shared.dispatch(action);
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> State {
        self.shared.snapshot()
    }

    /// Register a listener invoked with the fresh state after every
    /// dispatch, in registration order. Dropping the returned guard
    /// deregisters it.
    pub fn subscribe(
        &self,
        listener: impl Fn(&State) + Send + Sync + 'static,
    ) -> SubscriptionGuard {
        let id = self.shared.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.shared
            .listeners
            .lock()
            .unwrap()
            .push((id, Arc::new(listener)));
        SubscriptionGuard {
            shared: Arc::downgrade(&self.shared),
            id,
        }
    }

    /// Install the hook that receives accessibility announcements for
    /// newly shown toasts.
    pub fn set_announcer(&self, announcer: impl Fn(&str) + Send + 'static) {
        *self.shared.announcer.lock().unwrap() = Some(Box::new(announcer));
    }

    /// A clonable trigger handle onto this store.
    pub fn toaster(&self) -> Toaster {
        Toaster::new(self.shared.clone())
    }

    /// A consumer view filtered by `provider` with the given defaults.
    ///
    /// `None` accepts toasts from every provider.
    pub fn view(&self, provider: Option<ProviderKey>, defaults: ToastDefaults) -> ConsumerView {
        ConsumerView::new(self.shared.clone(), provider, defaults)
    }

    #[cfg(test)]
    pub(crate) fn pending_evictions(&self) -> usize {
        self.shared.evictions.len()
    }
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToastStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock().unwrap();
        f.debug_struct("ToastStore")
            .field("toasts", &state.toasts.len())
            .field("paused", &state.paused_at.is_some())
            .finish()
    }
}

/// Keeps a subscription alive; dropping it deregisters the listener.
#[must_use = "dropping the guard immediately unsubscribes the listener"]
pub struct SubscriptionGuard {
    shared: Weak<Shared>,
    id: u64,
}

impl SubscriptionGuard {
    /// Deregister explicitly.
    pub fn unsubscribe(self) {}
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.remove_listener(self.id);
        }
    }
}
