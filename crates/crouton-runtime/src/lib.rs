#![forbid(unsafe_code)]

//! Process-facing runtime for crouton toasts.
//!
//! `crouton-core` defines the pure state machine; this crate makes it live:
//!
//! - [`ToastStore`] — a constructed (never global) state container with
//!   synchronous dispatch and a subscriber list,
//! - the eviction scheduler — per-id one-shot timers that turn a dismissed
//!   toast into a removed one after a grace period, cancellable when the
//!   toast is revived first,
//! - [`Toaster`] — the clonable trigger handle (`show`/`success`/`error`/
//!   `loading`/`dismiss`/`remove`/`promise`),
//! - [`ConsumerView`] — one display region's filtered, option-merged read
//!   surface with stacking offsets and pause controls,
//! - [`Clock`] — the injectable time source that keeps pause accounting
//!   deterministic under test.
//!
//! # Example
//!
//! ```rust
//! use crouton_runtime::ToastStore;
//! use crouton_core::{ToastDefaults, ToastOptions};
//!
//! let store = ToastStore::new();
//! let toaster = store.toaster();
//! let id = toaster.success("saved", ToastOptions::new());
//!
//! let view = store.view(None, ToastDefaults::new());
//! assert_eq!(view.toasts()[0].toast.id, id);
//! ```

pub mod clock;
pub mod consumer;
mod evict;
pub mod store;
pub mod toaster;

pub use clock::{Clock, ManualClock, SystemClock};
pub use consumer::ConsumerView;
pub use store::{DEFAULT_GRACE_PERIOD, StoreConfig, SubscriptionGuard, ToastStore};
pub use toaster::{PromiseMessages, Toaster};
