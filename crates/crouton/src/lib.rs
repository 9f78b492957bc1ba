#![forbid(unsafe_code)]

//! crouton public facade crate.
//!
//! Headless toast notifications: a deterministic lifecycle store with
//! eviction timers, pause accounting, per-region consumer views, and an
//! imperative trigger API. Rendering is yours; crouton tells you what to
//! show, in what order, at which offset, and for how long.
//!
//! # Example
//!
//! ```rust
//! use crouton::prelude::*;
//!
//! let store = ToastStore::new();
//! let toaster = store.toaster();
//!
//! toaster.success("profile saved", ToastOptions::new());
//!
//! let view = store.view(None, ToastDefaults::new());
//! for (toast, offset) in view.entries() {
//!     println!("{} at y={offset}", toast.toast.message.resolve(&toast.toast));
//! }
//! ```

// --- Core re-exports -------------------------------------------------------

pub use crouton_core::id::ToastId;
pub use crouton_core::reducer::{Action, State, TOAST_LIMIT, reduce};
pub use crouton_core::toast::{
    DismissReason, ProviderKey, Toast, ToastKind, ToastMessage, ToastOptions, ToastPatch,
    ToastPosition,
};
pub use crouton_core::view::{
    DEFAULT_GUTTER, EffectiveToast, KindDefaults, OffsetOptions, ToastDefaults,
};

// --- Runtime re-exports ----------------------------------------------------

#[cfg(feature = "runtime")]
pub use crouton_runtime::{
    Clock, ConsumerView, DEFAULT_GRACE_PERIOD, ManualClock, PromiseMessages, StoreConfig,
    SubscriptionGuard, SystemClock, ToastStore, Toaster,
};

// --- Prelude --------------------------------------------------------------

/// Common imports for day-to-day usage.
pub mod prelude {
    pub use crate::{
        DismissReason, EffectiveToast, ProviderKey, Toast, ToastDefaults, ToastId, ToastKind,
        ToastMessage, ToastOptions, ToastPosition,
    };

    #[cfg(feature = "runtime")]
    pub use crate::{ConsumerView, PromiseMessages, StoreConfig, ToastStore, Toaster};
}
