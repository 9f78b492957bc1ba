#![forbid(unsafe_code)]

//! Pure state core for crouton toasts.
//!
//! This crate holds everything about a toast's lifecycle that is independent
//! of clocks, threads, and rendering toolkits:
//!
//! - the [`Toast`] record model and its construction options,
//! - the lifecycle [`reducer`](reducer::reduce) — a pure function over
//!   `(State, Action)` implementing add/update/upsert/dismiss/remove and
//!   pause accounting,
//! - the [`view`] derivation that filters the shared toast list per consumer
//!   and resolves effective durations, positions, and stacking offsets.
//!
//! Everything here is deterministic: timestamps enter as action payloads,
//! never from an ambient clock. The process-facing store, eviction timers,
//! and trigger API live in `crouton-runtime`.

pub mod id;
pub mod reducer;
pub mod toast;
pub mod view;

pub use id::ToastId;
pub use reducer::{Action, State, TOAST_LIMIT, reduce};
pub use toast::{
    DismissReason, ProviderKey, Toast, ToastKind, ToastMessage, ToastOptions, ToastPatch,
    ToastPosition,
};
pub use view::{
    DEFAULT_GUTTER, EffectiveToast, KindDefaults, OffsetOptions, ToastDefaults, derive_view,
    stacking_offset,
};
