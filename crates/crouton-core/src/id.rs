#![forbid(unsafe_code)]

//! Process-unique toast identifiers.
//!
//! Callers may supply their own ids (to refresh an existing toast in place);
//! toasts created without one get the next value from a process-wide
//! monotonic counter. Generated ids are decimal strings ("1", "2", ...) so
//! they share a representation with caller-supplied ids.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a toast.
///
/// Ids are plain strings: caller-supplied ids like `"sync-status"` and
/// generated ids compare and hash uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(String);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

impl ToastId {
    /// Wrap a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Produce the next generated identifier.
    ///
    /// Monotonically increasing for the lifetime of the process, never
    /// reused, safe to call from any thread.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed).to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for ToastId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
