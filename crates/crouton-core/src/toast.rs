#![forbid(unsafe_code)]

//! The toast record model.
//!
//! A [`Toast`] is one transient notification and its bookkeeping: identity,
//! kind, message, visibility, creation time, accumulated pause time, and a
//! bag of presentation metadata the reducer treats as opaque. Records are
//! built by the trigger API from a message plus [`ToastOptions`] and then
//! flow through the reducer unchanged in structure.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::id::ToastId;

/// Kind of a toast, fixed at creation.
///
/// The kind selects the built-in default auto-dismiss duration and, at the
/// render layer, the default indicator. `Loading` never expires on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastKind {
    /// Plain message with no semantic indicator.
    #[default]
    Blank,
    /// Success indicator.
    Success,
    /// Error indicator.
    Error,
    /// In-progress indicator; persists until updated or dismissed.
    Loading,
}

impl ToastKind {
    /// Built-in auto-dismiss duration for this kind.
    ///
    /// `None` means the toast never auto-dismisses.
    pub fn default_duration(self) -> Option<Duration> {
        match self {
            Self::Success => Some(Duration::from_millis(2000)),
            Self::Error | Self::Blank => Some(Duration::from_millis(4000)),
            Self::Loading => None,
        }
    }
}

/// Vertical display region a toast anchors to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastPosition {
    /// Stack below the top edge.
    #[default]
    Top,
    /// Stack above the bottom edge.
    Bottom,
}

/// Why a toast left the visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The auto-dismiss duration elapsed.
    Timeout,
    /// The user swiped the toast away.
    Swipe,
    /// `dismiss` was called from code.
    Programmatic,
}

/// Logical display region a toast belongs to.
///
/// Consumer views filter the shared pool by provider key. The distinguished
/// [`ProviderKey::Persists`] value broadcasts a toast to every view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProviderKey {
    /// The implicit region used when no key is given.
    #[default]
    Default,
    /// Visible in every display region regardless of the view's own key.
    Persists,
    /// A caller-defined region.
    Named(String),
}

impl ProviderKey {
    /// A caller-defined region key.
    pub fn named(key: impl Into<String>) -> Self {
        Self::Named(key.into())
    }
}

/// Message content: a literal string or a function of the current toast.
///
/// Lazy messages are resolved on every read and never memoized, so content
/// derived from mutable toast state (e.g. a progress figure carried in the
/// record) stays current across re-renders.
#[derive(Clone)]
pub enum ToastMessage {
    /// Literal text.
    Text(String),
    /// Computed from the toast at read time.
    Lazy(Arc<dyn Fn(&Toast) -> String + Send + Sync>),
}

impl ToastMessage {
    /// Build a lazy message from a closure over the toast.
    pub fn lazy(f: impl Fn(&Toast) -> String + Send + Sync + 'static) -> Self {
        Self::Lazy(Arc::new(f))
    }

    /// Resolve the message against the current record.
    pub fn resolve(&self, toast: &Toast) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Lazy(f) => f(toast),
        }
    }
}

impl fmt::Debug for ToastMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for ToastMessage {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for ToastMessage {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// One transient notification record.
///
/// Only `provider_key` (filtering) and `dismiss_reason` (set by dismissal)
/// mean anything to the reducer; the remaining presentation fields ride
/// along for the render layer.
#[derive(Debug, Clone)]
pub struct Toast {
    /// Unique within the process.
    pub id: ToastId,
    /// Fixed at creation; selects default duration and indicator.
    pub kind: ToastKind,
    /// Literal or computed content, resolved at read time.
    pub message: ToastMessage,
    /// True while shown; cleared by dismissal to let the exit animation run
    /// before the record is evicted.
    pub visible: bool,
    /// Set once at construction.
    pub created_at: Instant,
    /// Cumulative time spent paused; only ever grows.
    pub pause_duration: Duration,
    /// Caller-supplied auto-dismiss duration; `None` defers to kind, view,
    /// and built-in defaults.
    pub duration: Option<Duration>,
    /// Explicit anchor; `None` defers to view defaults.
    pub position: Option<ToastPosition>,
    /// Measured rendered height, recorded by the consumer view.
    pub height: Option<f32>,
    /// Measured rendered width.
    pub width: Option<f32>,
    /// Override for the kind's default indicator.
    pub icon: Option<String>,
    /// Text handed to the screen-reader announcer hook when the toast is
    /// shown.
    pub accessibility_message: Option<String>,
    /// Whether swipe-to-dismiss applies.
    pub swipeable: bool,
    /// Why the toast was dismissed, once it has been.
    pub dismiss_reason: Option<DismissReason>,
    /// Display region; `Persists` broadcasts to every view.
    pub provider_key: ProviderKey,
}

impl Toast {
    /// Build a record with construction defaults, then apply `options`.
    ///
    /// Defaults: visible, zero pause time, swipeable, the default provider
    /// key, no explicit duration or position, and a generated id when the
    /// options carry none.
    pub fn build(
        kind: ToastKind,
        message: impl Into<ToastMessage>,
        options: ToastOptions,
        created_at: Instant,
    ) -> Self {
        Self {
            id: options.id.unwrap_or_else(ToastId::next),
            kind,
            message: message.into(),
            visible: true,
            created_at,
            pause_duration: Duration::ZERO,
            duration: options.duration,
            position: options.position,
            height: options.height,
            width: options.width,
            icon: options.icon,
            accessibility_message: options.accessibility_message,
            swipeable: options.swipeable.unwrap_or(true),
            dismiss_reason: None,
            provider_key: options.provider_key.unwrap_or_default(),
        }
    }

    /// Shallow-merge a patch: supplied fields replace, absent fields keep.
    pub fn apply(&mut self, patch: &ToastPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(message) = &patch.message {
            self.message = message.clone();
        }
        if let Some(visible) = patch.visible {
            self.visible = visible;
        }
        if let Some(duration) = patch.duration {
            self.duration = Some(duration);
        }
        if let Some(position) = patch.position {
            self.position = Some(position);
        }
        if let Some(height) = patch.height {
            self.height = Some(height);
        }
        if let Some(width) = patch.width {
            self.width = Some(width);
        }
        if let Some(icon) = &patch.icon {
            self.icon = Some(icon.clone());
        }
        if let Some(reason) = patch.dismiss_reason {
            self.dismiss_reason = Some(reason);
        }
    }
}

/// Caller-facing options for constructing or refreshing a toast.
#[derive(Debug, Clone, Default)]
pub struct ToastOptions {
    /// Reuse an existing id instead of generating one.
    pub id: Option<ToastId>,
    /// Explicit auto-dismiss duration.
    pub duration: Option<Duration>,
    /// Explicit anchor.
    pub position: Option<ToastPosition>,
    /// Pre-measured height.
    pub height: Option<f32>,
    /// Pre-measured width.
    pub width: Option<f32>,
    /// Indicator override.
    pub icon: Option<String>,
    /// Screen-reader announcement.
    pub accessibility_message: Option<String>,
    /// Swipe-to-dismiss override.
    pub swipeable: Option<bool>,
    /// Display region.
    pub provider_key: Option<ProviderKey>,
}

impl ToastOptions {
    /// Options with every field deferred to defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target an explicit id.
    pub fn id(mut self, id: impl Into<ToastId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an explicit auto-dismiss duration.
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Set an explicit anchor.
    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the indicator override.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the screen-reader announcement.
    pub fn accessibility_message(mut self, message: impl Into<String>) -> Self {
        self.accessibility_message = Some(message.into());
        self
    }

    /// Set whether swipe-to-dismiss applies.
    pub fn swipeable(mut self, swipeable: bool) -> Self {
        self.swipeable = Some(swipeable);
        self
    }

    /// Set the display region.
    pub fn provider_key(mut self, key: ProviderKey) -> Self {
        self.provider_key = Some(key);
        self
    }
}

/// Partial update applied to the record with the matching id.
///
/// `None` fields are left untouched; this is the Rust shape of the
/// original's shallow object merge.
#[derive(Debug, Clone)]
pub struct ToastPatch {
    /// Target record.
    pub id: ToastId,
    /// Replace the kind (used to flip loading into success/error).
    pub kind: Option<ToastKind>,
    /// Replace the message.
    pub message: Option<ToastMessage>,
    /// Replace visibility.
    pub visible: Option<bool>,
    /// Set an explicit duration.
    pub duration: Option<Duration>,
    /// Set an explicit anchor.
    pub position: Option<ToastPosition>,
    /// Record a measured height.
    pub height: Option<f32>,
    /// Record a measured width.
    pub width: Option<f32>,
    /// Replace the indicator.
    pub icon: Option<String>,
    /// Record a dismissal reason.
    pub dismiss_reason: Option<DismissReason>,
}

impl ToastPatch {
    /// An empty patch targeting `id`.
    pub fn for_id(id: impl Into<ToastId>) -> Self {
        Self {
            id: id.into(),
            kind: None,
            message: None,
            visible: None,
            duration: None,
            position: None,
            height: None,
            width: None,
            icon: None,
            dismiss_reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> Instant {
        Instant::now()
    }

    #[test]
    fn build_applies_construction_defaults() {
        let toast = Toast::build(ToastKind::Blank, "hello", ToastOptions::new(), at());
        assert!(toast.visible);
        assert_eq!(toast.pause_duration, Duration::ZERO);
        assert!(toast.swipeable);
        assert_eq!(toast.provider_key, ProviderKey::Default);
        assert!(toast.duration.is_none());
        assert!(toast.dismiss_reason.is_none());
        assert!(!toast.id.as_str().is_empty());
    }

    #[test]
    fn build_prefers_explicit_options() {
        let opts = ToastOptions::new()
            .id("status")
            .duration(Duration::from_secs(9))
            .position(ToastPosition::Bottom)
            .swipeable(false)
            .provider_key(ProviderKey::named("overlay"));
        let toast = Toast::build(ToastKind::Success, "saved", opts, at());
        assert_eq!(toast.id, ToastId::from("status"));
        assert_eq!(toast.duration, Some(Duration::from_secs(9)));
        assert_eq!(toast.position, Some(ToastPosition::Bottom));
        assert!(!toast.swipeable);
        assert_eq!(toast.provider_key, ProviderKey::named("overlay"));
    }

    #[test]
    fn apply_merges_only_supplied_fields() {
        let mut toast = Toast::build(ToastKind::Loading, "working", ToastOptions::new(), at());
        let created = toast.created_at;
        let mut patch = ToastPatch::for_id(toast.id.clone());
        patch.kind = Some(ToastKind::Success);
        patch.message = Some("done".into());
        toast.apply(&patch);
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.message.resolve(&toast), "done");
        assert_eq!(toast.created_at, created);
        assert!(toast.visible);
    }

    #[test]
    fn lazy_message_resolves_against_current_state() {
        let toast = Toast::build(
            ToastKind::Blank,
            ToastMessage::lazy(|t| format!("{} paused {}ms", t.id, t.pause_duration.as_millis())),
            ToastOptions::new().id("p"),
            at(),
        );
        assert_eq!(toast.message.resolve(&toast), "p paused 0ms");
        let mut later = toast.clone();
        later.pause_duration = Duration::from_millis(250);
        // Same message value, fresh result: nothing was memoized.
        assert_eq!(later.message.resolve(&later), "p paused 250ms");
    }

    #[test]
    fn builtin_durations_per_kind() {
        assert_eq!(
            ToastKind::Success.default_duration(),
            Some(Duration::from_millis(2000))
        );
        assert_eq!(
            ToastKind::Error.default_duration(),
            Some(Duration::from_millis(4000))
        );
        assert_eq!(
            ToastKind::Blank.default_duration(),
            Some(Duration::from_millis(4000))
        );
        assert_eq!(ToastKind::Loading.default_duration(), None);
    }
}
