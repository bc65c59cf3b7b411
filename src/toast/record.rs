// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `ToastRecord` stored in the queue, the
//! `ToastRequest` builder callers hand to [`Store::add`](super::Store::add),
//! and the small value types they are made of.

use crate::config::{DEFAULT_TOAST_DURATION_MS, MAX_TOAST_DURATION_MS, PROGRESS_STEPS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Unique identifier for a toast record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Toast kind. Only affects presentation, never the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    #[default]
    Primary,
    Success,
    Warning,
    Error,
}

impl Kind {
    /// Lowercase label, also used as the fallback title.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Kind::Primary => "primary",
            Kind::Success => "success",
            Kind::Warning => "warning",
            Kind::Error => "error",
        }
    }

    /// Accent colour of the dashboard theme for this kind.
    #[must_use]
    pub fn accent_hex(self) -> &'static str {
        match self {
            Kind::Primary => "#3b82f6",
            Kind::Success => "#22c55e",
            Kind::Warning => "#f59e0b",
            Kind::Error => "#ef4444",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "primary" | "info" => Ok(Kind::Primary),
            "success" => Ok(Kind::Success),
            "warning" => Ok(Kind::Warning),
            "error" => Ok(Kind::Error),
            other => Err(format!("invalid toast kind: {}", other)),
        }
    }
}

/// Screen edge the toast stack is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Top,
    Bottom,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Top => f.write_str("top"),
            Position::Bottom => f.write_str("bottom"),
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" => Ok(Position::Top),
            "bottom" => Ok(Position::Bottom),
            other => Err(format!("invalid toast position: {}", other)),
        }
    }
}

/// Toast time-to-live, guaranteed to be at most `MAX_TOAST_DURATION_MS`.
///
/// Zero is accepted and means "close on the first tick".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastDuration(u64);

impl ToastDuration {
    /// Creates a duration from milliseconds, clamping to the valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.min(MAX_TOAST_DURATION_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Interval between two progress ticks: the lifetime split in
    /// `PROGRESS_STEPS` equal parts. Never zero.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        let micros = self.0 * 1_000 / u64::from(PROGRESS_STEPS);
        Duration::from_micros(micros.max(1))
    }
}

impl Default for ToastDuration {
    fn default() -> Self {
        Self(DEFAULT_TOAST_DURATION_MS)
    }
}

/// Callback run once when a toast is closed by expiry or by the user.
#[derive(Clone)]
pub struct OnClose(Arc<dyn Fn() + Send + Sync>);

impl OnClose {
    pub fn new(callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub fn call(&self) {
        (self.0)();
    }
}

impl fmt::Debug for OnClose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnClose(..)")
    }
}

/// What callers hand to the store to raise a toast.
///
/// Only `message` and `kind` matter to the store's rules; everything else
/// is optional and resolved at insertion.
#[derive(Debug, Clone, Default)]
pub struct ToastRequest {
    pub(crate) message: String,
    pub(crate) kind: Kind,
    pub(crate) title: Option<String>,
    pub(crate) position: Option<Position>,
    pub(crate) duration: Option<ToastDuration>,
    pub(crate) delay_animation: bool,
    pub(crate) on_close: Option<OnClose>,
    pub(crate) id: Option<String>,
}

impl ToastRequest {
    /// Creates a primary toast request.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn primary(message: impl Into<String>) -> Self {
        Self::new(message).kind(Kind::Primary)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message).kind(Kind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message).kind(Kind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message).kind(Kind::Error)
    }

    #[must_use]
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: ToastDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Requests a suppressed start. The store resets this flag on insertion;
    /// use [`Store::mark_delayed`](super::Store::mark_delayed) to suppress a
    /// record after the fact.
    #[must_use]
    pub fn delay_animation(mut self, delay: bool) -> Self {
        self.delay_animation = delay;
        self
    }

    #[must_use]
    pub fn on_close(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_close = Some(OnClose::new(callback));
        self
    }

    /// Attaches a caller-side identifier. It is carried on the record but
    /// never used for lookups.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn requested_kind(&self) -> Kind {
        self.kind
    }

    /// Whether the caller asked for a suppressed start.
    #[must_use]
    pub fn requested_delay(&self) -> bool {
        self.delay_animation
    }
}

/// A toast present in the queue.
#[derive(Debug, Clone)]
pub struct ToastRecord {
    pub(crate) id: ToastId,
    pub(crate) caller_id: Option<String>,
    pub(crate) kind: Kind,
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) delay_animation: bool,
    pub(crate) position: Position,
    pub(crate) duration: ToastDuration,
    pub(crate) on_close: Option<OnClose>,
}

impl ToastRecord {
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    /// Identifier supplied by the caller, if any.
    #[must_use]
    pub fn caller_id(&self) -> Option<&str> {
        self.caller_id.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn delay_animation(&self) -> bool {
        self.delay_animation
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn duration(&self) -> ToastDuration {
        self.duration
    }

    #[must_use]
    pub fn on_close(&self) -> Option<&OnClose> {
        self.on_close.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn toast_ids_are_unique() {
        assert_ne!(ToastId::new(), ToastId::new());
    }

    #[test]
    fn kind_accents_are_distinct() {
        let kinds = [Kind::Primary, Kind::Success, Kind::Warning, Kind::Error];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.accent_hex(), b.accent_hex());
            }
        }
    }

    #[test]
    fn kind_and_position_parse_case_insensitively() {
        assert_eq!("Success".parse::<Kind>(), Ok(Kind::Success));
        assert_eq!("info".parse::<Kind>(), Ok(Kind::Primary));
        assert_eq!("BOTTOM".parse::<Position>(), Ok(Position::Bottom));
        assert!("sideways".parse::<Position>().is_err());
        assert!("fatal".parse::<Kind>().is_err());
    }

    #[test]
    fn tick_interval_is_a_hundredth_of_the_lifetime() {
        assert_eq!(
            ToastDuration::from_millis(5_000).tick_interval(),
            Duration::from_millis(50)
        );
        assert_eq!(
            ToastDuration::from_millis(100).tick_interval(),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn zero_duration_still_has_a_tick_interval() {
        let duration = ToastDuration::from_millis(0);
        assert!(duration.is_zero());
        assert!(duration.tick_interval() > Duration::ZERO);
    }

    #[test]
    fn duration_is_clamped() {
        assert_eq!(
            ToastDuration::from_millis(u64::MAX).as_millis(),
            MAX_TOAST_DURATION_MS
        );
        assert_eq!(ToastDuration::default().as_millis(), DEFAULT_TOAST_DURATION_MS);
    }

    #[test]
    fn request_builder_sets_fields() {
        let request = ToastRequest::error("Upload failed")
            .title("Lab")
            .position(Position::Bottom)
            .id("lab-42");

        assert_eq!(request.message(), "Upload failed");
        assert_eq!(request.requested_kind(), Kind::Error);
        assert_eq!(request.title.as_deref(), Some("Lab"));
        assert_eq!(request.position, Some(Position::Bottom));
        assert_eq!(request.id.as_deref(), Some("lab-42"));
    }

    #[test]
    fn on_close_invokes_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let callback = OnClose::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        callback.call();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
