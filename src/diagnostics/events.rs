// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for the toast lifecycle.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::toast::{Kind, Position, ToastId};

/// What happened to a toast.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A record was appended to the queue.
    Added {
        id: ToastId,
        kind: Kind,
        position: Position,
    },

    /// An existing record was dropped because a new toast carried the same message.
    Deduplicated { replaced: ToastId },

    /// The oldest record was dropped to keep the queue within capacity.
    Evicted { id: ToastId },

    /// A countdown reached the end and closed its record.
    Expired { id: ToastId },

    /// The user closed a record before it expired.
    Dismissed { id: ToastId },

    /// A record was observed with its delay flag set and re-armed.
    Rearmed { id: ToastId },

    /// A warning toast was raised.
    Warning { message: String },

    /// An error toast was raised.
    Error { message: String },
}

impl DiagnosticEventKind {
    /// Short category name used for report summaries.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            DiagnosticEventKind::Added { .. } => "added",
            DiagnosticEventKind::Deduplicated { .. } => "deduplicated",
            DiagnosticEventKind::Evicted { .. } => "evicted",
            DiagnosticEventKind::Expired { .. } => "expired",
            DiagnosticEventKind::Dismissed { .. } => "dismissed",
            DiagnosticEventKind::Rearmed { .. } => "rearmed",
            DiagnosticEventKind::Warning { .. } => "warning",
            DiagnosticEventKind::Error { .. } => "error",
        }
    }
}

/// A timestamped diagnostic event.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosticEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self { at: Utc::now(), kind }
    }
}
