// SPDX-License-Identifier: MPL-2.0
//! Toast queue rules.
//!
//! The `Store` owns the ordered list of active toasts. It enforces the two
//! queue invariants (unique messages, at most `MAX_VISIBLE_TOASTS` records)
//! and remembers the position new toasts inherit.

use super::record::{Position, ToastDuration, ToastId, ToastRecord, ToastRequest};
use crate::config::MAX_VISIBLE_TOASTS;
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use crate::toast::Kind;

/// Ordered collection of active toasts, oldest first.
#[derive(Debug, Default)]
pub struct Store {
    records: Vec<ToastRecord>,
    current_position: Position,
    default_duration: ToastDuration,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with explicit defaults for position and lifetime.
    #[must_use]
    pub fn with_defaults(position: Position, duration: ToastDuration) -> Self {
        Self {
            current_position: position,
            default_duration: duration,
            ..Self::default()
        }
    }

    /// Sets the diagnostics handle used to log queue changes.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Appends a toast built from `request` and returns its fresh id.
    ///
    /// A record with the same message is dropped first, then the oldest
    /// record if the queue is full. Dropped records do not get their
    /// `on_close` callback.
    pub fn add(&mut self, request: ToastRequest) -> ToastId {
        let ToastRequest {
            message,
            kind,
            title,
            position,
            duration,
            delay_animation: _,
            on_close,
            id: caller_id,
        } = request;

        if let Some(index) = self.records.iter().position(|r| r.message == message) {
            let replaced = self.records.remove(index);
            self.log(DiagnosticEventKind::Deduplicated {
                replaced: replaced.id,
            });
        }

        if self.records.len() >= MAX_VISIBLE_TOASTS {
            let evicted = self.records.remove(0);
            self.log(DiagnosticEventKind::Evicted { id: evicted.id });
        }

        let id = ToastId::new();
        let position = position.unwrap_or(self.current_position);

        match kind {
            Kind::Warning => self.log(DiagnosticEventKind::Warning {
                message: message.clone(),
            }),
            Kind::Error => self.log(DiagnosticEventKind::Error {
                message: message.clone(),
            }),
            Kind::Primary | Kind::Success => {}
        }

        self.records.push(ToastRecord {
            id,
            caller_id,
            kind,
            title: title.unwrap_or_else(|| kind.label().to_string()),
            message,
            delay_animation: false,
            position,
            duration: duration.unwrap_or(self.default_duration),
            on_close,
        });
        self.current_position = position;
        self.log(DiagnosticEventKind::Added { id, kind, position });

        id
    }

    /// Removes a record by id. Absent ids are ignored.
    ///
    /// Does not run `on_close`; closing is the presenter's job.
    pub fn remove(&mut self, id: ToastId) -> Option<ToastRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Clears the delay flag of a record in place. Absent ids are ignored.
    ///
    /// Returns `true` if the flag was set and is now cleared.
    pub fn clear_delay(&mut self, id: ToastId) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) if record.delay_animation => {
                record.delay_animation = false;
                true
            }
            _ => false,
        }
    }

    /// Flags a record as suppressed so the presenter re-arms it.
    ///
    /// Returns `false` if the record is not in the queue.
    pub fn mark_delayed(&mut self, id: ToastId) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.delay_animation = true;
                true
            }
            None => false,
        }
    }

    /// Returns the records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[ToastRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&ToastRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ToastId) -> bool {
        self.get(id).is_some()
    }

    /// Position adopted by the next toast that does not set one.
    #[must_use]
    pub fn current_position(&self) -> Position {
        self.current_position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn log(&self, kind: DiagnosticEventKind) {
        if let Some(handle) = &self.diagnostics {
            handle.log(kind);
        }
    }
}
