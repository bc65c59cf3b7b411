// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing lifecycle events.
//!
//! Handles are handed to the toast store and presenter; the collector drains
//! them into a circular buffer and turns the buffer into a JSON report.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind};
use crate::config::DIAGNOSTICS_CHANNEL_CAPACITY;
use crate::error::Result;

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads and timer
/// tasks. Sending never blocks: events are dropped when the channel is full
/// or the collector is gone.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs a lifecycle event.
    pub fn log(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    pub fn log_warning(&self, message: impl Into<String>) {
        self.log(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }

    pub fn log_error(&self, message: impl Into<String>) {
        self.log(DiagnosticEventKind::Error {
            message: message.into(),
        });
    }
}

/// Central collector for diagnostic events.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    collection_started_at: DateTime<Utc>,
}

impl DiagnosticsCollector {
    /// Creates a new diagnostics collector with the specified buffer capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DIAGNOSTICS_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the event channel into the buffer.
    ///
    /// Call this periodically, e.g. whenever the toast queue changes.
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    /// Returns the buffered events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drains pending events and builds a report of everything buffered.
    pub fn build_report(&mut self) -> DiagnosticReport {
        self.process_pending();

        let mut summary = BTreeMap::new();
        for event in self.buffer.iter() {
            *summary.entry(event.kind.category()).or_insert(0) += 1;
        }

        DiagnosticReport {
            collection_started_at: self.collection_started_at,
            generated_at: Utc::now(),
            summary,
            events: self.buffer.iter().cloned().collect(),
        }
    }

    /// Writes the report as pretty JSON, creating parent directories.
    pub fn export_to_file(&mut self, path: &Path) -> Result<()> {
        let report = self.build_report();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, report.to_json()?)?;
        Ok(())
    }
}

/// Serializable snapshot of the collected events.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub collection_started_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    /// Event count per category.
    pub summary: BTreeMap<&'static str, usize>,
    pub events: Vec<DiagnosticEvent>,
}

impl DiagnosticReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastId;
    use tempfile::tempdir;

    #[test]
    fn handle_events_reach_buffer_after_processing() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let handle = collector.handle();

        handle.log_warning("low stock");
        handle.log(DiagnosticEventKind::Expired { id: ToastId::new() });
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn buffer_keeps_only_latest_events() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(10));
        let handle = collector.handle();

        for i in 0..25 {
            handle.log_error(format!("failure {i}"));
            collector.process_pending();
        }

        assert_eq!(collector.len(), 10);
        let first = collector.events().next().expect("buffer should not be empty");
        assert_eq!(
            first.kind,
            DiagnosticEventKind::Error {
                message: "failure 15".to_string()
            }
        );
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let handle = collector.handle();

        for _ in 0..(DIAGNOSTICS_CHANNEL_CAPACITY * 2) {
            handle.log_warning("spam");
        }

        collector.process_pending();
        assert_eq!(collector.len(), DIAGNOSTICS_CHANNEL_CAPACITY);
    }

    #[test]
    fn report_summarizes_categories() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        let handle = collector.handle();
        let id = ToastId::new();

        handle.log(DiagnosticEventKind::Evicted { id });
        handle.log(DiagnosticEventKind::Evicted { id });
        handle.log(DiagnosticEventKind::Dismissed { id });

        let report = collector.build_report();
        assert_eq!(report.summary.get("evicted"), Some(&2));
        assert_eq!(report.summary.get("dismissed"), Some(&1));
        assert_eq!(report.events.len(), 3);
    }

    #[test]
    fn export_writes_json_report() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::default());
        collector.handle().log_error("Login failed");

        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("reports").join("toasts.json");
        collector.export_to_file(&path).expect("export should succeed");

        let content = fs::read_to_string(&path).expect("report should exist");
        let json: serde_json::Value = serde_json::from_str(&content).expect("valid json");
        assert_eq!(json["summary"]["error"], 1);
        assert_eq!(json["events"][0]["message"], "Login failed");
    }
}
