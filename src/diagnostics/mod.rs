// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the toast lifecycle.
//!
//! The store and the presenter report what they do (additions, duplicates
//! replaced, capacity evictions, expiries, dismissals) through a
//! [`DiagnosticsHandle`]. Events go through a bounded channel into a
//! [`DiagnosticsCollector`], which keeps them in a memory-bounded
//! [`CircularBuffer`] and can export them as a JSON report.

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticReport, DiagnosticsCollector, DiagnosticsHandle};
pub use events::{DiagnosticEvent, DiagnosticEventKind};
