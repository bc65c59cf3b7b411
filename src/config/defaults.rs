// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Toasts**: lifetime bounds and queue capacity
//! - **Diagnostics**: event buffer sizing

// ==========================================================================
// Toast Defaults
// ==========================================================================

/// Default time-to-live of a toast (in milliseconds).
pub const DEFAULT_TOAST_DURATION_MS: u64 = 5_000;

/// Maximum accepted toast time-to-live (in milliseconds).
pub const MAX_TOAST_DURATION_MS: u64 = 600_000;

/// Maximum number of toasts present in the queue at once.
pub const MAX_VISIBLE_TOASTS: usize = 3;

/// Number of progress units a countdown goes through before closing.
pub const PROGRESS_STEPS: u8 = 100;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of lifecycle events retained by the collector.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;

/// Capacity of the channel between diagnostics handles and the collector.
pub const DIAGNOSTICS_CHANNEL_CAPACITY: usize = 100;
