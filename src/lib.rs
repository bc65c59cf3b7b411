// SPDX-License-Identifier: MPL-2.0
//! `mokhtabary_toasts` is the notification core of the Mokhtabary admin
//! dashboard.
//!
//! It keeps a small queue of toasts raised by the dashboard's pages and
//! drives each one through its countdown until it expires or is closed.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod toast;

pub use error::{Error, Result};
pub use toast::{Presenter, ToastQueue, ToastRequest};
