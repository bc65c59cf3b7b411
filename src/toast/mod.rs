// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for the dashboard.
//!
//! Toasts report the outcome of an action (record saved, login failed, ...)
//! without blocking the page. They stack at the top or bottom edge, expire
//! on their own, pause while hovered, and can be closed by hand.
//!
//! # Components
//!
//! - [`record`] - `ToastRecord`, `ToastRequest` and their value types
//! - [`store`] - `Store` with the queue rules (dedup, capacity, position)
//! - [`queue`] - `ToastQueue`, the shared handle the application holds
//! - [`countdown`] - per-toast `Countdown` state machine
//! - [`presenter`] - `Presenter` owning one timer task per toast
//!
//! # Usage
//!
//! ```no_run
//! use mokhtabary_toasts::toast::{Presenter, ToastQueue, ToastRequest};
//!
//! # async fn demo() {
//! let queue = ToastQueue::default();
//! let mut presenter = Presenter::new(queue.clone());
//!
//! presenter.show(ToastRequest::success("Client saved"));
//!
//! let mut changes = queue.subscribe();
//! while changes.changed().await.is_ok() {
//!     presenter.sync();
//!     for toast in presenter.view() {
//!         println!("{} {}%", toast.record.message(), toast.progress);
//!     }
//! }
//! # }
//! ```
//!
//! # Queue rules
//!
//! - At most 3 toasts at once; the oldest is dropped for a 4th.
//! - Messages are unique; a repeated message replaces the older toast.
//! - Toasts without a position inherit the last one used.
//! - Dropped toasts (duplicate or capacity) never run `on_close`.

pub mod countdown;
pub mod presenter;
pub mod queue;
pub mod record;
pub mod store;

pub use countdown::{CloseReason, Countdown, Phase};
pub use presenter::{Presenter, ToastView};
pub use queue::ToastQueue;
pub use record::{Kind, OnClose, Position, ToastDuration, ToastId, ToastRecord, ToastRequest};
pub use store::Store;
