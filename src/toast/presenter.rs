// SPDX-License-Identifier: MPL-2.0
//! Drives each toast from insertion to removal.
//!
//! The `Presenter` keeps one [`Countdown`] and one tokio interval task per
//! record in the queue. Tasks are owned by the presenter entry for their
//! record and aborted when the entry is dropped, so a timer never outlives
//! its record (removal, eviction, manual close, or presenter teardown).
//!
//! Closing always runs `on_close` first and then removes the record. A task
//! that wakes up after its record was evicted stops without doing either.

use super::countdown::{CloseReason, Countdown, Phase};
use super::queue::ToastQueue;
use super::record::{ToastId, ToastRecord, ToastRequest};
use crate::diagnostics::{DiagnosticEventKind, DiagnosticsHandle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type SharedCountdown = Arc<Mutex<Countdown>>;

fn lock(countdown: &SharedCountdown) -> MutexGuard<'_, Countdown> {
    countdown.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A toast as the render layer should draw it.
#[derive(Debug, Clone)]
pub struct ToastView {
    pub record: ToastRecord,
    /// Progress bar fill in `0..=100`.
    pub progress: u8,
    pub hovered: bool,
}

struct ActiveToast {
    countdown: SharedCountdown,
    task: JoinHandle<()>,
}

impl Drop for ActiveToast {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct Presenter {
    queue: ToastQueue,
    active: HashMap<ToastId, ActiveToast>,
    runtime: Handle,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Presenter {
    /// Creates a presenter for `queue`, spawning timers on the current
    /// tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn new(queue: ToastQueue) -> Self {
        Self::with_runtime(queue, Handle::current())
    }

    #[must_use]
    pub fn with_runtime(queue: ToastQueue, runtime: Handle) -> Self {
        Self {
            queue,
            active: HashMap::new(),
            runtime,
            diagnostics: None,
        }
    }

    /// Sets the diagnostics handle for logging expiries and dismissals.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn queue(&self) -> &ToastQueue {
        &self.queue
    }

    /// Adds a toast to the queue and arms its timer.
    pub fn show(&mut self, request: ToastRequest) -> ToastId {
        let id = self.queue.add(request);
        self.sync();
        id
    }

    /// Reconciles timers with the queue.
    ///
    /// Records that left the queue lose their timer, new records get one,
    /// and records carrying the delay flag are suspended, have the flag
    /// cleared, and resume counting.
    pub fn sync(&mut self) {
        let records = self.queue.list();

        self.active
            .retain(|id, _| records.iter().any(|record| record.id() == *id));

        for record in &records {
            let id = record.id();
            match self.active.get(&id) {
                Some(active) => {
                    if record.delay_animation() {
                        lock(&active.countdown).suppress();
                        self.rearm(id, &active.countdown);
                    }
                }
                None => {
                    let countdown = Arc::new(Mutex::new(Countdown::new(
                        record.duration(),
                        record.delay_animation(),
                    )));
                    if record.delay_animation() {
                        self.rearm(id, &countdown);
                    }
                    let task = self.runtime.spawn(run_countdown(
                        self.queue.clone(),
                        id,
                        Arc::clone(&countdown),
                        record.duration().tick_interval(),
                        self.diagnostics.clone(),
                    ));
                    self.active.insert(id, ActiveToast { countdown, task });
                }
            }
        }
    }

    fn rearm(&self, id: ToastId, countdown: &SharedCountdown) {
        self.queue.clear_delay(id);
        if lock(countdown).arm() {
            if let Some(handle) = &self.diagnostics {
                handle.log(DiagnosticEventKind::Rearmed { id });
            }
        }
    }

    /// Sets the hover flag of one toast. Returns `false` if it has no timer.
    pub fn set_hovered(&mut self, id: ToastId, hovered: bool) -> bool {
        match self.active.get(&id) {
            Some(active) => {
                lock(&active.countdown).set_hovered(hovered);
                true
            }
            None => false,
        }
    }

    /// Flips the hover flag, as pointer enter and leave both do.
    pub fn toggle_hover(&mut self, id: ToastId) -> bool {
        match self.active.get(&id) {
            Some(active) => {
                lock(&active.countdown).toggle_hover();
                true
            }
            None => false,
        }
    }

    /// Closes a toast on user request.
    ///
    /// Runs `on_close` and removes the record. Returns `false` without side
    /// effects if the toast is already closed or gone.
    pub fn close(&mut self, id: ToastId) -> bool {
        let diagnostics = self.diagnostics.as_ref();
        let Some(active) = self.active.get(&id) else {
            return finish_close(&self.queue, id, CloseReason::Dismissed, diagnostics);
        };

        if !lock(&active.countdown).close() {
            // The timer got there first; its task finishes the close.
            return false;
        }
        self.active.remove(&id);
        finish_close(&self.queue, id, CloseReason::Dismissed, diagnostics)
    }

    /// Visible toasts in queue order. Suppressed toasts are left out.
    #[must_use]
    pub fn view(&self) -> Vec<ToastView> {
        self.queue
            .list()
            .into_iter()
            .filter(|record| !record.delay_animation())
            .filter_map(|record| match self.active.get(&record.id()) {
                Some(active) => {
                    let countdown = lock(&active.countdown);
                    countdown.is_visible().then(|| ToastView {
                        progress: countdown.progress(),
                        hovered: countdown.is_hovered(),
                        record: record.clone(),
                    })
                }
                None => Some(ToastView {
                    record,
                    progress: 0,
                    hovered: false,
                }),
            })
            .collect()
    }

    #[must_use]
    pub fn progress(&self, id: ToastId) -> Option<u8> {
        self.active
            .get(&id)
            .map(|active| lock(&active.countdown).progress())
    }

    #[must_use]
    pub fn phase(&self, id: ToastId) -> Option<Phase> {
        self.active
            .get(&id)
            .map(|active| lock(&active.countdown).phase())
    }

    /// Number of toasts holding a timer.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Cancels every timer. The queue itself is left untouched.
    pub fn shutdown(&mut self) {
        self.active.clear();
    }
}

impl std::fmt::Debug for Presenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenter")
            .field("queue", &self.queue)
            .field("active", &self.active.len())
            .finish_non_exhaustive()
    }
}

/// Timer loop of one toast.
async fn run_countdown(
    queue: ToastQueue,
    id: ToastId,
    countdown: SharedCountdown,
    interval: Duration,
    diagnostics: Option<DiagnosticsHandle>,
) {
    let mut ticker = tokio::time::interval(interval);
    // the first tick of a tokio interval completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match queue.is_delayed(id) {
            None => return,
            Some(true) => continue,
            Some(false) => {}
        }

        let outcome = {
            let mut countdown = lock(&countdown);
            if countdown.is_closed() {
                return;
            }
            countdown.tick()
        };

        if let Some(reason) = outcome {
            finish_close(&queue, id, reason, diagnostics.as_ref());
            return;
        }
    }
}

/// Runs `on_close` then removes the record. No-op if the record is gone.
fn finish_close(
    queue: &ToastQueue,
    id: ToastId,
    reason: CloseReason,
    diagnostics: Option<&DiagnosticsHandle>,
) -> bool {
    let Some(record) = queue.get(id) else {
        return false;
    };

    if let Some(on_close) = record.on_close() {
        on_close.call();
    }
    queue.remove(id);

    if let Some(handle) = diagnostics {
        handle.log(match reason {
            CloseReason::Expired => DiagnosticEventKind::Expired { id },
            CloseReason::Dismissed => DiagnosticEventKind::Dismissed { id },
        });
    }
    true
}
