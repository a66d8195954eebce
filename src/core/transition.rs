use crate::domain::model::Snapshot;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_TRANSITION_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initial,
    Updated,
}

/// The snapshot currently on display and which side of the swap it is.
#[derive(Debug, Clone)]
pub struct LayoutState {
    pub phase: Phase,
    pub snapshot: Snapshot,
}

/// Swaps the initial snapshot for the updated one, once, after a delay.
///
/// The swap runs on a spawned tokio task. [`cancel`](Self::cancel) or dropping
/// the controller aborts it; a cancelled swap never fires, on any runtime
/// flavor. The sender sits behind a lock that `cancel` empties, so a task
/// already past its sleep on another worker finds nothing to send with.
#[derive(Debug)]
pub struct TransitionController {
    state: watch::Receiver<LayoutState>,
    sender: Arc<Mutex<Option<watch::Sender<LayoutState>>>>,
    pending: Option<JoinHandle<()>>,
}

impl TransitionController {
    /// Must be called from within a tokio runtime.
    pub fn activate(initial: Snapshot, updated: Snapshot, delay: Duration) -> Self {
        let (sender, state) = watch::channel(LayoutState {
            phase: Phase::Initial,
            snapshot: initial,
        });

        tracing::debug!(
            "Scheduling layout swap in {:?} ({} -> {} entities)",
            delay,
            sender.borrow().snapshot.len(),
            updated.len()
        );

        let sender = Arc::new(Mutex::new(Some(sender)));
        let task_sender = Arc::clone(&sender);
        let pending = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = task_sender.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(sender) = slot.take() else {
                return;
            };
            let entities = updated.len();
            sender.send_replace(LayoutState {
                phase: Phase::Updated,
                snapshot: updated,
            });
            tracing::info!("Switched to updated layout ({} entities)", entities);
        });

        Self {
            state,
            sender,
            pending: Some(pending),
        }
    }

    /// The active snapshot. Always one whole snapshot, never a mix.
    pub fn current(&self) -> Snapshot {
        self.state.borrow().snapshot.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().phase
    }

    pub fn has_swapped(&self) -> bool {
        self.phase() == Phase::Updated
    }

    /// Receiver for presentation code that re-renders on every change.
    pub fn subscribe(&self) -> watch::Receiver<LayoutState> {
        self.state.clone()
    }

    /// Resolves `true` once the updated snapshot is active, `false` if the
    /// swap was cancelled first.
    pub async fn wait_for_swap(&mut self) -> bool {
        loop {
            if self.has_swapped() {
                return true;
            }
            if self.state.changed().await.is_err() {
                return self.has_swapped();
            }
        }
    }

    /// Waits for the swap unless `interrupt` completes first, in which case
    /// the swap is cancelled and `false` returned. An interrupt source that
    /// fails (for example a signal handler that cannot be installed) is
    /// logged and ignored.
    pub async fn wait_for_swap_or<F>(&mut self, interrupt: F) -> bool
    where
        F: Future<Output = std::io::Result<()>>,
    {
        let interrupted = tokio::select! {
            swapped = self.wait_for_swap() => return swapped,
            signal = interrupt => signal,
        };

        match interrupted {
            Ok(()) => {
                self.cancel();
                tracing::warn!("Layout swap interrupted");
                false
            }
            Err(e) => {
                tracing::warn!("Interrupt source unavailable ({}), waiting for the swap", e);
                self.wait_for_swap().await
            }
        }
    }

    /// Aborts the pending swap. Idempotent.
    pub fn cancel(&mut self) {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pending) = self.pending.take() {
            if !pending.is_finished() {
                tracing::debug!("Cancelling pending layout swap");
            }
            pending.abort();
        }
    }
}

impl Drop for TransitionController {
    fn drop(&mut self) {
        self.cancel();
    }
}
