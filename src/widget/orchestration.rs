//! Handles to in-flight feature batches.

use crate::core::InteractionState;
use crate::features::BatchReport;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// How a widget treats the batch a new transition supersedes.
///
/// A widget holds at most one orchestration handle; every dispatch replaces
/// it. The policy decides what happens to the batch that loses its handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Keep superseded batches running to completion and let the newest
    /// writer win each contested value. Overlapping batches can leave
    /// features visually inconsistent with one another.
    #[default]
    Replace,
    /// Cancel the superseded batch's token before starting the new one.
    /// Its executors stop at their next await point and its chain action
    /// is skipped.
    CancelPrevious,
}

/// Handle to one in-flight fan-out batch.
///
/// Cloning shares the underlying batch; any clone can await completion or
/// read the report. Cancellation is the owning widget's call.
#[derive(Clone, Debug)]
pub struct Orchestration {
    sequence: u64,
    target: InteractionState,
    token: CancellationToken,
    done: watch::Receiver<Option<BatchReport>>,
}

impl Orchestration {
    pub(crate) fn new(
        sequence: u64,
        target: InteractionState,
        token: CancellationToken,
        done: watch::Receiver<Option<BatchReport>>,
    ) -> Self {
        Self {
            sequence,
            target,
            token,
            done,
        }
    }

    /// Monotonic dispatch number within the owning widget.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The state this batch is responding to.
    pub fn target(&self) -> InteractionState {
        self.target
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the batch has fanned back in.
    pub fn is_complete(&self) -> bool {
        self.done.borrow().is_some()
    }

    /// The batch report, available once the batch completes.
    pub fn report(&self) -> Option<BatchReport> {
        self.done.borrow().clone()
    }

    /// Wait for the batch to fan back in and return its report. Returns
    /// `None` only if the driving task went away without reporting.
    pub async fn completed(&self) -> Option<BatchReport> {
        let mut done = self.done.clone();
        loop {
            if let Some(report) = done.borrow_and_update().clone() {
                return Some(report);
            }
            if done.changed().await.is_err() {
                return done.borrow().clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle() -> (watch::Sender<Option<BatchReport>>, Orchestration) {
        let (done_tx, done_rx) = watch::channel(None);
        let orchestration = Orchestration::new(
            1,
            InteractionState::Hover,
            CancellationToken::new(),
            done_rx,
        );
        (done_tx, orchestration)
    }

    #[tokio::test]
    async fn starts_incomplete() {
        let (_done_tx, orchestration) = handle();
        assert!(!orchestration.is_complete());
        assert!(orchestration.report().is_none());
        assert!(!orchestration.is_cancelled());
    }

    #[tokio::test]
    async fn completed_resolves_with_the_report() {
        let (done_tx, orchestration) = handle();

        let waiter = tokio::spawn({
            let orchestration = orchestration.clone();
            async move { orchestration.completed().await }
        });
        done_tx
            .send(Some(BatchReport {
                state: InteractionState::Hover,
                failures: Vec::new(),
            }))
            .unwrap();

        let report = waiter.await.unwrap().unwrap();
        assert_eq!(report.state, InteractionState::Hover);
        assert_eq!(orchestration.target(), report.state);
        assert!(orchestration.is_complete());
    }

    #[tokio::test]
    async fn dropped_driver_resolves_with_none() {
        let (done_tx, orchestration) = handle();
        drop(done_tx);
        assert!(orchestration.completed().await.is_none());
    }

    #[tokio::test]
    async fn cancel_is_visible_to_clones() {
        let (_done_tx, orchestration) = handle();
        let observer = orchestration.clone();
        orchestration.cancel();
        assert!(observer.is_cancelled());
    }
}
