//! Background request tracking
//!
//! Network requests run on the tokio runtime while egui keeps drawing frames.
//! A [`TrackedTask`] pairs the spawned handle with the loading-overlay guard it
//! holds, so finishing, failing, or replacing a request always releases the
//! overlay.

use std::future::Future;

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::state::LoadingGuard;

/// Result of polling a task
pub enum PollResult<T> {
    /// No task to poll
    NoTask,
    /// Task is still running
    Pending,
    /// Task completed with result (may be Ok or join error)
    Complete(Result<T, tokio::task::JoinError>),
}

/// A spawned request plus the overlay guard it keeps alive.
///
/// Dropping an unfinished task aborts it. Slots that only ever hold one
/// request rely on this: starting a newer load replaces the old task, and the
/// stale response can no longer land.
pub struct TrackedTask<T> {
    handle: Option<JoinHandle<T>>,
    _loading: Option<LoadingGuard>,
}

impl<T: Send + 'static> TrackedTask<T> {
    /// Spawn `future` on the tokio runtime
    pub fn spawn<F>(future: F, loading: Option<LoadingGuard>) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(future)),
            _loading: loading,
        }
    }
}

impl<T> TrackedTask<T> {
    /// Whether the task has not produced its result yet
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Poll once without blocking
    pub fn poll(&mut self) -> PollResult<T> {
        let Some(handle) = &self.handle else {
            return PollResult::NoTask;
        };

        if !handle.is_finished() {
            return PollResult::Pending;
        }

        let Some(handle) = self.handle.take() else {
            return PollResult::NoTask;
        };
        match handle.now_or_never() {
            Some(result) => PollResult::Complete(result),
            None => {
                // Shouldn't happen since we checked is_finished()
                tracing::warn!("Task not ready despite is_finished()");
                PollResult::Pending
            }
        }
    }
}

impl<T> Drop for TrackedTask<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Poll an optional task slot, emptying it once the task completes.
///
/// # Example
/// ```ignore
/// match poll_slot(&mut self.styles_task) {
///     PollResult::Complete(Ok(Ok(styles))) => { /* success */ }
///     PollResult::Complete(Ok(Err(e))) => { /* request failed */ }
///     PollResult::Complete(Err(e)) => { /* task panicked */ }
///     PollResult::Pending => ctx.request_repaint(),
///     PollResult::NoTask => {}
/// }
/// ```
pub fn poll_slot<T>(slot: &mut Option<TrackedTask<T>>) -> PollResult<T> {
    let Some(task) = slot else {
        return PollResult::NoTask;
    };

    let result = task.poll();
    if matches!(result, PollResult::Complete(_)) {
        // Drops the loading guard with the task
        *slot = None;
    }
    result
}

/// Poll every task in a list, returning the completed results in spawn order.
///
/// Finished tasks are removed; `pending` is set when any remain.
pub fn poll_all<T>(
    tasks: &mut Vec<TrackedTask<T>>,
    pending: &mut bool,
) -> Vec<Result<T, tokio::task::JoinError>> {
    let mut finished = Vec::new();
    let mut remaining = Vec::with_capacity(tasks.len());

    for mut task in tasks.drain(..) {
        match task.poll() {
            PollResult::Complete(result) => finished.push(result),
            PollResult::Pending => remaining.push(task),
            PollResult::NoTask => {}
        }
    }

    *pending |= !remaining.is_empty();
    *tasks = remaining;
    finished
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LoadingOverlay;
    use std::time::Duration;

    async fn wait_until_finished<T>(slot: &mut Option<TrackedTask<T>>) -> PollResult<T> {
        for _ in 0..200 {
            match poll_slot(slot) {
                PollResult::Pending => tokio::time::sleep(Duration::from_millis(5)).await,
                other => return other,
            }
        }
        PollResult::Pending
    }

    #[tokio::test]
    async fn test_empty_slot() {
        let mut slot: Option<TrackedTask<u32>> = None;
        assert!(matches!(poll_slot(&mut slot), PollResult::NoTask));
    }

    #[tokio::test]
    async fn test_completion_releases_guard() {
        let overlay = LoadingOverlay::default();
        let mut slot = Some(TrackedTask::spawn(async { 7u32 }, Some(overlay.begin("Working"))));
        assert!(overlay.is_visible());

        match wait_until_finished(&mut slot).await {
            PollResult::Complete(Ok(value)) => assert_eq!(value, 7),
            _ => panic!("task did not complete"),
        }
        assert!(slot.is_none());
        assert!(!overlay.is_visible());
    }

    #[tokio::test]
    async fn test_replacing_task_aborts_previous() {
        let overlay = LoadingOverlay::default();
        let slow = TrackedTask::spawn(
            async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                1u32
            },
            Some(overlay.begin("Slow")),
        );
        let mut slot = Some(slow);
        assert!(slot.as_ref().is_some_and(|t| t.is_running()));
        assert_eq!(overlay.active_count(), 1);

        slot = Some(TrackedTask::spawn(async { 2u32 }, Some(overlay.begin("Fast"))));
        assert_eq!(overlay.active_count(), 1);

        match wait_until_finished(&mut slot).await {
            PollResult::Complete(Ok(value)) => assert_eq!(value, 2),
            _ => panic!("replacement did not complete"),
        }
        assert_eq!(overlay.active_count(), 0);
    }

    #[tokio::test]
    async fn test_poll_all_keeps_running_tasks() {
        let mut tasks = vec![
            TrackedTask::spawn(async { 1u32 }, None),
            TrackedTask::spawn(
                async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    2u32
                },
                None,
            ),
        ];

        let mut results = Vec::new();
        for _ in 0..200 {
            let mut pending = false;
            results.extend(poll_all(&mut tasks, &mut pending));
            if !results.is_empty() {
                assert!(pending);
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert_eq!(results.len(), 1);
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].is_running());
    }
}
