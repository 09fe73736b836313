//! Cancellable handle for an in-flight directions request.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a [`DirectionsTask`].
///
/// `Pending` and `Running` are live states. The other three are terminal
/// and never change once reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TaskState {
    /// Created but not yet picked up by the runtime.
    Pending = 0,
    /// The request has been issued.
    Running = 1,
    /// A response was decoded and delivered.
    Completed = 2,
    /// An error was delivered.
    Failed = 3,
    /// Cancelled before completion; the completion received
    /// [`DirectionsError::Cancelled`](crate::DirectionsError::Cancelled).
    Canceled = 4,
}

impl TaskState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Pending,
            1 => Self::Running,
            2 => Self::Completed,
            3 => Self::Failed,
            _ => Self::Canceled,
        }
    }

    /// Whether the state can no longer change.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Canceled)
    }
}

/// Handle returned by [`DirectionsClient::calculate`](crate::DirectionsClient::calculate).
///
/// Clones share the same state. Cancelling does not abort the network
/// call; it only guarantees that the completion never sees a success.
#[derive(Debug, Clone)]
pub struct DirectionsTask {
    state: Arc<AtomicU8>,
}

impl DirectionsTask {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(TaskState::Pending as u8)),
        }
    }

    /// Current state of the task.
    #[must_use]
    pub fn state(&self) -> TaskState {
        TaskState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Cancel the task if it has not finished yet.
    ///
    /// Returns `true` when this call moved the task to
    /// [`TaskState::Canceled`]; cancelling a finished task is a no-op that
    /// returns `false`.
    pub fn cancel(&self) -> bool {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (!TaskState::from_u8(current).is_terminal()).then_some(TaskState::Canceled as u8)
            })
            .is_ok()
    }

    /// Whether the task was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state() == TaskState::Canceled
    }

    /// Move `Pending` to `Running`; `false` if the task was cancelled first.
    pub(crate) fn start(&self) -> bool {
        self.transition(TaskState::Pending, TaskState::Running)
    }

    /// Move `Running` to a terminal state; `false` if cancelled meanwhile.
    pub(crate) fn finish(&self, outcome: TaskState) -> bool {
        self.transition(TaskState::Running, outcome)
    }

    fn transition(&self, from: TaskState, to: TaskState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
