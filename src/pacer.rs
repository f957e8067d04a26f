use std::time::{Duration, Instant};

/// Keeps track of when the next simulation tick is due
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FramePacer {
    period: Duration,
    deadline: Option<Instant>,
}

impl FramePacer {
    pub(crate) fn new(period: Duration) -> FramePacer {
        FramePacer {
            period,
            deadline: None,
        }
    }

    /// Return how long until the next tick is due.  If no tick is scheduled,
    /// one is scheduled for one period from now.
    pub(crate) fn remaining(&mut self) -> Duration {
        let period = self.period;
        let deadline = *self
            .deadline
            .get_or_insert_with(|| Instant::now() + period);
        deadline.saturating_duration_since(Instant::now())
    }

    /// Forget the current deadline so that the next call to `remaining()`
    /// starts a fresh period
    pub(crate) fn rearm(&mut self) {
        self.deadline = None;
    }
}
