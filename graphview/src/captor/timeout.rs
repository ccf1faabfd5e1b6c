use std::time::Duration;

/// A single cancelable delayed task, driven by the elapsed frame time.
///
/// Scheduling replaces a pending task, so at most one is ever outstanding.
#[derive(Debug, Clone, Default)]
pub struct MovingTimeout {
    remaining: Option<Duration>,
}

impl MovingTimeout {
    pub fn schedule(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    /// Cancels the pending task. Returns false if nothing was pending.
    pub fn cancel(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advances time by `dt`. Returns true exactly once, when the delay has elapsed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(remaining) if dt >= remaining => {
                self.remaining = None;
                true
            }
            Some(remaining) => {
                self.remaining = Some(remaining - dt);
                false
            }
            None => false,
        }
    }
}
