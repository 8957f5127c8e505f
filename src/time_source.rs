use std::time::Instant;

/// Source of monotonic instants for duration measurement.
///
/// Wall-clock time is only ever used for display; anything that measures a
/// duration reads from an implementation of this trait instead.
pub trait MonotonicClock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl MonotonicClock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
pub(crate) use manual::ManualClock;

#[cfg(test)]
mod manual {
    use std::{cell::Cell, rc::Rc, time::Duration};

    use super::*;

    /// Clock that only moves when a test tells it to. Clones share the same instant.
    #[derive(Debug, Clone)]
    pub(crate) struct ManualClock {
        now: Rc<Cell<Instant>>,
    }

    impl ManualClock {
        pub(crate) fn new() -> Self {
            // Offset from the real clock so `rewind` has room to go backwards.
            Self {
                now: Rc::new(Cell::new(Instant::now() + Duration::from_secs(3600))),
            }
        }

        pub(crate) fn advance(&self, by: Duration) {
            self.now.set(self.now.get() + by);
        }

        pub(crate) fn rewind(&self, by: Duration) {
            self.now.set(self.now.get() - by);
        }
    }

    impl MonotonicClock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
    }
}
