use std::time::Duration;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub type TickCallback = Box<dyn FnMut()>;

/// Keeps a periodic registration alive. Dropping it stops the callbacks.
#[derive(Debug)]
pub struct PeriodicHandle {
    cancel_token: CancellationToken,
}

impl PeriodicHandle {
    pub fn new(cancel_token: CancellationToken) -> Self {
        Self { cancel_token }
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

impl Drop for PeriodicHandle {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

/// Source of periodic ticks. The core never owns an event loop; it asks one of
/// these to call it back.
pub trait Scheduler {
    fn register_periodic(&self, interval: Duration, callback: TickCallback) -> PeriodicHandle;
}

/// Runs callbacks as local tasks on the current thread's tokio `LocalSet`.
///
/// The first call happens one full interval after registration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalScheduler;

impl Scheduler for LocalScheduler {
    fn register_periodic(&self, interval: Duration, mut callback: TickCallback) -> PeriodicHandle {
        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        tokio::task::spawn_local(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token_clone.cancelled() => break,
                    _ = ticker.tick() => callback(),
                }
            }
        });

        PeriodicHandle::new(cancel_token)
    }
}

#[cfg(test)]
pub(crate) use manual::ManualScheduler;


#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use tokio::task::LocalSet;

    use super::*;

    fn counter() -> (Rc<Cell<u32>>, TickCallback) {
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        (count, Box::new(move || count_clone.set(count_clone.get() + 1)))
    }

    #[tokio::test(start_paused = true)]
    async fn local_scheduler_ticks_until_cancelled() {
        LocalSet::new()
            .run_until(async {
                let (count, callback) = counter();
                let handle = LocalScheduler.register_periodic(Duration::from_millis(50), callback);

                time::sleep(Duration::from_millis(120)).await;
                assert_eq!(count.get(), 2);

                handle.cancel();
                time::sleep(Duration::from_millis(500)).await;
                assert_eq!(count.get(), 2);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_ticks() {
        LocalSet::new()
            .run_until(async {
                let (count, callback) = counter();
                let handle = LocalScheduler.register_periodic(Duration::from_secs(1), callback);
                time::sleep(Duration::from_millis(1_500)).await;
                drop(handle);
                time::sleep(Duration::from_secs(10)).await;
                assert_eq!(count.get(), 1);
            })
            .await;
    }

    #[test]
    fn manual_scheduler_skips_cancelled_registrations() {
        let scheduler = ManualScheduler::default();
        let (fast, fast_callback) = counter();
        let (slow, slow_callback) = counter();
        let fast_handle = scheduler.register_periodic(Duration::from_millis(50), fast_callback);
        let _slow_handle = scheduler.register_periodic(Duration::from_secs(1), slow_callback);

        assert_eq!(scheduler.fire(Duration::from_millis(50)), 1);
        fast_handle.cancel();
        assert_eq!(scheduler.fire(Duration::from_millis(50)), 0);
        assert_eq!(scheduler.fire(Duration::from_secs(1)), 1);

        assert_eq!(fast.get(), 1);
        assert_eq!(slow.get(), 1);
        assert_eq!(scheduler.active_intervals(), vec![Duration::from_secs(1)]);
    }
}
