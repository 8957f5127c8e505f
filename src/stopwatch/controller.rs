use std::{cell::RefCell, rc::Rc, time::Duration};

use crate::{
    display::{DisplayEvent, RenderSink},
    log_debug, log_info,
    scheduler::{PeriodicHandle, Scheduler},
    time_source::{MonotonicClock, SystemClock},
};

use super::{StopwatchAccumulator, StopwatchSnapshot};

const ENABLE_LOGS: bool = true;

/// Wires the accumulator to a render sink. While the stopwatch runs, a fast
/// ticker pushes the current reading; stopped stopwatches don't tick.
pub struct StopwatchController<C: MonotonicClock + 'static = SystemClock> {
    accumulator: Rc<RefCell<StopwatchAccumulator<C>>>,
    scheduler: Rc<dyn Scheduler>,
    sink: Rc<dyn RenderSink>,
    ticker: RefCell<Option<PeriodicHandle>>,
    tick_interval: Duration,
}

impl<C: MonotonicClock + 'static> StopwatchController<C> {
    pub fn new(
        accumulator: StopwatchAccumulator<C>,
        scheduler: Rc<dyn Scheduler>,
        sink: Rc<dyn RenderSink>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            accumulator: Rc::new(RefCell::new(accumulator)),
            scheduler,
            sink,
            ticker: RefCell::new(None),
            tick_interval,
        }
    }

    pub fn snapshot(&self) -> StopwatchSnapshot {
        self.accumulator.borrow().snapshot()
    }

    pub fn start(&self) -> StopwatchSnapshot {
        {
            let mut accumulator = self.accumulator.borrow_mut();
            if accumulator.is_running() {
                log_debug!("Stopwatch already running; start ignored");
                return accumulator.snapshot();
            }
            accumulator.start();
        }

        self.spawn_ticker();
        log_info!("Stopwatch started");
        self.emit_snapshot()
    }

    pub fn stop(&self) -> StopwatchSnapshot {
        let was_running = {
            let mut accumulator = self.accumulator.borrow_mut();
            let was_running = accumulator.is_running();
            accumulator.stop();
            was_running
        };
        self.cancel_ticker();

        if was_running {
            let snapshot = self.emit_snapshot();
            log_info!("Stopwatch stopped at {}", snapshot.display);
            snapshot
        } else {
            self.snapshot()
        }
    }

    pub fn reset(&self) -> StopwatchSnapshot {
        self.accumulator.borrow_mut().reset();
        self.cancel_ticker();
        log_info!("Stopwatch reset");
        self.emit_snapshot()
    }

    fn spawn_ticker(&self) {
        let accumulator = self.accumulator.clone();
        let sink = self.sink.clone();
        let handle = self.scheduler.register_periodic(
            self.tick_interval,
            Box::new(move || {
                let snapshot = accumulator.borrow().snapshot();
                emit_snapshot(sink.as_ref(), snapshot);
            }),
        );

        if let Some(previous) = self.ticker.replace(Some(handle)) {
            previous.cancel();
        }
    }

    fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.borrow_mut().take() {
            handle.cancel();
        }
    }

    fn emit_snapshot(&self) -> StopwatchSnapshot {
        let snapshot = self.snapshot();
        emit_snapshot(self.sink.as_ref(), snapshot.clone());
        snapshot
    }
}

fn emit_snapshot(sink: &dyn RenderSink, snapshot: StopwatchSnapshot) {
    sink.emit(DisplayEvent::StopwatchUpdated {
        status: snapshot.status,
        elapsed_ms: snapshot.elapsed_ms,
        display: snapshot.display,
    });
}
