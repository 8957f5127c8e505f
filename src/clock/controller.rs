use std::{cell::RefCell, rc::Rc, time::Duration};

use crate::{
    display::{DisplayEvent, RenderSink},
    log_debug, log_info,
    scheduler::{PeriodicHandle, Scheduler},
};

use super::{
    format::{sample_now, TimeSample},
    ClockFace, ClockReading,
};

const ENABLE_LOGS: bool = true;

pub type SampleSource = Rc<dyn Fn() -> TimeSample>;

/// Drives the wall-clock readout: a once-per-interval refresh plus the
/// 12h/24h toggle.
pub struct ClockController {
    face: Rc<RefCell<ClockFace>>,
    scheduler: Rc<dyn Scheduler>,
    sink: Rc<dyn RenderSink>,
    sample: SampleSource,
    ticker: RefCell<Option<PeriodicHandle>>,
    tick_interval: Duration,
}

impl ClockController {
    pub fn new(
        face: ClockFace,
        scheduler: Rc<dyn Scheduler>,
        sink: Rc<dyn RenderSink>,
        tick_interval: Duration,
    ) -> Self {
        Self::with_sample_source(face, scheduler, sink, tick_interval, Rc::new(sample_now))
    }

    pub fn with_sample_source(
        face: ClockFace,
        scheduler: Rc<dyn Scheduler>,
        sink: Rc<dyn RenderSink>,
        tick_interval: Duration,
        sample: SampleSource,
    ) -> Self {
        Self {
            face: Rc::new(RefCell::new(face)),
            scheduler,
            sink,
            sample,
            ticker: RefCell::new(None),
            tick_interval,
        }
    }

    pub fn face(&self) -> ClockFace {
        *self.face.borrow()
    }

    /// Renders right away, then keeps refreshing every tick.
    pub fn start(&self) -> ClockReading {
        let reading = self.refresh();

        let face = self.face.clone();
        let sink = self.sink.clone();
        let sample = self.sample.clone();
        let handle = self.scheduler.register_periodic(
            self.tick_interval,
            Box::new(move || {
                let reading = face.borrow().read(&sample());
                emit_reading(sink.as_ref(), reading);
            }),
        );

        if self.ticker.replace(Some(handle)).is_some() {
            log_debug!("Clock ticker restarted");
        }
        log_info!("Clock ticking every {:?}", self.tick_interval);

        reading
    }

    pub fn refresh(&self) -> ClockReading {
        let reading = self.face.borrow().read(&(self.sample)());
        emit_reading(self.sink.as_ref(), reading.clone());
        reading
    }

    pub fn toggle_format(&self) -> ClockReading {
        let (use_24_hour, label) = {
            let mut face = self.face.borrow_mut();
            let use_24_hour = face.toggle();
            (use_24_hour, face.toggle_label())
        };
        log_info!("Clock format switched to {}", if use_24_hour { "24h" } else { "12h" });

        self.sink.emit(DisplayEvent::FormatToggled {
            use_24_hour,
            label: label.to_string(),
        });
        self.refresh()
    }

    pub fn stop(&self) {
        if let Some(handle) = self.ticker.borrow_mut().take() {
            handle.cancel();
        }
    }
}

fn emit_reading(sink: &dyn RenderSink, reading: ClockReading) {
    sink.emit(DisplayEvent::ClockUpdated {
        time: reading.time,
        date: reading.date,
    });
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::{NaiveDate, TimeDelta};

    use super::*;
    use crate::{display::RecordingSink, scheduler::ManualScheduler};

    const SECOND: Duration = Duration::from_secs(1);

    struct Fixture {
        controller: ClockController,
        scheduler: Rc<ManualScheduler>,
        sink: Rc<RecordingSink>,
        now: Rc<Cell<TimeSample>>,
    }

    fn fixture() -> Fixture {
        let scheduler = Rc::new(ManualScheduler::default());
        let sink = Rc::new(RecordingSink::default());
        let now = Rc::new(Cell::new(
            NaiveDate::from_ymd_opt(2025, 3, 4)
                .unwrap()
                .and_hms_opt(14, 5, 9)
                .unwrap(),
        ));
        let now_clone = now.clone();
        let controller = ClockController::with_sample_source(
            ClockFace::default(),
            scheduler.clone(),
            sink.clone(),
            SECOND,
            Rc::new(move || now_clone.get()),
        );
        Fixture {
            controller,
            scheduler,
            sink,
            now,
        }
    }

    fn clock_updated(time: &str, date: &str) -> DisplayEvent {
        DisplayEvent::ClockUpdated {
            time: time.into(),
            date: date.into(),
        }
    }

    #[test]
    fn start_renders_immediately_and_registers_a_ticker() {
        let fx = fixture();
        let reading = fx.controller.start();

        assert_eq!(reading.time, "14:05:09");
        assert_eq!(
            fx.sink.events(),
            vec![clock_updated("14:05:09", "Tuesday, March 4, 2025")]
        );
        assert_eq!(fx.scheduler.active_intervals(), vec![SECOND]);
    }

    #[test]
    fn each_tick_samples_the_clock_again() {
        let fx = fixture();
        fx.controller.start();
        fx.sink.clear();

        fx.now.set(fx.now.get() + TimeDelta::seconds(1));
        fx.scheduler.fire(SECOND);
        fx.now.set(fx.now.get() + TimeDelta::hours(10));
        fx.scheduler.fire(SECOND);

        assert_eq!(
            fx.sink.events(),
            vec![
                clock_updated("14:05:10", "Tuesday, March 4, 2025"),
                clock_updated("00:05:10", "Wednesday, March 5, 2025"),
            ]
        );
    }

    #[test]
    fn toggle_announces_label_and_rerenders() {
        let fx = fixture();
        fx.controller.start();
        fx.sink.clear();

        let reading = fx.controller.toggle_format();
        assert_eq!(reading.time, "02:05:09 PM");
        assert!(!fx.controller.face().use_24_hour);
        assert_eq!(
            fx.sink.events(),
            vec![
                DisplayEvent::FormatToggled {
                    use_24_hour: false,
                    label: "Switch to 24H".into(),
                },
                clock_updated("02:05:09 PM", "Tuesday, March 4, 2025"),
            ]
        );

        // Ticks pick up the new format too.
        fx.scheduler.fire(SECOND);
        assert_eq!(
            fx.sink.last(),
            Some(clock_updated("02:05:09 PM", "Tuesday, March 4, 2025"))
        );
    }

    #[test]
    fn stop_cancels_the_ticker() {
        let fx = fixture();
        fx.controller.start();
        fx.controller.stop();

        assert!(fx.scheduler.active_intervals().is_empty());
        assert_eq!(fx.scheduler.fire(SECOND), 0);
    }
}
