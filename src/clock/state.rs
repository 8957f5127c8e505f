use serde::Serialize;

use super::format::{format_date, format_time, format_toggle_label, TimeSample};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockReading {
    pub time: String,
    pub date: String,
}

/// The clock's only configuration: which hour format to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockFace {
    pub use_24_hour: bool,
}

impl Default for ClockFace {
    fn default() -> Self {
        Self { use_24_hour: true }
    }
}

impl ClockFace {
    pub fn new(use_24_hour: bool) -> Self {
        Self { use_24_hour }
    }

    pub fn toggle(&mut self) -> bool {
        self.use_24_hour = !self.use_24_hour;
        self.use_24_hour
    }

    pub fn toggle_label(&self) -> &'static str {
        format_toggle_label(self.use_24_hour)
    }

    pub fn read(&self, sample: &TimeSample) -> ClockReading {
        ClockReading {
            time: format_time(sample, self.use_24_hour),
            date: format_date(sample),
        }
    }
}
