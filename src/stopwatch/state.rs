use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_source::{MonotonicClock, SystemClock};

use super::format::format_elapsed;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StopwatchStatus {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StopwatchSnapshot {
    pub status: StopwatchStatus,
    pub elapsed_ms: u64,
    pub display: String,
}

/// Elapsed-time accounting across start/stop cycles.
///
/// Time from finished segments is banked in `accumulated_ms`; the segment in
/// progress is measured from `segment_start`, which is `Some` exactly while
/// the stopwatch runs.
#[derive(Debug, Clone, Default)]
pub struct StopwatchAccumulator<C: MonotonicClock = SystemClock> {
    clock: C,
    accumulated_ms: u64,
    segment_start: Option<Instant>,
}

impl StopwatchAccumulator<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: MonotonicClock> StopwatchAccumulator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            accumulated_ms: 0,
            segment_start: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.segment_start.is_some()
    }

    pub fn status(&self) -> StopwatchStatus {
        if self.is_running() {
            StopwatchStatus::Running
        } else {
            StopwatchStatus::Stopped
        }
    }

    pub fn start(&mut self) {
        if self.segment_start.is_none() {
            self.segment_start = Some(self.clock.now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(anchor) = self.segment_start.take() {
            let segment = self.segment_ms(anchor);
            self.accumulated_ms = self.accumulated_ms.saturating_add(segment);
        }
    }

    /// Back to zero and stopped. A segment in progress is discarded, not banked.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
        self.segment_start = None;
    }

    pub fn elapsed_ms(&self) -> u64 {
        match self.segment_start {
            Some(anchor) => self.accumulated_ms.saturating_add(self.segment_ms(anchor)),
            None => self.accumulated_ms,
        }
    }

    pub fn snapshot(&self) -> StopwatchSnapshot {
        let elapsed_ms = self.elapsed_ms();
        StopwatchSnapshot {
            status: self.status(),
            elapsed_ms,
            display: format_elapsed(elapsed_ms),
        }
    }

    // An anchor in the future (clock stepped back) counts as an empty segment.
    fn segment_ms(&self, anchor: Instant) -> u64 {
        let segment = self.clock.now().saturating_duration_since(anchor);
        u64::try_from(segment.as_millis()).unwrap_or(u64::MAX)
    }
}
