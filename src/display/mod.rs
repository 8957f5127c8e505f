//! Render side of the widget: the events the core pushes out and the sinks
//! that turn them into something visible.

pub mod terminal;
pub mod theme;

use serde::Serialize;

use crate::stopwatch::StopwatchStatus;

pub use terminal::{JsonSurface, TerminalSurface};
pub use theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(
    tag = "event",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum DisplayEvent {
    ClockUpdated {
        time: String,
        date: String,
    },
    FormatToggled {
        use_24_hour: bool,
        label: String,
    },
    StopwatchUpdated {
        status: StopwatchStatus,
        elapsed_ms: u64,
        display: String,
    },
}

/// Anything that can show display events. Called from the UI thread only.
pub trait RenderSink {
    fn emit(&self, event: DisplayEvent);
}

#[cfg(test)]
pub(crate) use recording::RecordingSink;
