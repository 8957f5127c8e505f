pub mod controller;
pub mod format;
pub mod state;

pub use controller::ClockController;
pub use format::{format_date, format_time, format_toggle_label, sample_now, TimeSample};
pub use state::{ClockFace, ClockReading};
