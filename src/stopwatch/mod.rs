pub mod controller;
pub mod format;
pub mod state;

pub use controller::StopwatchController;
pub use format::{format_elapsed, ElapsedParts};
pub use state::{StopwatchAccumulator, StopwatchSnapshot, StopwatchStatus};
