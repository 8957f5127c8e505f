use chrono::{Local, NaiveDateTime};

/// Local wall-clock reading. Sampled fresh for every render, never stored.
pub type TimeSample = NaiveDateTime;

pub fn sample_now() -> TimeSample {
    Local::now().naive_local()
}

/// `14:05:09` in 24-hour mode, `02:05:09 PM` otherwise.
pub fn format_time(sample: &TimeSample, use_24_hour: bool) -> String {
    let pattern = if use_24_hour { "%H:%M:%S" } else { "%I:%M:%S %p" };
    sample.format(pattern).to_string()
}

/// Full weekday and month names, unpadded day: `Tuesday, March 4, 2025`.
pub fn format_date(sample: &TimeSample) -> String {
    sample.format("%A, %B %-d, %Y").to_string()
}

/// Text of the button that flips between the two time formats.
pub fn format_toggle_label(use_24_hour: bool) -> &'static str {
    if use_24_hour {
        "Switch to 12H"
    } else {
        "Switch to 24H"
    }
}
