use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Context, Result};

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Renders a duration in milliseconds as `HH:MM:SS.mmm`. Hours are not capped.
pub fn format_elapsed(ms: u64) -> String {
    ElapsedParts::from_ms(ms).to_string()
}

/// A stopwatch reading split into its display components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedParts {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
    pub millis: u16,
}

impl ElapsedParts {
    pub fn from_ms(ms: u64) -> Self {
        Self {
            hours: ms / MS_PER_HOUR,
            minutes: ((ms % MS_PER_HOUR) / MS_PER_MINUTE) as u8,
            seconds: ((ms % MS_PER_MINUTE) / MS_PER_SECOND) as u8,
            millis: (ms % MS_PER_SECOND) as u16,
        }
    }

    pub fn total_ms(&self) -> u64 {
        self.hours
            .saturating_mul(MS_PER_HOUR)
            .saturating_add(u64::from(self.minutes) * MS_PER_MINUTE)
            .saturating_add(u64::from(self.seconds) * MS_PER_SECOND)
            .saturating_add(u64::from(self.millis))
    }
}

impl fmt::Display for ElapsedParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

impl FromStr for ElapsedParts {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let (clock, millis) = input
            .split_once('.')
            .ok_or_else(|| anyhow!("missing millisecond separator in {input:?}"))?;

        let mut fields = clock.split(':');
        let (Some(hours), Some(minutes), Some(seconds), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            bail!("expected HH:MM:SS.mmm, got {input:?}");
        };

        if hours.len() < 2 || minutes.len() != 2 || seconds.len() != 2 || millis.len() != 3 {
            bail!("expected zero-padded HH:MM:SS.mmm, got {input:?}");
        }

        let parts = Self {
            hours: hours.parse().context("invalid hours")?,
            minutes: minutes.parse().context("invalid minutes")?,
            seconds: seconds.parse().context("invalid seconds")?,
            millis: millis.parse().context("invalid milliseconds")?,
        };

        if parts.minutes > 59 || parts.seconds > 59 {
            bail!("minutes and seconds must be below 60 in {input:?}");
        }

        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero() {
        assert_eq!(format_elapsed(0), "00:00:00.000");
    }

    #[test]
    fn formats_milliseconds_only() {
        assert_eq!(format_elapsed(7), "00:00:00.007");
        assert_eq!(format_elapsed(999), "00:00:00.999");
    }

    #[test]
    fn formats_seconds_and_millis() {
        assert_eq!(format_elapsed(1_500), "00:00:01.500");
    }

    #[test]
    fn formats_minute_and_hour_rollover() {
        assert_eq!(format_elapsed(59_999), "00:00:59.999");
        assert_eq!(format_elapsed(60_000), "00:01:00.000");
        assert_eq!(format_elapsed(3_599_999), "00:59:59.999");
        assert_eq!(format_elapsed(3_600_000), "01:00:00.000");
    }

    #[test]
    fn hours_are_not_capped() {
        assert_eq!(format_elapsed(100 * MS_PER_HOUR + 1), "100:00:00.001");
        assert_eq!(format_elapsed(1_234 * MS_PER_HOUR), "1234:00:00.000");
    }

    #[test]
    fn parses_formatted_text_back_into_parts() {
        let parts: ElapsedParts = "27:03:09.045".parse().unwrap();
        assert_eq!(
            parts,
            ElapsedParts {
                hours: 27,
                minutes: 3,
                seconds: 9,
                millis: 45,
            }
        );
        assert_eq!(parts.total_ms(), 27 * MS_PER_HOUR + 3 * MS_PER_MINUTE + 9_045);
    }

    #[test]
    fn rejects_malformed_text() {
        for input in ["", "00:00:00", "00:00.000", "0:00:00.000", "00:60:00.000", "00:00:00.1", "aa:00:00.000"] {
            assert!(input.parse::<ElapsedParts>().is_err(), "{input:?} should not parse");
        }
    }
}
