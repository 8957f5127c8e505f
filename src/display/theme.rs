use anyhow::{bail, Context, Result};
use colored::{ColoredString, Colorize};

pub const NEON_GREEN: &str = "#39FF14";

/// Neon-on-black palette: a single accent color over a black background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    accent: (u8, u8, u8),
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: (0x39, 0xFF, 0x14),
        }
    }
}

impl Theme {
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            bail!("accent color must look like #RRGGBB, got {hex:?}");
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .with_context(|| format!("invalid hex digits in accent color {hex:?}"))
        };

        Ok(Self {
            accent: (channel(0..2)?, channel(2..4)?, channel(4..6)?),
        })
    }

    pub fn accent(&self) -> (u8, u8, u8) {
        self.accent
    }

    pub fn paint(&self, text: &str) -> ColoredString {
        let (r, g, b) = self.accent;
        text.truecolor(r, g, b).on_black()
    }

    pub fn paint_bold(&self, text: &str) -> ColoredString {
        self.paint(text).bold()
    }
}
