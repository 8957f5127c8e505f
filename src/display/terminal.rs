use std::{
    cell::RefCell,
    io::{self, Write},
};

use log::error;

use super::{DisplayEvent, RenderSink, Theme};

#[derive(Debug, Default)]
struct Screen {
    time: String,
    date: String,
    format_label: String,
    stopwatch: String,
}

impl Screen {
    fn apply(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::ClockUpdated { time, date } => {
                self.time = time;
                self.date = date;
            }
            DisplayEvent::FormatToggled { label, .. } => self.format_label = label,
            DisplayEvent::StopwatchUpdated { display, .. } => self.stopwatch = display,
        }
    }
}

/// Single status line, redrawn in place on every event.
pub struct TerminalSurface {
    theme: Theme,
    screen: RefCell<Screen>,
}

impl TerminalSurface {
    pub fn new(theme: Theme, format_label: String, stopwatch: String) -> Self {
        Self {
            theme,
            screen: RefCell::new(Screen {
                format_label,
                stopwatch,
                ..Screen::default()
            }),
        }
    }

    fn render_line(&self, screen: &Screen) -> String {
        format!(
            "{} {} {} {} {}",
            self.theme.paint_bold(&screen.time),
            self.theme.paint(&screen.date),
            self.theme.paint("|"),
            self.theme.paint_bold(&screen.stopwatch),
            self.theme.paint(&format!("[{}]", screen.format_label)),
        )
    }
}

impl RenderSink for TerminalSurface {
    fn emit(&self, event: DisplayEvent) {
        let line = {
            let mut screen = self.screen.borrow_mut();
            screen.apply(event);
            self.render_line(&screen)
        };

        let mut stdout = io::stdout().lock();
        // Clear the current line and draw over it.
        if let Err(err) = write!(stdout, "\r\x1b[2K{line}").and_then(|_| stdout.flush()) {
            error!("Failed to redraw terminal surface: {}", err);
        }
    }
}

/// One JSON object per event on stdout, for piping into another front end.
#[derive(Debug, Default)]
pub struct JsonSurface;

impl RenderSink for JsonSurface {
    fn emit(&self, event: DisplayEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => {
                let mut stdout = io::stdout().lock();
                if let Err(err) = writeln!(stdout, "{json}").and_then(|_| stdout.flush()) {
                    error!("Failed to write display event: {}", err);
                }
            }
            Err(err) => error!("Failed to serialize display event: {}", err),
        }
    }
}
