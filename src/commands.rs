use std::str::FromStr;

use anyhow::{bail, Result};

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetCommand {
    Start,
    Stop,
    Reset,
    ToggleFormat,
    Quit,
}

impl FromStr for WidgetCommand {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let command = match input.trim().to_ascii_lowercase().as_str() {
            "start" => Self::Start,
            "stop" => Self::Stop,
            "reset" => Self::Reset,
            "toggle" | "format" => Self::ToggleFormat,
            "quit" | "exit" => Self::Quit,
            "" => bail!("empty command"),
            other => bail!("unknown command {other:?} (try start, stop, reset, toggle, quit)"),
        };
        Ok(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn dispatch(state: &AppState, command: WidgetCommand) -> Flow {
    match command {
        WidgetCommand::Start => {
            state.stopwatch.start();
        }
        WidgetCommand::Stop => {
            state.stopwatch.stop();
        }
        WidgetCommand::Reset => {
            state.stopwatch.reset();
        }
        WidgetCommand::ToggleFormat => {
            state.clock.toggle_format();
        }
        WidgetCommand::Quit => return Flow::Exit,
    }
    Flow::Continue
}
