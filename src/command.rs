//! Line-oriented input for the terminal host.

use clap::{Parser, Subcommand};

use crate::tracker::Action;

#[derive(Parser, Debug)]
#[command(name = "flash-tracker", disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    input: Input,
}

/// One line of user input.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Input {
    #[command(flatten)]
    Action(Action),
    /// Print the current state.
    Status,
    /// Leave the tracker.
    #[command(alias = "exit")]
    Quit,
}

/// Parse a line such as `use mid` or `set 12:34`.
///
/// Errors carry clap's rendered message, including help output for `help`.
pub fn parse_line(line: &str) -> Result<Input, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "flash-tracker".to_string());
    let line = Line::try_parse_from(args).map_err(|e| e.to_string())?;
    Ok(line.input)
}
