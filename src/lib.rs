pub mod dispatch;
pub mod logging;
pub mod model;
pub mod ui;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::ui::{Outputter, UiResult};

pub const RUN_COMMAND_ENV: &str = "ROLLCALL_RUN_COMMAND";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Render(RenderArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderArgs {
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliParseError {
    MissingInputValue,
    UnknownArgument(String),
}

impl std::fmt::Display for CliParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliParseError::MissingInputValue => write!(f, "--input requires a value"),
            CliParseError::UnknownArgument(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliParseError {}

pub fn parse_command<I>(args: I) -> Result<Command, CliParseError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut render = RenderArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" | "-i" => {
                let Some(path) = args.next() else {
                    return Err(CliParseError::MissingInputValue);
                };
                render.input = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(CliParseError::UnknownArgument(other.to_owned())),
        }
    }

    Ok(Command::Render(render))
}

/// Renders the record stream named by `args` (stdin when no input is given).
pub fn run_render(args: &RenderArgs, outputter: &mut dyn Outputter) -> UiResult<usize> {
    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            tracing::debug!(path = %path.display(), "reading records from file");
            Box::new(BufReader::new(File::open(path)?))
        }
        None => Box::new(std::io::stdin().lock()),
    };
    dispatch::render_stream(reader, outputter)
}

pub fn usage_text() -> &'static str {
    "rollcall\n\nUSAGE:\n  rollcall [--input <PATH>]\n\nReads newline-delimited JSON records and renders them for humans.\n\nRECORD KINDS:\n  head, event, result, summary, table, task, plan, fatal, message\n\nOPTIONS:\n  -i, --input <PATH>  Read records from PATH instead of stdin\n  -h, --help          Print help\n\nENVIRONMENT:\n  ROLLCALL_COLOR        auto | always | never\n  NO_COLOR              Disable color\n  ROLLCALL_RUN_COMMAND  Command prefix shown in task usage lines\n  ROLLCALL_LOG          Log filter for stderr diagnostics (default: warn)\n"
}

pub fn print_usage() {
    eprint!("{}", usage_text());
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
