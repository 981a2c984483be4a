use std::io::{IsTerminal, Write};

use anstream::{AutoStream, ColorChoice};

use crate::model::{Event, FatalError, GenericValue, NodeResult, PlanValue, Task};
use crate::ui::color::{colorize, Color};
use crate::ui::outputter::{Outputter, UiResult};
use crate::ui::table::render_table;
use crate::ui::text::{indent, remove_trailing_whitespace};
use crate::ui::theme::{resolve_color_enabled, OutputMode};

pub const DEFAULT_RUN_COMMAND: &str = "task run";

/// Colorized, indented terminal output.
///
/// Every call assembles its full text before a single write and flush, so
/// lines from separate calls never interleave.
pub struct HumanOutputter<W: Write> {
    writer: W,
    color_enabled: bool,
    run_command: String,
}

impl<W: Write> HumanOutputter<W> {
    pub fn new(writer: W, color_enabled: bool) -> Self {
        Self {
            writer,
            color_enabled,
            run_command: DEFAULT_RUN_COMMAND.to_owned(),
        }
    }

    pub fn with_run_command(mut self, run_command: impl Into<String>) -> Self {
        self.run_command = run_command.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn colorize(&self, color: Color, text: &str) -> String {
        colorize(color, text, self.color_enabled)
    }

    pub fn usage(&self, task: &Task) -> String {
        let mut usage = format!("{} --nodes, -n <node-name> {}", self.run_command, task.name);
        for (name, parameter) in task.parameters.iter().flatten() {
            if parameter.is_optional() {
                usage.push_str(&format!(" [{name}=<value>]"));
            } else {
                usage.push_str(&format!(" {name}=<value>"));
            }
        }
        if task.supports_noop {
            usage.push_str(" [--noop]");
        }
        usage
    }

    fn emit(&mut self, out: &str) -> UiResult<()> {
        self.writer.write_all(out.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    fn start_text(&self, host: &str) -> String {
        self.colorize(Color::Green, &format!("Started on {host}..."))
    }

    fn result_text(&self, result: &NodeResult) -> UiResult<String> {
        let host = &result.target.host;
        let mut out = String::new();
        if result.success {
            puts(&mut out, &self.colorize(Color::Green, &format!("Finished on {host}:")));
        } else {
            puts(&mut out, &self.colorize(Color::Red, &format!("Failed on {host}:")));
        }

        if let Some(error) = &result.error {
            let body = indent(2, &error.msg);
            puts(
                &mut out,
                &self.colorize(Color::Red, remove_trailing_whitespace(&body)),
            );
        }

        if let Some(message) = &result.message {
            puts(&mut out, remove_trailing_whitespace(&indent(2, message)));
        }

        match &result.generic_value {
            Some(GenericValue::CommandOutput(output)) => {
                // exit_code stays out of the human view; the run's own exit
                // status carries it.
                for (label, stream) in [("STDOUT:", &output.stdout), ("STDERR:", &output.stderr)] {
                    if stream.trim().is_empty() {
                        continue;
                    }
                    puts(&mut out, &indent(2, label));
                    puts(&mut out, &indent(4, stream));
                }
            }
            Some(GenericValue::Structured(value)) => {
                puts(&mut out, &indent(2, &serde_json::to_string_pretty(value)?));
            }
            None => {}
        }
        Ok(out)
    }
}

impl HumanOutputter<AutoStream<std::io::Stdout>> {
    pub fn stdout(mode: OutputMode) -> Self {
        let stream = AutoStream::new(std::io::stdout(), color_choice(mode));
        let color_enabled = resolve_color_enabled(mode, std::io::stdout().is_terminal());
        Self::new(stream, color_enabled)
    }
}

impl HumanOutputter<AutoStream<std::io::Stderr>> {
    pub fn stderr(mode: OutputMode) -> Self {
        let stream = AutoStream::new(std::io::stderr(), color_choice(mode));
        let color_enabled = resolve_color_enabled(mode, std::io::stderr().is_terminal());
        Self::new(stream, color_enabled)
    }
}

fn color_choice(mode: OutputMode) -> ColorChoice {
    match mode {
        OutputMode::Auto => ColorChoice::Auto,
        OutputMode::Always => ColorChoice::AlwaysAnsi,
        OutputMode::Never => ColorChoice::Never,
    }
}

/// Appends `text` as a line, adding a newline only if it lacks one.
fn puts(out: &mut String, text: &str) {
    out.push_str(text);
    if !text.ends_with('\n') {
        out.push('\n');
    }
}

impl<W: Write> Outputter for HumanOutputter<W> {
    fn print_head(&mut self) -> UiResult<()> {
        Ok(())
    }

    fn print_event(&mut self, event: &Event) -> UiResult<()> {
        match event {
            Event::NodeStart { target } => {
                let mut out = String::new();
                puts(&mut out, &self.start_text(&target.host));
                self.emit(&out)
            }
            Event::NodeResult { result } => self.print_result(result),
        }
    }

    fn print_result(&mut self, result: &NodeResult) -> UiResult<()> {
        let out = self.result_text(result)?;
        self.emit(&out)
    }

    fn print_summary(&mut self, results: &[NodeResult], elapsed_secs: f64) -> UiResult<()> {
        let count = results.len();
        let plural = if count == 1 { "" } else { "s" };
        let mut out = String::new();
        puts(
            &mut out,
            &format!("Ran on {count} node{plural} in {elapsed_secs:.2} seconds"),
        );
        self.emit(&out)
    }

    fn print_table(&mut self, rows: &[Vec<String>]) -> UiResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let mut out = String::new();
        puts(&mut out, &render_table(rows));
        self.emit(&out)
    }

    fn print_task_info(&mut self, task: &Task) -> UiResult<()> {
        let mut params = String::new();
        for (name, parameter) in task.parameters.iter().flatten() {
            params.push_str(&format!("- {name}: {}\n", parameter.type_name));
            if let Some(description) = &parameter.description {
                params.push_str(&format!("    {description}\n"));
            }
        }

        let mut info = format!("\n{}", task.name);
        if let Some(description) = &task.description {
            info.push_str(&format!(" - {description}"));
        }
        info.push_str("\n\n");
        info.push_str(&format!("USAGE:\n{}\n\n", self.usage(task)));
        if !params.is_empty() {
            info.push_str(&format!("PARAMETERS:\n{params}\n"));
        }

        let mut out = String::new();
        puts(&mut out, &info);
        self.emit(&out)
    }

    fn print_plan(&mut self, value: &PlanValue) -> UiResult<()> {
        let rendered = match value {
            PlanValue::Mapping(map) if map.is_empty() => serde_json::to_string(map)?,
            PlanValue::Mapping(map) => serde_json::to_string_pretty(map)?,
            PlanValue::Sequence(items) if items.is_empty() => serde_json::to_string(items)?,
            PlanValue::Sequence(items) => serde_json::to_string_pretty(items)?,
            PlanValue::Scalar(serde_json::Value::String(text)) => text.clone(),
            PlanValue::Scalar(serde_json::Value::Null) => String::new(),
            PlanValue::Scalar(scalar) => scalar.to_string(),
        };
        let mut out = String::new();
        puts(&mut out, &rendered);
        self.emit(&out)
    }

    fn fatal_error(&mut self, error: &FatalError) -> UiResult<()> {
        let mut out = String::new();
        puts(&mut out, &self.colorize(Color::Red, &error.message));
        if let Some(resultset) = &error.resultset {
            puts(&mut out, &serde_json::to_string_pretty(resultset)?);
        }
        self.emit(&out)
    }

    fn print_message(&mut self, message: &str) -> UiResult<()> {
        let mut out = String::new();
        puts(&mut out, message);
        self.emit(&out)
    }
}

#[cfg(test)]
#[path = "../tests/ui/human_tests.rs"]
mod tests;
