//! Forwards orchestrator records to an [`Outputter`], one at a time.

use std::io::BufRead;

use serde::Deserialize;

use crate::model::{Event, FatalError, NodeResult, PlanValue, Task};
use crate::ui::{Outputter, UiError, UiResult};

/// One line of a newline-delimited JSON record stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Head,
    Event {
        event: Event,
    },
    #[serde(rename = "result")]
    NodeResult {
        result: NodeResult,
    },
    Summary {
        results: Vec<NodeResult>,
        elapsed: f64,
    },
    Table {
        rows: Vec<Vec<String>>,
    },
    Task {
        task: Task,
    },
    Plan {
        value: PlanValue,
    },
    Fatal {
        error: FatalError,
    },
    Message {
        text: String,
    },
}

impl Record {
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Head => "head",
            Record::Event { .. } => "event",
            Record::NodeResult { .. } => "result",
            Record::Summary { .. } => "summary",
            Record::Table { .. } => "table",
            Record::Task { .. } => "task",
            Record::Plan { .. } => "plan",
            Record::Fatal { .. } => "fatal",
            Record::Message { .. } => "message",
        }
    }
}

pub fn dispatch(outputter: &mut dyn Outputter, record: &Record) -> UiResult<()> {
    tracing::debug!(kind = record.kind(), "dispatching record");
    match record {
        Record::Head => outputter.print_head(),
        Record::Event { event } => outputter.print_event(event),
        Record::NodeResult { result } => outputter.print_result(result),
        Record::Summary { results, elapsed } => outputter.print_summary(results, *elapsed),
        Record::Table { rows } => outputter.print_table(rows),
        Record::Task { task } => outputter.print_task_info(task),
        Record::Plan { value } => outputter.print_plan(value),
        Record::Fatal { error } => outputter.fatal_error(error),
        Record::Message { text } => outputter.print_message(text),
    }
}

/// Renders every record in `reader` in order and returns how many were
/// rendered. Stops at the first line that is not a valid record.
pub fn render_stream<R: BufRead>(reader: R, outputter: &mut dyn Outputter) -> UiResult<usize> {
    let mut rendered = 0usize;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let record: Record = serde_json::from_str(&line).map_err(|error| {
            tracing::debug!(line = line_number, %error, "rejecting malformed record");
            UiError::Malformed(format!("line {line_number}: {error}"))
        })?;
        dispatch(outputter, &record)?;
        rendered += 1;
    }
    tracing::debug!(rendered, "record stream finished");
    Ok(rendered)
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
