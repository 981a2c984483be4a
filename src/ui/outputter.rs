use std::fmt::{Display, Formatter};

use crate::model::{Event, FatalError, NodeResult, PlanValue, Task};

pub type UiResult<T> = Result<T, UiError>;

#[derive(Debug)]
pub enum UiError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Malformed(String),
}

impl Display for UiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UiError::Io(error) => write!(f, "{error}"),
            UiError::Json(error) => write!(f, "invalid json: {error}"),
            UiError::Malformed(detail) => write!(f, "malformed input: {detail}"),
        }
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UiError::Io(error) => Some(error),
            UiError::Json(error) => Some(error),
            UiError::Malformed(_) => None,
        }
    }
}

impl From<std::io::Error> for UiError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for UiError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Output surface shared by every rendering format.
///
/// Callers must serialize their calls: implementations assume a single
/// writer and do no locking between calls.
pub trait Outputter {
    /// Run-start banner. Formats without one leave it as a no-op.
    fn print_head(&mut self) -> UiResult<()>;

    fn print_event(&mut self, event: &Event) -> UiResult<()>;
    fn print_result(&mut self, result: &NodeResult) -> UiResult<()>;
    fn print_summary(&mut self, results: &[NodeResult], elapsed_secs: f64) -> UiResult<()>;

    fn print_table(&mut self, rows: &[Vec<String>]) -> UiResult<()>;
    fn print_task_info(&mut self, task: &Task) -> UiResult<()>;
    fn print_plan(&mut self, value: &PlanValue) -> UiResult<()>;

    fn fatal_error(&mut self, error: &FatalError) -> UiResult<()>;
    fn print_message(&mut self, message: &str) -> UiResult<()>;
}
