//! Render inputs handed over by the orchestrator.
//!
//! Everything here is finalized data: the renderer reads it and never
//! changes it.

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::ui::{UiError, UiResult};

const COMMAND_OUTPUT_KEYS: [&str; 3] = ["stdout", "stderr", "exit_code"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub host: String,
}

impl Target {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorInfo {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: None,
            details: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// Captured output of a shell command or script run on a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i64>,
}

/// Task-defined payload attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenericValue {
    CommandOutput(CommandOutput),
    Structured(Value),
}

impl GenericValue {
    pub fn command(stdout: impl Into<String>, stderr: impl Into<String>, exit_code: i64) -> Self {
        Self::CommandOutput(CommandOutput {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code: Some(exit_code),
        })
    }

    /// Classifies an untagged payload. A mapping whose keys are exactly
    /// `stdout`, `stderr` and `exit_code` is command output; anything else
    /// is kept as a structured value.
    pub fn from_legacy(value: Value) -> UiResult<Self> {
        let Value::Object(map) = value else {
            return Ok(Self::Structured(value));
        };
        if !is_command_shape(&map) {
            return Ok(Self::Structured(Value::Object(map)));
        }
        tracing::trace!("classified untagged payload as command output");

        let exit_code = match map.get("exit_code") {
            None | Some(Value::Null) => None,
            Some(code) => Some(code.as_i64().ok_or_else(|| {
                UiError::Malformed(format!(
                    "command output exit_code must be an integer, got {code}"
                ))
            })?),
        };
        Ok(Self::CommandOutput(CommandOutput {
            stdout: stream_field(&map, "stdout")?,
            stderr: stream_field(&map, "stderr")?,
            exit_code,
        }))
    }
}

fn is_command_shape(map: &Map<String, Value>) -> bool {
    map.len() == COMMAND_OUTPUT_KEYS.len()
        && COMMAND_OUTPUT_KEYS.iter().all(|key| map.contains_key(*key))
}

fn stream_field(map: &Map<String, Value>, key: &str) -> UiResult<String> {
    match map.get(key) {
        Some(Value::String(text)) => Ok(text.clone()),
        other => Err(UiError::Malformed(format!(
            "command output {key} must be a string, got {}",
            other.map_or_else(|| "nothing".to_owned(), Value::to_string)
        ))),
    }
}

impl<'de> Deserialize<'de> for GenericValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        GenericValue::from_legacy(value).map_err(serde::de::Error::custom)
    }
}

/// Outcome of one task on one target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeResult {
    pub target: Target,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_value: Option<GenericValue>,
}

impl NodeResult {
    pub fn success(host: impl Into<String>) -> Self {
        Self {
            target: Target::new(host),
            success: true,
            error: None,
            message: None,
            generic_value: None,
        }
    }

    pub fn failure(host: impl Into<String>, error: ErrorInfo) -> Self {
        Self {
            target: Target::new(host),
            success: false,
            error: Some(error),
            message: None,
            generic_value: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_generic_value(mut self, value: GenericValue) -> Self {
        self.generic_value = Some(value);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    NodeStart { target: Target },
    NodeResult { result: NodeResult },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_optional(&self) -> bool {
        self.type_name.contains("Optional")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IndexMap<String, Parameter>>,
    #[serde(default)]
    pub supports_noop: bool,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parameters: None,
            supports_noop: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, parameter: Parameter) -> Self {
        self.parameters
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), parameter);
        self
    }

    pub fn with_noop(mut self, supports_noop: bool) -> Self {
        self.supports_noop = supports_noop;
        self
    }
}

/// Run-level failure. A present `resultset` means the failure aggregates
/// per-target outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FatalError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resultset: Option<Vec<NodeResult>>,
}

impl FatalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            resultset: None,
        }
    }

    pub fn run_failure(message: impl Into<String>, resultset: Vec<NodeResult>) -> Self {
        Self {
            message: message.into(),
            resultset: Some(resultset),
        }
    }
}

impl Display for FatalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FatalError {}

impl From<UiError> for FatalError {
    fn from(value: UiError) -> Self {
        Self::new(value.to_string())
    }
}

/// Value produced by evaluating a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlanValue {
    Mapping(Map<String, Value>),
    Sequence(Vec<Value>),
    Scalar(Value),
}

impl From<Value> for PlanValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => PlanValue::Mapping(map),
            Value::Array(items) => PlanValue::Sequence(items),
            scalar => PlanValue::Scalar(scalar),
        }
    }
}

impl<'de> Deserialize<'de> for PlanValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(PlanValue::from)
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
