//! Tagged result of running a program.

use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure message used when a program has no entry point.
pub const MISSING_ENTRY_POINT_MESSAGE: &str = "No execute() function found in the program";

/// What went wrong while loading or running a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Human-readable error message.
    pub message: String,

    /// Exception class name, when the program raised.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,

    /// Formatted stack trace captured at the failure site. Absent when no
    /// program code ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl Diagnostics {
    /// Diagnostics carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type: None,
            trace: None,
        }
    }
}

/// Result of invoking a program: the entry point's return value, or
/// diagnostics describing the failure.
///
/// Serialized as `{"succeeded": true, "value": ...}` or
/// `{"succeeded": false, "diagnostics": {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Success { value: Value },
    Failure { diagnostics: Diagnostics },
}

impl ExecutionOutcome {
    pub fn success(value: Value) -> Self {
        Self::Success { value }
    }

    pub fn failure(diagnostics: Diagnostics) -> Self {
        Self::Failure { diagnostics }
    }

    /// The fixed failure returned for a program without an entry point.
    pub fn missing_entry_point() -> Self {
        Self::failure(Diagnostics::message(MISSING_ENTRY_POINT_MESSAGE))
    }

    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success { value } => Some(value),
            Self::Failure { .. } => None,
        }
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { diagnostics } => Some(diagnostics),
        }
    }
}

impl Serialize for ExecutionOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ExecutionOutcome", 2)?;
        state.serialize_field("succeeded", &self.succeeded())?;
        match self {
            Self::Success { value } => state.serialize_field("value", value)?,
            Self::Failure { diagnostics } => state.serialize_field("diagnostics", diagnostics)?,
        }
        state.end()
    }
}

impl<'de> Deserialize<'de> for ExecutionOutcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            succeeded: bool,
            #[serde(default)]
            value: Option<Value>,
            #[serde(default)]
            diagnostics: Option<Diagnostics>,
        }

        let raw = Raw::deserialize(deserializer)?;
        match (raw.succeeded, raw.diagnostics) {
            // A `null` return value deserializes as a missing field.
            (true, None) => Ok(Self::success(raw.value.unwrap_or(Value::Null))),
            (false, Some(diagnostics)) if raw.value.is_none() => Ok(Self::failure(diagnostics)),
            (false, None) => Err(de::Error::missing_field("diagnostics")),
            _ => Err(de::Error::custom(
                "exactly one of value and diagnostics must be present",
            )),
        }
    }
}
