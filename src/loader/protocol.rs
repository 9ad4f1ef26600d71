//! Request/response exchanged with the bootstrap script.
//!
//! The request is one JSON object written to the interpreter's stdin. The
//! response is one JSON object the bootstrap writes to `result_path`.

use super::{Inspection, Invocation};
use crate::error::{HostError, Result};
use crate::program::Diagnostics;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(super) enum Operation {
    Inspect,
    Invoke,
}

#[derive(Debug, Serialize)]
pub(super) struct Request<'a> {
    pub op: Operation,
    pub path: &'a Path,
    pub module: &'a str,
    pub search_dir: &'a Path,
    pub entry_point: &'a str,
    pub arguments: &'a Map<String, Value>,
    pub result_path: &'a Path,
}

impl Request<'_> {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            HostError::ProtocolError(format!("failed to encode request for '{}': {}", self.path.display(), e))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(super) enum Response {
    EntryPoint { parameters: Vec<String> },
    NoEntryPoint,
    LoadFailed { error: Diagnostics },
    Returned { value: Value },
    Raised { error: Diagnostics },
}

impl Response {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| {
            HostError::ProtocolError(format!("unreadable response from interpreter: {}", e))
        })
    }

    pub fn into_inspection(self) -> Result<Inspection> {
        match self {
            Response::EntryPoint { parameters } => Ok(Inspection::EntryPoint { parameters }),
            Response::NoEntryPoint => Ok(Inspection::NoEntryPoint),
            Response::LoadFailed { error } | Response::Raised { error } => {
                Ok(Inspection::LoadFailed(error))
            }
            Response::Returned { .. } => Err(HostError::ProtocolError(
                "interpreter answered an inspection with a return value".to_string(),
            )),
        }
    }

    pub fn into_invocation(self) -> Result<Invocation> {
        match self {
            Response::Returned { value } => Ok(Invocation::Returned(value)),
            Response::NoEntryPoint => Ok(Invocation::NoEntryPoint),
            Response::Raised { error } | Response::LoadFailed { error } => {
                Ok(Invocation::Raised(error))
            }
            Response::EntryPoint { .. } => Err(HostError::ProtocolError(
                "interpreter answered an invocation with an inspection".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_encodes_operation_in_snake_case() {
        let arguments = Map::new();
        let request = Request {
            op: Operation::Inspect,
            path: Path::new("/p/add.py"),
            module: "add",
            search_dir: Path::new("/p"),
            entry_point: "execute",
            arguments: &arguments,
            result_path: Path::new("/tmp/r.json"),
        };
        let value: Value = serde_json::from_slice(&request.to_bytes().unwrap()).unwrap();
        assert_eq!(value["op"], "inspect");
        assert_eq!(value["module"], "add");
        assert_eq!(value["arguments"], json!({}));
    }

    #[test]
    fn parses_entry_point_response() {
        let response = Response::parse(r#"{"status": "entry_point", "parameters": ["a", "b"]}"#)
            .unwrap();
        assert_eq!(
            response.into_inspection().unwrap(),
            Inspection::EntryPoint {
                parameters: vec!["a".into(), "b".into()]
            }
        );
    }

    #[test]
    fn parses_raised_response() {
        let text = r#"{"status": "raised", "error": {"message": "boom", "error_type": "ValueError", "trace": "Traceback..."}}"#;
        match Response::parse(text).unwrap().into_invocation().unwrap() {
            Invocation::Raised(d) => {
                assert_eq!(d.message, "boom");
                assert_eq!(d.error_type.as_deref(), Some("ValueError"));
            }
            other => panic!("unexpected invocation: {:?}", other),
        }
    }

    #[test]
    fn mismatched_response_is_protocol_error() {
        let response = Response::parse(r#"{"status": "returned", "value": 1}"#).unwrap();
        assert!(matches!(
            response.into_inspection(),
            Err(HostError::ProtocolError(_))
        ));
    }

    #[test]
    fn garbage_is_protocol_error() {
        assert!(matches!(
            Response::parse("not json"),
            Err(HostError::ProtocolError(_))
        ));
        assert!(matches!(
            Response::parse(r#"{"status": "exploded"}"#),
            Err(HostError::ProtocolError(_))
        ));
    }
}
