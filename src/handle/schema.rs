//! Shared handle grammar definition for persisted data
//!
//! Server-side schemas validate stored `sourceHandle`/`targetHandle` values
//! with [`HANDLE_ID_PATTERN`]. It describes exactly the language the
//! [`HandleId`] parser accepts; `tests/handle_grammar.rs` cross-checks both.

use serde_json::json;

use crate::error::EdgeHandleError;

use super::id::HandleId;

/// Regular expression for canonical handle identifier text
pub const HANDLE_ID_PATTERN: &str = r"^(in|out)-(left|right|top|bottom)-([1-9][0-9]{0,18})$";

/// JSON Schema fragment for a handle identifier string
pub fn handle_id_json_schema() -> serde_json::Value {
    json!({
        "type": "string",
        "pattern": HANDLE_ID_PATTERN,
    })
}

/// Strictly validate one persisted handle reference
pub fn validate_handle_field(field: &'static str, value: &str) -> Result<HandleId, EdgeHandleError> {
    value.parse().map_err(|source| EdgeHandleError {
        field,
        value: value.to_string(),
        source,
    })
}

/// Validate the handle references of a persisted edge.
///
/// Either reference may be absent (edges attached to a node's default
/// connection point); present references must be canonical handle text.
pub fn validate_edge_handles(
    source_handle: Option<&str>,
    target_handle: Option<&str>,
) -> Result<(), EdgeHandleError> {
    if let Some(value) = source_handle {
        validate_handle_field("sourceHandle", value)?;
    }
    if let Some(value) = target_handle {
        validate_handle_field("targetHandle", value)?;
    }
    Ok(())
}
