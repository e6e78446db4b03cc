//! Handle identity grammar
//!
//! A handle is a named connection point on a diagram node. Its identifier is
//! the text `{kind}-{side}-{index}`, e.g. `in-left-1` or `out-bottom-2`.

pub mod grammar;
pub mod id;
pub mod lexer;
pub mod schema;

pub use id::{HandleId, HandleType, Kind, LooseIndex, Side, MAX_INDEX};
pub use schema::{
    handle_id_json_schema, validate_edge_handles, validate_handle_field, HANDLE_ID_PATTERN,
};

/// Parse handle text, returning `None` for anything non-canonical
pub fn parse(text: &str) -> Option<HandleId> {
    HandleId::parse(text)
}

/// True iff `text` is canonical handle identifier text
pub fn is_valid(text: &str) -> bool {
    parse(text).is_some()
}

/// Repair loosely-typed parts into canonical handle text
///
/// See [`HandleId::repair`] for the correction rules.
pub fn make(kind: &str, side: &str, index: impl Into<LooseIndex>) -> String {
    HandleId::repair(kind, side, index).to_string()
}

/// `in` → `target`, `out` → `source`
pub fn kind_to_type(kind: &str) -> Option<HandleType> {
    Kind::from_name(kind).map(Kind::handle_type)
}

/// `target` → `in`, `source` → `out`
pub fn type_to_kind(handle_type: &str) -> Option<Kind> {
    HandleType::from_name(handle_type).map(HandleType::kind)
}
