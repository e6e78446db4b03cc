//! Core types produced by the handle layout resolver

use serde::Serialize;

use crate::handle::{HandleId, HandleType, Side};

/// A positioned, renderable handle
///
/// `id` always carries the parsed identifier; `side` and `handle_type` may
/// differ from it when the descriptor overrode them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleEntry {
    pub id: HandleId,
    pub side: Side,
    #[serde(rename = "type")]
    pub handle_type: HandleType,
    /// Offset along a left/right side, percent of node height
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_pct: Option<f64>,
    /// Offset along a top/bottom side, percent of node width
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_pct: Option<f64>,
}

impl HandleEntry {
    /// Entry placed where its identifier says, with no position hint
    pub fn from_id(id: HandleId, handle_type: HandleType) -> Self {
        Self {
            id,
            side: id.side,
            handle_type,
            top_pct: None,
            left_pct: None,
        }
    }

    /// Identity used for deduplication: `type:id`
    pub fn key(&self) -> String {
        format!("{}:{}", self.handle_type, self.id)
    }

    /// Sort key for listing: side precedence, then index
    pub fn order(&self) -> (u8, u64) {
        (self.side.precedence(), self.id.index)
    }
}

/// Handles of one node split by role, each list in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedHandles {
    pub targets: Vec<HandleEntry>,
    pub sources: Vec<HandleEntry>,
}

impl ResolvedHandles {
    /// All handles, targets first
    pub fn iter(&self) -> impl Iterator<Item = &HandleEntry> {
        self.targets.iter().chain(&self.sources)
    }

    /// Find the handle whose identifier text is `id`
    pub fn find(&self, id: &str) -> Option<&HandleEntry> {
        let id = HandleId::parse(id)?;
        self.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.targets.len() + self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty() && self.sources.is_empty()
    }
}
