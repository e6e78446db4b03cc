//! Lint checks for handle catalogs.
//!
//! Reports configuration that the lookup silently tolerates: ids outside the
//! grammar, repeated ids, sides holding more handles than the editor's node
//! shapes are drawn for, and a missing `default` entry. Nothing here changes
//! lookup results.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::catalog::{HandleCatalog, DEFAULT_TYPE};
use crate::handle::{HandleId, Side};

/// Documented maximum number of handles on one side of a node
pub const MAX_HANDLES_PER_SIDE: usize = 4;

/// A lint warning about a catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintWarning {
    pub category: LintCategory,
    pub node_type: String,
    pub message: String,
}

/// Category of catalog defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LintCategory {
    InvalidId,
    Duplicate,
    SideCapacity,
    MissingDefault,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::InvalidId => write!(f, "invalid-id"),
            LintCategory::Duplicate => write!(f, "duplicate"),
            LintCategory::SideCapacity => write!(f, "side-capacity"),
            LintCategory::MissingDefault => write!(f, "missing-default"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.category, self.node_type, self.message)
    }
}

/// Run all lint checks on a catalog. Warnings are ordered by node type.
pub fn check(catalog: &HandleCatalog) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if catalog.entry(DEFAULT_TYPE).is_none() {
        warnings.push(LintWarning {
            category: LintCategory::MissingDefault,
            node_type: DEFAULT_TYPE.to_string(),
            message: "no default entry; unknown node types get no handles".to_string(),
        });
    }

    for node_type in catalog.types() {
        let Some(entry) = catalog.entry(node_type) else {
            continue;
        };
        check_list(node_type, "in", &entry.inputs, &mut warnings);
        check_list(node_type, "out", &entry.outputs, &mut warnings);
        check_side_capacity(node_type, catalog, &mut warnings);
    }

    warnings
}

fn check_list(node_type: &str, list: &str, ids: &[String], warnings: &mut Vec<LintWarning>) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            warnings.push(LintWarning {
                category: LintCategory::Duplicate,
                node_type: node_type.to_string(),
                message: format!("'{}' listed more than once in '{}'", id, list),
            });
        } else if HandleId::parse(id).is_none() {
            warnings.push(LintWarning {
                category: LintCategory::InvalidId,
                node_type: node_type.to_string(),
                message: format!("'{}' in '{}' is not a handle id and is ignored", id, list),
            });
        }
    }
}

fn check_side_capacity(node_type: &str, catalog: &HandleCatalog, warnings: &mut Vec<LintWarning>) {
    let set = catalog.lookup(node_type);
    let mut per_side: HashMap<Side, usize> = HashMap::new();
    for id in set.inputs.iter().chain(&set.outputs) {
        *per_side.entry(id.side).or_default() += 1;
    }

    let mut sides: Vec<_> = per_side
        .into_iter()
        .filter(|(_, count)| *count > MAX_HANDLES_PER_SIDE)
        .collect();
    sides.sort_by_key(|(side, _)| side.precedence());

    for (side, count) in sides {
        warnings.push(LintWarning {
            category: LintCategory::SideCapacity,
            node_type: node_type.to_string(),
            message: format!(
                "{} handles on side '{}' (documented maximum is {})",
                count, side, MAX_HANDLES_PER_SIDE
            ),
        });
    }
}
