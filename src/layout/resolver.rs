//! Handle layout resolution
//!
//! Turns a node's raw handle list into ordered, positioned connection points:
//!
//! 1. normalize each raw entry, dropping anything without a valid id
//! 2. deduplicate by `type:id`, first occurrence wins
//! 3. with nothing left, fall back to the node type's catalog inventory and
//!    spread handles that share a side evenly along it
//! 4. split into targets and sources, each ordered top, right, bottom, left
//!    and then by index

use std::collections::{HashMap, HashSet};

use crate::catalog::HandleCatalog;
use crate::handle::{HandleId, HandleType, Side};

use super::descriptor::{NodeRecord, RawHandle};
use super::types::{HandleEntry, ResolvedHandles};

/// Resolve the handles of a node record against a catalog
pub fn resolve_node(node: &NodeRecord, catalog: &HandleCatalog) -> ResolvedHandles {
    resolve_handles(node.node_type.as_deref(), node.raw_handles(), catalog)
}

/// Resolve a node's handles from its type and optional raw handle list
pub fn resolve_handles(
    node_type: Option<&str>,
    raw: Option<&[RawHandle]>,
    catalog: &HandleCatalog,
) -> ResolvedHandles {
    let explicit: Vec<HandleEntry> = raw
        .unwrap_or_default()
        .iter()
        .filter_map(normalize)
        .collect();
    let mut entries = dedup(explicit);

    if entries.is_empty() {
        entries = catalog_entries(node_type, catalog);
        tracing::debug!(
            node_type,
            count = entries.len(),
            "no explicit handles, using catalog inventory"
        );
    }

    partition(entries)
}

/// Normalize one raw entry into a handle, or `None` if it names no valid id
pub fn normalize(raw: &RawHandle) -> Option<HandleEntry> {
    let Some(id) = raw.id_text().and_then(HandleId::parse) else {
        tracing::debug!(?raw, "dropping handle without a valid id");
        return None;
    };

    let mut entry = HandleEntry::from_id(id, id.handle_type());
    if let RawHandle::Descriptor(descriptor) = raw {
        if let Some(side) = descriptor.side.as_deref().and_then(Side::parse_loose) {
            entry.side = side;
        }
        if let Some(handle_type) = descriptor
            .handle_type
            .as_deref()
            .and_then(HandleType::parse_loose)
        {
            entry.handle_type = handle_type;
        }
        entry.top_pct = descriptor.top_pct.filter(|pct| pct.is_finite());
        entry.left_pct = descriptor.left_pct.filter(|pct| pct.is_finite());
    }
    Some(entry)
}

/// Keep the first entry for each `type:id` key, in input order
pub fn dedup(entries: Vec<HandleEntry>) -> Vec<HandleEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.key()))
        .collect()
}

/// Synthesize entries from the catalog, spacing shared sides evenly
fn catalog_entries(node_type: Option<&str>, catalog: &HandleCatalog) -> Vec<HandleEntry> {
    let set = catalog.lookup(node_type);
    let inputs = set
        .inputs
        .into_iter()
        .map(|id| HandleEntry::from_id(id, HandleType::Target));
    let outputs = set
        .outputs
        .into_iter()
        .map(|id| HandleEntry::from_id(id, HandleType::Source));

    let mut entries = dedup(inputs.chain(outputs).collect());
    spread_evenly(&mut entries);
    entries
}

/// Position handles sharing a side at `round(100 * i / (n + 1))` percent,
/// i = 1..=n in ascending index order. Sides with a single handle keep no
/// position hint.
pub fn spread_evenly(entries: &mut [HandleEntry]) {
    let mut by_side: HashMap<Side, Vec<usize>> = HashMap::new();
    for (pos, entry) in entries.iter().enumerate() {
        by_side.entry(entry.side).or_default().push(pos);
    }

    for (side, mut positions) in by_side {
        let n = positions.len();
        if n < 2 {
            continue;
        }
        positions.sort_by_key(|&pos| entries[pos].id.index);

        for (i, pos) in positions.into_iter().enumerate() {
            let pct = even_spacing_pct(i + 1, n);
            let entry = &mut entries[pos];
            if side.spreads_horizontally() {
                entry.left_pct = Some(pct);
            } else {
                entry.top_pct = Some(pct);
            }
        }
    }
}

/// Percentage for the i-th (1-based) of n handles, strictly inside (0, 100)
pub fn even_spacing_pct(i: usize, n: usize) -> f64 {
    (100.0 * i as f64 / (n + 1) as f64).round()
}

fn partition(entries: Vec<HandleEntry>) -> ResolvedHandles {
    let (mut targets, mut sources): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|entry| entry.handle_type == HandleType::Target);

    targets.sort_by_key(HandleEntry::order);
    sources.sort_by_key(HandleEntry::order);

    ResolvedHandles { targets, sources }
}
