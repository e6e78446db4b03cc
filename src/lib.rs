//! Topology Handles - connection points and edge geometry for a channel editor
//!
//! This library names the connection points ("handles") on diagram nodes,
//! decides which handles a node exposes and where they sit, and derives the
//! drawing data for the edges between them.
//!
//! # Example
//!
//! ```rust
//! use topology_handles::{resolve_node_json, Config};
//!
//! let handles = resolve_node_json(r#"{"type": "encoder"}"#, &Config::default()).unwrap();
//! assert_eq!(handles.targets[0].id.to_string(), "in-left-1");
//! assert_eq!(handles.sources[0].id.to_string(), "out-right-1");
//! ```

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod handle;
pub mod layout;
pub mod lint;

pub use catalog::{CatalogEntry, HandleCatalog, HandleSet};
pub use error::{CatalogError, EdgeHandleError, HandleIdError};
pub use geometry::{EdgeConfig, EdgeGeometry, EdgeRequest};
pub use handle::{is_valid, make, parse, HandleId, HandleType, Kind, Side};
pub use layout::{HandleEntry, NodeRecord, ResolvedHandles};

use thiserror::Error;

/// Errors at the JSON boundary of the library
#[derive(Debug, Error)]
pub enum Error {
    /// Input is not valid JSON for the expected record
    #[error("invalid input: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog could not be loaded
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Configuration shared by node and edge resolution
#[derive(Debug, Clone)]
pub struct Config {
    /// Handle inventories per node type
    pub catalog: HandleCatalog,
    /// Edge styling and label placement
    pub edge: EdgeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: HandleCatalog::builtin(),
            edge: EdgeConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the handle catalog
    pub fn with_catalog(mut self, catalog: HandleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the edge configuration
    pub fn with_edge(mut self, edge: EdgeConfig) -> Self {
        self.edge = edge;
        self
    }
}

/// Resolve the handles of a node record given as JSON
///
/// # Example
///
/// ```rust
/// use topology_handles::{resolve_node_json, Config};
///
/// let handles = resolve_node_json(
///     r#"{"type": "router", "data": {"handles": ["out-top-1", "in-left-2", "bogus"]}}"#,
///     &Config::default(),
/// ).unwrap();
///
/// assert_eq!(handles.targets.len(), 1);
/// assert_eq!(handles.sources[0].id.to_string(), "out-top-1");
/// ```
pub fn resolve_node_json(source: &str, config: &Config) -> Result<ResolvedHandles, Error> {
    let node: NodeRecord = serde_json::from_str(source)?;
    Ok(layout::resolve_node(&node, &config.catalog))
}

/// Resolve the geometry of an edge request given as JSON
///
/// # Example
///
/// ```rust
/// use topology_handles::{resolve_edge_json, Config};
///
/// let edge = resolve_edge_json(
///     r#"{"sourceX": 0, "sourceY": 0, "targetX": 100, "targetY": 0,
///         "data": {"direction": "vuelta"}}"#,
///     &Config::default(),
/// ).unwrap();
///
/// assert_eq!(edge.stroke, "green");
/// assert!(edge.marker_start.is_some());
/// ```
pub fn resolve_edge_json(source: &str, config: &Config) -> Result<EdgeGeometry, Error> {
    let request: EdgeRequest = serde_json::from_str(source)?;
    Ok(geometry::resolve_edge(
        &request.endpoints(),
        &request.data,
        &config.edge,
    ))
}
