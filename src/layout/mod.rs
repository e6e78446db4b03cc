//! Handle layout for diagram nodes
//!
//! This module takes a node's type and raw handle data and produces the
//! ordered, positioned connection points the renderer draws.

pub mod descriptor;
pub mod resolver;
pub mod types;

pub use descriptor::{HandleDescriptor, NodeData, NodeRecord, RawHandle};
pub use resolver::{resolve_handles, resolve_node};
pub use types::{HandleEntry, ResolvedHandles};
