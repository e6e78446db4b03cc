//! Edge geometry for rendered connections
//!
//! Derives the drawn path, stroke, arrow markers and label anchors of an edge
//! from its endpoints and logical direction.

pub mod config;
pub mod curve;
pub mod edge;
pub mod types;

pub use config::EdgeConfig;
pub use curve::{BezierCurve, Curve, CurvePath, PathSegment, ResolvedPath, StraightLine};
pub use edge::{
    endpoint_offset, linear_label_anchors, resolve_edge, resolve_edge_with,
    resolve_endpoint_offset, Direction, EdgeData, EdgeEndpoints, EdgeGeometry, EdgeRequest,
    LabelRole, Marker, MarkerKind, PlacedLabel,
};
pub use types::{Offset, Point};
