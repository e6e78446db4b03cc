//! Configuration for edge styling and label placement

use super::edge::MarkerKind;

/// Configuration options for edge geometry
#[derive(Debug, Clone)]
pub struct EdgeConfig {
    /// Stroke color for forward ("ida") edges
    pub forward_stroke: String,

    /// Stroke color for return ("vuelta") edges
    pub return_stroke: String,

    /// Stroke width when the edge does not set one
    pub stroke_width: f64,

    /// Dash pattern for multicast edges
    pub multicast_dasharray: String,

    /// Marker drawn at the arrow end when the edge supplies none
    pub default_marker: MarkerKind,

    /// Interpolation parameter of the near-source label anchor
    pub start_label_t: f64,

    /// Interpolation parameter of the near-target label anchor
    pub end_label_t: f64,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            forward_stroke: "red".to_string(),
            return_stroke: "green".to_string(),
            stroke_width: 2.0,
            multicast_dasharray: "8,4".to_string(),
            default_marker: MarkerKind::ArrowClosed,
            start_label_t: 0.1,
            end_label_t: 0.9,
        }
    }
}

impl EdgeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stroke colors for forward and return edges
    pub fn with_strokes(mut self, forward: impl Into<String>, ret: impl Into<String>) -> Self {
        self.forward_stroke = forward.into();
        self.return_stroke = ret.into();
        self
    }

    /// Set the default stroke width
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    /// Set the multicast dash pattern
    pub fn with_multicast_dasharray(mut self, pattern: impl Into<String>) -> Self {
        self.multicast_dasharray = pattern.into();
        self
    }

    /// Set the default arrow marker
    pub fn with_default_marker(mut self, marker: MarkerKind) -> Self {
        self.default_marker = marker;
        self
    }

    /// Set where the near-endpoint labels sit along the source→target segment
    pub fn with_label_params(mut self, start: f64, end: f64) -> Self {
        self.start_label_t = start;
        self.end_label_t = end;
        self
    }
}
