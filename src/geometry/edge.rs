//! Edge geometry: path, styling and label anchors for one rendered edge

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::handle::{HandleType, Side};

use super::config::EdgeConfig;
use super::curve::{BezierCurve, CurvePath};
use super::types::{Offset, Point};

/// Logical direction of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    /// `"ida"`: arrow at the target end
    #[default]
    #[serde(rename = "ida")]
    Forward,
    /// `"vuelta"`: arrow at the source end
    #[serde(rename = "vuelta")]
    Return,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "ida",
            Direction::Return => "vuelta",
        }
    }

    /// Read an edge's `direction` value; absent or unknown values are forward
    pub fn from_data(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            None | Some("ida") => Direction::Forward,
            Some("vuelta") => Direction::Return,
            Some(other) => {
                tracing::debug!(direction = other, "unknown edge direction, styling as forward");
                Direction::Forward
            }
        }
    }
}

/// Arrowhead shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkerKind {
    Arrow,
    ArrowClosed,
}

/// An arrowhead at one end of an edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Marker {
    pub fn new(kind: MarkerKind) -> Self {
        Self { kind, color: None }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Data the editor stores on an edge
///
/// `direction` keeps the literal value so callers reading it directly see
/// what was stored, even when it is not a recognized direction. Fields of the
/// wrong JSON shape read as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeData {
    pub direction: Option<String>,
    pub label: Option<String>,
    pub label_start: Option<String>,
    pub label_end: Option<String>,
    /// Explicit center label position
    pub label_position: Option<Point>,
    pub multicast: bool,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub marker_start: Option<Marker>,
    pub marker_end: Option<Marker>,
}

impl EdgeData {
    pub fn direction(&self) -> Direction {
        Direction::from_data(self.direction.as_deref())
    }

    /// Read edge data from a JSON value; anything but an object is empty data
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self {
            direction: string_field(map, "direction"),
            label: string_field(map, "label"),
            label_start: string_field(map, "labelStart"),
            label_end: string_field(map, "labelEnd"),
            label_position: map.get("labelPosition").and_then(|v| Point::deserialize(v).ok()),
            multicast: map.get("multicast").and_then(Value::as_bool).unwrap_or(false),
            stroke: string_field(map, "stroke"),
            stroke_width: map.get("strokeWidth").and_then(Value::as_f64),
            marker_start: map.get("markerStart").and_then(|v| Marker::deserialize(v).ok()),
            marker_end: map.get("markerEnd").and_then(|v| Marker::deserialize(v).ok()),
        }
    }
}

impl<'de> Deserialize<'de> for EdgeData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| EdgeData::from_value(&v))
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Screen-space endpoints of an edge and the node sides they attach to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeEndpoints {
    pub source: Point,
    pub target: Point,
    pub source_position: Option<Side>,
    pub target_position: Option<Side>,
}

impl EdgeEndpoints {
    pub fn new(source: Point, target: Point) -> Self {
        Self {
            source,
            target,
            source_position: None,
            target_position: None,
        }
    }

    pub fn with_positions(mut self, source: Side, target: Side) -> Self {
        self.source_position = Some(source);
        self.target_position = Some(target);
        self
    }
}

/// Everything the renderer supplies for one edge, in its wire shape
///
/// Missing or non-numeric coordinates read as 0; non-string positions as absent.
#[derive(Debug, Clone, Default)]
pub struct EdgeRequest {
    pub source_x: f64,
    pub source_y: f64,
    pub target_x: f64,
    pub target_y: f64,
    pub source_position: Option<String>,
    pub target_position: Option<String>,
    pub data: EdgeData,
}

impl<'de> Deserialize<'de> for EdgeRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|v| EdgeRequest::from_value(&v))
    }
}

impl EdgeRequest {
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        let coordinate = |key: &str| map.get(key).and_then(Value::as_f64).unwrap_or(0.0);
        Self {
            source_x: coordinate("sourceX"),
            source_y: coordinate("sourceY"),
            target_x: coordinate("targetX"),
            target_y: coordinate("targetY"),
            source_position: string_field(map, "sourcePosition"),
            target_position: string_field(map, "targetPosition"),
            data: map.get("data").map(EdgeData::from_value).unwrap_or_default(),
        }
    }

    pub fn endpoints(&self) -> EdgeEndpoints {
        EdgeEndpoints {
            source: Point::new(self.source_x, self.source_y),
            target: Point::new(self.target_x, self.target_y),
            source_position: self.source_position.as_deref().and_then(Side::parse_loose),
            target_position: self.target_position.as_deref().and_then(Side::parse_loose),
        }
    }
}

/// Which of the three edge labels a placed label is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelRole {
    Center,
    Start,
    End,
}

/// A label with text, anchored and nudged for drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLabel {
    pub role: LabelRole,
    pub text: String,
    pub anchor: Point,
    /// Translation away from the nearby endpoint marker
    pub offset: Offset,
    /// Where the label is drawn: `anchor` moved by `offset`
    pub position: Point,
}

impl PlacedLabel {
    pub fn new(role: LabelRole, text: impl Into<String>, anchor: Point, offset: Offset) -> Self {
        Self {
            role,
            text: text.into(),
            anchor,
            offset,
            position: anchor.offset_by(offset),
        }
    }
}

/// Derived drawing data for one edge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeGeometry {
    /// SVG path `d` attribute
    pub path: String,
    pub direction: Direction,
    pub center_label_anchor: Point,
    pub start_label_anchor: Point,
    pub end_label_anchor: Point,
    pub stroke: String,
    pub stroke_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dasharray: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_start: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_end: Option<Marker>,
    pub labels: Vec<PlacedLabel>,
}

/// Label nudge for an endpoint, keyed by the side the endpoint sits on.
///
/// Without a recognizable side, source labels go up-left and target labels
/// up-right of the endpoint.
pub fn endpoint_offset(position: Option<Side>, endpoint: HandleType) -> Offset {
    match (position, endpoint) {
        (Some(Side::Left), _) => Offset::new(-28.0, -8.0),
        (Some(Side::Right), _) => Offset::new(28.0, -8.0),
        (Some(Side::Top), _) => Offset::new(0.0, -28.0),
        (Some(Side::Bottom), _) => Offset::new(0.0, 20.0),
        (None, HandleType::Source) => Offset::new(-20.0, -24.0),
        (None, HandleType::Target) => Offset::new(20.0, -24.0),
    }
}

/// [`endpoint_offset`] for a raw position string as found in edge props
pub fn resolve_endpoint_offset(position: Option<&str>, endpoint: HandleType) -> Offset {
    endpoint_offset(position.and_then(Side::parse_loose), endpoint)
}

/// Near-endpoint label anchors.
///
/// This is linear interpolation between the raw endpoints at `t_start` and
/// `t_end`, not a point on the drawn curve; for strongly bent edges the labels
/// sit off the stroke.
pub fn linear_label_anchors(source: Point, target: Point, t_start: f64, t_end: f64) -> (Point, Point) {
    (source.lerp(target, t_start), source.lerp(target, t_end))
}

/// Resolve an edge with the stock Bezier primitive
pub fn resolve_edge(endpoints: &EdgeEndpoints, data: &EdgeData, config: &EdgeConfig) -> EdgeGeometry {
    resolve_edge_with(endpoints, data, config, &BezierCurve::default())
}

/// Resolve an edge using a caller-supplied curve primitive
pub fn resolve_edge_with(
    endpoints: &EdgeEndpoints,
    data: &EdgeData,
    config: &EdgeConfig,
    curve: &dyn CurvePath,
) -> EdgeGeometry {
    let direction = data.direction();

    let curve = curve.curve(
        endpoints.source,
        endpoints.source_position.unwrap_or(Side::Right),
        endpoints.target,
        endpoints.target_position.unwrap_or(Side::Left),
    );

    let stroke = non_empty(data.stroke.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| match direction {
            Direction::Forward => config.forward_stroke.clone(),
            Direction::Return => config.return_stroke.clone(),
        });
    let stroke_width = data
        .stroke_width
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(config.stroke_width);

    let arrow = || Some(Marker::new(config.default_marker).with_color(stroke.clone()));
    let (marker_start, marker_end) = match direction {
        Direction::Forward => (data.marker_start.clone(), data.marker_end.clone().or_else(arrow)),
        Direction::Return => (data.marker_start.clone().or_else(arrow), data.marker_end.clone()),
    };

    let center_label_anchor = data.label_position.unwrap_or(curve.midpoint);
    let (start_label_anchor, end_label_anchor) = linear_label_anchors(
        endpoints.source,
        endpoints.target,
        config.start_label_t,
        config.end_label_t,
    );

    let mut labels = Vec::new();
    if let Some(text) = non_empty(data.label.as_deref()) {
        labels.push(PlacedLabel::new(
            LabelRole::Center,
            text,
            center_label_anchor,
            Offset::zero(),
        ));
    }
    if let Some(text) = non_empty(data.label_start.as_deref()) {
        labels.push(PlacedLabel::new(
            LabelRole::Start,
            text,
            start_label_anchor,
            endpoint_offset(endpoints.source_position, HandleType::Source),
        ));
    }
    if let Some(text) = non_empty(data.label_end.as_deref()) {
        labels.push(PlacedLabel::new(
            LabelRole::End,
            text,
            end_label_anchor,
            endpoint_offset(endpoints.target_position, HandleType::Target),
        ));
    }

    EdgeGeometry {
        path: curve.path.to_svg_d(),
        direction,
        center_label_anchor,
        start_label_anchor,
        end_label_anchor,
        stroke,
        stroke_width,
        stroke_dasharray: data.multicast.then(|| config.multicast_dasharray.clone()),
        marker_start,
        marker_end,
        labels,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> EdgeEndpoints {
        EdgeEndpoints::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0))
            .with_positions(Side::Right, Side::Left)
    }

    fn data(direction: Option<&str>) -> EdgeData {
        EdgeData {
            direction: direction.map(str::to_string),
            ..EdgeData::default()
        }
    }

    #[test]
    fn test_direction_from_data() {
        assert_eq!(Direction::from_data(None), Direction::Forward);
        assert_eq!(Direction::from_data(Some("ida")), Direction::Forward);
        assert_eq!(Direction::from_data(Some("vuelta")), Direction::Return);
        assert_eq!(Direction::from_data(Some(" Vuelta ")), Direction::Return);
        assert_eq!(Direction::from_data(Some("sideways")), Direction::Forward);
    }

    #[test]
    fn test_offset_table() {
        assert_eq!(endpoint_offset(Some(Side::Left), HandleType::Source), Offset::new(-28.0, -8.0));
        assert_eq!(endpoint_offset(Some(Side::Right), HandleType::Target), Offset::new(28.0, -8.0));
        assert_eq!(endpoint_offset(Some(Side::Top), HandleType::Source), Offset::new(0.0, -28.0));
        assert_eq!(endpoint_offset(Some(Side::Bottom), HandleType::Target), Offset::new(0.0, 20.0));
        assert_eq!(endpoint_offset(None, HandleType::Source), Offset::new(-20.0, -24.0));
        assert_eq!(endpoint_offset(None, HandleType::Target), Offset::new(20.0, -24.0));
    }

    #[test]
    fn test_resolve_endpoint_offset_normalizes() {
        assert_eq!(
            resolve_endpoint_offset(Some(" LEFT "), HandleType::Target),
            Offset::new(-28.0, -8.0)
        );
        assert_eq!(
            resolve_endpoint_offset(Some("diagonal"), HandleType::Source),
            Offset::new(-20.0, -24.0)
        );
    }

    #[test]
    fn test_forward_defaults() {
        let geometry = resolve_edge(&endpoints(), &data(Some("ida")), &EdgeConfig::default());
        assert_eq!(geometry.stroke, "red");
        assert_eq!(geometry.stroke_width, 2.0);
        assert!(geometry.marker_start.is_none());
        assert_eq!(
            geometry.marker_end,
            Some(Marker::new(MarkerKind::ArrowClosed).with_color("red"))
        );
    }

    #[test]
    fn test_return_defaults() {
        let geometry = resolve_edge(&endpoints(), &data(Some("vuelta")), &EdgeConfig::default());
        assert_eq!(geometry.stroke, "green");
        assert!(geometry.marker_start.is_some());
        assert!(geometry.marker_end.is_none());
    }

    #[test]
    fn test_style_overrides() {
        let mut edge = data(Some("vuelta"));
        edge.stroke = Some("#123456".to_string());
        edge.stroke_width = Some(4.0);
        edge.marker_end = Some(Marker::new(MarkerKind::Arrow));
        let geometry = resolve_edge(&endpoints(), &edge, &EdgeConfig::default());
        assert_eq!(geometry.stroke, "#123456");
        assert_eq!(geometry.stroke_width, 4.0);
        assert_eq!(geometry.marker_end, Some(Marker::new(MarkerKind::Arrow)));
        assert_eq!(
            geometry.marker_start,
            Some(Marker::new(MarkerKind::ArrowClosed).with_color("#123456"))
        );
    }

    #[test]
    fn test_invalid_stroke_width_uses_default() {
        let mut edge = data(None);
        edge.stroke_width = Some(f64::NAN);
        assert_eq!(resolve_edge(&endpoints(), &edge, &EdgeConfig::default()).stroke_width, 2.0);
        edge.stroke_width = Some(-1.0);
        assert_eq!(resolve_edge(&endpoints(), &edge, &EdgeConfig::default()).stroke_width, 2.0);
    }

    #[test]
    fn test_label_anchors_are_linear() {
        let geometry = resolve_edge(&endpoints(), &data(None), &EdgeConfig::default());
        assert_eq!(geometry.start_label_anchor, Point::new(10.0, 5.0));
        assert_eq!(geometry.end_label_anchor, Point::new(90.0, 45.0));
    }

    #[test]
    fn test_center_anchor_override() {
        let mut edge = data(None);
        edge.label_position = Some(Point::new(7.0, 8.0));
        let geometry = resolve_edge(&endpoints(), &edge, &EdgeConfig::default());
        assert_eq!(geometry.center_label_anchor, Point::new(7.0, 8.0));
    }

    #[test]
    fn test_placed_labels() {
        let mut edge = data(None);
        edge.label = Some("SDI".to_string());
        edge.label_start = Some("A".to_string());
        edge.label_end = Some("  ".to_string());
        let geometry = resolve_edge(&endpoints(), &edge, &EdgeConfig::default());

        let roles: Vec<_> = geometry.labels.iter().map(|l| l.role).collect();
        assert_eq!(roles, vec![LabelRole::Center, LabelRole::Start]);
        assert_eq!(geometry.labels[0].offset, Offset::zero());
        assert_eq!(geometry.labels[1].offset, Offset::new(28.0, -8.0));
        // start anchor (10, 5) nudged right and up
        assert_eq!(geometry.labels[1].position, Point::new(38.0, -3.0));
        assert_eq!(geometry.labels[0].position, geometry.labels[0].anchor);
    }

    #[test]
    fn test_edge_data_ignores_mistyped_fields() {
        let data: EdgeData = serde_json::from_value(serde_json::json!({
            "direction": 1,
            "label": 5,
            "multicast": null,
            "strokeWidth": "3",
            "labelPosition": "center",
            "markerEnd": {"type": "spiral"},
            "labelEnd": "rx"
        }))
        .unwrap();
        assert_eq!(
            data,
            EdgeData {
                label_end: Some("rx".to_string()),
                ..EdgeData::default()
            }
        );
    }

    #[test]
    fn test_edge_request_defaults_bad_coordinates() {
        let request: EdgeRequest = serde_json::from_value(serde_json::json!({
            "sourceX": "10", "targetX": 40, "targetY": 8,
            "sourcePosition": 3, "targetPosition": "top",
            "data": []
        }))
        .unwrap();
        let endpoints = request.endpoints();
        assert_eq!(endpoints.source, Point::new(0.0, 0.0));
        assert_eq!(endpoints.target, Point::new(40.0, 8.0));
        assert_eq!(endpoints.source_position, None);
        assert_eq!(endpoints.target_position, Some(Side::Top));
        assert_eq!(request.data, EdgeData::default());
    }

    #[test]
    fn test_multicast_is_dashed() {
        let mut edge = data(None);
        assert_eq!(resolve_edge(&endpoints(), &edge, &EdgeConfig::default()).stroke_dasharray, None);
        edge.multicast = true;
        assert_eq!(
            resolve_edge(&endpoints(), &edge, &EdgeConfig::default()).stroke_dasharray,
            Some("8,4".to_string())
        );
    }

    #[test]
    fn test_unknown_direction_keeps_literal() {
        let edge = data(Some("sideways"));
        let geometry = resolve_edge(&endpoints(), &edge, &EdgeConfig::default());
        assert_eq!(geometry.stroke, "red");
        assert_eq!(edge.direction.as_deref(), Some("sideways"));
    }
}
