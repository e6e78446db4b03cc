//! Curve primitive for edge paths
//!
//! The edge resolver never does curve math itself: it asks a [`CurvePath`]
//! for a path and that path's midpoint. [`BezierCurve`] is the stock
//! primitive; a renderer with its own curve library plugs in through the trait.

use crate::handle::Side;

use super::types::Point;

/// A segment in a resolved path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Move to starting point
    MoveTo(Point),
    /// Straight line to point
    LineTo(Point),
    /// Cubic Bezier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
}

/// A resolved path ready for SVG rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath {
    pub segments: Vec<PathSegment>,
}

impl ResolvedPath {
    /// Convert to SVG path `d` attribute string
    pub fn to_svg_d(&self) -> String {
        let mut d = String::new();

        for seg in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            match seg {
                PathSegment::MoveTo(p) => {
                    d.push_str(&format!("M{:.2} {:.2}", p.x, p.y));
                }
                PathSegment::LineTo(p) => {
                    d.push_str(&format!("L{:.2} {:.2}", p.x, p.y));
                }
                PathSegment::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    // SVG C command: C c1x c1y c2x c2y ex ey
                    d.push_str(&format!(
                        "C{:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                        control1.x, control1.y, control2.x, control2.y, end.x, end.y
                    ));
                }
            }
        }

        d
    }
}

/// A path between two endpoints plus the point halfway along it
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub path: ResolvedPath,
    pub midpoint: Point,
}

/// Curve geometry primitive
pub trait CurvePath {
    fn curve(
        &self,
        source: Point,
        source_side: Side,
        target: Point,
        target_side: Side,
    ) -> Curve;
}

/// Cubic Bezier whose control points leave each endpoint perpendicular to
/// the node side it sits on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierCurve {
    /// Pull applied when an endpoint faces away from the other endpoint
    pub curvature: f64,
}

impl Default for BezierCurve {
    fn default() -> Self {
        Self { curvature: 0.25 }
    }
}

impl BezierCurve {
    pub fn new(curvature: f64) -> Self {
        Self { curvature }
    }

    fn control_offset(&self, distance: f64) -> f64 {
        if distance >= 0.0 {
            0.5 * distance
        } else {
            self.curvature * 25.0 * (-distance).sqrt()
        }
    }

    /// Control point leaving `from` through `side`, heading for `to`
    fn control_point(&self, side: Side, from: Point, to: Point) -> Point {
        match side {
            Side::Left => Point::new(from.x - self.control_offset(from.x - to.x), from.y),
            Side::Right => Point::new(from.x + self.control_offset(to.x - from.x), from.y),
            Side::Top => Point::new(from.x, from.y - self.control_offset(from.y - to.y)),
            Side::Bottom => Point::new(from.x, from.y + self.control_offset(to.y - from.y)),
        }
    }
}

impl CurvePath for BezierCurve {
    fn curve(
        &self,
        source: Point,
        source_side: Side,
        target: Point,
        target_side: Side,
    ) -> Curve {
        let control1 = self.control_point(source_side, source, target);
        let control2 = self.control_point(target_side, target, source);

        // Cubic Bezier at t = 0.5
        let midpoint = Point::new(
            source.x * 0.125 + control1.x * 0.375 + control2.x * 0.375 + target.x * 0.125,
            source.y * 0.125 + control1.y * 0.375 + control2.y * 0.375 + target.y * 0.125,
        );

        Curve {
            path: ResolvedPath {
                segments: vec![
                    PathSegment::MoveTo(source),
                    PathSegment::CubicTo {
                        control1,
                        control2,
                        end: target,
                    },
                ],
            },
            midpoint,
        }
    }
}

/// Straight segment between the endpoints, ignoring sides
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl CurvePath for StraightLine {
    fn curve(&self, source: Point, _: Side, target: Point, _: Side) -> Curve {
        Curve {
            path: ResolvedPath {
                segments: vec![PathSegment::MoveTo(source), PathSegment::LineTo(target)],
            },
            midpoint: source.lerp(target, 0.5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_bezier() {
        let curve = BezierCurve::default().curve(
            Point::new(0.0, 0.0),
            Side::Right,
            Point::new(100.0, 0.0),
            Side::Left,
        );
        assert_eq!(curve.path.to_svg_d(), "M0.00 0.00 C50.00 0.00 50.00 0.00 100.00 0.00");
        assert_eq!(curve.midpoint, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_backwards_edge_uses_curvature() {
        // Source faces right but target sits to its left
        let curve = BezierCurve::default().curve(
            Point::new(100.0, 0.0),
            Side::Right,
            Point::new(0.0, 0.0),
            Side::Left,
        );
        // 0.25 * 25 * sqrt(100) = 62.5
        match &curve.path.segments[1] {
            PathSegment::CubicTo {
                control1, control2, ..
            } => {
                assert_eq!(*control1, Point::new(162.5, 0.0));
                assert_eq!(*control2, Point::new(-62.5, 0.0));
            }
            other => panic!("expected cubic segment, got {:?}", other),
        }
        assert_eq!(curve.midpoint, Point::new(50.0, 0.0));
    }

    #[test]
    fn test_vertical_bezier_midpoint() {
        let curve = BezierCurve::default().curve(
            Point::new(0.0, 0.0),
            Side::Bottom,
            Point::new(40.0, 80.0),
            Side::Top,
        );
        assert_eq!(curve.midpoint, Point::new(20.0, 40.0));
    }

    #[test]
    fn test_straight_line() {
        let curve = StraightLine.curve(
            Point::new(0.0, 0.0),
            Side::Right,
            Point::new(10.0, 20.0),
            Side::Left,
        );
        assert_eq!(curve.path.to_svg_d(), "M0.00 0.00 L10.00 20.00");
        assert_eq!(curve.midpoint, Point::new(5.0, 10.0));
    }

    #[test]
    fn test_empty_path() {
        let path = ResolvedPath { segments: vec![] };
        assert_eq!(path.to_svg_d(), "");
    }
}
