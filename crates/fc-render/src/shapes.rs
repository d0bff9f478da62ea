//! Node and connector geometry shared by painting and export.
//!
//! Everything here is in scene space. The painter applies the view
//! transform on top; the exporters apply a plain translation.

use fc_core::model::{Bounds, Connector, Node, NodeType, Point, ResizeHandle, Scene};
use kurbo::{Affine, BezPath, Rect, Shape};
use smallvec::SmallVec;
use std::f64::consts::{FRAC_PI_4, FRAC_PI_6};

/// Horizontal skew of I/O parallelograms, as a fraction of node width.
pub const IO_SKEW: f64 = 0.1;
/// Arrowhead side length.
pub const ARROW_SIZE: f64 = 10.0;
/// Gap between a node and its dashed selection outline.
pub const SELECTION_INSET: f64 = 5.0;
/// Drawn size of a resize handle square.
pub const RESIZE_HANDLE_SIZE: f64 = 6.0;
/// Drawn diameter of a connection handle.
pub const CONNECTION_HANDLE_SIZE: f64 = 8.0;

const PATH_TOLERANCE: f64 = 0.1;

pub fn to_kurbo(p: Point) -> kurbo::Point {
    kurbo::Point::new(p.x, p.y)
}

pub fn rect(b: &Bounds) -> Rect {
    Rect::new(b.x, b.y, b.right(), b.bottom())
}

/// The four corners of an I/O parallelogram, clockwise from top-left.
pub fn parallelogram(b: &Bounds) -> [kurbo::Point; 4] {
    let skew = b.width * IO_SKEW;
    [
        kurbo::Point::new(b.x + skew, b.y),
        kurbo::Point::new(b.right(), b.y),
        kurbo::Point::new(b.right() - skew, b.bottom()),
        kurbo::Point::new(b.x, b.bottom()),
    ]
}

/// Rotation applied to decision nodes: 45° about the node center.
pub fn decision_transform(node: &Node) -> Affine {
    Affine::rotate_about(FRAC_PI_4, to_kurbo(node.center()))
}

/// The filled/stroked outline of a node.
pub fn node_outline(node: &Node) -> BezPath {
    let b = node.bounds();
    match node.kind() {
        NodeType::Start | NodeType::Process | NodeType::Connector | NodeType::Custom => rect(&b)
            .to_rounded_rect(node.border_radius.max(0.0))
            .to_path(PATH_TOLERANCE),
        NodeType::Decision => {
            let mut path = rect(&b).to_path(PATH_TOLERANCE);
            path.apply_affine(decision_transform(node));
            path
        }
        NodeType::Io => polygon(&parallelogram(&b)),
    }
}

/// Dashed outline drawn around a selected node, following its rotation.
pub fn selection_outline(node: &Node) -> BezPath {
    let mut path = rect(&node.bounds().inflate(SELECTION_INSET)).to_path(PATH_TOLERANCE);
    if node.kind() == NodeType::Decision {
        path.apply_affine(decision_transform(node));
    }
    path
}

pub fn polygon(points: &[kurbo::Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();
    }
    path
}

/// Two-segment orthogonal route: across to the horizontal midpoint, down
/// (or up) to the target row, then across to the target.
pub fn orthogonal_route(from: Point, to: Point) -> [kurbo::Point; 4] {
    let mid_x = (from.x + to.x) / 2.0;
    [
        kurbo::Point::new(from.x, from.y),
        kurbo::Point::new(mid_x, from.y),
        kurbo::Point::new(mid_x, to.y),
        kurbo::Point::new(to.x, to.y),
    ]
}

pub fn route_path(points: &[kurbo::Point; 4]) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(points[0]);
    for p in &points[1..] {
        path.line_to(*p);
    }
    path
}

/// Triangle with its tip at `tip`, pointing along the last route segment.
///
/// The direction comes from the final segment, not from the straight line
/// between the endpoints. A degenerate final segment falls back to the
/// previous non-degenerate one.
pub fn arrowhead(route: &[kurbo::Point; 4]) -> [kurbo::Point; 3] {
    let tip = route[3];
    let tail = route[..3]
        .iter()
        .rev()
        .find(|p| (**p - tip).hypot2() > f64::EPSILON)
        .copied()
        .unwrap_or(route[0]);
    let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
    [
        tip,
        kurbo::Point::new(
            tip.x - ARROW_SIZE * (angle - FRAC_PI_6).cos(),
            tip.y - ARROW_SIZE * (angle - FRAC_PI_6).sin(),
        ),
        kurbo::Point::new(
            tip.x - ARROW_SIZE * (angle + FRAC_PI_6).cos(),
            tip.y - ARROW_SIZE * (angle + FRAC_PI_6).sin(),
        ),
    ]
}

/// Route of a connector in the given scene, if both endpoints resolve.
pub fn connector_route(scene: &Scene, connector: &Connector) -> Option<[kurbo::Point; 4]> {
    let (from, to) = scene.connector_endpoints(connector)?;
    Some(orthogonal_route(from, to))
}

/// Drawn squares for the four resize handles.
pub fn resize_handle_rects(node: &Node) -> SmallVec<[Rect; 4]> {
    let b = node.bounds();
    let half = RESIZE_HANDLE_SIZE / 2.0;
    ResizeHandle::ALL
        .iter()
        .map(|h| {
            let c = h.anchor(&b);
            Rect::new(c.x - half, c.y - half, c.x + half, c.y + half)
        })
        .collect()
}

/// Union of the content of a scene, padded on every side.
pub fn padded_content(scene: &Scene, padding: f64) -> Bounds {
    scene
        .content_bounds()
        .unwrap_or_default()
        .inflate(padding)
}
