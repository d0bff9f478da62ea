//! Hit testing: scene point → semantic target.
//!
//! Walks the nodes in reverse draw order (front-to-back) to find the
//! topmost node at a scene-space position, then classifies the point
//! against that node's handles. Handle tolerances are in scene units and
//! are not scaled by zoom.

use fc_core::id::NodeId;
use fc_core::model::{Bounds, Node, NodeType, Point, ResizeHandle, Scene};

/// Half-extent of a handle hit zone, in scene units.
pub const HANDLE_TOLERANCE: f64 = 8.0;

/// One of the four edge-midpoint connection handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl ConnectionSide {
    pub const ALL: [ConnectionSide; 4] = [
        ConnectionSide::Top,
        ConnectionSide::Right,
        ConnectionSide::Bottom,
        ConnectionSide::Left,
    ];

    /// Where this handle sits on a node's bounds.
    pub fn point(self, b: &Bounds) -> Point {
        let c = b.center();
        match self {
            Self::Top => Point::new(c.x, b.y),
            Self::Right => Point::new(b.right(), c.y),
            Self::Bottom => Point::new(c.x, b.bottom()),
            Self::Left => Point::new(b.x, c.y),
        }
    }
}

/// What a pointer-down landed on, after priority resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitTarget {
    ResizeHandle { node: NodeId, handle: ResizeHandle },
    ConnectionHandle { node: NodeId, side: ConnectionSide, at: Point },
    Body(NodeId),
    Canvas,
}

impl HitTarget {
    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Self::ResizeHandle { node, .. } | Self::ConnectionHandle { node, .. } | Self::Body(node) => {
                Some(node)
            }
            Self::Canvas => None,
        }
    }
}

/// Shape membership for a single node.
///
/// Decision nodes use the Manhattan-normalized diamond
/// `|dx|/(w/2) + |dy|/(h/2) <= 1` about the center; everything else is an
/// inclusive axis-aligned rectangle.
pub fn node_contains(node: &Node, p: Point) -> bool {
    match node.kind() {
        NodeType::Decision => {
            let half_w = node.width / 2.0;
            let half_h = node.height / 2.0;
            if half_w <= 0.0 || half_h <= 0.0 {
                return false;
            }
            let c = node.center();
            (p.x - c.x).abs() / half_w + (p.y - c.y).abs() / half_h <= 1.0
        }
        NodeType::Start | NodeType::Process | NodeType::Io | NodeType::Connector | NodeType::Custom => {
            node.bounds().contains(p)
        }
    }
}

/// Find the topmost node at `p`. Returns `None` for empty canvas.
pub fn hit_test_node(scene: &Scene, p: Point) -> Option<&Node> {
    // Last painted = topmost
    scene.nodes().iter().rev().find(|n| node_contains(n, p))
}

fn within_tolerance(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < HANDLE_TOLERANCE && (a.y - b.y).abs() < HANDLE_TOLERANCE
}

/// Corner resize handle of `node` under `p`, checked nw, ne, sw, se.
pub fn hit_test_resize_handle(node: &Node, p: Point) -> Option<ResizeHandle> {
    let b = node.bounds();
    ResizeHandle::ALL
        .into_iter()
        .find(|h| within_tolerance(p, h.anchor(&b)))
}

/// Edge-midpoint connection handle of `node` under `p`, checked top,
/// right, bottom, left.
pub fn hit_test_connection_handle(node: &Node, p: Point) -> Option<(ConnectionSide, Point)> {
    let b = node.bounds();
    ConnectionSide::ALL
        .into_iter()
        .map(|side| (side, side.point(&b)))
        .find(|(_, at)| within_tolerance(p, *at))
}

/// Nodes whose bounding rectangle overlaps `rect` (open overlap: touching
/// edges do not count). Returned in draw order.
pub fn hit_test_rect(scene: &Scene, rect: &Bounds) -> Vec<NodeId> {
    scene
        .nodes()
        .iter()
        .filter(|n| n.bounds().intersects(rect))
        .map(|n| n.id)
        .collect()
}

/// Classify a pointer-down at scene point `p`.
///
/// Handles only exist on the topmost node under the pointer. Priority is
/// resize handle, then connection handle, then body.
pub fn classify(scene: &Scene, p: Point) -> HitTarget {
    let Some(node) = hit_test_node(scene, p) else {
        return HitTarget::Canvas;
    };
    if let Some(handle) = hit_test_resize_handle(node, p) {
        return HitTarget::ResizeHandle {
            node: node.id,
            handle,
        };
    }
    if let Some((side, at)) = hit_test_connection_handle(node, p) {
        return HitTarget::ConnectionHandle {
            node: node.id,
            side,
            at,
        };
    }
    HitTarget::Body(node.id)
}
