//! Core scene data model for flowchart documents.
//!
//! A scene is a flat, ordered list of nodes (the order is the draw and
//! hit-test order: last = topmost) plus a list of connectors that refer to
//! nodes by id. Connectors carry no geometry of their own; their route is
//! derived from the endpoint node centers every time it is needed.

use crate::error::EditorError;
use crate::id::{ConnectorId, IdAllocator, NodeId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

/// Minimum node width enforced while resizing.
pub const MIN_NODE_WIDTH: f64 = 60.0;
/// Minimum node height enforced while resizing.
pub const MIN_NODE_HEIGHT: f64 = 40.0;
/// Offset applied to duplicated nodes, on both axes.
pub const DUPLICATE_OFFSET: f64 = 20.0;

pub const DEFAULT_NODE_WIDTH: f64 = 120.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 60.0;
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

// ─── Colors ──────────────────────────────────────────────────────────────

/// Opaque RGB color, persisted as a lowercase `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        match bytes.len() {
            3 => {
                let r = hex_val(bytes[0])?;
                let g = hex_val(bytes[1])?;
                let b = hex_val(bytes[2])?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = hex_val(bytes[0])? << 4 | hex_val(bytes[1])?;
                let g = hex_val(bytes[2])? << 4 | hex_val(bytes[3])?;
                let b = hex_val(bytes[4])? << 4 | hex_val(bytes[5])?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in either scene or screen space; the caller knows which.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle (top-left + size).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalize a rectangle spanned by two arbitrary corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment, edges count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Open overlap test: rectangles that only touch do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.bottom() > other.y
            && self.y < other.bottom()
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Grow by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Bounds {
        Bounds::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// The closed set of node shapes. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    Process,
    Decision,
    Io,
    Connector,
    Custom,
}

impl NodeType {
    pub const ALL: [NodeType; 6] = [
        NodeType::Start,
        NodeType::Process,
        NodeType::Decision,
        NodeType::Io,
        NodeType::Connector,
        NodeType::Custom,
    ];

    pub fn default_text(self) -> &'static str {
        match self {
            NodeType::Start => "Start",
            NodeType::Process => "Process",
            NodeType::Decision => "Decision?",
            NodeType::Io => "Input/Output",
            NodeType::Connector => "",
            NodeType::Custom => "Custom",
        }
    }

    pub fn default_border_radius(self) -> f64 {
        match self {
            NodeType::Start | NodeType::Connector => 30.0,
            NodeType::Process | NodeType::Io | NodeType::Custom => 5.0,
            NodeType::Decision => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Start => "start",
            NodeType::Process => "process",
            NodeType::Decision => "decision",
            NodeType::Io => "io",
            NodeType::Connector => "connector",
            NodeType::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shaped node on the canvas. Position is the scene-space top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type")]
    kind: NodeType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub fill_color: Color,
    pub border_color: Color,
    pub border_radius: f64,
    pub font_size: f64,
}

impl Node {
    /// A node with the per-type defaults, positioned at `(x, y)`.
    pub fn new(id: NodeId, kind: NodeType, x: f64, y: f64) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            width: DEFAULT_NODE_WIDTH,
            height: DEFAULT_NODE_HEIGHT,
            text: kind.default_text().to_string(),
            fill_color: Color::WHITE,
            border_color: Color::BLACK,
            border_radius: kind.default_border_radius(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }

    /// The shape type. There is deliberately no setter.
    pub fn kind(&self) -> NodeType {
        self.kind
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn set_bounds(&mut self, b: Bounds) {
        self.x = b.x;
        self.y = b.y;
        self.width = b.width;
        self.height = b.height;
    }
}

// ─── Connectors ──────────────────────────────────────────────────────────

/// A directed link between two distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connector {
    pub id: ConnectorId,
    pub from: NodeId,
    pub to: NodeId,
}

impl Connector {
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }
}

// ─── Resize ──────────────────────────────────────────────────────────────

/// One of the four corner resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeHandle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::NorthWest,
        ResizeHandle::NorthEast,
        ResizeHandle::SouthWest,
        ResizeHandle::SouthEast,
    ];

    pub fn is_west(self) -> bool {
        matches!(self, Self::NorthWest | Self::SouthWest)
    }

    pub fn is_north(self) -> bool {
        matches!(self, Self::NorthWest | Self::NorthEast)
    }

    /// The corner this handle sits on.
    pub fn anchor(self, b: &Bounds) -> Point {
        let x = if self.is_west() { b.x } else { b.right() };
        let y = if self.is_north() { b.y } else { b.bottom() };
        Point::new(x, y)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NorthWest => "nw",
            Self::NorthEast => "ne",
            Self::SouthWest => "sw",
            Self::SouthEast => "se",
        }
    }
}

/// Apply a pointer delta to the bounds captured at resize start.
///
/// East/south handles grow the size directly. West/north handles grow it
/// the opposite way and shift the origin so the far edge stays put. The
/// result never drops below `MIN_NODE_WIDTH` x `MIN_NODE_HEIGHT`.
pub fn resize_bounds(start: Bounds, handle: ResizeHandle, dx: f64, dy: f64) -> Bounds {
    let mut out = start;

    if handle.is_west() {
        let width = (start.width - dx).max(MIN_NODE_WIDTH);
        out.x = start.x + (start.width - width);
        out.width = width;
    } else {
        out.width = (start.width + dx).max(MIN_NODE_WIDTH);
    }

    if handle.is_north() {
        let height = (start.height - dy).max(MIN_NODE_HEIGHT);
        out.y = start.y + (start.height - height);
        out.height = height;
    } else {
        out.height = (start.height + dy).max(MIN_NODE_HEIGHT);
    }

    out
}

// ─── Snapshot ────────────────────────────────────────────────────────────

/// Deep copy of a scene's nodes and connectors.
///
/// Used both as a history checkpoint and as the autosave payload, which is
/// why missing fields deserialize to empty lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

impl SceneSnapshot {
    /// Check that node ids are unique. Connectors that dangle or loop are
    /// dropped rather than rejected.
    pub fn sanitize(mut self) -> Result<Self, EditorError> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(EditorError::MalformedDocument(format!(
                    "duplicate node id {}",
                    node.id.0
                )));
            }
        }

        let before = self.connectors.len();
        self.connectors
            .retain(|c| c.from != c.to && seen.contains(&c.from) && seen.contains(&c.to));
        let dropped = before - self.connectors.len();
        if dropped > 0 {
            log::warn!("dropped {dropped} connector(s) with invalid endpoints");
        }
        Ok(self)
    }
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// The live scene: exclusive owner of every node and connector.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<Node>,
    connectors: Vec<Connector>,
    ids: IdAllocator,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes in draw order (last = topmost).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.connectors.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Position of a node in the draw order.
    pub fn z_index(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Create a node with per-type defaults and append it on top.
    pub fn add_node(&mut self, kind: NodeType, x: f64, y: f64) -> &Node {
        let id = self.ids.next_node();
        log::debug!("add {kind} node {id} at ({x}, {y})");
        self.nodes.push(Node::new(id, kind, x, y));
        &self.nodes[self.nodes.len() - 1]
    }

    /// Link two distinct, existing nodes.
    pub fn add_connector(&mut self, from: NodeId, to: NodeId) -> Result<&Connector, EditorError> {
        if from == to {
            return Err(EditorError::SelfConnection { from });
        }
        for id in [from, to] {
            if !self.contains_node(id) {
                return Err(EditorError::UnknownNode(id));
            }
        }
        let id = self.ids.next_connector();
        log::debug!("connect {from} -> {to} as {id}");
        self.connectors.push(Connector { id, from, to });
        Ok(&self.connectors[self.connectors.len() - 1])
    }

    /// Remove nodes and every connector that touches one of them.
    /// Returns the number of nodes removed.
    pub fn remove_nodes(&mut self, ids: &[NodeId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let before = self.nodes.len();
        self.nodes.retain(|n| !ids.contains(&n.id));
        self.connectors
            .retain(|c| !ids.iter().any(|id| c.touches(*id)));
        before - self.nodes.len()
    }

    /// Copy nodes (fresh ids, offset by `DUPLICATE_OFFSET`) onto the top of
    /// the draw order. Unknown ids are skipped. Returns the new ids in the
    /// order given.
    pub fn duplicate(&mut self, ids: &[NodeId]) -> Vec<NodeId> {
        let mut created = Vec::with_capacity(ids.len());
        for id in ids {
            let Some(source) = self.node(*id).cloned() else {
                continue;
            };
            let copy = Node {
                id: self.ids.next_node(),
                x: source.x + DUPLICATE_OFFSET,
                y: source.y + DUPLICATE_OFFSET,
                ..source
            };
            created.push(copy.id);
            self.nodes.push(copy);
        }
        created
    }

    /// Move a node to the top of the draw order. False if it is not here.
    pub fn bring_to_front(&mut self, id: NodeId) -> bool {
        let Some(index) = self.z_index(id) else {
            return false;
        };
        let node = self.nodes.remove(index);
        self.nodes.push(node);
        true
    }

    /// Move a node to the bottom of the draw order. False if it is not here.
    pub fn send_to_back(&mut self, id: NodeId) -> bool {
        let Some(index) = self.z_index(id) else {
            return false;
        };
        let node = self.nodes.remove(index);
        self.nodes.insert(0, node);
        true
    }

    /// Drop every node and connector. Id counters keep running.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connectors.clear();
    }

    /// Bounding box of all nodes, or `None` for an empty scene.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.nodes
            .iter()
            .map(Node::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Center points of a connector's two endpoints, if both still resolve.
    pub fn connector_endpoints(&self, connector: &Connector) -> Option<(Point, Point)> {
        let from = self.node(connector.from)?;
        let to = self.node(connector.to)?;
        Some((from.center(), to.center()))
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            nodes: self.nodes.clone(),
            connectors: self.connectors.clone(),
        }
    }

    /// Replace contents with a history checkpoint. Id counters only move
    /// forward: ids retired by the undo are never reissued, and a checkpoint
    /// taken before a load cannot collide with ids handed out after it.
    pub fn restore(&mut self, snapshot: &SceneSnapshot) {
        self.ids.ensure_past(
            snapshot.nodes.iter().map(|n| n.id),
            snapshot.connectors.iter().map(|c| c.id),
        );
        self.nodes = snapshot.nodes.clone();
        self.connectors = snapshot.connectors.clone();
    }

    /// Replace contents with loaded data and rewind the id counters to
    /// just past the highest restored ids.
    pub fn load(&mut self, snapshot: SceneSnapshot) {
        self.ids.reset_after_load(
            snapshot.nodes.iter().map(|n| n.id),
            snapshot.connectors.iter().map(|c| c.id),
        );
        self.nodes = snapshot.nodes;
        self.connectors = snapshot.connectors;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_nodes() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        let a = scene.add_node(NodeType::Process, 100.0, 100.0).id;
        let b = scene.add_node(NodeType::Decision, 300.0, 100.0).id;
        (scene, a, b)
    }

    #[test]
    fn new_node_uses_type_defaults() {
        let mut scene = Scene::new();
        let node = scene.add_node(NodeType::Start, 10.0, 20.0).clone();
        assert_eq!(node.text, "Start");
        assert_eq!(node.border_radius, 30.0);
        assert_eq!((node.width, node.height), (120.0, 60.0));
        assert_eq!(node.fill_color, Color::WHITE);
        assert_eq!(node.font_size, 14.0);
    }

    #[test]
    fn connector_node_has_empty_text() {
        assert_eq!(NodeType::Connector.default_text(), "");
        assert_eq!(NodeType::Decision.default_border_radius(), 0.0);
    }

    #[test]
    fn self_connection_is_rejected() {
        let (mut scene, a, _) = two_nodes();
        let err = scene.add_connector(a, a).unwrap_err();
        assert!(err.is_invalid_reference());
        assert!(scene.connectors().is_empty());
    }

    #[test]
    fn connection_to_missing_node_is_rejected() {
        let (mut scene, a, _) = two_nodes();
        let err = scene.add_connector(a, NodeId(99)).unwrap_err();
        assert_eq!(err, EditorError::UnknownNode(NodeId(99)));
    }

    #[test]
    fn removing_node_prunes_only_its_connectors() {
        let (mut scene, a, b) = two_nodes();
        let c = scene.add_node(NodeType::Io, 500.0, 100.0).id;
        scene.add_connector(a, b).unwrap();
        let kept = scene.add_connector(b, c).unwrap().id;
        scene.add_connector(c, a).unwrap();

        assert_eq!(scene.remove_nodes(&[a]), 1);
        let remaining: Vec<_> = scene.connectors().iter().map(|c| c.id).collect();
        assert_eq!(remaining, vec![kept]);
    }

    #[test]
    fn remove_with_empty_ids_is_noop() {
        let (mut scene, _, _) = two_nodes();
        assert_eq!(scene.remove_nodes(&[]), 0);
        assert_eq!(scene.nodes().len(), 2);
    }

    #[test]
    fn duplicate_offsets_and_assigns_fresh_ids() {
        let (mut scene, a, b) = two_nodes();
        scene.node_mut(a).unwrap().text = "hello".into();
        let copies = scene.duplicate(&[a, b]);
        assert_eq!(copies.len(), 2);
        let copy = scene.node(copies[0]).unwrap();
        assert_eq!((copy.x, copy.y), (120.0, 120.0));
        assert_eq!(copy.text, "hello");
        assert!(copies.iter().all(|id| *id != a && *id != b));
    }

    #[test]
    fn z_order_changes_keep_ids() {
        let (mut scene, a, b) = two_nodes();
        assert!(scene.bring_to_front(a));
        assert_eq!(scene.nodes().last().map(|n| n.id), Some(a));
        assert!(scene.send_to_back(a));
        assert_eq!(scene.nodes().first().map(|n| n.id), Some(a));
        assert_eq!(scene.z_index(b), Some(1));
        assert!(!scene.bring_to_front(NodeId(42)));
    }

    #[test]
    fn restore_does_not_rewind_ids() {
        let (mut scene, _, _) = two_nodes();
        let before = scene.snapshot();
        let c = scene.add_node(NodeType::Custom, 0.0, 0.0).id;
        scene.restore(&before);
        let d = scene.add_node(NodeType::Custom, 0.0, 0.0).id;
        assert!(d > c);
    }

    #[test]
    fn content_bounds_spans_all_nodes() {
        let (scene, _, _) = two_nodes();
        let b = scene.content_bounds().unwrap();
        assert_eq!(b, Bounds::new(100.0, 100.0, 320.0, 60.0));
        assert!(Scene::new().content_bounds().is_none());
    }

    #[test]
    fn resize_clamps_to_minimum() {
        let start = Bounds::new(0.0, 0.0, 120.0, 60.0);
        for handle in ResizeHandle::ALL {
            for (dx, dy) in [(-1000.0, -1000.0), (1000.0, 1000.0), (55.0, -33.0)] {
                let out = resize_bounds(start, handle, dx, dy);
                assert!(out.width >= MIN_NODE_WIDTH, "{handle:?} {dx} {dy}");
                assert!(out.height >= MIN_NODE_HEIGHT, "{handle:?} {dx} {dy}");
            }
        }
    }

    #[test]
    fn west_resize_keeps_east_edge_fixed() {
        let start = Bounds::new(100.0, 100.0, 120.0, 60.0);
        let out = resize_bounds(start, ResizeHandle::NorthWest, 30.0, 10.0);
        assert_eq!(out.right(), start.right());
        assert_eq!(out.bottom(), start.bottom());
        assert_eq!(out.width, 90.0);
        assert_eq!(out.height, 50.0);

        let clamped = resize_bounds(start, ResizeHandle::SouthWest, 500.0, 0.0);
        assert_eq!(clamped.width, MIN_NODE_WIDTH);
        assert_eq!(clamped.right(), start.right());
    }

    #[test]
    fn color_hex_roundtrip() {
        let c = Color::from_hex("#1A2b3C").unwrap();
        assert_eq!(c.to_hex(), "#1a2b3c");
        assert_eq!(Color::from_hex("fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#12345"), None);
    }

    #[test]
    fn node_serializes_with_camel_case_fields() {
        let node = Node::new(NodeId(3), NodeType::Io, 1.0, 2.0);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "io");
        assert_eq!(json["fillColor"], "#ffffff");
        assert_eq!(json["borderRadius"], 5.0);
        assert_eq!(json["id"], 3);
    }

    #[test]
    fn sanitize_drops_dangling_connectors() {
        let snapshot = SceneSnapshot {
            nodes: vec![Node::new(NodeId(1), NodeType::Start, 0.0, 0.0)],
            connectors: vec![Connector {
                id: ConnectorId(1),
                from: NodeId(1),
                to: NodeId(2),
            }],
        };
        let clean = snapshot.sanitize().unwrap();
        assert!(clean.connectors.is_empty());
    }

    #[test]
    fn sanitize_rejects_duplicate_node_ids() {
        let node = Node::new(NodeId(1), NodeType::Start, 0.0, 0.0);
        let snapshot = SceneSnapshot {
            nodes: vec![node.clone(), node],
            connectors: vec![],
        };
        assert!(matches!(
            snapshot.sanitize(),
            Err(EditorError::MalformedDocument(_))
        ));
    }
}
