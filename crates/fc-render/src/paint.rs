//! Scene → drawing commands → Vello.
//!
//! `build_display_list` projects the model, the view, and the transient
//! interaction overlay into a flat list of fills, strokes, and labels in
//! scene space. `paint_display_list` replays that list into a Vello scene
//! under the view transform. The caller presents the Vello scene.

use crate::hit::ConnectionSide;
use crate::shapes::{self, CONNECTION_HANDLE_SIZE, connector_route, to_kurbo};
use fc_core::id::NodeId;
use fc_core::model::{Bounds, Color, Node, Point, Scene};
use fc_core::view::{ViewState, Viewport};
use kurbo::{Affine, BezPath, Circle, Line, Shape};
use peniko::Fill;

const NODE_STROKE_WIDTH: f64 = 2.0;
const SELECTION_STROKE_WIDTH: f64 = 3.0;
const DASH: [f64; 2] = [5.0, 5.0];
const TOLERANCE: f64 = 0.1;

/// Theme-dependent colors for the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTheme {
    pub background: Color,
    pub grid: Color,
    pub connector: Color,
    pub selection: Color,
    pub handle_fill: Color,
    pub handle_stroke: Color,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            grid: Color::rgb(0xe5, 0xe5, 0xe5),
            connector: Color::BLACK,
            selection: Color::BLACK,
            handle_fill: Color::WHITE,
            handle_stroke: Color::BLACK,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0x1c, 0x1c, 0x1e),
            grid: Color::rgb(0x2c, 0x2c, 0x2e),
            connector: Color::rgb(0xd1, 0xd1, 0xd6),
            selection: Color::rgb(0xf2, 0xf2, 0xf7),
            handle_fill: Color::rgb(0x1c, 0x1c, 0x1e),
            handle_stroke: Color::rgb(0xf2, 0xf2, 0xf7),
        }
    }
}

impl Default for CanvasTheme {
    fn default() -> Self {
        Self::light()
    }
}

/// Transient interaction state drawn over the scene.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    pub selection: &'a [NodeId],
    /// Pending connector: source node center → pointer (scene space).
    pub rubber_band: Option<(Point, Point)>,
    /// Box-select rectangle (scene space).
    pub marquee: Option<Bounds>,
}

/// One drawing operation, in scene coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill {
        path: BezPath,
        color: Color,
    },
    Stroke {
        path: BezPath,
        color: Color,
        width: f64,
        dashed: bool,
    },
    Label {
        text: String,
        center: kurbo::Point,
        font_size: f64,
        color: Color,
    },
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    /// Scene → screen transform.
    pub transform: Affine,
    pub viewport: Viewport,
    pub background: Color,
    pub commands: Vec<DrawCmd>,
}

impl DisplayList {
    fn fill(&mut self, path: BezPath, color: Color) {
        self.commands.push(DrawCmd::Fill { path, color });
    }

    fn stroke(&mut self, path: BezPath, color: Color, width: f64, dashed: bool) {
        self.commands.push(DrawCmd::Stroke {
            path,
            color,
            width,
            dashed,
        });
    }
}

/// The scene → screen transform for a view: scale by zoom, then pan.
pub fn view_transform(view: &ViewState) -> Affine {
    Affine::translate((view.pan.x, view.pan.y)) * Affine::scale(view.zoom)
}

/// Project the scene into drawing commands.
///
/// Order: grid, connectors, nodes (each followed by its selection
/// decoration), rubber band, marquee.
pub fn build_display_list(
    scene: &Scene,
    view: &ViewState,
    viewport: Viewport,
    overlay: &Overlay<'_>,
    theme: &CanvasTheme,
) -> DisplayList {
    let mut list = DisplayList {
        transform: view_transform(view),
        viewport,
        background: theme.background,
        commands: Vec::new(),
    };

    if view.show_grid {
        push_grid(&mut list, view, viewport, theme);
    }

    for connector in scene.connectors() {
        let Some(route) = connector_route(scene, connector) else {
            continue;
        };
        list.stroke(shapes::route_path(&route), theme.connector, NODE_STROKE_WIDTH, false);
        list.fill(shapes::polygon(&shapes::arrowhead(&route)), theme.connector);
    }

    for node in scene.nodes() {
        push_node(&mut list, node);
        if overlay.selection.contains(&node.id) {
            push_selection(&mut list, node, theme);
        }
    }

    if let Some((from, to)) = overlay.rubber_band {
        let route = shapes::orthogonal_route(from, to);
        list.stroke(shapes::route_path(&route), theme.connector, NODE_STROKE_WIDTH, true);
    }

    if let Some(marquee) = overlay.marquee {
        list.stroke(
            shapes::rect(&marquee).to_path(TOLERANCE),
            theme.selection,
            1.0 / view.zoom,
            true,
        );
    }

    log::trace!(
        "display list: {} command(s) for {} node(s)",
        list.commands.len(),
        scene.nodes().len()
    );
    list
}

fn push_grid(list: &mut DisplayList, view: &ViewState, viewport: Viewport, theme: &CanvasTheme) {
    let step = view.grid_size;
    if step <= 0.0 {
        return;
    }
    let visible = view.visible_scene_rect(viewport);
    let start_x = (visible.x / step).floor() * step;
    let start_y = (visible.y / step).floor() * step;
    let end_x = start_x + visible.width + step;
    let end_y = start_y + visible.height + step;

    let mut path = BezPath::new();
    let mut x = start_x;
    while x < end_x {
        path.extend(Line::new((x, start_y), (x, end_y)).path_elements(TOLERANCE));
        x += step;
    }
    let mut y = start_y;
    while y < end_y {
        path.extend(Line::new((start_x, y), (end_x, y)).path_elements(TOLERANCE));
        y += step;
    }
    list.stroke(path, theme.grid, 1.0 / view.zoom, false);
}

fn push_node(list: &mut DisplayList, node: &Node) {
    let outline = shapes::node_outline(node);
    list.fill(outline.clone(), node.fill_color);
    list.stroke(outline, node.border_color, NODE_STROKE_WIDTH, false);
    if !node.text.is_empty() {
        list.commands.push(DrawCmd::Label {
            text: node.text.clone(),
            center: to_kurbo(node.center()),
            font_size: node.font_size,
            color: node.border_color,
        });
    }
}

fn push_selection(list: &mut DisplayList, node: &Node, theme: &CanvasTheme) {
    list.stroke(
        shapes::selection_outline(node),
        theme.selection,
        SELECTION_STROKE_WIDTH,
        true,
    );
    for handle in shapes::resize_handle_rects(node) {
        list.fill(handle.to_path(TOLERANCE), theme.handle_stroke);
    }
    let b = node.bounds();
    for side in ConnectionSide::ALL {
        let circle = Circle::new(to_kurbo(side.point(&b)), CONNECTION_HANDLE_SIZE / 2.0)
            .to_path(TOLERANCE);
        list.fill(circle.clone(), theme.handle_fill);
        list.stroke(circle, theme.handle_stroke, NODE_STROKE_WIDTH, false);
    }
}

fn peniko_color(c: Color) -> peniko::Color {
    peniko::Color::from_rgb8(c.r, c.g, c.b)
}

/// Replay a display list into a Vello scene.
///
/// Call once per frame with a freshly-reset `vello::Scene`.
pub fn paint_display_list(scene: &mut vello::Scene, list: &DisplayList) {
    let screen = kurbo::Rect::new(0.0, 0.0, list.viewport.width, list.viewport.height);
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        peniko_color(list.background),
        None,
        &screen,
    );

    for cmd in &list.commands {
        match cmd {
            DrawCmd::Fill { path, color } => {
                scene.fill(Fill::NonZero, list.transform, peniko_color(*color), None, path);
            }
            DrawCmd::Stroke {
                path,
                color,
                width,
                dashed,
            } => {
                let mut stroke = kurbo::Stroke::new(*width);
                if *dashed {
                    stroke = stroke.with_dashes(0.0, DASH);
                }
                scene.stroke(&stroke, list.transform, peniko_color(*color), None, path);
            }
            DrawCmd::Label {
                text,
                center,
                font_size,
                ..
            } => {
                // Glyph layout needs a font context owned by the host surface.
                log::trace!("LABEL {text:?} at ({}, {}) size {font_size}", center.x, center.y);
            }
        }
    }
}
