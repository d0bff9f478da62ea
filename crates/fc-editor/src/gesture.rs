//! Pointer gesture state machine.
//!
//! A gesture runs from pointer-down to pointer-up. The down event picks
//! the gesture from what the pointer hit; moves update the scene or the
//! view live; the up event finishes it and reports what happened so the
//! caller can decide whether to record history.
//!
//! | Pointer-down on            | Gesture        |
//! |----------------------------|----------------|
//! | anything, secondary button | `Panning`      |
//! | node, with shift           | (toggle, stays `Idle`) |
//! | resize handle              | `Resizing`     |
//! | connection handle          | `Connecting`   |
//! | node body                  | `Dragging`     |
//! | empty canvas               | `BoxSelecting` |

use crate::input::{Modifiers, PointerButton};
use fc_core::id::{ConnectorId, NodeId};
use fc_core::model::{Bounds, Point, ResizeHandle, Scene, resize_bounds};
use fc_core::view::ViewState;
use fc_render::hit::{self, HitTarget};
use indexmap::IndexSet;

/// Ordered set of selected node ids.
pub type Selection = IndexSet<NodeId>;

/// The gesture in progress. Scene-space unless noted.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// `last` is the previous pointer position in screen space.
    Panning { last: Point },
    /// Every selected node moves rigidly from its position at `start`.
    Dragging {
        start: Point,
        origins: Vec<(NodeId, Point)>,
    },
    Resizing {
        node: NodeId,
        handle: ResizeHandle,
        start: Point,
        start_bounds: Bounds,
    },
    Connecting { from: NodeId, cursor: Point },
    BoxSelecting { start: Point, current: Point },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
            Self::Connecting { .. } => "connecting",
            Self::BoxSelecting { .. } => "box-selecting",
        }
    }

    /// Current box-select rectangle.
    pub fn marquee(&self) -> Option<Bounds> {
        match *self {
            Self::BoxSelecting { start, current } => Some(Bounds::from_corners(start, current)),
            _ => None,
        }
    }

    /// Pending connector from the source node's center to the pointer.
    pub fn rubber_band(&self, scene: &Scene) -> Option<(Point, Point)> {
        match *self {
            Self::Connecting { from, cursor } => scene.node(from).map(|n| (n.center(), cursor)),
            _ => None,
        }
    }
}

/// What a finished gesture did.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEnd {
    /// Nothing that belongs in history.
    Nothing,
    /// Nodes were dragged or resized. They may have ended where they began.
    Edited,
    Connected(ConnectorId),
    /// Box select replaced the selection with this many nodes.
    Selected(usize),
}

/// The mutable state a gesture works on.
pub struct Canvas<'a> {
    pub scene: &'a mut Scene,
    pub selection: &'a mut Selection,
    pub view: &'a mut ViewState,
}

/// Drives one `Gesture` through pointer events.
#[derive(Debug, Default)]
pub struct GestureMachine {
    gesture: Gesture,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn pointer_down(
        &mut self,
        canvas: &mut Canvas<'_>,
        screen: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) {
        if !self.gesture.is_idle() {
            log::debug!("pointer-down during {}: abandoning", self.gesture.name());
            self.cancel(canvas);
        }

        if button == PointerButton::Secondary {
            self.gesture = Gesture::Panning { last: screen };
            return;
        }

        let p = canvas.view.screen_to_scene(screen);

        // Shift+click: toggle node in/out of selection
        if modifiers.shift {
            if let Some(node) = hit::hit_test_node(canvas.scene, p) {
                let id = node.id;
                if !canvas.selection.shift_remove(&id) {
                    canvas.selection.insert(id);
                }
                return;
            }
        }

        self.gesture = match hit::classify(canvas.scene, p) {
            HitTarget::ResizeHandle { node, handle } => match canvas.scene.node(node) {
                Some(n) => Gesture::Resizing {
                    node,
                    handle,
                    start: p,
                    start_bounds: n.bounds(),
                },
                None => Gesture::Idle,
            },
            HitTarget::ConnectionHandle { node, .. } => Gesture::Connecting {
                from: node,
                cursor: p,
            },
            HitTarget::Body(node) => {
                if !canvas.selection.contains(&node) {
                    canvas.selection.clear();
                    canvas.selection.insert(node);
                }
                let origins = canvas
                    .selection
                    .iter()
                    .filter_map(|id| canvas.scene.node(*id).map(|n| (*id, Point::new(n.x, n.y))))
                    .collect();
                Gesture::Dragging { start: p, origins }
            }
            HitTarget::Canvas => {
                canvas.selection.clear();
                Gesture::BoxSelecting {
                    start: p,
                    current: p,
                }
            }
        };
        log::debug!("gesture: {}", self.gesture.name());
    }

    /// Update the active gesture. A no-op while idle.
    pub fn pointer_move(&mut self, canvas: &mut Canvas<'_>, screen: Point) {
        let p = canvas.view.screen_to_scene(screen);
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Panning { last } => {
                canvas.view.pan_by(screen.x - last.x, screen.y - last.y);
                *last = screen;
            }
            Gesture::Dragging { start, origins } => {
                let (dx, dy) = (p.x - start.x, p.y - start.y);
                for (id, origin) in origins.iter() {
                    let x = canvas.view.snap(origin.x + dx);
                    let y = canvas.view.snap(origin.y + dy);
                    if let Some(node) = canvas.scene.node_mut(*id) {
                        node.x = x;
                        node.y = y;
                    }
                }
            }
            Gesture::Resizing {
                node,
                handle,
                start,
                start_bounds,
            } => {
                let b = resize_bounds(*start_bounds, *handle, p.x - start.x, p.y - start.y);
                if let Some(node) = canvas.scene.node_mut(*node) {
                    node.set_bounds(b);
                }
            }
            Gesture::Connecting { cursor, .. } => *cursor = p,
            Gesture::BoxSelecting { current, .. } => *current = p,
        }
    }

    /// Finish the active gesture and return to `Idle`.
    pub fn pointer_up(&mut self, canvas: &mut Canvas<'_>, screen: Point) -> GestureEnd {
        let p = canvas.view.screen_to_scene(screen);
        let finished = std::mem::take(&mut self.gesture);
        match finished {
            Gesture::Idle | Gesture::Panning { .. } => GestureEnd::Nothing,
            Gesture::Dragging { .. } | Gesture::Resizing { .. } => GestureEnd::Edited,
            Gesture::Connecting { from, .. } => {
                let Some(target) = hit::hit_test_node(canvas.scene, p).map(|n| n.id) else {
                    log::debug!("connection from {from} released over canvas: discarded");
                    return GestureEnd::Nothing;
                };
                match canvas.scene.add_connector(from, target) {
                    Ok(connector) => GestureEnd::Connected(connector.id),
                    Err(e) => {
                        log::debug!("connection discarded: {e}");
                        GestureEnd::Nothing
                    }
                }
            }
            Gesture::BoxSelecting { start, .. } => {
                let rect = Bounds::from_corners(start, p);
                let hits = hit::hit_test_rect(canvas.scene, &rect);
                *canvas.selection = hits.into_iter().collect();
                GestureEnd::Selected(canvas.selection.len())
            }
        }
    }

    /// Abandon the active gesture without committing. Dragged or resized
    /// nodes go back to where the gesture found them.
    pub fn cancel(&mut self, canvas: &mut Canvas<'_>) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Dragging { origins, .. } => {
                for (id, origin) in origins {
                    if let Some(node) = canvas.scene.node_mut(id) {
                        node.x = origin.x;
                        node.y = origin.y;
                    }
                }
            }
            Gesture::Resizing {
                node, start_bounds, ..
            } => {
                if let Some(node) = canvas.scene.node_mut(node) {
                    node.set_bounds(start_bounds);
                }
            }
            Gesture::Idle
            | Gesture::Panning { .. }
            | Gesture::Connecting { .. }
            | Gesture::BoxSelecting { .. } => {}
        }
    }
}
