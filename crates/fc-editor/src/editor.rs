//! The editor session: one value owning the scene, selection, view,
//! history, and the gesture in progress.
//!
//! Hosts feed `InputEvent`s and toolbar/menu actions in, and read back a
//! display list or an export. Every completed user action that changes
//! the scene records exactly one history snapshot.

use crate::gesture::{Canvas, Gesture, GestureEnd, GestureMachine, Selection};
use crate::history::History;
use crate::input::{InputEvent, Modifiers, PointerButton, TextEditKey};
use chrono::{DateTime, Utc};
use fc_core::id::{ConnectorId, NodeId};
use fc_core::model::{Bounds, Color, Node, NodeType, Point, Scene, SceneSnapshot};
use fc_core::view::{ViewState, Viewport};
use fc_core::{Document, EditorConfig, EditorError};
use fc_render::paint::{CanvasTheme, DisplayList, Overlay, build_display_list};
use fc_render::raster::{ExportOptions, render_png};
use fc_render::{ExportError, hit, svg};
use std::fmt;

/// A single-field edit from the property inspector.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeProperty {
    Text(String),
    FontSize(f64),
    FillColor(Color),
    BorderColor(Color),
    BorderRadius(f64),
}

/// An open in-place text editor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEdit {
    pub node: NodeId,
    /// Text typed so far. The node keeps its old text until commit.
    pub draft: String,
}

/// Where the host should place its text box, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOverlay {
    pub rect: Bounds,
    pub font_size: f64,
}

/// What the property inspector shows for the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Inspector<'a> {
    Empty,
    Single(&'a Node),
    Multiple(usize),
}

impl fmt::Display for Inspector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Select a node to edit properties"),
            Self::Single(node) => {
                writeln!(f, "Text: {}", node.text)?;
                writeln!(f, "Font Size: {}", node.font_size)?;
                writeln!(f, "Fill Color: {}", node.fill_color.to_hex())?;
                writeln!(f, "Border Color: {}", node.border_color.to_hex())?;
                write!(f, "Border Radius: {}", node.border_radius)
            }
            Self::Multiple(n) => write!(f, "{n} nodes selected"),
        }
    }
}

pub struct Editor {
    scene: Scene,
    selection: Selection,
    view: ViewState,
    viewport: Viewport,
    history: History,
    gestures: GestureMachine,
    text_edit: Option<TextEdit>,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// A session over an empty scene. The empty scene is the first
    /// history entry, so the first action can be undone.
    pub fn new(config: EditorConfig) -> Self {
        let mut editor = Self {
            scene: Scene::new(),
            selection: Selection::new(),
            view: config.view_state(),
            viewport: Viewport::default(),
            history: History::new(config.history_capacity),
            gestures: GestureMachine::new(),
            text_edit: None,
            config,
        };
        editor.commit();
        editor
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.selection.iter().copied().collect()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The host surface was resized.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn gesture(&self) -> &Gesture {
        self.gestures.gesture()
    }

    pub fn text_edit(&self) -> Option<&TextEdit> {
        self.text_edit.as_ref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn inspector(&self) -> Inspector<'_> {
        match self.selection.len() {
            0 => Inspector::Empty,
            1 => self
                .selection
                .first()
                .and_then(|id| self.scene.node(*id))
                .map_or(Inspector::Empty, Inspector::Single),
            n => Inspector::Multiple(n),
        }
    }

    // ─── History ─────────────────────────────────────────────────────────

    fn commit(&mut self) {
        self.history.commit(self.scene.snapshot());
    }

    /// Commit only when the scene differs from the snapshot at the cursor.
    fn commit_if_changed(&mut self) -> bool {
        let snapshot = self.scene.snapshot();
        if self.history.current() == Some(&snapshot) {
            return false;
        }
        self.history.commit(snapshot);
        true
    }

    fn restore_from_history(&mut self, snapshot: Option<SceneSnapshot>) -> bool {
        let Some(snapshot) = snapshot else {
            return false;
        };
        self.abandon_interaction();
        self.scene.restore(&snapshot);
        self.selection.clear();
        true
    }

    pub fn undo(&mut self) -> bool {
        let snapshot = self.history.undo().cloned();
        self.restore_from_history(snapshot)
    }

    pub fn redo(&mut self) -> bool {
        let snapshot = self.history.redo().cloned();
        self.restore_from_history(snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Pointer input ───────────────────────────────────────────────────

    /// Split borrow: the gesture machine plus the state it mutates.
    fn gesture_parts(&mut self) -> (&mut GestureMachine, Canvas<'_>) {
        (
            &mut self.gestures,
            Canvas {
                scene: &mut self.scene,
                selection: &mut self.selection,
                view: &mut self.view,
            },
        )
    }

    pub fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown {
                x,
                y,
                button,
                modifiers,
            } => self.pointer_down(Point::new(x, y), button, modifiers),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            InputEvent::PointerUp { x, y } => {
                self.pointer_up(Point::new(x, y));
            }
            InputEvent::DoubleClick { x, y } => {
                self.double_click(Point::new(x, y));
            }
            InputEvent::Wheel { x, y, delta_y } => self.wheel(Point::new(x, y), delta_y),
        }
    }

    pub fn pointer_down(&mut self, screen: Point, button: PointerButton, modifiers: Modifiers) {
        // Clicking away from the text box blurs it.
        if self.text_edit.is_some() {
            self.commit_text_edit();
        }
        let (gestures, mut canvas) = self.gesture_parts();
        gestures.pointer_down(&mut canvas, screen, button, modifiers);
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let (gestures, mut canvas) = self.gesture_parts();
        gestures.pointer_move(&mut canvas, screen);
    }

    /// Finish the gesture and record history if it changed the scene.
    pub fn pointer_up(&mut self, screen: Point) -> GestureEnd {
        let (gestures, mut canvas) = self.gesture_parts();
        let end = gestures.pointer_up(&mut canvas, screen);
        match end {
            GestureEnd::Edited => {
                self.commit_if_changed();
            }
            GestureEnd::Connected(_) => self.commit(),
            GestureEnd::Nothing | GestureEnd::Selected(_) => {}
        }
        end
    }

    /// Open the text editor on the node under the pointer.
    pub fn double_click(&mut self, screen: Point) -> bool {
        let p = self.view.screen_to_scene(screen);
        match hit::hit_test_node(&self.scene, p).map(|n| n.id) {
            Some(id) => self.begin_text_edit(id),
            None => false,
        }
    }

    pub fn wheel(&mut self, screen: Point, delta_y: f64) {
        self.view.wheel(screen, delta_y);
    }

    /// Drop the gesture in progress without recording anything.
    pub fn cancel_gesture(&mut self) {
        let (gestures, mut canvas) = self.gesture_parts();
        gestures.cancel(&mut canvas);
    }

    fn abandon_interaction(&mut self) {
        self.cancel_gesture();
        self.text_edit = None;
    }

    // ─── Scene actions ───────────────────────────────────────────────────

    /// Add a node at a scene position, snapped to the grid when snapping
    /// is on.
    pub fn add_node(&mut self, kind: NodeType, at: Point) -> NodeId {
        let at = self.view.snap_point(at);
        let id = self.scene.add_node(kind, at.x, at.y).id;
        self.commit();
        id
    }

    /// Toolbar click: add a node with its top-left at the viewport center.
    pub fn add_node_at_center(&mut self, kind: NodeType) -> NodeId {
        let at = self.view.screen_to_scene(self.viewport.center());
        self.add_node(kind, at)
    }

    /// Toolbar drag-and-drop onto the surface at a screen position.
    pub fn drop_node(&mut self, kind: NodeType, screen: Point) -> NodeId {
        let at = self.view.screen_to_scene(screen);
        self.add_node(kind, at)
    }

    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<ConnectorId, EditorError> {
        let id = self.scene.add_connector(from, to)?.id;
        self.commit();
        Ok(id)
    }

    /// Delete the selected nodes and their connectors. Returns how many
    /// nodes went away.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let ids = self.selected_ids();
        let removed = self.scene.remove_nodes(&ids);
        self.selection.clear();
        self.commit();
        removed
    }

    /// Duplicate the selected nodes; the copies become the selection.
    pub fn duplicate_selected(&mut self) -> Vec<NodeId> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        let ids = self.selected_ids();
        let created = self.scene.duplicate(&ids);
        self.selection = created.iter().copied().collect();
        self.commit();
        created
    }

    /// Context menu "Delete" on one node.
    pub fn delete_node(&mut self, id: NodeId) -> usize {
        self.select_only(id);
        self.delete_selected()
    }

    /// Context menu "Duplicate" on one node.
    pub fn duplicate_node(&mut self, id: NodeId) -> Vec<NodeId> {
        self.select_only(id);
        self.duplicate_selected()
    }

    pub fn bring_to_front(&mut self, id: NodeId) -> bool {
        let moved = self.scene.bring_to_front(id);
        if moved {
            self.commit();
        }
        moved
    }

    pub fn send_to_back(&mut self, id: NodeId) -> bool {
        let moved = self.scene.send_to_back(id);
        if moved {
            self.commit();
        }
        moved
    }

    /// Remove everything. Recorded in history, so it can be undone.
    pub fn clear_canvas(&mut self) {
        self.abandon_interaction();
        self.scene.clear();
        self.selection.clear();
        self.commit();
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn select_all(&mut self) {
        self.selection = self.scene.nodes().iter().map(|n| n.id).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn select_only(&mut self, id: NodeId) {
        self.selection.clear();
        if self.scene.contains_node(id) {
            self.selection.insert(id);
        }
    }

    // ─── Property edits ──────────────────────────────────────────────────

    /// Apply an inspector edit live. History is recorded separately by
    /// `commit_property_edit`, once the edit is finished.
    pub fn set_property(&mut self, id: NodeId, property: NodeProperty) -> Result<(), EditorError> {
        let node = self.scene.node_mut(id).ok_or(EditorError::UnknownNode(id))?;
        match property {
            NodeProperty::Text(text) => node.text = text,
            NodeProperty::FontSize(size) => node.font_size = size,
            NodeProperty::FillColor(color) => node.fill_color = color,
            NodeProperty::BorderColor(color) => node.border_color = color,
            NodeProperty::BorderRadius(radius) => node.border_radius = radius,
        }
        Ok(())
    }

    /// Record finished inspector edits. False when nothing changed.
    pub fn commit_property_edit(&mut self) -> bool {
        self.commit_if_changed()
    }

    // ─── Text editing ────────────────────────────────────────────────────

    pub fn begin_text_edit(&mut self, id: NodeId) -> bool {
        if self.text_edit.is_some() {
            self.commit_text_edit();
        }
        let Some(node) = self.scene.node(id) else {
            return false;
        };
        log::debug!("text edit on {id}");
        self.text_edit = Some(TextEdit {
            node: id,
            draft: node.text.clone(),
        });
        true
    }

    pub fn set_text_draft(&mut self, text: impl Into<String>) {
        if let Some(edit) = &mut self.text_edit {
            edit.draft = text.into();
        }
    }

    pub fn text_edit_key(&mut self, key: TextEditKey) {
        match key {
            TextEditKey::Enter { shift: false } => {
                self.commit_text_edit();
            }
            TextEditKey::Enter { shift: true } => {
                if let Some(edit) = &mut self.text_edit {
                    edit.draft.push('\n');
                }
            }
            TextEditKey::Escape => self.cancel_text_edit(),
        }
    }

    /// Write the draft into the node. True when a history entry was made.
    pub fn commit_text_edit(&mut self) -> bool {
        let Some(edit) = self.text_edit.take() else {
            return false;
        };
        match self.scene.node_mut(edit.node) {
            Some(node) => node.text = edit.draft,
            None => return false,
        }
        self.commit_if_changed()
    }

    /// Close the editor; the node keeps its previous text.
    pub fn cancel_text_edit(&mut self) {
        self.text_edit = None;
    }

    /// Screen placement for the host's text box, tracking pan and zoom.
    pub fn text_edit_overlay(&self) -> Option<TextOverlay> {
        let edit = self.text_edit.as_ref()?;
        let node = self.scene.node(edit.node)?;
        Some(TextOverlay {
            rect: self.view.bounds_to_screen(&node.bounds()),
            font_size: node.font_size * self.view.zoom,
        })
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) {
        self.view.zoom_in(self.viewport);
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out(self.viewport);
    }

    /// Set an absolute zoom, anchored at the viewport center.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.view.zoom_at(self.viewport.center(), zoom);
    }

    pub fn reset_zoom(&mut self) {
        self.view.reset_zoom();
    }

    pub fn fit_to_screen(&mut self) -> bool {
        self.view
            .fit_to_screen(self.scene.content_bounds(), self.viewport)
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.view.toggle_grid()
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.view.toggle_snap()
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Replace the scene with loaded data. Validation happens first, so a
    /// bad payload leaves the session untouched.
    pub fn load_snapshot(&mut self, snapshot: SceneSnapshot) -> Result<(), EditorError> {
        let snapshot = snapshot.sanitize()?;
        self.abandon_interaction();
        log::info!(
            "loading {} node(s), {} connector(s)",
            snapshot.nodes.len(),
            snapshot.connectors.len()
        );
        self.scene.load(snapshot);
        self.selection.clear();
        self.commit();
        Ok(())
    }

    pub fn load_document(&mut self, document: &Document) -> Result<(), EditorError> {
        self.load_snapshot(document.snapshot())
    }

    /// Load a document from its JSON text.
    pub fn load_json(&mut self, json: &str) -> Result<(), EditorError> {
        let document = Document::from_json(json).inspect_err(|e| log::warn!("{e}"))?;
        self.load_document(&document)
    }

    /// The scene as a named, timestamped document.
    pub fn document(&self, name: impl Into<String>, timestamp: DateTime<Utc>) -> Document {
        Document::new(name, timestamp, self.scene.snapshot())
    }

    /// The `{ nodes, connectors }` payload written by autosave.
    pub fn autosave_json(&self) -> Result<String, EditorError> {
        self.scene.snapshot().to_json()
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    pub fn display_list(&self, theme: &CanvasTheme) -> DisplayList {
        let selection = self.selected_ids();
        let gesture = self.gestures.gesture();
        let overlay = Overlay {
            selection: &selection,
            rubber_band: gesture.rubber_band(&self.scene),
            marquee: gesture.marquee(),
        };
        build_display_list(&self.scene, &self.view, self.viewport, &overlay, theme)
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::from_config(&self.config)
    }

    pub fn export_svg(&self) -> String {
        let options = self.export_options();
        svg::render_svg(&self.scene, options.padding, options.background)
    }

    pub fn export_png(&self) -> Result<Vec<u8>, ExportError> {
        render_png(&self.scene, &self.export_options())
    }
}
