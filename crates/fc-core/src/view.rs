//! View transform: pan, zoom, and grid snapping.
//!
//! Screen space is pointer coordinates relative to the drawing surface.
//! Scene space is where node positions live. The mapping is
//! `scene = (screen - pan) / zoom` and its inverse
//! `screen = scene * zoom + pan`.

use crate::model::{Bounds, Point};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;
/// Padding around the content, in scene units, when fitting to screen.
pub const FIT_PADDING: f64 = 50.0;
/// Zoom-in/out button step.
pub const ZOOM_STEP: f64 = 1.2;
const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

/// The drawing surface dimensions, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl Viewport {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Process-wide view state. Never part of undo history.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub pan: Point,
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub show_grid: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::ORIGIN,
            grid_size: 20.0,
            snap_to_grid: true,
            show_grid: true,
        }
    }
}

impl ViewState {
    pub fn screen_to_scene(&self, p: Point) -> Point {
        Point::new((p.x - self.pan.x) / self.zoom, (p.y - self.pan.y) / self.zoom)
    }

    pub fn scene_to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.zoom + self.pan.x, p.y * self.zoom + self.pan.y)
    }

    /// Scene-space rectangle mapped to screen space.
    pub fn bounds_to_screen(&self, b: &Bounds) -> Bounds {
        let origin = self.scene_to_screen(Point::new(b.x, b.y));
        Bounds::new(origin.x, origin.y, b.width * self.zoom, b.height * self.zoom)
    }

    /// Set the zoom, keeping the scene point under `anchor` (screen space)
    /// where it is. The requested zoom is clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn zoom_at(&mut self, anchor: Point, zoom: f64) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = zoom / self.zoom;
        self.pan.x = anchor.x - (anchor.x - self.pan.x) * ratio;
        self.pan.y = anchor.y - (anchor.y - self.pan.y) * ratio;
        self.zoom = zoom;
    }

    /// One wheel notch at `anchor`. Positive `delta_y` (scrolling down)
    /// zooms out.
    pub fn wheel(&mut self, anchor: Point, delta_y: f64) {
        if delta_y == 0.0 {
            return;
        }
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.zoom_at(anchor, self.zoom * factor);
    }

    pub fn zoom_in(&mut self, viewport: Viewport) {
        self.zoom_at(viewport.center(), self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self, viewport: Viewport) {
        self.zoom_at(viewport.center(), self.zoom / ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::ORIGIN;
    }

    /// Pan by a raw screen-space delta; zoom does not scale it.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    /// Fit `content` (scene space) into the viewport with `FIT_PADDING`
    /// around it, never zooming past 100%. Does nothing for an empty scene.
    pub fn fit_to_screen(&mut self, content: Option<Bounds>, viewport: Viewport) -> bool {
        let Some(content) = content else {
            return false;
        };
        let padded_w = content.width + FIT_PADDING * 2.0;
        let padded_h = content.height + FIT_PADDING * 2.0;
        let zoom = (viewport.width / padded_w)
            .min(viewport.height / padded_h)
            .min(1.0)
            .clamp(MIN_ZOOM, MAX_ZOOM);

        let min_plus_max_x = content.x * 2.0 + content.width;
        let min_plus_max_y = content.y * 2.0 + content.height;
        self.zoom = zoom;
        self.pan.x = (viewport.width - min_plus_max_x * zoom) / 2.0;
        self.pan.y = (viewport.height - min_plus_max_y * zoom) / 2.0;
        true
    }

    /// Round to the nearest grid multiple when snapping is on.
    pub fn snap(&self, v: f64) -> f64 {
        if self.snap_to_grid && self.grid_size > 0.0 {
            (v / self.grid_size).round() * self.grid_size
        } else {
            v
        }
    }

    pub fn snap_point(&self, p: Point) -> Point {
        Point::new(self.snap(p.x), self.snap(p.y))
    }

    pub fn toggle_grid(&mut self) -> bool {
        self.show_grid = !self.show_grid;
        self.show_grid
    }

    pub fn toggle_snap(&mut self) -> bool {
        self.snap_to_grid = !self.snap_to_grid;
        self.snap_to_grid
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    /// The part of the scene currently on screen.
    pub fn visible_scene_rect(&self, viewport: Viewport) -> Bounds {
        let tl = self.screen_to_scene(Point::ORIGIN);
        Bounds::new(
            tl.x,
            tl.y,
            viewport.width / self.zoom,
            viewport.height / self.zoom,
        )
    }
}
