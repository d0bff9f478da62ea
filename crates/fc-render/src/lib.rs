//! Flowchart rendering: geometry, hit testing, on-screen painting, export.

pub mod error;
pub mod hit;
pub mod paint;
pub mod raster;
pub mod shapes;
pub mod svg;

pub use error::ExportError;
pub use hit::{ConnectionSide, HitTarget, classify, hit_test_node, hit_test_rect};
pub use paint::{CanvasTheme, DisplayList, DrawCmd, Overlay, build_display_list, paint_display_list};
pub use raster::{ExportOptions, render_png};
pub use svg::render_svg;
