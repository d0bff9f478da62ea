//! Scene → PNG, by rasterizing the SVG export with resvg.
//!
//! The output is independent of the on-screen view: it covers the content
//! bounding box plus padding, at `scale` pixels per scene unit, over a
//! solid background.

use crate::error::ExportError;
use crate::svg::render_svg;
use fc_core::model::{Color, Scene};
use resvg::{tiny_skia, usvg};
use std::sync::{Arc, OnceLock};

/// System fonts, loaded on first export and shared by every later one.
fn font_database() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            log::debug!("loaded {} font face(s)", db.len());
            Arc::new(db)
        })
        .clone()
}

/// Knobs shared by the vector and raster exporters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub padding: f64,
    pub scale: f32,
    pub background: Color,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            padding: 50.0,
            scale: 2.0,
            background: Color::WHITE,
        }
    }
}

impl ExportOptions {
    pub fn from_config(config: &fc_core::EditorConfig) -> Self {
        Self {
            padding: config.export_padding,
            scale: config.export_scale,
            ..Self::default()
        }
    }
}

/// Rasterize the scene and encode it as PNG bytes.
pub fn render_png(scene: &Scene, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let scale = options.scale;
    if !(scale.is_finite() && scale > 0.0) {
        return Err(ExportError::InvalidScale(scale));
    }

    let svg = render_svg(scene, options.padding, options.background);

    let usvg_options = usvg::Options {
        fontdb: font_database(),
        ..usvg::Options::default()
    };
    let tree =
        usvg::Tree::from_str(&svg, &usvg_options).map_err(|e| ExportError::Svg(e.to_string()))?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or(ExportError::Allocation { width, height })?;

    let bg = options.background;
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, 255));
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    log::debug!("rasterized {} node(s) to {width}x{height}", scene.nodes().len());

    pixmap
        .encode_png()
        .map_err(|e| ExportError::Encode(e.to_string()))
}
