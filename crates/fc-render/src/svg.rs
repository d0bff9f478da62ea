//! Scene → standalone SVG document.
//!
//! The document is sized to the content bounding box plus padding, with a
//! solid background and a single translated `<g>` holding the geometry.
//! View pan/zoom and selection decoration never reach the output.

use crate::shapes::{self, connector_route};
use fc_core::model::{Color, Node, NodeType, Scene};
use std::fmt::Write;

const STROKE_WIDTH: f64 = 2.0;

/// Escape text for use inside an element or attribute.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn points_attr(points: &[kurbo::Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the scene as SVG with `padding` scene units around the content.
pub fn render_svg(scene: &Scene, padding: f64, background: Color) -> String {
    let frame = shapes::padded_content(scene, padding);
    let (width, height) = (frame.width, frame.height);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    let _ = writeln!(
        svg,
        "<rect width=\"{width}\" height=\"{height}\" fill=\"{background}\"/>"
    );
    let _ = writeln!(svg, "<g transform=\"translate({}, {})\">", -frame.x, -frame.y);

    for connector in scene.connectors() {
        let Some(route) = connector_route(scene, connector) else {
            continue;
        };
        let d = format!(
            "M {} {} L {} {} L {} {} L {} {}",
            route[0].x, route[0].y, route[1].x, route[1].y, route[2].x, route[2].y, route[3].x,
            route[3].y
        );
        let _ = writeln!(
            svg,
            "  <path d=\"{d}\" stroke=\"#000000\" stroke-width=\"{STROKE_WIDTH}\" fill=\"none\"/>"
        );
        let _ = writeln!(
            svg,
            "  <polygon points=\"{}\" fill=\"#000000\"/>",
            points_attr(&shapes::arrowhead(&route))
        );
    }

    for node in scene.nodes() {
        render_node_svg(&mut svg, node);
    }

    svg.push_str("</g>\n</svg>\n");
    svg
}

fn render_node_svg(out: &mut String, node: &Node) {
    let fill = node.fill_color;
    let stroke = node.border_color;
    match node.kind() {
        NodeType::Start | NodeType::Process | NodeType::Connector | NodeType::Custom => {
            let r = node.border_radius.max(0.0);
            let _ = writeln!(
                out,
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{STROKE_WIDTH}\"/>",
                node.x, node.y, node.width, node.height
            );
        }
        NodeType::Decision => {
            let c = node.center();
            let _ = writeln!(
                out,
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{STROKE_WIDTH}\" transform=\"rotate(45 {} {})\"/>",
                node.x, node.y, node.width, node.height, c.x, c.y
            );
        }
        NodeType::Io => {
            let _ = writeln!(
                out,
                "  <polygon points=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{STROKE_WIDTH}\"/>",
                points_attr(&shapes::parallelogram(&node.bounds()))
            );
        }
    }

    if !node.text.is_empty() {
        let c = node.center();
        let _ = writeln!(
            out,
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" font-family=\"sans-serif\" font-size=\"{}\" fill=\"{stroke}\">{}</text>",
            c.x,
            c.y,
            node.font_size,
            escape(&node.text)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        let a = scene.add_node(NodeType::Process, 100.0, 100.0).id;
        let b = scene.add_node(NodeType::Decision, 300.0, 100.0).id;
        let c = scene.add_node(NodeType::Io, 100.0, 300.0).id;
        scene.add_connector(a, b).unwrap();
        scene.add_connector(b, c).unwrap();
        scene
    }

    #[test]
    fn svg_is_sized_to_padded_content() {
        let svg = render_svg(&sample_scene(), 50.0, Color::WHITE);
        // Content spans 100..420 x 100..360.
        assert!(svg.contains("width=\"420\" height=\"360\""));
        assert!(svg.contains("<g transform=\"translate(-50, -50)\">"));
        assert!(svg.contains("fill=\"#ffffff\""));
    }

    #[test]
    fn svg_shapes_follow_node_type() {
        let svg = render_svg(&sample_scene(), 50.0, Color::WHITE);
        assert!(svg.contains("transform=\"rotate(45 360 130)\""));
        assert!(svg.contains("<polygon points=\"112,300 220,300 208,360 100,360\""));
        assert!(svg.contains("rx=\"5\""));
        assert_eq!(svg.matches("<path ").count(), 2);
        // Two arrowheads plus the I/O polygon.
        assert_eq!(svg.matches("<polygon ").count(), 3);
    }

    #[test]
    fn connector_path_is_orthogonal() {
        let svg = render_svg(&sample_scene(), 50.0, Color::WHITE);
        assert!(svg.contains("d=\"M 160 130 L 260 130 L 260 130 L 360 130\""));
    }

    #[test]
    fn text_is_escaped() {
        let mut scene = Scene::new();
        let id = scene.add_node(NodeType::Custom, 0.0, 0.0).id;
        scene.node_mut(id).unwrap().text = "a < b & \"c\"".into();
        let svg = render_svg(&scene, 50.0, Color::WHITE);
        assert!(svg.contains(">a &lt; b &amp; &quot;c&quot;</text>"));
    }

    #[test]
    fn empty_text_emits_no_text_element() {
        let mut scene = Scene::new();
        scene.add_node(NodeType::Connector, 0.0, 0.0);
        let svg = render_svg(&scene, 50.0, Color::WHITE);
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn empty_scene_is_padding_only() {
        let svg = render_svg(&Scene::new(), 50.0, Color::WHITE);
        assert!(svg.contains("width=\"100\" height=\"100\""));
        assert!(!svg.contains("<rect x="));
    }
}
