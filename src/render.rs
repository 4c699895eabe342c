use crate::adapter::affordance_text;
use crate::config::RenderConfig;
use crate::layout::{Layout, LayoutNode, NodeKind, NodeShape, Point};
use crate::theme::Theme;
use anyhow::Result;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

const AFFORDANCE_FONT_SIZE: f32 = 12.0;

pub fn render_svg(layout: &Layout, theme: &Theme, config: &RenderConfig) -> String {
    let pad = config.padding;
    let offset_x = pad - layout.bounds.min_x;
    let offset_y = pad - layout.bounds.min_y;
    let width = (layout.bounds.width() + pad * 2.0).max(200.0);
    let height = (layout.bounds.height() + pad * 2.0).max(200.0);
    let shift = |p: Point| Point::new(p.x + offset_x, p.y + offset_y);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"0 0 {width:.2} {height:.2}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        config.background
    ));

    let centers: HashMap<&str, Point> = layout
        .nodes
        .iter()
        .map(|node| (node.id.as_str(), shift(node.center())))
        .collect();

    for edge in &layout.edges {
        let (Some(from), Some(to)) = (
            centers.get(edge.source.as_str()),
            centers.get(edge.target.as_str()),
        ) else {
            continue;
        };
        let dash = if edge.animated {
            " stroke-dasharray=\"5 5\""
        } else {
            ""
        };
        svg.push_str(&format!(
            "<path class=\"edge\" data-id=\"{}\" d=\"M {:.2} {:.2} L {:.2} {:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{dash}/>",
            escape_xml(&edge.id),
            from.x,
            from.y,
            to.x,
            to.y,
            escape_xml(&edge.color),
            edge.width,
        ));
    }

    for node in &layout.nodes {
        svg.push_str(&node_svg(node, shift(node.position), theme, config));
    }

    svg.push_str("</svg>");
    svg
}

fn node_svg(node: &LayoutNode, origin: Point, theme: &Theme, config: &RenderConfig) -> String {
    let style = &node.style;
    let kind = match node.kind {
        NodeKind::Center => "center",
        NodeKind::Meaning => "meaning",
        NodeKind::Primary => "primary",
        NodeKind::Secondary => "secondary",
        NodeKind::Term => "term",
    };
    let mut out = format!(
        "<g class=\"node {kind}\" data-id=\"{}\"{}>",
        escape_xml(&node.id),
        if node.kind == NodeKind::Primary {
            " data-action=\"toggle\" cursor=\"pointer\""
        } else {
            ""
        }
    );
    match style.shape {
        NodeShape::Circle => {
            let r = node.width.min(node.height) / 2.0;
            out.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{r:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                origin.x + node.width / 2.0,
                origin.y + node.height / 2.0,
                escape_xml(&style.fill),
                escape_xml(&style.border_color),
                style.border_width,
            ));
        }
        NodeShape::RoundRect => {
            out.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{r}\" ry=\"{r}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
                origin.x,
                origin.y,
                node.width,
                node.height,
                escape_xml(&style.fill),
                escape_xml(&style.border_color),
                style.border_width,
                r = style.corner_radius,
            ));
        }
    }

    let line_height = if node.label.lines.is_empty() {
        style.font_size
    } else {
        node.label.height / node.label.lines.len() as f32
    };
    let cx = origin.x + node.width / 2.0;
    let start_y = origin.y + node.height / 2.0 - node.label.height / 2.0 + style.font_size;
    let weight = if style.bold { "700" } else { "400" };
    out.push_str(&format!(
        "<text x=\"{cx:.2}\" y=\"{start_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{weight}\" fill=\"{}\">",
        escape_xml(&theme.font_family),
        style.font_size,
        escape_xml(&style.text_color),
    ));
    for (idx, line) in node.label.lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { line_height };
        out.push_str(&format!(
            "<tspan x=\"{cx:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    out.push_str("</text>");

    if config.show_affordance
        && let Some(expanded) = node.is_expanded()
    {
        out.push_str(&format!(
            "<text class=\"affordance\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{AFFORDANCE_FONT_SIZE}\" font-weight=\"700\" fill=\"{}\">{}</text>",
            origin.x + node.width - 5.0,
            origin.y + 5.0 + AFFORDANCE_FONT_SIZE,
            escape_xml(&theme.font_family),
            escape_xml(&style.border_color),
            affordance_text(expanded),
        ));
    }

    out.push_str("</g>");
    out
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, svg)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|family| family.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "sans-serif".to_string());
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid render size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let natural = tree.size();
    let scale = png_scale(natural.width(), natural.height(), render_cfg);
    let width = (natural.width() * scale).ceil() as u32;
    let height = (natural.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

/// Scale that fits a `width` x `height` drawing inside the configured raster box.
#[cfg(feature = "png")]
fn png_scale(width: f32, height: f32, render_cfg: &RenderConfig) -> f32 {
    if width <= 0.0 || height <= 0.0 {
        return 1.0;
    }
    (render_cfg.width / width).min(render_cfg.height / height)
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Branch, ExpansionState, Topic};
    use crate::layout::compute_layout;

    fn branches() -> Vec<Branch> {
        vec![Branch::new("p1", "Rights & Duties").icon("book").color("#ff0000").items(["x", "y"])]
    }

    #[test]
    fn render_svg_basic() {
        let layout = compute_layout(&Topic::new("Democracy"), &branches(), &ExpansionState::new());
        let svg = render_svg(&layout, &Theme::classic(), &RenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Democracy"));
        assert!(svg.contains("Rights &amp; Duties"));
        assert!(svg.contains(">Expand</text>"));
        assert!(svg.contains("data-action=\"toggle\""));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn expanded_branch_shows_collapse_and_items() {
        let expansion: ExpansionState = [("p1", true)].into_iter().collect();
        let layout = compute_layout(&Topic::new("Democracy"), &branches(), &expansion);
        let svg = render_svg(&layout, &Theme::classic(), &RenderConfig::default());
        assert!(svg.contains(">Collapse</text>"));
        assert!(svg.contains("data-id=\"p1-s-1\""));
        assert_eq!(svg.matches("class=\"edge\"").count(), 3);
    }

    #[test]
    fn affordance_can_be_hidden() {
        let layout = compute_layout(&Topic::new("Democracy"), &branches(), &ExpansionState::new());
        let config = RenderConfig {
            show_affordance: false,
            ..RenderConfig::default()
        };
        let svg = render_svg(&layout, &Theme::classic(), &config);
        assert!(!svg.contains("class=\"affordance\""));
    }

    #[cfg(feature = "png")]
    #[test]
    fn png_fits_the_configured_box() {
        let config = RenderConfig {
            width: 1600.0,
            height: 1200.0,
            ..RenderConfig::default()
        };
        assert_eq!(png_scale(800.0, 600.0, &config), 2.0);
        assert_eq!(png_scale(3200.0, 600.0, &config), 0.5);
        assert_eq!(png_scale(800.0, 2400.0, &config), 0.5);
        assert_eq!(png_scale(0.0, 100.0, &config), 1.0);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }
}
