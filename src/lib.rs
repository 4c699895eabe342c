pub mod adapter;
#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod icon;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod presets;
pub mod render;
pub mod theme;

pub use adapter::{Action, MindmapSession, bind};
#[cfg(feature = "cli")]
pub use cli::run;
pub use color::lighten;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use icon::{IconResolver, resolve_icon};
pub use ir::{Branch, ExpansionState, MindmapDocument, Topic};
pub use layout::{Layout, LayoutEngine, compute_layout};
pub use render::render_svg;
pub use theme::Theme;

/// Parses a mind map document and renders it to SVG in one call.
pub fn render_with_options(
    document_json: &str,
    expansion: &ExpansionState,
    config: &Config,
) -> anyhow::Result<String> {
    let document = MindmapDocument::from_json(document_json)?;
    document.validate()?;
    let layout = LayoutEngine::from_config(config).layout(
        &document.topic(),
        document.branches(),
        expansion,
    );
    Ok(render_svg(&layout, &config.theme, &config.render))
}
