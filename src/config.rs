use crate::icon::{DEFAULT_GLYPH, IconResolver};
use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub center_x: f32,
    pub center_y: f32,
    pub primary_radius: f32,
    pub secondary_offset: f32,
    /// Angle between neighbouring items of one branch, in radians.
    pub secondary_spread: f32,
    /// Vertical nudge applied alternately (-/+) to item nodes.
    pub secondary_jitter: f32,
    pub secondary_lighten_base: f32,
    pub secondary_lighten_step: f32,
    pub secondary_border_lighten: f32,
    pub center_size: f32,
    pub center_padding: f32,
    pub primary_width: f32,
    pub secondary_width: f32,
    pub meaning_width: f32,
    pub term_width: f32,
    pub node_padding: f32,
    pub meaning_offset: f32,
    pub term_row_offset: f32,
    pub term_start_x: f32,
    pub term_spacing: f32,
    pub primary_edge_width: f32,
    pub secondary_edge_width: f32,
    pub fallback_edge_width: f32,
    pub animated_edges: bool,
    pub label_line_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center_x: 800.0,
            center_y: 350.0,
            primary_radius: 250.0,
            secondary_offset: 350.0,
            secondary_spread: 0.45,
            secondary_jitter: 12.0,
            secondary_lighten_base: 20.0,
            secondary_lighten_step: 20.0,
            secondary_border_lighten: 10.0,
            center_size: 160.0,
            center_padding: 12.0,
            primary_width: 160.0,
            secondary_width: 220.0,
            meaning_width: 260.0,
            term_width: 140.0,
            node_padding: 8.0,
            meaning_offset: 140.0,
            term_row_offset: 140.0,
            term_start_x: 120.0,
            term_spacing: 200.0,
            primary_edge_width: 3.0,
            secondary_edge_width: 2.0,
            fallback_edge_width: 1.0,
            animated_edges: true,
            label_line_height: 1.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// PNG output is scaled to fit inside `width` x `height`. SVG output is
    /// sized to the layout bounds.
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub background: String,
    pub show_affordance: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 1200.0,
            padding: 24.0,
            background: "#FFFFFF".to_string(),
            show_affordance: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconConfig {
    pub default_glyph: String,
    pub overrides: BTreeMap<String, String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            default_glyph: DEFAULT_GLYPH.to_string(),
            overrides: BTreeMap::new(),
        }
    }
}

impl IconConfig {
    pub fn resolver(&self) -> IconResolver {
        let mut resolver = IconResolver::with_default(self.default_glyph.clone());
        for (token, glyph) in &self.overrides {
            resolver.insert(token, glyph.clone());
        }
        resolver
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
    pub icons: IconConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
            icons: IconConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    text_color: Option<String>,
    center_fill: Option<String>,
    center_text: Option<String>,
    center_border: Option<String>,
    primary_fill: Option<String>,
    primary_text: Option<String>,
    meaning_fill: Option<String>,
    term_fills: Option<Vec<String>>,
    branch_fallback_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    center_x: Option<f32>,
    center_y: Option<f32>,
    primary_radius: Option<f32>,
    secondary_offset: Option<f32>,
    secondary_spread: Option<f32>,
    secondary_jitter: Option<f32>,
    secondary_lighten_base: Option<f32>,
    secondary_lighten_step: Option<f32>,
    primary_width: Option<f32>,
    secondary_width: Option<f32>,
    center_size: Option<f32>,
    animated_edges: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    show_affordance: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct IconConfigFile {
    default: Option<String>,
    #[serde(default)]
    map: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
    icons: Option<IconConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parsing config {}", path.display()))
}

/// Parses a JSON5 config and merges it over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "classic" | "default" => config.theme = Theme::classic(),
            other => tracing::warn!(theme = other, "unknown theme name, keeping default"),
        }
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        let theme = &mut config.theme;
        if let Some(v) = vars.font_family {
            theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            theme.background = v;
        }
        if let Some(v) = vars.text_color {
            theme.text_color = v;
        }
        if let Some(v) = vars.center_fill {
            theme.center_fill = v;
        }
        if let Some(v) = vars.center_text {
            theme.center_text = v;
        }
        if let Some(v) = vars.center_border {
            theme.center_border = v;
        }
        if let Some(v) = vars.primary_fill {
            theme.primary_fill = v;
        }
        if let Some(v) = vars.primary_text {
            theme.primary_text = v;
        }
        if let Some(v) = vars.meaning_fill {
            theme.meaning_fill = v;
        }
        if let Some(v) = vars.term_fills {
            theme.term_fills = v;
        }
        if let Some(v) = vars.branch_fallback_color {
            theme.branch_fallback_color = v;
        }
    }

    if let Some(layout) = parsed.layout {
        let cfg = &mut config.layout;
        if let Some(v) = layout.center_x {
            cfg.center_x = v;
        }
        if let Some(v) = layout.center_y {
            cfg.center_y = v;
        }
        if let Some(v) = layout.primary_radius {
            cfg.primary_radius = v;
        }
        if let Some(v) = layout.secondary_offset {
            cfg.secondary_offset = v;
        }
        if let Some(v) = layout.secondary_spread {
            cfg.secondary_spread = v;
        }
        if let Some(v) = layout.secondary_jitter {
            cfg.secondary_jitter = v;
        }
        if let Some(v) = layout.secondary_lighten_base {
            cfg.secondary_lighten_base = v;
        }
        if let Some(v) = layout.secondary_lighten_step {
            cfg.secondary_lighten_step = v;
        }
        if let Some(v) = layout.primary_width {
            cfg.primary_width = v;
        }
        if let Some(v) = layout.secondary_width {
            cfg.secondary_width = v;
        }
        if let Some(v) = layout.center_size {
            cfg.center_size = v;
        }
        if let Some(v) = layout.animated_edges {
            cfg.animated_edges = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.padding {
            config.render.padding = v;
        }
        if let Some(v) = render.show_affordance {
            config.render.show_affordance = v;
        }
    }

    if let Some(icons) = parsed.icons {
        if let Some(v) = icons.default {
            config.icons.default_glyph = v;
        }
        config.icons.overrides.extend(icons.map);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let config = Config::default();
        assert_eq!(config.layout.center_x, 800.0);
        assert_eq!(config.layout.center_y, 350.0);
        assert_eq!(config.layout.primary_radius, 250.0);
        assert_eq!(config.layout.secondary_offset, 350.0);
        assert_eq!(config.icons.default_glyph, DEFAULT_GLYPH);
    }

    #[test]
    fn merges_json5_over_defaults() {
        let config = parse_config(
            r##"{
                // comments and trailing commas are fine
                theme: "modern",
                themeVariables: { fontSize: 18, centerFill: "#123456" },
                layout: { primaryRadius: 300, animatedEdges: false },
                render: { showAffordance: false },
                icons: { default: "•", map: { Atom: "⚛️" } },
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.font_size, 18.0);
        assert_eq!(config.theme.center_fill, "#123456");
        assert_eq!(config.layout.primary_radius, 300.0);
        assert_eq!(config.layout.secondary_offset, 350.0);
        assert!(!config.layout.animated_edges);
        assert!(!config.render.show_affordance);
        let resolver = config.icons.resolver();
        assert_eq!(resolver.resolve(Some("atom")), "⚛️");
        assert_eq!(resolver.resolve(Some("nothing")), "•");
    }

    #[test]
    fn rejects_malformed_config() {
        assert!(parse_config("{ layout: ").is_err());
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.render.background, config.theme.background);
    }
}
