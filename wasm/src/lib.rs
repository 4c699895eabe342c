use radial_mindmap::layout_dump::layout_to_json;
use radial_mindmap::{Action, Config, MindmapDocument, MindmapSession, Theme, presets, render_svg};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MindmapViewOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    show_affordance: Option<bool>,
    /// Fill a branchless document from the built-in preset matching its topic.
    preset_for_topic: Option<bool>,
}

fn build_config(options: &MindmapViewOptions) -> Config {
    let mut config = Config::default();
    if options.theme.as_deref() == Some("modern") {
        config.theme = Theme::modern();
        config.render.background = config.theme.background.clone();
    }
    if let Some(font_family) = &options.font_family {
        config.theme.font_family = font_family.clone();
    }
    if let Some(font_size) = options.font_size {
        config.theme.font_size = font_size;
    }
    if let Some(show) = options.show_affordance {
        config.render.show_affordance = show;
    }
    config
}

fn js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// A mind map held on the Rust side; JavaScript forwards clicks on primary nodes
/// to [`MindmapView::toggle`] and redraws from the returned JSON.
#[wasm_bindgen]
pub struct MindmapView {
    session: MindmapSession,
    config: Config,
}

impl MindmapView {
    fn build(document_json: &str, options: MindmapViewOptions) -> Result<Self, String> {
        let mut document = MindmapDocument::from_json(document_json).map_err(|e| e.to_string())?;
        if options.preset_for_topic.unwrap_or(false) {
            presets::apply_for_topic(&mut document);
        }
        document.validate().map_err(|e| e.to_string())?;
        let config = build_config(&options);
        let session = MindmapSession::from_document(&document, &config);
        Ok(Self { session, config })
    }

    fn current_json(&self) -> Result<String, String> {
        layout_to_json(self.session.layout()).map_err(|e| e.to_string())
    }
}

#[wasm_bindgen]
impl MindmapView {
    #[wasm_bindgen(constructor)]
    pub fn new(document_json: &str, options_json: Option<String>) -> Result<MindmapView, JsValue> {
        let options = match options_json {
            Some(raw) => serde_json::from_str::<MindmapViewOptions>(&raw).map_err(js_error)?,
            None => MindmapViewOptions::default(),
        };
        Self::build(document_json, options).map_err(js_error)
    }

    /// Flips one branch and returns the recomputed layout as JSON.
    pub fn toggle(&mut self, branch_id: &str) -> Result<String, JsValue> {
        self.session.toggle(branch_id);
        self.current_json().map_err(js_error)
    }

    #[wasm_bindgen(js_name = expandAll)]
    pub fn expand_all(&mut self) -> Result<String, JsValue> {
        self.session.dispatch(Action::ExpandAll);
        self.current_json().map_err(js_error)
    }

    #[wasm_bindgen(js_name = collapseAll)]
    pub fn collapse_all(&mut self) -> Result<String, JsValue> {
        self.session.dispatch(Action::CollapseAll);
        self.current_json().map_err(js_error)
    }

    #[wasm_bindgen(js_name = isExpanded)]
    pub fn is_expanded(&self, branch_id: &str) -> bool {
        self.session.is_expanded(branch_id)
    }

    #[wasm_bindgen(js_name = layoutJson)]
    pub fn layout_json(&self) -> Result<String, JsValue> {
        self.current_json().map_err(js_error)
    }

    pub fn svg(&self) -> String {
        render_svg(self.session.layout(), &self.config.theme, &self.config.render)
    }
}
