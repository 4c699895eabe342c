use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub text_color: String,
    pub center_fill: String,
    pub center_text: String,
    pub center_border: String,
    pub primary_fill: String,
    pub primary_text: String,
    pub fallback_center_fill: String,
    pub fallback_center_border: String,
    pub meaning_fill: String,
    pub meaning_text: String,
    pub meaning_border: String,
    pub meaning_edge: String,
    pub term_text: String,
    pub term_border: String,
    pub term_edge: String,
    pub term_fills: Vec<String>,
    /// Used when a branch record has no color of its own.
    pub branch_fallback_color: String,
}

impl Theme {
    /// Colors of the study app the layout was first drawn for.
    pub fn classic() -> Self {
        Self {
            font_family: "Roboto, Helvetica, Arial, sans-serif".to_string(),
            font_size: 14.0,
            background: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            center_fill: "#4577c3b4".to_string(),
            center_text: "#ffffff".to_string(),
            center_border: "#528ecbe1".to_string(),
            primary_fill: "#ffffff".to_string(),
            primary_text: "#263238".to_string(),
            fallback_center_fill: "#1565c0".to_string(),
            fallback_center_border: "#42a5f5".to_string(),
            meaning_fill: "#e8f4ff".to_string(),
            meaning_text: "#0d47a1".to_string(),
            meaning_border: "#90caf9".to_string(),
            meaning_edge: "#42a5f5".to_string(),
            term_text: "#0d47a1".to_string(),
            term_border: "#bbdefb".to_string(),
            term_edge: "#90caf9".to_string(),
            term_fills: ["#e8f5e8", "#f3e5f5", "#e3f2fd", "#fff3e0", "#fce4ec"]
                .iter()
                .map(|color| color.to_string())
                .collect(),
            branch_fallback_color: "#607d8b".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            center_fill: "#3B5B92".to_string(),
            center_text: "#FFFFFF".to_string(),
            center_border: "#C7D2E5".to_string(),
            primary_fill: "#F8FAFF".to_string(),
            primary_text: "#1C2430".to_string(),
            fallback_center_fill: "#3B5B92".to_string(),
            fallback_center_border: "#7A8AA6".to_string(),
            meaning_fill: "#EEF2F8".to_string(),
            meaning_text: "#1C2430".to_string(),
            meaning_border: "#D7E0F0".to_string(),
            meaning_edge: "#7A8AA6".to_string(),
            term_text: "#1C2430".to_string(),
            term_border: "#D7E0F0".to_string(),
            term_edge: "#7A8AA6".to_string(),
            term_fills: ["#F7FAFF", "#EEF2F8", "#F3F0FA", "#FDF6EC", "#F9EEF2"]
                .iter()
                .map(|color| color.to_string())
                .collect(),
            branch_fallback_color: "#7A8AA6".to_string(),
        }
    }

    pub fn term_fill(&self, index: usize) -> &str {
        if self.term_fills.is_empty() {
            return self.meaning_fill.as_str();
        }
        self.term_fills[index % self.term_fills.len()].as_str()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
