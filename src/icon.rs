use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

pub const DEFAULT_GLYPH: &str = "📌";

// Regional indicators (flags) are Emoji_Presentation and U+20E3 marks keycaps.
// Plain ASCII digits match neither.
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\p{Emoji_Presentation}\x{20E3}]").unwrap()
});

const ICON_TABLE: &[(&str, &str)] = &[
    ("gavel", "⚖️"),
    ("book", "📚"),
    ("scale", "⚖️"),
    ("law", "⚖️"),
    ("constitution", "📜"),
    ("parliament", "🏛️"),
    ("court", "🏛️"),
    ("judge", "👨‍⚖️"),
    ("justice", "⚖️"),
    ("amendment", "📝"),
    ("pencil", "✏️"),
    ("pen", "✒️"),
    ("document", "📄"),
    ("scroll", "📜"),
    ("building", "🏢"),
    ("government", "🏛️"),
    ("flag", "🇮🇳"),
    ("india", "🇮🇳"),
    ("world", "🌍"),
    ("globe", "🌍"),
    ("question", "❓"),
    ("lightbulb", "💡"),
    ("idea", "💡"),
    ("warning", "⚠️"),
    ("alert", "⚠️"),
    ("check", "✅"),
    ("cross", "❌"),
    ("star", "⭐"),
    ("heart", "❤️"),
    ("thumbsup", "👍"),
    ("gear", "⚙️"),
    ("settings", "⚙️"),
    ("clock", "🕐"),
    ("time", "🕐"),
    ("calendar", "📅"),
    ("date", "📅"),
    ("news", "📰"),
    ("newspaper", "📰"),
    ("chart", "📊"),
    ("graph", "📊"),
    ("money", "💰"),
    ("dollar", "💰"),
    ("users", "👥"),
    ("people", "👥"),
    ("group", "👥"),
    ("team", "👥"),
    ("lock", "🔒"),
    ("key", "🔑"),
    ("shield", "🛡️"),
    ("security", "🛡️"),
    ("search", "🔍"),
    ("magnify", "🔍"),
    ("eye", "👁️"),
    ("vision", "👁️"),
    ("target", "🎯"),
    ("goal", "🎯"),
    ("rocket", "🚀"),
    ("growth", "🚀"),
    ("handshake", "🤝"),
    ("agreement", "🤝"),
    ("balance", "⚖️"),
    ("scales", "⚖️"),
    ("hammer", "🔨"),
    ("tool", "🔧"),
    ("wrench", "🔧"),
    ("cog", "⚙️"),
    ("wheel", "⚙️"),
];

static BUILTIN_ICONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ICON_TABLE.iter().copied().collect());

/// Maps free-text icon tokens to display glyphs.
///
/// Resolution never fails: unknown or empty tokens come back as the default glyph.
#[derive(Debug, Clone)]
pub struct IconResolver {
    default_glyph: String,
    overrides: HashMap<String, String>,
}

impl Default for IconResolver {
    fn default() -> Self {
        Self {
            default_glyph: DEFAULT_GLYPH.to_string(),
            overrides: HashMap::new(),
        }
    }
}

impl IconResolver {
    pub fn with_default(glyph: impl Into<String>) -> Self {
        Self {
            default_glyph: glyph.into(),
            ..Default::default()
        }
    }

    /// Adds or replaces a token; keys are stored lower-cased.
    pub fn insert(&mut self, token: &str, glyph: impl Into<String>) {
        self.overrides.insert(token.trim().to_lowercase(), glyph.into());
    }

    pub fn default_glyph(&self) -> &str {
        &self.default_glyph
    }

    pub fn resolve(&self, token: Option<&str>) -> String {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            return self.default_glyph.clone();
        };
        if is_emoji(token) {
            return token.to_string();
        }
        let key = token.trim().to_lowercase();
        if let Some(glyph) = self.overrides.get(&key) {
            return glyph.clone();
        }
        BUILTIN_ICONS
            .get(key.as_str())
            .map(|glyph| (*glyph).to_string())
            .unwrap_or_else(|| self.default_glyph.clone())
    }
}

pub fn is_emoji(token: &str) -> bool {
    EMOJI_RE.is_match(token)
}

/// Resolves with the built-in table and the stock default glyph.
pub fn resolve_icon(token: &str) -> String {
    IconResolver::default().resolve(Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_missing_tokens_use_default() {
        let resolver = IconResolver::default();
        assert_eq!(resolver.resolve(Some("")), DEFAULT_GLYPH);
        assert_eq!(resolver.resolve(None), DEFAULT_GLYPH);
    }

    #[test]
    fn emoji_passes_through() {
        assert_eq!(resolve_icon("📚"), "📚");
        assert_eq!(resolve_icon("🇮🇳"), "🇮🇳");
        assert_eq!(resolve_icon("⚖️"), "⚖️");
    }

    #[test]
    fn keycaps_pass_through() {
        assert_eq!(resolve_icon("1️⃣"), "1️⃣");
        assert_eq!(resolve_icon("#️⃣"), "#️⃣");
        assert_eq!(resolve_icon("1\u{20E3}"), "1\u{20E3}");
    }

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        assert_eq!(resolve_icon("BOOK"), resolve_icon("book"));
        assert_eq!(resolve_icon("  Rocket "), "🚀");
    }

    #[test]
    fn unknown_tokens_fall_back() {
        assert_eq!(resolve_icon("spaceship"), DEFAULT_GLYPH);
        // digits carry the Emoji property but are not pictographs
        assert_eq!(resolve_icon("42"), DEFAULT_GLYPH);
        let resolver = IconResolver::with_default("•");
        assert_eq!(resolver.resolve(Some("spaceship")), "•");
    }

    #[test]
    fn overrides_take_precedence() {
        let mut resolver = IconResolver::default();
        resolver.insert("Book", "📖");
        assert_eq!(resolver.resolve(Some("book")), "📖");
        assert_eq!(resolver.resolve(Some("star")), "⭐");
    }
}
