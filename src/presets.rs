//! Built-in branch sets for topics that arrive without generated branches.
//!
//! Layout never swaps these in by itself; callers opt in (the CLI's `--preset`).

use crate::ir::{Branch, MindmapDocument};

pub const PRESET_NAMES: &[&str] = &["democracy"];

pub fn by_name(name: &str) -> Option<Vec<Branch>> {
    match name.trim().to_lowercase().as_str() {
        "democracy" => Some(democracy()),
        _ => None,
    }
}

/// Applies the preset named after the document's topic when it has no branches.
/// Returns whether a preset was applied.
pub fn apply_for_topic(document: &mut MindmapDocument) -> bool {
    if !document.primary_branches.is_empty() {
        return false;
    }
    match by_name(&document.word) {
        Some(branches) => {
            document.primary_branches = branches;
            true
        }
        None => false,
    }
}

pub fn democracy() -> Vec<Branch> {
    vec![
        Branch::new("p-definition", "Definition & Core Idea")
            .icon("📚")
            .color("#ff7043")
            .items(["Greek origin", "“Rule by the people”", "Lincoln’s definition"]),
        Branch::new("p-types", "Types of Democracy")
            .icon("🏛️")
            .color("#66bb6a")
            .items([
                "Direct → Switzerland referendums",
                "Representative → India, USA",
                "Presidential vs Parliamentary",
            ]),
        Branch::new("p-indian", "Indian Context")
            .icon("🇮🇳")
            .color("#42a5f5")
            .items([
                "Articles 324–329 → Elections",
                "Features → Universal franchise, secular, federal",
                "Institutions → EC, Parliament, Judiciary",
            ]),
        Branch::new("p-philosophy", "Philosophical Foundations")
            .icon("🤔")
            .color("#ab47bc")
            .items([
                "Rousseau → General Will",
                "Locke → Social contract",
                "Ambedkar → Constitutional democracy",
            ]),
        Branch::new("p-challenges", "Challenges")
            .icon("⚠️")
            .color("#ef5350")
            .items([
                "Electoral malpractices",
                "Money & muscle power",
                "Corruption & dynastic politics",
            ]),
        Branch::new("p-comparative", "Comparative Aspects")
            .icon("⚖️")
            .color("#26c6da")
            .items([
                "Democracy vs Autocracy/Dictatorship",
                "Western vs Indian model",
                "Global Democracy Indices: EIU, Freedom House",
            ]),
        Branch::new("p-current", "Current Affairs Linkages")
            .icon("📰")
            .color("#ffca28")
            .items([
                "India’s rank in democracy indices",
                "Electoral reforms → VVPAT, electoral bonds debate",
                "RTI & citizen movements",
            ]),
        Branch::new("p-upsc", "UPSC Keywords")
            .icon("📝")
            .color("#8d6e63")
            .items([
                "Democratic consolidation",
                "Participatory governance",
                "Constitutional morality",
                "Inclusiveness",
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::validate_branches;

    #[test]
    fn democracy_preset_is_valid() {
        let branches = democracy();
        assert_eq!(branches.len(), 8);
        validate_branches(&branches).unwrap();
        assert_eq!(branches[7].items.len(), 4);
    }

    #[test]
    fn lookup_ignores_case() {
        assert!(by_name("Democracy").is_some());
        assert!(by_name("monarchy").is_none());
    }

    #[test]
    fn applies_only_to_branchless_documents() {
        let mut doc = MindmapDocument {
            word: "democracy".to_string(),
            ..Default::default()
        };
        assert!(apply_for_topic(&mut doc));
        assert_eq!(doc.primary_branches.len(), 8);
        assert!(!apply_for_topic(&mut doc));
    }
}
