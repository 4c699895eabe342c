use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Node id of the diagram's center.
pub const CENTER_ID: &str = "center";
/// Node id of the fallback layout's definition node.
pub const MEANING_ID: &str = "meaning";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub label: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub related_terms: Vec<String>,
}

impl Topic {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

/// One thematic sub-topic. Ordering within a document decides the angular slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
}

impl Branch {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: String::new(),
            color: String::new(),
            items: Vec::new(),
            importance: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn secondary_id(&self, index: usize) -> String {
        secondary_id(&self.id, index)
    }
}

pub fn secondary_id(branch_id: &str, index: usize) -> String {
    format!("{branch_id}-s-{index}")
}

/// Id of the edge joining the center to a primary node.
pub fn primary_edge_id(branch_id: &str) -> String {
    format!("e-{CENTER_ID}-{branch_id}")
}

/// Id of the edge joining a primary node to one of its items.
pub fn secondary_edge_id(branch_id: &str, secondary_id: &str) -> String {
    format!("e-{branch_id}-{secondary_id}")
}

/// Which branches are open. A missing entry reads as collapsed.
///
/// Owned by the caller; layout only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionState(BTreeMap<String, bool>);

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, id: impl Into<String>, expanded: bool) {
        self.0.insert(id.into(), expanded);
    }

    /// Flips the entry for `id` and returns the new value.
    pub fn toggle(&mut self, id: &str) -> bool {
        let next = !self.is_expanded(id);
        self.0.insert(id.to_string(), next);
        next
    }

    pub fn expand_all(&mut self, branches: &[Branch]) {
        for branch in branches {
            self.0.insert(branch.id.clone(), true);
        }
    }

    pub fn collapse_all(&mut self) {
        self.0.clear();
    }

    pub fn expanded_ids(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, open)| **open)
            .map(|(id, _)| id.as_str())
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for ExpansionState {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(id, open)| (id.into(), open)).collect())
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid mind map document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("branch #{index} has an empty id")]
    EmptyBranchId { index: usize },
    #[error("duplicate branch id `{0}`")]
    DuplicateBranchId(String),
    #[error("branch id `{0}` is reserved for the center node")]
    ReservedBranchId(String),
    #[error("branch id `{id}` collides with an item node of branch `{owner}`")]
    GeneratedIdCollision { id: String, owner: String },
    #[error("edge id `{id}` of branch `{owner}` is already used by another branch")]
    EdgeIdCollision { id: String, owner: String },
}

/// A generated mind map as stored by the study app.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindmapDocument {
    #[serde(alias = "topic")]
    pub word: String,
    #[serde(default, alias = "definition")]
    pub meaning: String,
    #[serde(default, alias = "relatedTerms", alias = "keyConcepts")]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub primary_branches: Vec<Branch>,
}

impl MindmapDocument {
    pub fn from_json(input: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn topic(&self) -> Topic {
        Topic {
            label: self.word.clone(),
            definition: self.meaning.clone(),
            related_terms: self.synonyms.clone(),
        }
    }

    pub fn branches(&self) -> &[Branch] {
        &self.primary_branches
    }

    /// Checks that every node and edge id the layout will generate is unique.
    pub fn validate(&self) -> Result<(), DocumentError> {
        validate_branches(&self.primary_branches)
    }
}

pub fn validate_branches(branches: &[Branch]) -> Result<(), DocumentError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for (index, branch) in branches.iter().enumerate() {
        if branch.id.trim().is_empty() {
            return Err(DocumentError::EmptyBranchId { index });
        }
        if branch.id == CENTER_ID {
            return Err(DocumentError::ReservedBranchId(branch.id.clone()));
        }
        if !seen.insert(branch.id.as_str()) {
            return Err(DocumentError::DuplicateBranchId(branch.id.clone()));
        }
    }
    for branch in branches {
        for index in 0..branch.items.len() {
            let generated = branch.secondary_id(index);
            if seen.contains(generated.as_str()) {
                return Err(DocumentError::GeneratedIdCollision {
                    id: generated,
                    owner: branch.id.clone(),
                });
            }
        }
    }
    let mut edges: HashSet<String> = HashSet::new();
    for branch in branches {
        let spoke = primary_edge_id(&branch.id);
        let fan = (0..branch.items.len())
            .map(|index| secondary_edge_id(&branch.id, &branch.secondary_id(index)));
        for id in std::iter::once(spoke).chain(fan) {
            if edges.contains(&id) {
                return Err(DocumentError::EdgeIdCollision {
                    id,
                    owner: branch.id.clone(),
                });
            }
            edges.insert(id);
        }
    }
    Ok(())
}
