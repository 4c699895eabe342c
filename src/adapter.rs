//! Interactive wrapping of a computed layout.
//!
//! The layout engine is pure. This module is where clicks come back in: primary
//! nodes get a toggle action, and [`MindmapSession`] applies actions to the
//! expansion state it owns and recomputes the diagram.

use serde::Serialize;

use crate::config::Config;
use crate::ir::{Branch, ExpansionState, MindmapDocument, Topic};
use crate::layout::{Layout, LayoutEngine, LayoutNode, NodeKind};

pub const EXPAND_LABEL: &str = "Expand";
pub const COLLAPSE_LABEL: &str = "Collapse";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "id", rename_all = "camelCase")]
pub enum Action {
    ToggleBranch(String),
    ExpandAll,
    CollapseAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryControls {
    pub is_expanded: bool,
    pub affordance: &'static str,
    pub on_toggle: Action,
}

/// A layout node plus whatever interaction the rendering surface should offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramNode<'a> {
    #[serde(flatten)]
    pub node: &'a LayoutNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<PrimaryControls>,
}

pub fn affordance_text(expanded: bool) -> &'static str {
    if expanded { COLLAPSE_LABEL } else { EXPAND_LABEL }
}

/// Attaches toggle controls to every primary node of `layout`.
pub fn bind(layout: &Layout) -> Vec<DiagramNode<'_>> {
    layout
        .nodes
        .iter()
        .map(|node| {
            let controls = match (node.kind, node.is_expanded()) {
                (NodeKind::Primary, Some(expanded)) => Some(PrimaryControls {
                    is_expanded: expanded,
                    affordance: affordance_text(expanded),
                    on_toggle: Action::ToggleBranch(node.id.clone()),
                }),
                _ => None,
            };
            DiagramNode { node, controls }
        })
        .collect()
}

type Listener = Box<dyn FnMut(&Layout)>;

/// Owns one diagram's data and expansion state and keeps its layout current.
pub struct MindmapSession {
    topic: Topic,
    branches: Vec<Branch>,
    expansion: ExpansionState,
    engine: LayoutEngine,
    layout: Layout,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for MindmapSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MindmapSession")
            .field("topic", &self.topic.label)
            .field("branches", &self.branches.len())
            .field("expansion", &self.expansion)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl MindmapSession {
    pub fn new(topic: Topic, branches: Vec<Branch>, engine: LayoutEngine) -> Self {
        Self::with_expansion(topic, branches, ExpansionState::new(), engine)
    }

    pub fn with_expansion(
        topic: Topic,
        branches: Vec<Branch>,
        expansion: ExpansionState,
        engine: LayoutEngine,
    ) -> Self {
        let layout = engine.layout(&topic, &branches, &expansion);
        Self {
            topic,
            branches,
            expansion,
            engine,
            layout,
            listeners: Vec::new(),
        }
    }

    pub fn from_document(document: &MindmapDocument, config: &Config) -> Self {
        Self::new(
            document.topic(),
            document.primary_branches.clone(),
            LayoutEngine::from_config(config),
        )
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn is_expanded(&self, branch_id: &str) -> bool {
        self.expansion.is_expanded(branch_id)
    }

    pub fn diagram(&self) -> Vec<DiagramNode<'_>> {
        bind(&self.layout)
    }

    /// Registers a callback run after every recomputation.
    pub fn on_change(&mut self, listener: impl FnMut(&Layout) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn toggle(&mut self, branch_id: &str) -> &Layout {
        self.dispatch(Action::ToggleBranch(branch_id.to_string()))
    }

    /// Applies `action` to the expansion state and recomputes the layout.
    ///
    /// Toggling an id that names no branch changes nothing.
    pub fn dispatch(&mut self, action: Action) -> &Layout {
        match action {
            Action::ToggleBranch(id) => {
                if !self.branches.iter().any(|branch| branch.id == id) {
                    tracing::debug!(branch = %id, "ignoring toggle for unknown branch");
                    return &self.layout;
                }
                let expanded = self.expansion.toggle(&id);
                tracing::debug!(branch = %id, expanded, "toggled branch");
            }
            Action::ExpandAll => self.expansion.expand_all(&self.branches),
            Action::CollapseAll => self.expansion.collapse_all(),
        }
        self.recompute();
        &self.layout
    }

    fn recompute(&mut self) {
        self.layout = self
            .engine
            .layout(&self.topic, &self.branches, &self.expansion);
        for listener in &mut self.listeners {
            listener(&self.layout);
        }
    }
}
