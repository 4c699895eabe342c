mod fallback;
mod radial;
pub(crate) mod text;
pub(crate) mod types;
pub use types::*;

use crate::config::{Config, LayoutConfig};
use crate::icon::IconResolver;
use crate::ir::{Branch, ExpansionState, Topic};
use crate::theme::Theme;

/// Computes mind-map layouts. Holds only configuration, so one engine can serve
/// every recomputation of a diagram.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    pub theme: Theme,
    pub config: LayoutConfig,
    pub icons: IconResolver,
}

impl LayoutEngine {
    pub fn new(theme: Theme, config: LayoutConfig, icons: IconResolver) -> Self {
        Self {
            theme,
            config,
            icons,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.theme.clone(),
            config.layout.clone(),
            config.icons.resolver(),
        )
    }

    /// Lays out the whole diagram from scratch.
    ///
    /// With no branches the definition/related-terms layout is used instead of the
    /// radial one. `expansion` is only read.
    pub fn layout(&self, topic: &Topic, branches: &[Branch], expansion: &ExpansionState) -> Layout {
        let (nodes, edges) = if branches.is_empty() {
            fallback::compute_fallback_layout(topic, &self.theme, &self.config)
        } else {
            radial::compute_radial_layout(
                topic,
                branches,
                expansion,
                &self.theme,
                &self.config,
                &self.icons,
            )
        };
        let bounds = Bounds::of_nodes(&nodes);
        tracing::debug!(
            branches = branches.len(),
            nodes = nodes.len(),
            edges = edges.len(),
            "computed mind map layout"
        );
        Layout {
            nodes,
            edges,
            bounds,
        }
    }
}

/// Lays out with the default theme, constants and icon table.
pub fn compute_layout(topic: &Topic, branches: &[Branch], expansion: &ExpansionState) -> Layout {
    LayoutEngine::default().layout(topic, branches, expansion)
}

pub(crate) fn center_point(config: &LayoutConfig) -> Point {
    Point::new(config.center_x, config.center_y)
}
