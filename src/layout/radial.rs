use std::f32::consts::{FRAC_PI_2, TAU};

use crate::color::lighten;
use crate::config::LayoutConfig;
use crate::icon::IconResolver;
use crate::ir::{Branch, CENTER_ID, ExpansionState, Topic, primary_edge_id, secondary_edge_id};
use crate::theme::Theme;

use super::text::measure_label;
use super::{LayoutEdge, LayoutNode, NodeKind, NodePayload, NodeShape, NodeStyle, center_point};

const CENTER_FONT_SIZE: f32 = 18.0;

/// Angle of the primary slot `index` out of `count`; slot 0 sits at 12 o'clock and
/// the rest follow clockwise.
pub(crate) fn primary_angle(index: usize, count: usize) -> f32 {
    (index as f32 / count.max(1) as f32) * TAU - FRAC_PI_2
}

/// Angle of item `index` out of `count`, fanned symmetrically around `base`.
pub(crate) fn secondary_angle(base: f32, index: usize, count: usize, spread: f32) -> f32 {
    let middle = (count as f32 - 1.0) / 2.0;
    base + (index as f32 - middle) * spread
}

fn branch_color<'a>(branch: &'a Branch, theme: &'a Theme) -> &'a str {
    if branch.color.trim().is_empty() {
        theme.branch_fallback_color.as_str()
    } else {
        branch.color.as_str()
    }
}

pub(super) fn center_node(topic: &Topic, theme: &Theme, config: &LayoutConfig) -> LayoutNode {
    let size = config.center_size;
    let label = measure_label(
        &topic.label,
        CENTER_FONT_SIZE,
        size - config.center_padding * 2.0,
        config.label_line_height,
    );
    LayoutNode {
        id: CENTER_ID.to_string(),
        kind: NodeKind::Center,
        position: center_point(config),
        width: size,
        height: size,
        label,
        payload: NodePayload::Topic {
            label: topic.label.clone(),
        },
        style: NodeStyle {
            shape: NodeShape::Circle,
            fill: theme.center_fill.clone(),
            text_color: theme.center_text.clone(),
            border_color: theme.center_border.clone(),
            border_width: 3.0,
            corner_radius: size / 2.0,
            padding: config.center_padding,
            font_size: CENTER_FONT_SIZE,
            bold: true,
        },
    }
}

pub(super) fn compute_radial_layout(
    topic: &Topic,
    branches: &[Branch],
    expansion: &ExpansionState,
    theme: &Theme,
    config: &LayoutConfig,
    icons: &IconResolver,
) -> (Vec<LayoutNode>, Vec<LayoutEdge>) {
    let center = center_point(config);
    let mut nodes = vec![center_node(topic, theme, config)];
    let mut edges = Vec::new();
    let inner_width = config.primary_width - config.node_padding * 2.0;
    let item_width = config.secondary_width - config.node_padding * 2.0;

    for (idx, branch) in branches.iter().enumerate() {
        let angle = primary_angle(idx, branches.len());
        let primary_pos = center.polar_offset(angle, config.primary_radius);
        let color = branch_color(branch, theme);
        let glyph = icons.resolve(Some(branch.icon.as_str()));
        let expanded = expansion.is_expanded(&branch.id);

        let label = measure_label(
            &format!("{glyph}\n{}", branch.title),
            theme.font_size,
            inner_width,
            config.label_line_height,
        );
        let height = label.height + config.node_padding * 2.0;
        nodes.push(LayoutNode {
            id: branch.id.clone(),
            kind: NodeKind::Primary,
            position: primary_pos,
            width: config.primary_width,
            height,
            label,
            payload: NodePayload::Branch {
                glyph,
                title: branch.title.clone(),
                color: color.to_string(),
                items: branch.items.clone(),
                expanded,
            },
            style: NodeStyle {
                shape: NodeShape::RoundRect,
                fill: theme.primary_fill.clone(),
                text_color: theme.primary_text.clone(),
                border_color: color.to_string(),
                border_width: 2.0,
                corner_radius: 12.0,
                padding: config.node_padding,
                font_size: theme.font_size,
                bold: true,
            },
        });
        edges.push(LayoutEdge {
            id: primary_edge_id(&branch.id),
            source: CENTER_ID.to_string(),
            target: branch.id.clone(),
            color: color.to_string(),
            width: config.primary_edge_width,
            animated: config.animated_edges,
        });

        if !expanded {
            continue;
        }

        let count = branch.items.len();
        for (sidx, item) in branch.items.iter().enumerate() {
            let sec_angle = secondary_angle(angle, sidx, count, config.secondary_spread);
            let mut position = primary_pos.polar_offset(sec_angle, config.secondary_offset);
            position.y += if sidx % 2 == 0 {
                -config.secondary_jitter
            } else {
                config.secondary_jitter
            };
            let sid = branch.secondary_id(sidx);
            let label = measure_label(item, theme.font_size, item_width, config.label_line_height);
            let height = label.height + config.node_padding * 2.0;
            let lighten_by =
                config.secondary_lighten_base + config.secondary_lighten_step * sidx as f32;
            nodes.push(LayoutNode {
                id: sid.clone(),
                kind: NodeKind::Secondary,
                position,
                width: config.secondary_width,
                height,
                label,
                payload: NodePayload::Item {
                    branch_id: branch.id.clone(),
                    index: sidx,
                    text: item.clone(),
                },
                style: NodeStyle {
                    shape: NodeShape::RoundRect,
                    fill: lighten(color, lighten_by),
                    text_color: color.to_string(),
                    border_color: lighten(color, config.secondary_border_lighten),
                    border_width: 1.0,
                    corner_radius: 8.0,
                    padding: config.node_padding,
                    font_size: theme.font_size,
                    bold: true,
                },
            });
            edges.push(LayoutEdge {
                id: secondary_edge_id(&branch.id, &sid),
                source: branch.id.clone(),
                target: sid,
                color: color.to_string(),
                width: config.secondary_edge_width,
                animated: config.animated_edges,
            });
        }
    }

    (nodes, edges)
}
