use crate::config::LayoutConfig;
use crate::ir::{CENTER_ID, MEANING_ID, Topic};
use crate::theme::Theme;

use super::radial::center_node;
use super::text::measure_label;
use super::{
    LayoutEdge, LayoutNode, NodeKind, NodePayload, NodeShape, NodeStyle, Point, center_point,
};

pub(crate) fn term_id(index: usize) -> String {
    format!("syn-{index}")
}

/// Layout for topics without branch records: the definition above the center and
/// one node per related term in a row below it.
pub(super) fn compute_fallback_layout(
    topic: &Topic,
    theme: &Theme,
    config: &LayoutConfig,
) -> (Vec<LayoutNode>, Vec<LayoutEdge>) {
    let center = center_point(config);
    let mut root = center_node(topic, theme, config);
    let center_label = measure_label(
        &topic.label,
        theme.font_size,
        config.center_size - config.center_padding * 2.0,
        config.label_line_height,
    );
    root.height = center_label.height + config.center_padding * 2.0;
    root.label = center_label;
    root.style = NodeStyle {
        shape: NodeShape::RoundRect,
        fill: theme.fallback_center_fill.clone(),
        text_color: theme.center_text.clone(),
        border_color: theme.fallback_center_border.clone(),
        border_width: 2.0,
        corner_radius: 8.0,
        padding: config.center_padding,
        font_size: theme.font_size,
        bold: true,
    };

    let meaning_label = measure_label(
        &format!("Meaning\n{}", topic.definition),
        theme.font_size,
        config.meaning_width - config.node_padding * 2.0,
        config.label_line_height,
    );
    let meaning = LayoutNode {
        id: MEANING_ID.to_string(),
        kind: NodeKind::Meaning,
        position: Point::new(center.x, center.y - config.meaning_offset),
        width: config.meaning_width,
        height: meaning_label.height + config.node_padding * 2.0,
        label: meaning_label,
        payload: NodePayload::Meaning {
            text: topic.definition.clone(),
        },
        style: NodeStyle {
            shape: NodeShape::RoundRect,
            fill: theme.meaning_fill.clone(),
            text_color: theme.meaning_text.clone(),
            border_color: theme.meaning_border.clone(),
            border_width: 1.0,
            corner_radius: 8.0,
            padding: config.node_padding,
            font_size: theme.font_size,
            bold: false,
        },
    };

    let mut edges = vec![LayoutEdge {
        id: format!("e-{CENTER_ID}-{MEANING_ID}"),
        source: CENTER_ID.to_string(),
        target: MEANING_ID.to_string(),
        color: theme.meaning_edge.clone(),
        width: config.fallback_edge_width,
        animated: config.animated_edges,
    }];
    let mut nodes = vec![root, meaning];

    for (idx, term) in topic.related_terms.iter().enumerate() {
        let id = term_id(idx);
        let label = measure_label(
            term,
            theme.font_size,
            config.term_width - config.node_padding * 2.0,
            config.label_line_height,
        );
        nodes.push(LayoutNode {
            id: id.clone(),
            kind: NodeKind::Term,
            position: Point::new(
                config.term_start_x + idx as f32 * config.term_spacing,
                center.y + config.term_row_offset,
            ),
            width: config.term_width,
            height: label.height + config.node_padding * 2.0,
            label,
            payload: NodePayload::Term {
                index: idx,
                text: term.clone(),
            },
            style: NodeStyle {
                shape: NodeShape::RoundRect,
                fill: theme.term_fill(idx).to_string(),
                text_color: theme.term_text.clone(),
                border_color: theme.term_border.clone(),
                border_width: 1.0,
                corner_radius: 8.0,
                padding: config.node_padding,
                font_size: theme.font_size,
                bold: true,
            },
        });
        edges.push(LayoutEdge {
            id: format!("e-{CENTER_ID}-{id}"),
            source: CENTER_ID.to_string(),
            target: id,
            color: theme.term_edge.clone(),
            width: config.fallback_edge_width,
            animated: config.animated_edges,
        });
    }

    (nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> Topic {
        Topic {
            label: "Liberty".to_string(),
            definition: "Absence of restraint".to_string(),
            related_terms: vec!["a".into(), "b".into(), "c".into()],
        }
    }

    #[test]
    fn meaning_sits_above_center() {
        let config = LayoutConfig::default();
        let (nodes, _) = compute_fallback_layout(&topic(), &Theme::classic(), &config);
        let meaning = nodes.iter().find(|node| node.id == MEANING_ID).unwrap();
        assert_eq!(meaning.position, Point::new(800.0, 210.0));
    }

    #[test]
    fn terms_form_a_row_below_center() {
        let config = LayoutConfig::default();
        let (nodes, edges) = compute_fallback_layout(&topic(), &Theme::classic(), &config);
        let terms: Vec<_> = nodes.iter().filter(|n| n.kind == NodeKind::Term).collect();
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0].position, Point::new(120.0, 490.0));
        assert_eq!(terms[2].position, Point::new(520.0, 490.0));
        assert_eq!(terms[1].id, "syn-1");
        assert!(edges.iter().all(|edge| edge.source == CENTER_ID));
        assert_eq!(edges[3].id, "e-center-syn-2");
    }

    #[test]
    fn term_fills_cycle_through_palette() {
        let theme = Theme::classic();
        let mut topic = topic();
        topic.related_terms = (0..6).map(|i| format!("t{i}")).collect();
        let (nodes, _) = compute_fallback_layout(&topic, &theme, &LayoutConfig::default());
        let terms: Vec<_> = nodes.iter().filter(|n| n.kind == NodeKind::Term).collect();
        assert_eq!(terms[5].style.fill, terms[0].style.fill);
        assert_ne!(terms[1].style.fill, terms[0].style.fill);
    }

    #[test]
    fn no_terms_still_yields_center_and_meaning() {
        let topic = Topic::new("Empty");
        let (nodes, edges) =
            compute_fallback_layout(&topic, &Theme::classic(), &LayoutConfig::default());
        assert_eq!(nodes.len(), 2);
        assert_eq!(edges.len(), 1);
    }
}
