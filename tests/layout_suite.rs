use std::collections::HashSet;
use std::path::Path;

use radial_mindmap::layout::NodeKind;
use radial_mindmap::{
    Branch, Config, ExpansionState, Layout, LayoutEngine, MindmapDocument, MindmapSession, Theme,
    compute_layout, lighten, render_svg, resolve_icon,
};

fn load_fixture(name: &str) -> MindmapDocument {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    let document = MindmapDocument::from_json(&input).expect("fixture parse failed");
    document.validate().expect("fixture should validate");
    document
}

fn layout_of(document: &MindmapDocument, expansion: &ExpansionState) -> Layout {
    compute_layout(&document.topic(), document.branches(), expansion)
}

fn primary_positions(layout: &Layout) -> Vec<(String, f32, f32)> {
    layout
        .nodes_of_kind(NodeKind::Primary)
        .map(|node| (node.id.clone(), node.position.x, node.position.y))
        .collect()
}

#[test]
fn single_branch_expands_without_moving_primary() {
    let document = load_fixture("democracy_single.json");

    let collapsed = layout_of(&document, &ExpansionState::new());
    assert_eq!(collapsed.nodes.len(), 2);
    assert_eq!(collapsed.edges.len(), 1);
    assert_eq!(collapsed.nodes[0].id, "center");
    assert_eq!(collapsed.nodes[1].id, "p1");

    let expansion: ExpansionState = [("p1", true)].into_iter().collect();
    let expanded = layout_of(&document, &expansion);
    assert_eq!(expanded.nodes.len(), 4);
    assert_eq!(expanded.edges.len(), 3);
    assert_eq!(expanded.nodes_of_kind(NodeKind::Secondary).count(), 2);
    assert_eq!(
        expanded.node("p1").unwrap().position,
        collapsed.node("p1").unwrap().position
    );
    let targets: Vec<&str> = expanded.edges[1..].iter().map(|e| e.target.as_str()).collect();
    assert_eq!(targets, vec!["p1-s-0", "p1-s-1"]);
    assert!(expanded.edges[1..].iter().all(|edge| edge.source == "p1"));
}

#[test]
fn secondaries_fan_out_from_their_primary() {
    let document = load_fixture("democracy_single.json");
    let expansion: ExpansionState = [("p1", true)].into_iter().collect();
    let layout = layout_of(&document, &expansion);

    let primary = layout.node("p1").unwrap().position;
    assert!((primary.x - 800.0).abs() < 1e-3);
    assert!((primary.y - 100.0).abs() < 1e-3);

    let base = -std::f32::consts::FRAC_PI_2;
    let expected = [
        ("p1-s-0", base - 0.225, -12.0),
        ("p1-s-1", base + 0.225, 12.0),
    ];
    for (id, angle, jitter) in expected {
        let position = layout.node(id).unwrap().position;
        let x = 800.0 + angle.cos() * 350.0;
        let y = 100.0 + angle.sin() * 350.0 + jitter;
        assert!((position.x - x).abs() < 1e-2, "{id}: x {} != {x}", position.x);
        assert!((position.y - y).abs() < 1e-2, "{id}: y {} != {y}", position.y);
    }
}

#[test]
fn branchless_document_uses_fallback() {
    let document = load_fixture("related_terms.json");
    let layout = layout_of(&document, &ExpansionState::new());

    assert_eq!(layout.nodes.len(), 5);
    assert_eq!(layout.edges.len(), 4);
    assert_eq!(layout.nodes_of_kind(NodeKind::Center).count(), 1);
    assert_eq!(layout.nodes_of_kind(NodeKind::Meaning).count(), 1);
    assert_eq!(
        layout
            .nodes
            .iter()
            .filter(|node| node.kind.is_secondary_ring())
            .count(),
        3
    );
    assert!(layout.edges.iter().all(|edge| edge.source == "center"));
}

#[test]
fn primary_angles_ignore_expansion() {
    let document = load_fixture("upsc_branches.json");
    let baseline = primary_positions(&layout_of(&document, &ExpansionState::new()));

    let mut expansion = ExpansionState::new();
    for branch in document.branches() {
        expansion.toggle(&branch.id);
        let current = primary_positions(&layout_of(&document, &expansion));
        assert_eq!(current, baseline, "toggling {} moved a primary", branch.id);
    }
}

#[test]
fn secondary_count_follows_expansion_flag() {
    let document = load_fixture("upsc_branches.json");
    let mut expansion = ExpansionState::new();
    expansion.set("constitutional", true);
    expansion.set("current", true);
    expansion.set("schemes", false);
    let layout = layout_of(&document, &expansion);

    for branch in document.branches() {
        let shown = layout.secondaries_of(&branch.id).count();
        let expected = if expansion.is_expanded(&branch.id) {
            branch.items.len()
        } else {
            0
        };
        assert_eq!(shown, expected, "branch {}", branch.id);
    }
    // expanded branch with no items
    assert_eq!(layout.secondaries_of("current").count(), 0);
    assert!(layout.node("current").is_some());
}

#[test]
fn exactly_one_center_and_unique_ids() {
    let document = load_fixture("upsc_branches.json");
    let mut expansion = ExpansionState::new();
    expansion.expand_all(document.branches());
    let layout = layout_of(&document, &expansion);

    assert_eq!(layout.nodes_of_kind(NodeKind::Center).count(), 1);
    assert_eq!(
        layout.nodes_of_kind(NodeKind::Primary).count(),
        document.branches().len()
    );
    let node_ids: HashSet<&str> = layout.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(node_ids.len(), layout.nodes.len());
    let edge_ids: HashSet<&str> = layout.edges.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(edge_ids.len(), layout.edges.len());
    for edge in &layout.edges {
        assert!(node_ids.contains(edge.source.as_str()));
        assert!(node_ids.contains(edge.target.as_str()));
    }
}

#[test]
fn repeated_layouts_are_identical() {
    let document = load_fixture("upsc_branches.json");
    let expansion: ExpansionState = [("history", true), ("world", true)].into_iter().collect();
    let first = layout_of(&document, &expansion);
    let second = layout_of(&document, &expansion);
    let ids = |layout: &Layout| layout.nodes.iter().map(|n| n.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first, second);
}

#[test]
fn icons_resolve_through_layout() {
    let document = load_fixture("upsc_branches.json");
    let layout = layout_of(&document, &ExpansionState::new());
    let glyph = |id: &str| match &layout.node(id).unwrap().payload {
        radial_mindmap::layout::NodePayload::Branch { glyph, .. } => glyph.clone(),
        other => panic!("unexpected payload {other:?}"),
    };
    assert_eq!(glyph("constitutional"), "📜");
    assert_eq!(glyph("schemes"), "🏛️");
    assert_eq!(glyph("current"), "📰");
    assert_eq!(glyph("world"), "📌");
}

#[test]
fn helper_contracts() {
    assert_eq!(resolve_icon(""), "📌");
    assert_eq!(resolve_icon("📚"), "📚");
    assert_eq!(resolve_icon("BOOK"), resolve_icon("book"));
    assert_eq!(lighten("#000000", 50.0), "#808080");
    assert_eq!(lighten("#ffffff", 50.0), "#ffffff");
}

#[test]
fn session_round_trip_restores_layout() {
    let document = load_fixture("upsc_branches.json");
    let mut session = MindmapSession::from_document(&document, &Config::default());
    let initial = session.layout().clone();
    session.toggle("history");
    assert_eq!(session.layout().nodes.len(), initial.nodes.len() + 3);
    session.toggle("history");
    assert_eq!(session.layout(), &initial);
}

#[test]
fn renders_every_fixture() {
    let theme = Theme::classic();
    let config = Config::default();
    let engine = LayoutEngine::from_config(&config);
    for name in ["democracy_single.json", "related_terms.json", "upsc_branches.json"] {
        let document = load_fixture(name);
        let mut expansion = ExpansionState::new();
        expansion.expand_all(document.branches());
        let layout = engine.layout(&document.topic(), document.branches(), &expansion);
        let svg = render_svg(&layout, &theme, &config.render);
        assert!(svg.contains("<svg"), "{name}: missing <svg tag");
        assert!(svg.contains("</svg>"), "{name}: missing </svg tag");
        assert!(svg.contains(&document.word), "{name}: topic label missing");
    }
}

#[test]
fn duplicate_branch_ids_are_rejected() {
    let document = MindmapDocument {
        word: "Dup".to_string(),
        primary_branches: vec![Branch::new("a", "A"), Branch::new("a", "B")],
        ..Default::default()
    };
    assert!(document.validate().is_err());
    assert!(
        radial_mindmap::render_with_options(
            &serde_json::to_string(&document).unwrap(),
            &ExpansionState::new(),
            &Config::default(),
        )
        .is_err()
    );
}
