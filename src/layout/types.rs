use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The point `distance` away from `self` along `angle` (radians, y grows downward).
    pub fn polar_offset(self, angle: f32, distance: f32) -> Self {
        Self {
            x: self.x + angle.cos() * distance,
            y: self.y + angle.sin() * distance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Center,
    /// Definition node of the branchless layout.
    Meaning,
    Primary,
    Secondary,
    /// Related-term node of the branchless layout.
    Term,
}

impl NodeKind {
    /// True for nodes on the outer ring: branch items and related terms.
    pub fn is_secondary_ring(self) -> bool {
        matches!(self, NodeKind::Secondary | NodeKind::Term)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    Circle,
    RoundRect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    pub shape: NodeShape,
    pub fill: String,
    pub text_color: String,
    pub border_color: String,
    pub border_width: f32,
    pub corner_radius: f32,
    pub padding: f32,
    pub font_size: f32,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodePayload {
    Topic {
        label: String,
    },
    Meaning {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Branch {
        glyph: String,
        title: String,
        color: String,
        items: Vec<String>,
        expanded: bool,
    },
    #[serde(rename_all = "camelCase")]
    Item {
        branch_id: String,
        index: usize,
        text: String,
    },
    Term {
        index: usize,
        text: String,
    },
}

/// A positioned node. `position` is the top-left corner of the node box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub id: String,
    pub kind: NodeKind,
    pub position: Point,
    pub width: f32,
    pub height: f32,
    pub label: TextBlock,
    pub payload: NodePayload,
    pub style: NodeStyle,
}

impl LayoutNode {
    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.width / 2.0,
            self.position.y + self.height / 2.0,
        )
    }

    pub fn branch_id(&self) -> Option<&str> {
        match (&self.kind, &self.payload) {
            (NodeKind::Primary, _) => Some(self.id.as_str()),
            (_, NodePayload::Item { branch_id, .. }) => Some(branch_id.as_str()),
            _ => None,
        }
    }

    pub fn is_expanded(&self) -> Option<bool> {
        match &self.payload {
            NodePayload::Branch { expanded, .. } => Some(*expanded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub color: String,
    pub width: f32,
    pub animated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    pub fn width(&self) -> f32 {
        (self.max_x - self.min_x).max(1.0)
    }

    pub fn height(&self) -> f32 {
        (self.max_y - self.min_y).max(1.0)
    }

    pub fn of_nodes(nodes: &[LayoutNode]) -> Self {
        if nodes.is_empty() {
            return Self::default();
        }
        let mut bounds = Self {
            min_x: f32::MAX,
            min_y: f32::MAX,
            max_x: f32::MIN,
            max_y: f32::MIN,
        };
        for node in nodes {
            bounds.min_x = bounds.min_x.min(node.position.x);
            bounds.min_y = bounds.min_y.min(node.position.y);
            bounds.max_x = bounds.max_x.max(node.position.x + node.width);
            bounds.max_y = bounds.max_y.max(node.position.y + node.height);
        }
        bounds
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub bounds: Bounds,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    /// Item nodes currently shown for one branch.
    pub fn secondaries_of<'a>(
        &'a self,
        branch_id: &'a str,
    ) -> impl Iterator<Item = &'a LayoutNode> {
        self.nodes.iter().filter(move |node| {
            node.kind == NodeKind::Secondary && node.branch_id() == Some(branch_id)
        })
    }
}
