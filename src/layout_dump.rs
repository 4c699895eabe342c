use crate::adapter::{Action, bind};
use crate::layout::{Layout, NodeKind, NodePayload, Point};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Graph-surface friendly JSON form of a layout (`{id, type, position, data, style}`
/// nodes and `{id, source, target, style}` edges).
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<&'static str>,
    pub position: Point,
    pub data: NodeData,
    pub style: NodeStyleDump,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub kind: NodeKind,
    pub label: Vec<String>,
    pub payload: NodePayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_expanded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordance: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_toggle: Option<Action>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyleDump {
    pub width: f32,
    pub height: f32,
    pub background: String,
    pub color: String,
    pub border: String,
    pub border_radius: String,
    pub padding: f32,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
    pub style: EdgeStyleDump,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyleDump {
    pub stroke: String,
    pub stroke_width: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = bind(layout)
            .into_iter()
            .map(|bound| {
                let node = bound.node;
                let border_radius = match node.kind {
                    NodeKind::Center if node.style.corner_radius * 2.0 >= node.width => {
                        "50%".to_string()
                    }
                    _ => format!("{}px", node.style.corner_radius),
                };
                let controls = bound.controls;
                NodeDump {
                    id: node.id.clone(),
                    node_type: (node.kind == NodeKind::Primary).then_some("primaryNode"),
                    position: node.position,
                    data: NodeData {
                        kind: node.kind,
                        label: node.label.lines.clone(),
                        payload: node.payload.clone(),
                        is_expanded: controls.as_ref().map(|c| c.is_expanded),
                        affordance: controls.as_ref().map(|c| c.affordance),
                        on_toggle: controls.map(|c| c.on_toggle),
                    },
                    style: NodeStyleDump {
                        width: node.width,
                        height: node.height,
                        background: node.style.fill.clone(),
                        color: node.style.text_color.clone(),
                        border: format!(
                            "{}px solid {}",
                            node.style.border_width, node.style.border_color
                        ),
                        border_radius,
                        padding: node.style.padding,
                    },
                }
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                animated: edge.animated,
                style: EdgeStyleDump {
                    stroke: edge.color.clone(),
                    stroke_width: edge.width,
                },
            })
            .collect();

        LayoutDump {
            width: layout.bounds.width(),
            height: layout.bounds.height(),
            nodes,
            edges,
        }
    }
}

pub fn layout_to_json(layout: &Layout) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&LayoutDump::from_layout(layout))
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &LayoutDump::from_layout(layout))?;
    Ok(())
}
