use crate::config::{Config, load_config};
use crate::ir::{ExpansionState, MindmapDocument};
use crate::layout::LayoutEngine;
use crate::layout_dump::write_layout_dump;
use crate::presets;
use crate::render::{render_svg, write_output_svg};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rmm", version, about = "Radial mind-map renderer")]
pub struct Args {
    /// Input mind map document (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config file (JSON5)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Expand a branch by id (repeatable)
    #[arg(long = "expand", value_name = "ID")]
    pub expand: Vec<String>,

    /// Expand every branch
    #[arg(long = "expand-all", conflicts_with = "expand")]
    pub expand_all: bool,

    /// Use a built-in branch set when the document has none ('auto' picks by topic)
    #[arg(long = "preset", value_name = "NAME")]
    pub preset: Option<String>,

    /// Maximum PNG width; the drawing keeps its aspect ratio
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Maximum PNG height; the drawing keeps its aspect ratio
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// More logging (-v info, -vv debug, -vvv trace). RUST_LOG wins when set.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }

    let input = read_input(args.input.as_deref())?;
    let mut document = MindmapDocument::from_json(&input)?;
    apply_preset(&mut document, args.preset.as_deref())?;
    document.validate()?;

    let expansion = build_expansion(&document, &args.expand, args.expand_all);
    tracing::info!(
        topic = %document.word,
        branches = document.primary_branches.len(),
        expanded = expansion.expanded_ids().count(),
        "rendering mind map"
    );

    render_document(&document, &expansion, &config, &args)
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn render_document(
    document: &MindmapDocument,
    expansion: &ExpansionState,
    config: &Config,
    args: &Args,
) -> Result<()> {
    let engine = LayoutEngine::from_config(config);
    let layout = engine.layout(&document.topic(), document.branches(), expansion);
    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.render);
            write_output_svg(&svg, args.output.as_deref())
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &layout),
            None => {
                let json = crate::layout_dump::layout_to_json(&layout)?;
                println!("{json}");
                Ok(())
            }
        },
        OutputFormat::Png => write_png(&layout, config, args.output.as_deref()),
    }
}

#[cfg(feature = "png")]
fn write_png(
    layout: &crate::layout::Layout,
    config: &Config,
    output: Option<&Path>,
) -> Result<()> {
    let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
    let svg = render_svg(layout, &config.theme, &config.render);
    crate::render::write_output_png(&svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(
    _layout: &crate::layout::Layout,
    _config: &Config,
    _output: Option<&Path>,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn apply_preset(document: &mut MindmapDocument, preset: Option<&str>) -> Result<()> {
    let Some(name) = preset else {
        return Ok(());
    };
    if !document.primary_branches.is_empty() {
        tracing::warn!(preset = name, "document already has branches, preset ignored");
        return Ok(());
    }
    if name == "auto" {
        if !presets::apply_for_topic(document) {
            tracing::warn!(topic = %document.word, "no preset matches the topic");
        }
        return Ok(());
    }
    document.primary_branches = presets::by_name(name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown preset `{name}` (available: {})",
            presets::PRESET_NAMES.join(", ")
        )
    })?;
    Ok(())
}

fn build_expansion(
    document: &MindmapDocument,
    expand: &[String],
    expand_all: bool,
) -> ExpansionState {
    let mut expansion = ExpansionState::new();
    if expand_all {
        expansion.expand_all(document.branches());
        return expansion;
    }
    for id in expand {
        if !document.branches().iter().any(|branch| &branch.id == id) {
            tracing::warn!(branch = %id, "--expand names no branch in the document");
        }
        expansion.set(id.clone(), true);
    }
    expansion
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Branch;

    fn document() -> MindmapDocument {
        MindmapDocument {
            word: "Democracy".to_string(),
            primary_branches: vec![Branch::new("p1", "A"), Branch::new("p2", "B")],
            ..Default::default()
        }
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "rmm", "-i", "map.json", "-e", "json", "--expand", "p1", "--expand", "p2", "-vv",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert_eq!(args.expand, vec!["p1", "p2"]);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn verbosity_steps_through_levels() {
        let levels: Vec<_> = (0..=4).map(default_level).collect();
        assert_eq!(levels, vec!["warn", "info", "debug", "trace", "trace"]);
    }

    #[test]
    fn expand_all_conflicts_with_expand() {
        assert!(Args::try_parse_from(["rmm", "--expand", "p1", "--expand-all"]).is_err());
    }

    #[test]
    fn builds_expansion_from_flags() {
        let doc = document();
        let state = build_expansion(&doc, &["p2".to_string()], false);
        assert!(state.is_expanded("p2"));
        assert!(!state.is_expanded("p1"));
        let all = build_expansion(&doc, &[], true);
        assert!(all.is_expanded("p1") && all.is_expanded("p2"));
    }

    #[test]
    fn preset_fills_branchless_documents_only() {
        let mut empty = MindmapDocument {
            word: "Anything".to_string(),
            ..Default::default()
        };
        apply_preset(&mut empty, Some("democracy")).unwrap();
        assert_eq!(empty.primary_branches.len(), 8);

        let mut doc = document();
        apply_preset(&mut doc, Some("democracy")).unwrap();
        assert_eq!(doc.primary_branches.len(), 2);

        assert!(apply_preset(&mut MindmapDocument::default(), Some("nope")).is_err());

        let mut by_topic = MindmapDocument {
            word: "Democracy".to_string(),
            ..Default::default()
        };
        apply_preset(&mut by_topic, Some("auto")).unwrap();
        assert_eq!(by_topic.primary_branches[0].id, "p-definition");
    }
}
