//! `fc`: render and inspect saved flowchart documents.
//!
//! Reads a document (or an autosave payload) and writes it out as SVG or
//! PNG, or prints a short summary. Set `RUST_LOG=debug` for detail.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fc_core::{Document, EditorConfig, NodeType};
use fc_editor::Editor;
use std::fs;
use std::path::{Path, PathBuf};

/// Render and inspect flowchart documents
#[derive(Parser, Debug)]
#[command(name = "fc", version, about, long_about = None)]
struct Cli {
    /// JSON file with editor settings (grid, export scale, padding, ...)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a document as SVG
    Svg {
        input: PathBuf,
        /// Output file; defaults to the input name with an .svg extension
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Padding around the content, in scene units
        #[arg(long)]
        padding: Option<f64>,
    },
    /// Export a document as PNG
    Png {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        padding: Option<f64>,
        /// Pixels per scene unit
        #[arg(long)]
        scale: Option<f32>,
    },
    /// Print a summary of a document
    Info { input: PathBuf },
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    log::debug!("loading config from {}", path.display());
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    EditorConfig::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn load_document(path: &Path) -> Result<Document> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Document::from_json(&text).with_context(|| format!("loading {}", path.display()))
}

fn open_editor(config: EditorConfig, input: &Path) -> Result<(Editor, Document)> {
    let document = load_document(input)?;
    let mut editor = Editor::new(config);
    editor.load_document(&document)?;
    log::info!(
        "loaded {} ({} nodes, {} connectors)",
        input.display(),
        document.nodes.len(),
        document.connectors.len()
    );
    Ok((editor, document))
}

fn write_output(input: &Path, output: Option<PathBuf>, extension: &str, bytes: &[u8]) -> Result<()> {
    let output = output.unwrap_or_else(|| input.with_extension(extension));
    fs::write(&output, bytes).with_context(|| format!("writing {}", output.display()))?;
    log::info!("exported {extension} to {}", output.display());
    println!("wrote {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

fn print_info(document: &Document, editor: &Editor) {
    let name = if document.name.is_empty() {
        "(unnamed)"
    } else {
        &document.name
    };
    println!("name:       {name}");
    println!("saved:      {}", document.timestamp.to_rfc3339());
    println!("nodes:      {}", document.nodes.len());
    println!("connectors: {}", document.connectors.len());

    for kind in NodeType::ALL {
        let count = document.nodes.iter().filter(|n| n.kind() == kind).count();
        if count > 0 {
            println!("  {:<10} {count}", kind.as_str());
        }
    }

    match editor.scene().content_bounds() {
        Some(b) => println!(
            "bounds:     {} x {} at ({}, {})",
            b.width, b.height, b.x, b.y
        ),
        None => println!("bounds:     (empty)"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Svg {
            input,
            output,
            padding,
        } => {
            if let Some(padding) = padding {
                config.export_padding = padding;
            }
            let (editor, _) = open_editor(config, &input)?;
            write_output(&input, output, "svg", editor.export_svg().as_bytes())?;
        }
        Command::Png {
            input,
            output,
            padding,
            scale,
        } => {
            if let Some(padding) = padding {
                config.export_padding = padding;
            }
            if let Some(scale) = scale {
                config.export_scale = scale;
            }
            let (editor, _) = open_editor(config, &input)?;
            let png = editor.export_png().context("rendering PNG")?;
            write_output(&input, output, "png", &png)?;
        }
        Command::Info { input } => {
            let (editor, document) = open_editor(config, &input)?;
            print_info(&document, &editor);
        }
    }
    Ok(())
}
