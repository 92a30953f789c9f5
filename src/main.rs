use anyhow::Context;
use clap::{Parser, ValueEnum};
use kpdf::{DEFAULT_TITLE, DocumentComposer, ExecutorVariants, FontSettings, LayoutMode};
use kpdf::types::DocumentRequest;
use std::fs;
use std::path::PathBuf;

/// Renders a document request JSON file to a local PDF, without touching storage.
#[derive(Parser, Debug)]
#[command(name = "kpdf", version, about)]
struct Cli {
    /// Path to the request JSON.
    request: PathBuf,

    /// Where to write the PDF.
    output: PathBuf,

    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    #[arg(long, value_enum, default_value_t = Variants::First)]
    executor_variants: Variants,

    #[arg(long, value_enum, default_value_t = Mode::Tables)]
    layout_mode: Mode,

    /// TrueType file for regular text; without it text is set in Helvetica.
    #[arg(long)]
    font: Option<PathBuf>,

    /// TrueType file for bold text.
    #[arg(long, requires = "font")]
    bold_font: Option<PathBuf>,

    /// Installed font family to use when no `--font` is given; may be repeated.
    #[arg(long = "font-family")]
    font_families: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variants {
    First,
    All,
    Last,
    Every,
}

impl From<Variants> for ExecutorVariants {
    fn from(value: Variants) -> Self {
        match value {
            Variants::First => ExecutorVariants::First,
            Variants::All => ExecutorVariants::All,
            Variants::Last => ExecutorVariants::Last,
            Variants::Every => ExecutorVariants::Every,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Tables,
    Fields,
}

impl From<Mode> for LayoutMode {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Tables => LayoutMode::Tables,
            Mode::Fields => LayoutMode::Fields,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    log::info!("Loading request from {}", cli.request.display());
    let source = fs::read_to_string(&cli.request)
        .with_context(|| format!("failed to read {}", cli.request.display()))?;
    let request: DocumentRequest = serde_json::from_str(&source)
        .with_context(|| format!("{} is not a valid document request", cli.request.display()))?;

    let fonts = FontSettings {
        regular: cli.font,
        bold: cli.bold_font,
        system_families: cli.font_families,
        ..Default::default()
    }
    .load()
    .context("failed to load fonts")?;

    let composer = DocumentComposer::new()
        .with_fonts(fonts)
        .with_title(cli.title)
        .with_executor_variants(cli.executor_variants.into())
        .with_layout_mode(cli.layout_mode.into());

    let artifact = composer.render(&request)?;
    fs::write(&cli.output, artifact.bytes())
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    println!(
        "Wrote {} ({} bytes) for cart {}",
        cli.output.display(),
        artifact.len(),
        artifact.cart_id()
    );
    Ok(())
}
