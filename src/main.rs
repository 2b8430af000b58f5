//! symcipher CLI: render text as a symbolic line-segment cipher.

use std::path::PathBuf;

use clap::Parser;
use miette::Result;

use symbolic_cipher::config::LayoutConfig;
use symbolic_cipher::glyph::CaptionStyle;
use symbolic_cipher::pipeline::{self, RunRequest};
use symbolic_cipher::render::OutputFormat;

#[derive(Parser)]
#[command(
    name = "symcipher",
    version,
    about = "Render text as a Pigpen-style symbolic cipher"
)]
struct Cli {
    /// Plaintext input file, one output line per input line.
    #[arg(short, long)]
    input: PathBuf,

    /// Output path without extension; pages land at {base}.ext, {base}_abc.ext, {base}_decoded.ext.
    #[arg(short, long)]
    output: PathBuf,

    /// Keymap JSON (letter -> list of primitive names).
    #[arg(long, default_value = "keymap.json")]
    keymap: PathBuf,

    /// Output format: pdf, svg or png.
    #[arg(long, default_value = "pdf", value_parser = parse_format)]
    format: OutputFormat,

    /// Glyph size in points.
    #[arg(long)]
    size: Option<f64>,

    /// Horizontal advance as a fraction of the glyph size.
    #[arg(long)]
    letter_spacing: Option<f64>,

    /// Line height as a fraction of the glyph size.
    #[arg(long)]
    line_spacing: Option<f64>,

    /// Caption placement on the solution page: none, below or inside.
    #[arg(long, value_parser = parse_caption_style)]
    caption_style: Option<CaptionStyle>,

    /// Drop the blank advance that follows every word, so words run together.
    #[arg(long)]
    trim_words: bool,

    /// Skip the legend page.
    #[arg(long)]
    no_abc: bool,

    /// Skip the solution page.
    #[arg(long)]
    no_decoded: bool,

    /// TOML file with layout settings, applied before the flags above.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    OutputFormat::from_extension(s).map_err(|e| e.to_string())
}

fn parse_caption_style(s: &str) -> std::result::Result<CaptionStyle, String> {
    match s.to_ascii_lowercase().as_str() {
        "none" => Ok(CaptionStyle::None),
        "below" => Ok(CaptionStyle::Below),
        "inside" => Ok(CaptionStyle::Inside),
        other => Err(format!("unknown caption style \"{other}\" (none, below, inside)")),
    }
}

impl Cli {
    fn layout_config(&self) -> Result<LayoutConfig> {
        let base = LayoutConfig::for_page(
            self.format.default_page(),
            self.format.default_legend_group(),
        );
        let mut config = match &self.config {
            Some(path) => LayoutConfig::load_over(path, &base)?,
            None => base,
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(spacing) = self.letter_spacing {
            config.letter_spacing = spacing;
        }
        if let Some(spacing) = self.line_spacing {
            config.line_spacing = spacing;
        }
        if let Some(style) = self.caption_style {
            config.caption_style = style;
        }
        if self.trim_words {
            config.trim_words = true;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let request = RunRequest {
        config: cli.layout_config()?,
        input: cli.input,
        keymap: cli.keymap,
        output_base: cli.output,
        format: cli.format,
        legend: !cli.no_abc,
        solution: !cli.no_decoded,
    };

    let report = pipeline::run(&request)?;
    for page in &report.pages {
        println!("{:<8} {}", page.kind.label(), page.path.display());
        if !page.skipped.is_empty() {
            println!("         skipped {} item(s):", page.skipped.len());
            for skipped in &page.skipped {
                println!("           {skipped}");
            }
        }
    }
    Ok(())
}
