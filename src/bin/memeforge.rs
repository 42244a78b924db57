use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use memeforge::{
    CaptionFont, CaptionStyle, Captions, Compositor, MemeSession, Size, compute_draw_rect,
    default_font_candidates, parse_size,
};

#[derive(Parser, Debug)]
#[command(name = "memeforge", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Caption an image and write `meme-<unix-millis>.png`.
    Render(RenderArgs),
    /// Print the contain-fit draw rect for an image inside a container, as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image (PNG, JPEG, GIF, WebP, ...).
    #[arg(long)]
    image: PathBuf,

    /// Caption along the top edge.
    #[arg(long, default_value = "")]
    top: String,

    /// Caption along the bottom edge.
    #[arg(long, default_value = "")]
    bottom: String,

    /// Container width in pixels (defaults to the image width).
    #[arg(long)]
    width: Option<f64>,

    /// Container height in pixels (defaults to the image height).
    #[arg(long)]
    height: Option<f64>,

    /// Caption font file; repeat to give a fallback order.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Caption style JSON (any subset of the style keys).
    #[arg(long)]
    style: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Intrinsic image size, `WIDTHxHEIGHT`.
    #[arg(long, value_parser = size_arg)]
    image_size: Size,

    /// Available drawing area, `WIDTHxHEIGHT`.
    #[arg(long, value_parser = size_arg)]
    container: Size,
}

fn size_arg(s: &str) -> Result<Size, String> {
    parse_size(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let style = match &args.style {
        Some(path) => CaptionStyle::from_path(path)?,
        None => CaptionStyle::default(),
    };
    let captions = Captions::new(args.top, args.bottom);

    let font = if !args.fonts.is_empty() {
        Some(CaptionFont::load_first(&args.fonts).context("load caption font")?)
    } else if !captions.is_empty() {
        let candidates = default_font_candidates();
        Some(CaptionFont::load_first(&candidates).context(
            "no caption font found; pass --font <file> or set MEMEFORGE_FONT",
        )?)
    } else {
        None
    };

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;

    let compositor = Compositor::new(style, font)?;
    let mut session = MemeSession::new(compositor, Size::ZERO);
    let load = session.begin_load(bytes);
    session
        .apply_load(load.wait())
        .with_context(|| format!("load image '{}'", args.image.display()))?;

    let container = {
        let image = session
            .image()
            .context("image missing after successful load")?;
        Size::new(
            args.width.unwrap_or(f64::from(image.width)),
            args.height.unwrap_or(f64::from(image.height)),
        )
    };
    session.set_container(container)?;
    session.set_captions(captions)?;

    match session.export_png()? {
        Some(export) => {
            let path = export.write_to_dir(&args.out_dir)?;
            println!("{}", path.display());
        }
        None => {
            tracing::warn!(
                width = container.width,
                height = container.height,
                "nothing to export: draw area is empty"
            );
            eprintln!("nothing to export");
        }
    }
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let rect = compute_draw_rect(
        args.image_size.width,
        args.image_size.height,
        args.container.width,
        args.container.height,
    );
    let (pixel_width, pixel_height) = rect.pixel_size();
    let out = serde_json::json!({
        "draw_width": rect.width,
        "draw_height": rect.height,
        "pixel_width": pixel_width,
        "pixel_height": pixel_height,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
