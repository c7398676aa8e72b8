use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use fotolito::{
    BackgroundMode, BlurRadius, CanvasParameters, Compositor, CompositorConfig, ExportFormat,
    ExportSettings, Rgb8, SourceImage, decode_image,
};

#[derive(Parser, Debug)]
#[command(name = "fotolito", version)]
struct Cli {
    /// Emit structured JSON logs instead of human-readable ones.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place an image on the 1920x1080 canvas and export it.
    Compose(ComposeArgs),
    /// Print dimensions, scale range and advisories for an image.
    Info(InfoArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input image (JPEG, PNG, WEBP).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output file.
    #[arg(long)]
    out: PathBuf,

    /// Canvas parameters JSON; flags below override its fields.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Compositor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Allow up to 10x scaling for ordinary sources (ignored with --config).
    #[arg(long, default_value_t = false)]
    extended_scale: bool,

    /// Export format (WEBP, JPEG, PNG). Defaults to the output extension, or WEBP without one.
    #[arg(long)]
    format: Option<String>,

    /// Export quality, clamped to 10..=100.
    #[arg(long, default_value_t = i64::from(fotolito::DEFAULT_QUALITY), allow_hyphen_values = true)]
    quality: i64,

    /// Foreground scale factor.
    #[arg(long)]
    scale: Option<f64>,

    /// Horizontal offset in pixels.
    #[arg(long, allow_hyphen_values = true)]
    x: Option<i32>,

    /// Vertical offset in pixels; positive moves the image up.
    #[arg(long, allow_hyphen_values = true)]
    y: Option<i32>,

    /// Center horizontally.
    #[arg(long, default_value_t = false)]
    center_x: bool,

    /// Center vertically.
    #[arg(long, default_value_t = false)]
    center_y: bool,

    /// Center on both axes, ignoring offsets.
    #[arg(long, default_value_t = false)]
    fit: bool,

    /// Use a blurred backdrop with this radius (snapped to 20, 50 or 100).
    #[arg(long)]
    blur: Option<i64>,

    /// Solid background color as #RRGGBB.
    #[arg(long)]
    color: Option<String>,
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input image (JPEG, PNG, WEBP).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Compositor config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Info(args) => cmd_info(args),
    }
}

fn init_logging(json: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

fn load_source(path: &Path) -> anyhow::Result<SourceImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(decode_image(&bytes)?)
}

fn load_compositor(config: Option<&Path>, extended_scale: bool) -> anyhow::Result<Compositor> {
    let cfg = match config {
        Some(path) => CompositorConfig::from_path(path)?,
        None if extended_scale => CompositorConfig::extended_scale(),
        None => CompositorConfig::default(),
    };
    Ok(Compositor::new(cfg)?)
}

fn resolve_format(explicit: Option<&str>, out: &Path) -> anyhow::Result<ExportFormat> {
    if let Some(f) = explicit {
        return Ok(f.parse()?);
    }
    match out.extension() {
        Some(ext) => Ok(ext.to_string_lossy().parse()?),
        None => Ok(ExportFormat::default()),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let source = load_source(&args.in_path)?;
    let compositor = load_compositor(args.config.as_deref(), args.extended_scale)?;
    let format = resolve_format(args.format.as_deref(), &args.out)?;
    let settings = ExportSettings::new(format, args.quality);

    let mut params = match &args.params {
        Some(path) => CanvasParameters::from_path(path)?,
        None => CanvasParameters::default(),
    };
    if let Some(scale) = args.scale {
        params.scale = scale;
    }
    if let Some(x) = args.x {
        params.offset_x = x;
    }
    if let Some(y) = args.y {
        params.offset_y = y;
    }
    params.center_horizontal |= args.center_x;
    params.center_vertical |= args.center_y;
    params.fit_to_canvas |= args.fit;
    if let Some(radius) = args.blur {
        params.background = BackgroundMode::Blur;
        params.blur_radius = BlurRadius::nearest(radius)?;
    }
    if let Some(color) = &args.color {
        params.background = BackgroundMode::SolidColor;
        params.background_color = color.parse::<Rgb8>()?;
    }

    let rendered = compositor.render(Some(&source), &params)?;
    for advisory in &rendered.advisories {
        eprintln!("note: {advisory}");
    }
    let exported = compositor.export(&rendered.canvas, &settings)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &exported.bytes)
        .with_context(|| format!("write {} '{}'", exported.format, args.out.display()))?;

    eprintln!(
        "wrote {} ({} {:.2} KB)",
        args.out.display(),
        exported.format,
        exported.size_kb()
    );
    if let Some(advisory) = exported.size_advisory(compositor.config().size_warning_kb) {
        eprintln!("warning: {advisory}");
    }
    Ok(())
}

fn cmd_info(args: InfoArgs) -> anyhow::Result<()> {
    let source = load_source(&args.in_path)?;
    let compositor = load_compositor(args.config.as_deref(), false)?;
    let report = compositor.inspect(&source);

    println!("dimensions: {}", report.info.size);
    println!("aspect ratio: {:.2}", report.info.aspect_ratio());
    println!("file size: {:.2} MB", report.info.file_size_mib());
    println!(
        "scale range: {}..={}",
        report.scale_bounds.min, report.scale_bounds.max
    );
    println!("working size: {}", report.working_size);
    if report.info.is_canvas_sized() {
        println!("already 1920x1080");
    }
    for advisory in &report.advisories {
        println!("note: {advisory}");
    }
    Ok(())
}
