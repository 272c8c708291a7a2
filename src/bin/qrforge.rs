use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use qrforge::{
    Batch, ContentRecord, ErrorCorrection, LogoOptions, OutputFormat, StyleOptions, generate,
    model::parse_hex_color, package_zip, validate_contact,
};

#[derive(Parser, Debug)]
#[command(name = "qrforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one QR artifact from a JSON request.
    Single(SingleArgs),
    /// Generate a ZIP of vCard QR codes from a contacts CSV.
    Batch(BatchArgs),
    /// Write the header-only CSV template.
    Template(TemplateArgs),
}

#[derive(Parser, Debug)]
struct SingleArgs {
    /// Input request JSON ({"record": ..., "style": ..., "format": ...}).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for qr-code.png / qr-code.svg.
    #[arg(long)]
    out: PathBuf,

    /// Logo image to overlay on the raster output.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Logo size as a percentage of the QR width.
    #[arg(long = "logo-size", default_value_t = 20)]
    logo_size: u32,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input contacts CSV.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output ZIP path.
    #[arg(long)]
    out: PathBuf,

    /// Artifact edge length in pixels.
    #[arg(long, default_value_t = 300)]
    size: u32,

    /// Quiet-zone width in modules.
    #[arg(long, default_value_t = 4)]
    margin: u32,

    /// Error correction level.
    #[arg(long, value_enum, default_value_t = LevelChoice::M)]
    level: LevelChoice,

    /// Module color as '#rrggbb'.
    #[arg(long, default_value = "#000000")]
    foreground: String,

    /// Background color as '#rrggbb'.
    #[arg(long, default_value = "#ffffff")]
    background: String,

    /// Logo image to overlay on raster outputs.
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Logo size as a percentage of the QR width.
    #[arg(long = "logo-size", default_value_t = 20)]
    logo_size: u32,

    /// Which artifacts to produce per record.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    /// Output CSV path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LevelChoice {
    L,
    M,
    Q,
    H,
}

impl From<LevelChoice> for ErrorCorrection {
    fn from(choice: LevelChoice) -> Self {
        match choice {
            LevelChoice::L => ErrorCorrection::L,
            LevelChoice::M => ErrorCorrection::M,
            LevelChoice::Q => ErrorCorrection::Q,
            LevelChoice::H => ErrorCorrection::H,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Png,
    Svg,
    Both,
}

impl From<FormatChoice> for OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Png => OutputFormat::Png,
            FormatChoice::Svg => OutputFormat::Svg,
            FormatChoice::Both => OutputFormat::Both,
        }
    }
}

#[derive(serde::Deserialize)]
struct SingleRequest {
    record: ContentRecord,
    #[serde(default)]
    style: StyleOptions,
    #[serde(default)]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Single(args) => cmd_single(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Template(args) => cmd_template(args),
    }
}

fn read_logo(path: &Path, size_percent: u32) -> anyhow::Result<LogoOptions> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read logo '{}'", path.display()))?;
    Ok(LogoOptions {
        bytes,
        size_percent,
    })
}

fn cmd_single(args: SingleArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open request '{}'", args.in_path.display()))?;
    let r = BufReader::new(f);
    let mut request: SingleRequest =
        serde_json::from_reader(r).with_context(|| "parse request JSON")?;

    if let Some(logo_path) = &args.logo {
        request.style.logo = Some(read_logo(logo_path, args.logo_size)?);
    }

    let Some(artifact) = generate(&request.record, &request.style, request.format)? else {
        anyhow::bail!("record produced an empty payload; nothing to encode");
    };

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    if let Some(png) = &artifact.png {
        let path = args.out.join("qr-code.png");
        std::fs::write(&path, png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    if let Some(svg) = &artifact.svg {
        let path = args.out.join("qr-code.svg");
        std::fs::write(&path, svg)
            .with_context(|| format!("write svg '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let f = File::open(&args.in_path)
        .with_context(|| format!("open csv '{}'", args.in_path.display()))?;
    let batch = Batch::from_csv(BufReader::new(f))?;

    if batch.is_empty() {
        anyhow::bail!("csv contains no records");
    }
    if batch.len() > qrforge::MAX_BATCH_RECORDS {
        tracing::warn!(
            records = batch.len(),
            limit = qrforge::MAX_BATCH_RECORDS,
            "file exceeds the advisory record limit"
        );
    }

    for record in batch.records() {
        for err in validate_contact(&record.contact) {
            tracing::warn!(
                ordinal = %format!("{:03}", record.ordinal),
                field = err.field,
                kind = ?err.kind,
                "contact field failed validation"
            );
        }
    }

    let mut style = StyleOptions {
        foreground: parse_hex_color(&args.foreground)?,
        background: parse_hex_color(&args.background)?,
        size: args.size,
        margin: args.margin,
        error_correction: args.level.into(),
        logo: None,
    };
    if let Some(logo_path) = &args.logo {
        style.logo = Some(read_logo(logo_path, args.logo_size)?);
    }

    let outcome = batch.run(&style, args.format.into());
    if outcome.artifacts.is_empty() {
        anyhow::bail!("no record could be encoded; nothing to package");
    }

    let bytes = package_zip(&outcome.artifacts)?;
    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, bytes)
        .with_context(|| format!("write zip '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} artifacts, {} failed records)",
        args.out.display(),
        outcome.artifacts.len(),
        outcome.failures.len()
    );
    Ok(())
}

fn cmd_template(args: TemplateArgs) -> anyhow::Result<()> {
    std::fs::write(&args.out, qrforge::TEMPLATE_CSV)
        .with_context(|| format!("write template '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
