use clap::{Parser, Subcommand};
use darkroom::format::OutputFormat;
use darkroom::imaging::{Quality, RasterCodec, detect_format, inspect_dimensions};
use darkroom::ops::EditOp;
use darkroom::session::EditSession;
use darkroom::thumbs::{ThumbnailCache, content_key};
use darkroom::{config, output};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "darkroom")]
#[command(about = "Non-destructive raster image editing")]
#[command(long_about = "\
Non-destructive raster image editing

Edits are an append-only operation log replayed against the pristine source
on every export — the input file is never modified, and a JPEG rotated ten
times is re-encoded exactly once.

Operations (repeat --op to chain, applied in order):

  rotate-right          90° clockwise
  rotate-left           90° counter-clockwise
  flip-h                mirror along the vertical axis
  flip-v                mirror along the horizontal axis
  resize=800x600        exact size (aspect ratio not preserved)
  resize=800x           bound one side; the other follows the aspect ratio
  resize=x600
  convert=png           record the chosen export format (jpeg|png|bmp|gif|webp)

The same operations can be read from a JSON file (--ops-file):

  [\"rotate-right\", {\"resize\": {\"width\": 800}}, {\"convert-format\": {\"to\": \"png\"}}]

Export format resolution: --format beats the output file extension, which
beats the last convert= in the log, which beats the source format.

Run 'darkroom gen-config' to generate a documented darkroom.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file
    #[arg(long, default_value = "darkroom.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print an image's dimensions and format
    Info {
        /// Image file to inspect
        file: PathBuf,
    },
    /// Replay an operation log against a source image and export it
    Apply {
        /// Source image
        #[arg(short, long)]
        input: PathBuf,

        /// Export destination
        #[arg(short, long)]
        output: PathBuf,

        /// Operation to append, in order (repeatable)
        #[arg(long = "op", value_name = "OPERATION")]
        ops: Vec<String>,

        /// JSON file holding a list of operations, appended before any --op
        #[arg(long, value_name = "FILE")]
        ops_file: Option<PathBuf>,

        /// Export format; defaults from the output extension
        #[arg(short, long)]
        format: Option<String>,

        /// JPEG quality (1-100); other formats ignore it
        #[arg(short, long)]
        quality: Option<u32>,
    },
    /// Generate grid thumbnails for images (files or directories)
    Thumbs {
        /// Image files or directories to walk
        inputs: Vec<PathBuf>,

        /// Directory to write thumbnails into
        #[arg(short, long, default_value = "thumbs")]
        output: PathBuf,
    },
    /// Print a stock darkroom.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let app_config = config::AppConfig::load(&cli.config)?;

    match cli.command {
        Command::Info { file } => {
            let bytes = std::fs::read(&file)?;
            let (width, height) = inspect_dimensions(&bytes)?;
            let format = detect_format(&bytes)?;
            output::print_lines(&output::format_info(&file, width, height, format));
        }
        Command::Apply {
            input,
            output: out_path,
            ops,
            ops_file,
            format,
            quality,
        } => {
            let bytes = std::fs::read(&input)?;
            let mut session = EditSession::new(bytes);

            if let Some(path) = ops_file {
                let listed: Vec<EditOp> = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
                for op in listed {
                    session.append(op)?;
                }
            }
            for raw in &ops {
                session.append(raw.parse::<EditOp>()?)?;
            }

            let requested = resolve_format(format.as_deref(), &out_path, &session)?;
            let quality = Quality::new(quality.unwrap_or(app_config.export.quality));

            let result = session.render(&RasterCodec::new(), requested, quality)?;
            std::fs::write(&out_path, &result.bytes)?;
            output::print_lines(&output::format_apply(
                &out_path,
                session.history(),
                requested,
                &result,
            ));
        }
        Command::Thumbs {
            inputs,
            output: out_dir,
        } => {
            let files = collect_image_files(&inputs)?;
            if files.is_empty() {
                return Err("no image files found in the given inputs".into());
            }
            std::fs::create_dir_all(&out_dir)?;

            let cache = ThumbnailCache::with_dimensions(
                app_config.thumbnails.width,
                app_config.thumbnails.height,
            );
            let codec = RasterCodec::new();

            let lines: Vec<String> = files
                .par_iter()
                .map(|path| {
                    let status = match generate_thumbnail(&codec, &cache, path, &out_dir) {
                        Ok(thumb_path) => format!("→ {}", thumb_path.display()),
                        Err(e) => format!("failed ({e})"),
                    };
                    output::format_thumb_line(path, &status)
                })
                .collect();

            println!("Thumbnails ({}x{})", cache.dimensions().0, cache.dimensions().1);
            output::print_lines(&lines);
            println!("{} source file(s), {} distinct image(s)", files.len(), cache.len());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config());
        }
    }

    Ok(())
}

/// Export format resolution: explicit flag, then output extension, then the
/// log's last convert entry, then the source format.
fn resolve_format(
    flag: Option<&str>,
    out_path: &Path,
    session: &EditSession,
) -> Result<OutputFormat, Box<dyn std::error::Error>> {
    if let Some(name) = flag {
        return Ok(name.parse::<OutputFormat>()?);
    }
    if let Some(format) = out_path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
    {
        return Ok(format);
    }
    if let Some(format) = session.chosen_format() {
        return Ok(format);
    }
    Ok(detect_format(session.original())?)
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| OutputFormat::from_extension(e).is_some())
}

/// Expand files and directories into a flat list of image files.
fn collect_image_files(inputs: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in walkdir::WalkDir::new(input).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() && is_image_file(entry.path()) {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}

fn generate_thumbnail(
    codec: &RasterCodec,
    cache: &ThumbnailCache,
    source: &Path,
    out_dir: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(source)?;
    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let entry = cache.get_or_create(codec, &content_key(&bytes), &filename, &bytes)?;

    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let thumb_path = out_dir.join(format!("{stem}-thumb.png"));
    std::fs::write(&thumb_path, &entry.bytes)?;
    Ok(thumb_path)
}
