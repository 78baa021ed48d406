//! Command line shell around the `rawyuv` decode core: converts frames of a
//! raw I420/NV12 file into bitmap images.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use rawyuv::{FrameDecoder, FrameFormat, FrameLayout, FrameSource, GrayImage, RgbImage};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    I420,
    Nv12,
}

impl From<Format> for FrameFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::I420 => FrameFormat::I420,
            Format::Nv12 => FrameFormat::NV12,
        }
    }
}

/// Convert raw YUV frames into bitmap images
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Raw frame file, a headerless sequence of fixed-size frames
    file: PathBuf,

    /// Frame width in pixels
    width: usize,

    /// Frame height in pixels
    height: usize,

    /// Frame index to convert
    #[arg(long, default_value_t = 0, conflicts_with = "all")]
    frame: u64,

    /// Convert every frame in the file
    #[arg(long)]
    all: bool,

    /// Frame layout of the input
    #[arg(long, value_enum, default_value_t = Format::I420)]
    format: Format,

    /// Write grayscale images instead of RGB
    #[arg(long)]
    gray: bool,

    /// Log a digest of every frame's raw bytes
    #[arg(long)]
    checksum: bool,

    /// Directory for the output images, defaults to the input file's directory
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let layout = FrameLayout::new(args.width, args.height, args.format.into())?;
    let source = FrameSource::open(&args.file, layout)
        .with_context(|| format!("failed to open {}", args.file.display()))?;

    tracing::info!(
        frame_count = source.frame_count(),
        frame_size = layout.frame_size(),
        "opened {}",
        args.file.display()
    );

    let mut decoder = FrameDecoder::new(source);

    let indices: Vec<u64> = if args.all {
        (0..decoder.frame_count()).collect()
    } else {
        vec![args.frame]
    };

    for index in indices {
        let frame = decoder.source().read_frame(index)?;

        if args.checksum {
            tracing::info!(index, digest = %rawyuv::frame_digest(frame.as_bytes()));
        }

        let path = output_path(&args, index);

        if args.gray {
            save_gray(rawyuv::decode_gray(&frame), &path)?;
        } else {
            #[cfg(feature = "multi-thread")]
            let rgb = rawyuv::decode_rgb_multi_thread(&frame);
            #[cfg(not(feature = "multi-thread"))]
            let rgb = rawyuv::decode_rgb(&frame);

            save_rgb(rgb, &path)?;
        }

        tracing::info!(index, "wrote {}", path.display());
    }

    Ok(())
}

fn output_path(args: &Args, index: u64) -> PathBuf {
    let stem = args
        .file
        .file_stem()
        .unwrap_or(args.file.as_os_str())
        .to_string_lossy();

    let dir = args
        .out_dir
        .clone()
        .or_else(|| args.file.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    dir.join(format!("{stem}_{index}.bmp"))
}

fn save_rgb(image: RgbImage, path: &Path) -> anyhow::Result<()> {
    // Frames wide enough for display to struggle with get halved first
    #[cfg(feature = "resize")]
    let image = rawyuv::Preview::new().downscale_for_preview(image)?;

    let (width, height) = (image.width() as u32, image.height() as u32);

    image::RgbImage::from_raw(width, height, image.into_data())
        .context("decoded buffer has the wrong size for its dimensions")?
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}

fn save_gray(image: GrayImage, path: &Path) -> anyhow::Result<()> {
    let (width, height) = (image.width() as u32, image.height() as u32);

    image::GrayImage::from_raw(width, height, image.into_data())
        .context("decoded buffer has the wrong size for its dimensions")?
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}
