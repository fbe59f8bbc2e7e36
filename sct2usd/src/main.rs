use std::path::{Path, PathBuf};

use clap::Parser;

use sct_usd::video::FrameExtractor;

/// Tool to convert binary .dat SCT (Spatial Camera Tracker) data to USD (Universal Scene Description)
#[derive(Parser)]
#[command(name = "sct2usd")]
struct Args {
    /// The .dat file containing tracking information
    #[arg(required_unless_present = "version")]
    input_data: Option<PathBuf>,

    /// Output path for USD file
    #[arg(short = 'o', long = "output_usd")]
    output_usd: Option<PathBuf>,

    /// Video path
    #[arg(short = 'v', long = "video")]
    video: Option<PathBuf>,

    /// Output image directory
    #[arg(short = 'i', long = "output_images")]
    output_images: Option<PathBuf>,

    /// Display version and quit
    #[arg(long = "version")]
    version: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.version {
        sct::version::print_cli_version_banner("SCT to USD Converter", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let input = args
        .input_data
        .as_deref()
        .ok_or("INPUT_DATA is required unless --version is specified")?;

    convert(input, args.output_usd.as_deref())?;

    match (&args.video, &args.output_images) {
        (Some(video), Some(output_dir)) => {
            log::info!(
                "Extracting frames from {} into {}...",
                video.display(),
                output_dir.display()
            );
            FrameExtractor::default().extract_frames(video, output_dir)?;
        }
        (Some(_), None) | (None, Some(_)) => {
            log::warn!("Frame extraction needs both --video and --output_images; skipping");
        }
        (None, None) => {}
    }

    Ok(())
}

/// Decode the capture at `input` and write its camera stage.
fn convert(input: &Path, output: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    log::info!("Converting {}...", input.display());

    let data = sct::reader::read_sct(input)?;
    log::info!(
        "\tFrames: {} (header declares {})",
        data.frames.len(),
        data.header.frame_count
    );
    log::info!("\tDuration: {:.3}s", data.duration());
    if data.frames.is_empty() {
        log::warn!("Capture contains no camera frames; the camera will not be animated");
    }

    let written = sct_usd::export_capture(&data, output)?;
    log::info!("Wrote {}", written.display());
    Ok(written)
}
