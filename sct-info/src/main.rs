use std::path::PathBuf;

use clap::Parser;
use sct::reader::CaptureDataset;
use sct_usd::time_sample_index;

#[derive(Parser)]
#[command(name = "sct-info", about = "Parse and display SCT capture contents")]
struct Args {
    /// Input .dat capture file
    #[arg(required_unless_present_any = ["schema", "version"])]
    input: Option<PathBuf>,

    /// Only show the header
    #[arg(long)]
    header_only: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Print JSON schema for the output format and exit
    #[arg(long)]
    schema: bool,

    /// Display version and quit
    #[arg(long)]
    version: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reset SIGPIPE to default so piped output (e.g. head/tail) exits cleanly
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    let args = Args::parse();

    if args.version {
        sct::version::print_cli_version_banner("SCT Info Tool", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.schema {
        let schema = schemars::schema_for!(CaptureDataset);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    let input = args.input.ok_or("input file required")?;
    let data = sct::reader::read_sct(&input)?;

    if args.json {
        println!("{}", serde_json::to_string(&data)?);
        return Ok(());
    }

    print_header(&data);
    if args.header_only {
        return Ok(());
    }

    println!();
    println!(
        "{:>6} {:>14} {:>6} {:>32} {:>32} {:>10} {:>12}",
        "#", "TIMESTAMP", "TC", "POSITION", "ROTATION (DEG)", "EXTRA", "TRAILING"
    );

    let t0 = data.first_timestamp().unwrap_or(0.0);
    for (idx, frame) in data.frames.iter().enumerate() {
        let p = frame.position;
        let r = frame.rotation;
        println!(
            "{:>6} {:>14.6} {:>6} {:>32} {:>32} {:>10} {:>12}",
            idx,
            frame.timestamp,
            time_sample_index(frame.timestamp, t0),
            format!("({}, {}, {})", p.x, p.y, p.z),
            format!("({}, {}, {})", r.x, r.y, r.z),
            frame.extra,
            frame.trailing,
        );
    }

    Ok(())
}

fn print_header(data: &CaptureDataset) {
    let h = &data.header;
    println!("Source:             {}", data.source_path);
    println!("Version:            {}", h.version);
    println!("Frame count:        {} declared, {} decoded", h.frame_count, data.frames.len());
    println!("Device orientation: {}", h.device_orientation);
    println!("Capture type:       {}", h.capture_type);
    println!("Aperture (H x V):   {} x {}", h.horizontal_fov, h.vertical_fov);
    println!("Focal length X/Y:   {} / {}", h.focal_length_x, h.focal_length_y);
    println!("Duration:           {:.3}s", data.duration());
}
