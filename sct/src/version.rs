use crate::format::{CAMERA_FRAME_SIZE, HEADER_SIZE, SCT_FPS};

pub fn print_cli_version_banner(tool_name: &str, version: &str) {
    println!("{tool_name}");
    println!("License: GNU AGPL v3 (AGPL-3.0-only)");
    println!();

    println!("\tVersion:     {version}");
    println!("\tLayout:      {HEADER_SIZE}-byte header, {CAMERA_FRAME_SIZE}-byte records @ {SCT_FPS} fps");
}
