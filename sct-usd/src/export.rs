use std::path::{Path, PathBuf};

use sct::format::{SCT_FPS, TIME_SAMPLE_LEAD_IN};
use sct::reader::CaptureDataset;

use crate::error::{ExportError, Result};
use crate::usda::Stage;

/// Scene path of the exported camera.
pub const CAMERA_PATH: &str = "/capture/camera";

/// Output filename used when the caller doesn't name one.
pub const DEFAULT_OUTPUT: &str = "output.usda";

/// Focal length in the capture header is stored in tenths of a scene unit.
const FOCAL_LENGTH_DIVISOR: f32 = 10.0;

/// Map a frame timestamp onto an integer time code relative to the first frame.
///
/// Out-of-range timestamps clamp to the `i64` range rather than wrapping.
pub fn time_sample_index(timestamp: f64, first_timestamp: f64) -> i64 {
    (((timestamp - first_timestamp) * SCT_FPS).ceil() as i64).saturating_add(TIME_SAMPLE_LEAD_IN)
}

/// Path the stage is written to: `output` if given, otherwise [`DEFAULT_OUTPUT`]
/// in the working directory.
pub fn output_path(output: Option<&Path>) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}

/// Build the camera stage for a decoded capture.
///
/// A capture without frames produces a camera with static attributes only.
pub fn build_stage(data: &CaptureDataset) -> Result<Stage> {
    let mut stage = Stage::create_in_memory();
    stage.set_comment(format!(
        "Converted USD Stage from SCT {} file",
        data.source_path
    ));
    stage.set_frames_per_second(SCT_FPS);

    let mut cam = stage
        .define_camera(CAMERA_PATH)
        .ok_or(ExportError::InvalidPrimPath { path: CAMERA_PATH })?;

    cam.set_horizontal_aperture(data.header.horizontal_fov);
    cam.set_vertical_aperture(data.header.vertical_fov);
    cam.set_focal_length(data.header.focal_length_x / FOCAL_LENGTH_DIVISOR);

    if let Some(t0) = data.first_timestamp() {
        for frame in &data.frames {
            let time = time_sample_index(frame.timestamp, t0);
            let p = frame.position;
            let r = frame.rotation;
            cam.set_translate(time, [p.x as f64, p.y as f64, p.z as f64]);
            cam.set_rotate_xyz(time, [r.x, r.y, r.z]);
        }
    }

    Ok(stage)
}

/// Build and write the stage, returning the path it was written to.
pub fn export_capture(data: &CaptureDataset, output: Option<&Path>) -> Result<PathBuf> {
    let path = output_path(output);

    let stage = build_stage(data)?;
    stage.export(&path).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    log::debug!(
        "Wrote {} camera samples to {}",
        data.frames.len(),
        path.display()
    );
    Ok(path)
}
