use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use sct::format::SCT_FPS;

use crate::error::{ExportError, Result};

/// Filename pattern for extracted frames, numbered from 1.
pub const FRAME_PATTERN: &str = "frame_%04d.png";

/// Extracts still frames from a reference video with an external encoder.
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    /// Executable to run, resolved on `PATH`.
    pub program: OsString,
    pub fps: f64,
}

impl Default for FrameExtractor {
    fn default() -> Self {
        Self {
            program: OsString::from("ffmpeg"),
            fps: SCT_FPS,
        }
    }
}

impl FrameExtractor {
    /// Build the encoder invocation. Arguments are passed as-is, never through a shell.
    pub fn command(&self, video: &Path, output_dir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-i")
            .arg(video)
            .arg("-vf")
            .arg(format!("fps={}", self.fps))
            .arg(output_dir.join(FRAME_PATTERN));
        cmd
    }

    /// Create `output_dir` and write numbered frames into it.
    ///
    /// Fails if the directory already exists. Whether the encoder itself
    /// succeeds is not checked.
    pub fn extract_frames(&self, video: &Path, output_dir: &Path) -> Result<()> {
        create_output_dir(output_dir)?;

        let mut cmd = self.command(video, output_dir);
        cmd.stdin(Stdio::null());

        log::debug!("Running {:?}", cmd);
        match cmd.status() {
            Ok(status) => log::debug!("{} exited with {}", self.program.to_string_lossy(), status),
            Err(e) => log::debug!("Could not run {}: {}", self.program.to_string_lossy(), e),
        }
        Ok(())
    }
}

/// Create `dir` and any missing parents, refusing to reuse an existing directory.
fn create_output_dir(dir: &Path) -> Result<()> {
    if let Some(parent) = dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::create_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => ExportError::DirectoryExists {
            path: dir.to_path_buf(),
        },
        _ => ExportError::Io(e),
    })
}
