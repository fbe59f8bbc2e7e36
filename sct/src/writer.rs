use std::io::Write;

use crate::frame::RawCameraFrame;
use crate::header::CaptureHeader;

/// Write a capture in the on-disk layout: header followed by one record per frame.
///
/// Used to synthesise fixtures; the device is the only real producer of these files.
pub fn write_sct<W: Write>(
    writer: &mut W,
    header: &CaptureHeader,
    frames: &[RawCameraFrame],
) -> std::io::Result<()> {
    writer.write_all(&header.encode())?;
    for frame in frames {
        writer.write_all(&frame.encode())?;
    }
    writer.flush()
}
