/// Capture playback rate in frames per second. Shared by the scene exporter
/// (time code mapping) and video frame extraction.
pub const SCT_FPS: f64 = 60.0;

/// Time code at which the first camera frame lands in an exported scene.
pub const TIME_SAMPLE_LEAD_IN: i64 = 3;

/// Size of the fixed file header in bytes.
pub const HEADER_SIZE: usize = 32;

/// Size of one camera-transform record in bytes.
pub const CAMERA_FRAME_SIZE: usize = 44;

// Header field offsets (all little-endian, no padding).
pub const HDR_VERSION: usize = 0;
pub const HDR_FRAME_COUNT: usize = 4;
pub const HDR_DEVICE_ORIENTATION: usize = 8;
pub const HDR_HORIZONTAL_FOV: usize = 12;
pub const HDR_VERTICAL_FOV: usize = 16;
pub const HDR_FOCAL_LENGTH_X: usize = 20;
pub const HDR_FOCAL_LENGTH_Y: usize = 24;
pub const HDR_CAPTURE_TYPE: usize = 28;

// Camera frame field offsets: f64 timestamp, 7 x f32, f64 trailing.
pub const FRM_TIMESTAMP: usize = 0;
pub const FRM_POS_X: usize = 8;
pub const FRM_POS_Y: usize = 12;
pub const FRM_POS_Z: usize = 16;
pub const FRM_ROT_X: usize = 20;
pub const FRM_ROT_Y: usize = 24;
pub const FRM_ROT_Z: usize = 28;
pub const FRM_EXTRA: usize = 32;
pub const FRM_TRAILING: usize = 36;

const _: () = assert!(HDR_CAPTURE_TYPE + 4 == HEADER_SIZE);
const _: () = assert!(FRM_EXTRA + 4 == FRM_TRAILING);
const _: () = assert!(FRM_TRAILING + 8 == CAMERA_FRAME_SIZE);
const _: () = assert!(CAMERA_FRAME_SIZE == 8 + 7 * 4 + 8);

pub fn read_i32_le(buf: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(field::<4>(buf, offset))
}

pub fn read_f32_le(buf: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(field::<4>(buf, offset))
}

pub fn read_f64_le(buf: &[u8], offset: usize) -> f64 {
    f64::from_le_bytes(field::<8>(buf, offset))
}

pub fn write_i32_le(buf: &mut [u8], offset: usize, val: i32) {
    buf[offset..offset + 4].copy_from_slice(&val.to_le_bytes());
}

pub fn write_f32_le(buf: &mut [u8], offset: usize, val: f32) {
    buf[offset..offset + 4].copy_from_slice(&val.to_le_bytes());
}

pub fn write_f64_le(buf: &mut [u8], offset: usize, val: f64) {
    buf[offset..offset + 8].copy_from_slice(&val.to_le_bytes());
}

/// Copy `N` bytes starting at `offset`. Callers pass fixed-size header/record
/// buffers, so the offsets above are always in range.
fn field<const N: usize>(buf: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&buf[offset..offset + N]);
    out
}
