use crate::format::{
    read_f32_le, read_f64_le, write_f32_le, write_f64_le, CAMERA_FRAME_SIZE, FRM_EXTRA,
    FRM_POS_X, FRM_POS_Y, FRM_POS_Z, FRM_ROT_X, FRM_ROT_Y, FRM_ROT_Z, FRM_TIMESTAMP,
    FRM_TRAILING,
};

/// Three-component vector as stored by the device (single precision).
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A decoded 44-byte camera-transform record.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct CameraFrame {
    /// Capture time in seconds.
    pub timestamp: f64,
    /// Camera position in the device's linear unit.
    pub position: Vec3,
    /// Camera rotation in degrees. Z is negated relative to the device.
    pub rotation: Vec3,
    /// Eighth unpacked value; meaning unknown, kept for inspection.
    pub extra: f32,
    /// Trailing double; meaning unknown, kept for inspection.
    pub trailing: f64,
}

/// Camera frame exactly as laid out on disk (rotation in radians, Z not negated).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawCameraFrame {
    pub timestamp: f64,
    pub position: Vec3,
    pub rotation_rad: Vec3,
    pub extra: f32,
    pub trailing: f64,
}

/// Convert a device rotation angle (radians, f32) to scene degrees.
///
/// The conversion happens in double precision and is narrowed afterwards, so
/// quarter and half turns land exactly on 90 and 180.
pub fn radians_to_degrees(rad: f32) -> f32 {
    (rad as f64).to_degrees() as f32
}

impl RawCameraFrame {
    pub fn decode(buf: &[u8; CAMERA_FRAME_SIZE]) -> Self {
        RawCameraFrame {
            timestamp: read_f64_le(buf, FRM_TIMESTAMP),
            position: Vec3::new(
                read_f32_le(buf, FRM_POS_X),
                read_f32_le(buf, FRM_POS_Y),
                read_f32_le(buf, FRM_POS_Z),
            ),
            rotation_rad: Vec3::new(
                read_f32_le(buf, FRM_ROT_X),
                read_f32_le(buf, FRM_ROT_Y),
                read_f32_le(buf, FRM_ROT_Z),
            ),
            extra: read_f32_le(buf, FRM_EXTRA),
            trailing: read_f64_le(buf, FRM_TRAILING),
        }
    }

    pub fn encode(&self) -> [u8; CAMERA_FRAME_SIZE] {
        let mut buf = [0u8; CAMERA_FRAME_SIZE];
        write_f64_le(&mut buf, FRM_TIMESTAMP, self.timestamp);
        write_f32_le(&mut buf, FRM_POS_X, self.position.x);
        write_f32_le(&mut buf, FRM_POS_Y, self.position.y);
        write_f32_le(&mut buf, FRM_POS_Z, self.position.z);
        write_f32_le(&mut buf, FRM_ROT_X, self.rotation_rad.x);
        write_f32_le(&mut buf, FRM_ROT_Y, self.rotation_rad.y);
        write_f32_le(&mut buf, FRM_ROT_Z, self.rotation_rad.z);
        write_f32_le(&mut buf, FRM_EXTRA, self.extra);
        write_f64_le(&mut buf, FRM_TRAILING, self.trailing);
        buf
    }

    /// Apply the unit and axis conversions used everywhere downstream.
    pub fn to_camera_frame(&self) -> CameraFrame {
        CameraFrame {
            timestamp: self.timestamp,
            position: self.position,
            rotation: Vec3::new(
                radians_to_degrees(self.rotation_rad.x),
                radians_to_degrees(self.rotation_rad.y),
                radians_to_degrees(-self.rotation_rad.z),
            ),
            extra: self.extra,
            trailing: self.trailing,
        }
    }
}

impl CameraFrame {
    pub fn decode(buf: &[u8; CAMERA_FRAME_SIZE]) -> Self {
        RawCameraFrame::decode(buf).to_camera_frame()
    }
}
