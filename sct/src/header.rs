use crate::format::{
    read_f32_le, read_i32_le, write_f32_le, write_i32_le, HDR_CAPTURE_TYPE,
    HDR_DEVICE_ORIENTATION, HDR_FOCAL_LENGTH_X, HDR_FOCAL_LENGTH_Y, HDR_FRAME_COUNT,
    HDR_HORIZONTAL_FOV, HDR_VERSION, HDR_VERTICAL_FOV, HEADER_SIZE,
};

/// Fixed 32-byte header at the start of every capture file.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CaptureHeader {
    /// Format version. Stored but not interpreted.
    pub version: i32,
    /// Frame count declared by the device. Informational only; the number of
    /// decoded records is authoritative.
    pub frame_count: i32,
    pub device_orientation: i32,
    /// Horizontal sensor aperture, already in scene aperture units.
    #[serde(rename = "horizontalFOV")]
    pub horizontal_fov: f32,
    /// Vertical sensor aperture, already in scene aperture units.
    #[serde(rename = "verticalFOV")]
    pub vertical_fov: f32,
    /// Focal length along X in tenths of a millimetre.
    pub focal_length_x: f32,
    pub focal_length_y: f32,
    pub capture_type: i32,
}

impl CaptureHeader {
    pub fn decode(buf: &[u8; HEADER_SIZE]) -> Self {
        CaptureHeader {
            version: read_i32_le(buf, HDR_VERSION),
            frame_count: read_i32_le(buf, HDR_FRAME_COUNT),
            device_orientation: read_i32_le(buf, HDR_DEVICE_ORIENTATION),
            horizontal_fov: read_f32_le(buf, HDR_HORIZONTAL_FOV),
            vertical_fov: read_f32_le(buf, HDR_VERTICAL_FOV),
            focal_length_x: read_f32_le(buf, HDR_FOCAL_LENGTH_X),
            focal_length_y: read_f32_le(buf, HDR_FOCAL_LENGTH_Y),
            capture_type: read_i32_le(buf, HDR_CAPTURE_TYPE),
        }
    }

    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        write_i32_le(&mut buf, HDR_VERSION, self.version);
        write_i32_le(&mut buf, HDR_FRAME_COUNT, self.frame_count);
        write_i32_le(&mut buf, HDR_DEVICE_ORIENTATION, self.device_orientation);
        write_f32_le(&mut buf, HDR_HORIZONTAL_FOV, self.horizontal_fov);
        write_f32_le(&mut buf, HDR_VERTICAL_FOV, self.vertical_fov);
        write_f32_le(&mut buf, HDR_FOCAL_LENGTH_X, self.focal_length_x);
        write_f32_le(&mut buf, HDR_FOCAL_LENGTH_Y, self.focal_length_y);
        write_i32_le(&mut buf, HDR_CAPTURE_TYPE, self.capture_type);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_header_fields_in_order() {
        let buf: [u8; HEADER_SIZE] = [
            // version = 1
            0x01, 0x00, 0x00, 0x00,
            // frameCount = 2
            0x02, 0x00, 0x00, 0x00,
            // deviceOrientation = 3
            0x03, 0x00, 0x00, 0x00,
            // horizontalFOV = 20.0
            0x00, 0x00, 0xa0, 0x41,
            // verticalFOV = 15.0
            0x00, 0x00, 0x70, 0x41,
            // focalLengthX = 350.0
            0x00, 0x00, 0xaf, 0x43,
            // focalLengthY = 350.0
            0x00, 0x00, 0xaf, 0x43,
            // captureType = -1
            0xff, 0xff, 0xff, 0xff,
        ];
        let hdr = CaptureHeader::decode(&buf);
        assert_eq!(hdr.version, 1);
        assert_eq!(hdr.frame_count, 2);
        assert_eq!(hdr.device_orientation, 3);
        assert_eq!(hdr.horizontal_fov, 20.0);
        assert_eq!(hdr.vertical_fov, 15.0);
        assert_eq!(hdr.focal_length_x, 350.0);
        assert_eq!(hdr.focal_length_y, 350.0);
        assert_eq!(hdr.capture_type, -1);

        assert_eq!(hdr.encode(), buf);
    }

    #[test]
    fn test_header_json_uses_device_field_names() {
        let hdr = CaptureHeader {
            version: 1,
            frame_count: 0,
            device_orientation: 0,
            horizontal_fov: 1.0,
            vertical_fov: 1.0,
            focal_length_x: 1.0,
            focal_length_y: 1.0,
            capture_type: 0,
        };
        let json = serde_json::to_string(&hdr).unwrap();
        assert!(json.contains("\"frameCount\""), "got: {json}");
        assert!(json.contains("\"horizontalFOV\""), "got: {json}");
        assert!(json.contains("\"focalLengthX\""), "got: {json}");
    }
}
