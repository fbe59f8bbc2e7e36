use std::fs::File;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use sct::error::SctError;
use sct::frame::{RawCameraFrame, Vec3};
use sct::header::CaptureHeader;
use sct::reader::read_sct;
use sct::writer::write_sct;

fn sample_header() -> CaptureHeader {
    CaptureHeader {
        version: 1,
        frame_count: 2,
        device_orientation: 0,
        horizontal_fov: 20.0,
        vertical_fov: 15.0,
        focal_length_x: 350.0,
        focal_length_y: 350.0,
        capture_type: 0,
    }
}

fn sample_frames() -> Vec<RawCameraFrame> {
    vec![
        RawCameraFrame {
            timestamp: 0.0,
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation_rad: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, std::f32::consts::PI),
            extra: 0.0,
            trailing: 0.0,
        },
        RawCameraFrame {
            timestamp: 0.5,
            position: Vec3::new(4.0, 5.0, 6.0),
            rotation_rad: Vec3::new(std::f32::consts::PI, 0.0, std::f32::consts::FRAC_PI_2),
            extra: 1.0,
            trailing: 2.0,
        },
    ]
}

fn write_capture(path: &Path) {
    let mut file = File::create(path).expect("failed to create capture");
    write_sct(&mut file, &sample_header(), &sample_frames()).expect("failed to write capture");
}

#[test]
fn test_read_capture_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.dat");
    write_capture(&path);

    let ds = read_sct(&path).expect("failed to decode capture");
    assert_eq!(ds.source_path, path.to_string_lossy());
    assert_eq!(ds.header, sample_header());
    assert_eq!(ds.frames.len(), 2);
    assert_eq!(ds.frames[0].rotation, Vec3::new(0.0, 90.0, -180.0));
    assert_eq!(ds.frames[1].position, Vec3::new(4.0, 5.0, 6.0));
    assert_eq!(ds.frames[1].rotation, Vec3::new(180.0, 0.0, -90.0));
    assert_eq!(ds.frames[1].extra, 1.0);
    assert_eq!(ds.frames[1].trailing, 2.0);
}

#[test]
fn test_record_count_is_floor_of_remaining_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.dat");
    write_capture(&path);
    {
        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(&[0u8; 30]).unwrap();
    }

    let size = std::fs::metadata(&path).unwrap().len() as usize;
    let expected = (size - sct::format::HEADER_SIZE) / sct::format::CAMERA_FRAME_SIZE;

    let ds = read_sct(&path).unwrap();
    assert_eq!(ds.frames.len(), expected);
    assert_eq!(ds.frames.len(), 2);
}

#[test]
fn test_read_gzip_capture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.dat.gz");
    let file = File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    write_sct(&mut encoder, &sample_header(), &sample_frames()).unwrap();
    encoder.finish().unwrap();

    let ds = read_sct(&path).expect("failed to decode gzip capture");
    assert_eq!(ds.frames.len(), 2);
    assert_eq!(ds.frames[0].position, Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_missing_file_reports_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.dat");

    match read_sct(&path) {
        Err(SctError::Open { path: p, source }) => {
            assert!(p.ends_with("does-not-exist.dat"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Open error, got: {:?}", other),
    }
}

#[test]
fn test_dataset_serialises_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("capture.dat");
    write_capture(&path);

    let ds = read_sct(&path).unwrap();
    let json: serde_json::Value = serde_json::to_value(&ds).unwrap();
    assert_eq!(json["header"]["focalLengthX"], 350.0);
    assert_eq!(json["frames"].as_array().unwrap().len(), 2);
    assert_eq!(json["frames"][1]["timestamp"], 0.5);
}
