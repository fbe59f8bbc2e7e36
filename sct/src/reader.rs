use std::fs::File;
use std::io::{BufReader, Cursor, ErrorKind, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{Result, SctError};
use crate::format::{CAMERA_FRAME_SIZE, HEADER_SIZE};
use crate::frame::CameraFrame;
use crate::header::CaptureHeader;

/// A reader that transparently handles both plain captures and gzip-compressed `.gz` files.
pub enum SctReader {
    File(BufReader<File>),
    Memory(Cursor<Vec<u8>>),
}

impl Read for SctReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            SctReader::File(r) => r.read(buf),
            SctReader::Memory(r) => r.read(buf),
        }
    }
}

/// Open a capture file. Paths ending in `.gz` are fully decompressed into memory.
pub fn open_sct(path: &Path) -> std::io::Result<SctReader> {
    let is_gz = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let file = File::open(path)?;
    if is_gz {
        let mut decoder = GzDecoder::new(file);
        let mut buf = Vec::new();
        decoder.read_to_end(&mut buf)?;
        Ok(SctReader::Memory(Cursor::new(buf)))
    } else {
        Ok(SctReader::File(BufReader::new(file)))
    }
}

/// A fully decoded capture.
#[derive(Debug, Clone, serde::Serialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct CaptureDataset {
    /// Path the capture was read from, as given by the caller.
    pub source_path: String,
    pub header: CaptureHeader,
    /// Frames in file order.
    pub frames: Vec<CameraFrame>,
}

impl CaptureDataset {
    pub fn first_timestamp(&self) -> Option<f64> {
        self.frames.first().map(|f| f.timestamp)
    }

    /// Seconds between the first and last frame (0 for fewer than two frames).
    pub fn duration(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => 0.0,
        }
    }
}

/// Decode a capture from a reader: the header, then every complete camera
/// record until the stream runs out. A partial trailing record is dropped.
pub fn parse_sct<R: Read>(reader: &mut R, source_path: &str) -> Result<CaptureDataset> {
    let mut hdr_buf = [0u8; HEADER_SIZE];
    let got = read_full(reader, &mut hdr_buf)?;
    if got < HEADER_SIZE {
        return Err(SctError::TruncatedHeader {
            expected: HEADER_SIZE,
            got,
        });
    }
    let header = CaptureHeader::decode(&hdr_buf);

    let mut frames = Vec::new();
    let mut rec_buf = [0u8; CAMERA_FRAME_SIZE];
    loop {
        let n = read_full(reader, &mut rec_buf)?;
        if n < CAMERA_FRAME_SIZE {
            if n > 0 {
                log::debug!(
                    "Ignoring {} trailing bytes after record #{}",
                    n,
                    frames.len()
                );
            }
            break;
        }
        frames.push(CameraFrame::decode(&rec_buf));
    }

    if header.frame_count >= 0 && header.frame_count as usize != frames.len() {
        log::debug!(
            "Header declares {} frames, decoded {}",
            header.frame_count,
            frames.len()
        );
    }

    Ok(CaptureDataset {
        source_path: source_path.to_string(),
        header,
        frames,
    })
}

/// Open and decode the capture at `path`.
pub fn read_sct(path: &Path) -> Result<CaptureDataset> {
    let source_path = path.to_string_lossy();
    let mut reader = open_sct(path).map_err(|source| SctError::Open {
        path: source_path.to_string(),
        source,
    })?;
    parse_sct(&mut reader, &source_path)
}

/// Fill `buf` as far as the reader allows, returning the number of bytes read.
/// Only returns fewer than `buf.len()` bytes at end of stream.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{RawCameraFrame, Vec3};

    fn header() -> CaptureHeader {
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

    fn raw_frame(timestamp: f64, x: f32) -> RawCameraFrame {
        RawCameraFrame {
            timestamp,
            position: Vec3::new(x, 0.0, 0.0),
            ..Default::default()
        }
    }

    fn capture_bytes(frames: &[RawCameraFrame]) -> Vec<u8> {
        let mut data = header().encode().to_vec();
        for f in frames {
            data.extend_from_slice(&f.encode());
        }
        data
    }

    #[test]
    fn test_parse_frames_in_file_order() {
        let raws: Vec<_> = (0..5).map(|i| raw_frame(i as f64 * 0.1, i as f32)).collect();
        let data = capture_bytes(&raws);
        let ds = parse_sct(&mut Cursor::new(data), "mem.dat").unwrap();

        assert_eq!(ds.source_path, "mem.dat");
        assert_eq!(ds.header, header());
        assert_eq!(ds.frames.len(), 5);
        for (i, f) in ds.frames.iter().enumerate() {
            assert_eq!(f.position.x, i as f32);
        }
    }

    #[test]
    fn test_partial_trailing_record_is_dropped() {
        let raws = [raw_frame(0.0, 1.0), raw_frame(0.5, 2.0)];
        for extra in [1usize, 20, CAMERA_FRAME_SIZE - 1] {
            let mut data = capture_bytes(&raws);
            data.extend(std::iter::repeat(0xAB).take(extra));
            let ds = parse_sct(&mut Cursor::new(data), "mem.dat").unwrap();
            assert_eq!(ds.frames.len(), 2, "extra bytes: {extra}");
        }
    }

    #[test]
    fn test_record_count_ignores_declared_frame_count() {
        // Header says 2 frames, file holds 3
        let raws = [raw_frame(0.0, 1.0), raw_frame(0.5, 2.0), raw_frame(1.0, 3.0)];
        let ds = parse_sct(&mut Cursor::new(capture_bytes(&raws)), "mem.dat").unwrap();
        assert_eq!(ds.header.frame_count, 2);
        assert_eq!(ds.frames.len(), 3);
    }

    #[test]
    fn test_header_only_capture_has_no_frames() {
        let ds = parse_sct(&mut Cursor::new(capture_bytes(&[])), "mem.dat").unwrap();
        assert!(ds.frames.is_empty());
        assert_eq!(ds.first_timestamp(), None);
        assert_eq!(ds.duration(), 0.0);
    }

    #[test]
    fn test_truncated_header_is_an_error() {
        let data = header().encode()[..HEADER_SIZE - 1].to_vec();
        match parse_sct(&mut Cursor::new(data), "mem.dat") {
            Err(SctError::TruncatedHeader { expected, got }) => {
                assert_eq!(expected, HEADER_SIZE);
                assert_eq!(got, HEADER_SIZE - 1);
            }
            other => panic!("expected TruncatedHeader, got: {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_truncated_header() {
        let result = parse_sct(&mut Cursor::new(Vec::new()), "mem.dat");
        assert!(matches!(result, Err(SctError::TruncatedHeader { got: 0, .. })));
    }

    #[test]
    fn test_duration_spans_first_to_last() {
        let raws = [raw_frame(10.0, 0.0), raw_frame(10.5, 0.0), raw_frame(12.0, 0.0)];
        let ds = parse_sct(&mut Cursor::new(capture_bytes(&raws)), "mem.dat").unwrap();
        assert_eq!(ds.first_timestamp(), Some(10.0));
        assert_eq!(ds.duration(), 2.0);
    }

    /// Reader that hands out at most 3 bytes per call.
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = buf.len().min(3);
            self.0.read(&mut buf[..n])
        }
    }

    #[test]
    fn test_short_reads_are_reassembled() {
        let raws = [raw_frame(0.0, 1.0), raw_frame(0.5, 2.0)];
        let mut reader = Trickle(Cursor::new(capture_bytes(&raws)));
        let ds = parse_sct(&mut reader, "mem.dat").unwrap();
        assert_eq!(ds.frames.len(), 2);
        assert_eq!(ds.frames[1].position.x, 2.0);
    }
}
