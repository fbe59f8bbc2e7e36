pub mod error;
pub mod export;
pub mod usda;
pub mod video;

pub use error::{ExportError, Result};
pub use export::{build_stage, export_capture, output_path, time_sample_index};
