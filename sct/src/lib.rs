pub mod error;
pub mod format;
pub mod frame;
pub mod header;
pub mod reader;
pub mod version;
pub mod writer;
