use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid prim path '{path}'")]
    InvalidPrimPath { path: &'static str },

    #[error("output image directory '{}' already exists", path.display())]
    DirectoryExists { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, ExportError>;
