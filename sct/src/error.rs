use thiserror::Error;

#[derive(Error, Debug)]
pub enum SctError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open capture '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("truncated header: expected {expected} bytes, got {got}")]
    TruncatedHeader { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, SctError>;
