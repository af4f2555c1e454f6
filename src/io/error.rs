use super::Format;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at position {position})")]
    Parse {
        format: Format,
        position: usize,
        details: String,
    },

    #[error("failed to read CSV data: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("failed to serialize JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn parse(format: Format, position: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            position,
            details: details.into(),
        }
    }
}
