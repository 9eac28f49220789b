use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read order data: {0}")]
    Read(#[from] csv::Error),

    #[error("Malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },
}
