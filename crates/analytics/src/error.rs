use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    EmptyInput(String),

    #[error("Calculation error: {0}")]
    Calculation(String),
}
