use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Browser error: {0}")]
    Browser(String),
    #[error("Navigation error: {0}")]
    Navigation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Selector error: {0}")]
    Selector(String),
    #[error("no rows could be extracted from the price table")]
    ExtractionEmpty,
}

pub type Result<T> = std::result::Result<T, HarvestError>;
