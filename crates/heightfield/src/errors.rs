use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("Invalid permutation table: {0}")]
    InvalidTable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TerrainError>;
