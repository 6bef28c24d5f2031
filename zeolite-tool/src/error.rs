use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZeoError {
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{}: {message}", path.display())]
    BadInput { path: PathBuf, message: String },

    #[error(transparent)]
    Schedule(#[from] zeolite_core::ScheduleError),
}
