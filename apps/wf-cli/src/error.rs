//! Error types for the command-line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Project(#[from] wf_project::ProjectError),

    #[error("Refusing to overwrite existing file: {path} (use --force)")]
    Exists { path: PathBuf },

    #[error("Failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
