//! Error type shared by configuration, storage, and DOM glue.
//!
//! None of these are fatal. The controller is a best-effort enhancement layer,
//! so callers log the error and carry on with the remaining behaviours.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FxError {
    #[error("config parse failed: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("preference storage: {0}")]
    Storage(String),
    #[error("dom: {0}")]
    Dom(String),
}
