use std::io;

use thiserror::Error;

/// Errors originating from `lazytree` configuration.
///
/// Tree queries and notifications never fail; only loading
/// [`TreeOptions`](crate::TreeOptions) can.
#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed tree options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tree options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, Error>;
