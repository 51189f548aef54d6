use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("tracker failed to persist data: {0}")]
    TrackerIoFailure(String),
}

pub type Result<T> = std::result::Result<T, Error>;
