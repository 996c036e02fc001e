// shared/src/lib.rs

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("upstream request failed: {0}")]
    Transport(String),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("malformed upstream response: {0}")]
    Decode(String),
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
