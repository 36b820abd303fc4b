//! Core error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant — whichever keeps
//! error sites clean.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
