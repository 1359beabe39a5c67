//! Error types for cashweb-store

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Malformed collection in {location}: {message}")]
    MalformedCollection {
        location: String,
        message: String,
    },

    #[error("IO error")]
    IoError(#[from] io::Error),
}
