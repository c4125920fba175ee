//! Error type for ROOT file reading.

use thiserror::Error;

/// Errors produced while reading a ROOT file.
#[derive(Error, Debug)]
pub enum RootError {
    /// I/O error opening or mapping the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the ROOT magic bytes.
    #[error("not a ROOT file (bad magic)")]
    BadMagic,

    /// A read past the end of the available bytes.
    #[error("buffer underflow at offset {offset}: need {need} bytes, have {have}")]
    Underflow {
        /// Read position.
        offset: usize,
        /// Bytes requested.
        need: usize,
        /// Bytes available.
        have: usize,
    },

    /// Failure decoding a compressed basket block.
    #[error("decompression error: {0}")]
    Decompression(String),

    /// Malformed streamer data.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// No object with the requested name in the directory.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// No TTree with the requested name.
    #[error("tree not found: {0}")]
    TreeNotFound(String),

    /// No branch with the requested name in the tree.
    #[error("branch not found: {0}")]
    BranchNotFound(String),

    /// A branch was read with an incompatible access pattern.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
}

/// Result alias for ROOT reading.
pub type Result<T> = std::result::Result<T, RootError>;
