//! Record store error taxonomy.

use crate::codec::CodecError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by record store operations.
///
/// Only `EmptyBatch` and `MissingId` ever reach callers of the public
/// repository API. `Io` and `Codec` are produced internally and absorbed
/// (logged) before the operation returns.
#[derive(Debug)]
pub enum StoreError {
    EmptyBatch,
    MissingId,
    Io { path: PathBuf, source: io::Error },
    Codec(CodecError),
}

impl StoreError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyBatch => "empty_batch",
            Self::MissingId => "missing_id",
            Self::Io { .. } => "io_failed",
            Self::Codec(CodecError::Encode(_)) => "encode_failed",
            Self::Codec(CodecError::Decode(_)) => "decode_failed",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBatch => write!(f, "batch must contain at least one entity"),
            Self::MissingId => write!(f, "identifier must not be empty"),
            Self::Io { path, source } => write!(f, "i/o failure on `{}`: {source}", path.display()),
            Self::Codec(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyBatch | Self::MissingId => None,
            Self::Io { source, .. } => Some(source),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<CodecError> for StoreError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}
