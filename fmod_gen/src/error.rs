use fmod_types::{DescriptorError, LiteralError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GenError {
    /// The model is inconsistent (normally caught by the loader already).
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// A literal does not match any form its kind can be rendered from.
    #[error("cannot format data for {owner}: {source}")]
    Literal {
        owner: String,
        #[source]
        source: LiteralError,
    },

    #[error("failed to format generated text")]
    Fmt(#[from] std::fmt::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
