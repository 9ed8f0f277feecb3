//! Error types.
//!
//! [`DrillError`] covers construction and loading (content, config, requests).
//! [`Rejected`] is the outcome of a session transition whose precondition does
//! not hold; it never leaves the session in a changed state.

use std::path::PathBuf;

use thiserror::Error;

use crate::drill_engine::models::DrillMode;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DrillError {
    #[error("drill set `{key}` has no items")]
    EmptyDrillSet { key: String },
    #[error("no {mode} content for `{key}`")]
    NoContent { mode: DrillMode, key: String },
    #[error("unknown topic `{0}`")]
    UnknownTopic(String),
    #[error("unknown drill mode `{0}`")]
    UnknownMode(String),
    #[error("unknown classification category `{0}`")]
    UnknownCategory(String),
    #[error("invalid content item `{id}`: {reason}")]
    InvalidContent { id: String, reason: String },
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// TOML that did not come from a file, e.g. the embedded content.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Why a session transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("the current item is already revealed")]
    Locked,
    #[error("the current item has not been revealed yet")]
    NotRevealed,
    #[error("nothing has been selected")]
    NoSelection,
    #[error("choice is not one of the item's options")]
    InvalidChoice,
    #[error("the session is complete; restart to practise again")]
    Completed,
    #[error("already at the last item")]
    AtEnd,
    #[error("index is outside the drill set")]
    OutOfRange,
    #[error("not available in this mode")]
    Unsupported,
}
