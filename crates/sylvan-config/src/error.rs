//! What can go wrong between the tree settings on disk and a usable [`Config`].
//!
//! [`Config`]: crate::Config

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot determine a per-user config directory")]
    NoConfigDir,

    /// Reading or writing `path` (the settings file or its directory).
    #[error("cannot {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed tree settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("cannot encode tree settings: {0}")]
    Encode(#[from] ron::Error),

    /// Parsed fine, but `field` is out of range.
    #[error("`{field}` rejected: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    /// Adapter for `map_err` on filesystem calls touching `path`.
    pub(crate) fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}
