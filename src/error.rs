use std::path::PathBuf;

use thiserror::Error;

/// Failures a widget or the page loader can report.
///
/// None of these cross a widget boundary at runtime: a widget that fails to
/// mount is left out of the page, and asset failures only get logged.
#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("{widget}: required part `{part}` is missing")]
    MissingCollaborator { widget: String, part: &'static str },

    #[error("failed to load asset {path:?}: {reason}")]
    Asset { path: PathBuf, reason: String },

    #[error("invalid page configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = CarouselError> = std::result::Result<T, E>;
