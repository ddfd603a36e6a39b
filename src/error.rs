use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the playback API. Load failures are recoverable:
/// the caller may retry with another path, and the failed track holds no
/// resource afterwards.
#[derive(Error, Debug)]
pub enum Error {
    /// File missing or unreadable.
    #[error("could not open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend cannot decode the file.
    #[error("could not decode {path}: {reason}")]
    Decode { path: String, reason: String },

    /// Play or fade requested with no loaded media.
    #[error("no media loaded")]
    NoMedia,
}
