pub mod app;
pub mod backend_null;
#[cfg(feature = "rodio")]
pub mod backend_rodio;
pub mod backend_trait;
pub mod constants;
pub mod error;
pub mod track;
pub mod utils;

pub use backend_null::NullBackend;
#[cfg(feature = "rodio")]
pub use backend_rodio::RodioBackend;
pub use backend_trait::{AudioBackend, Loops, TrackId};
pub use constants::PlaybackState;
pub use error::{Error, Result};
pub use track::MusicTrack;
