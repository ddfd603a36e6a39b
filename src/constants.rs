use core::fmt;

/// State of the shared playback slot as seen from one track.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub const MIN_VOLUME: i32 = 0;
pub const MAX_VOLUME: i32 = 128;
