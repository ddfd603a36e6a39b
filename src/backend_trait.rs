use crate::constants::PlaybackState;
use crate::error::Result;
use std::path::Path;
use std::time::Duration;

/// Handle to a resource registered with a backend. Only valid for the
/// backend that issued it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TrackId(pub(crate) u64);

/// How many times a track plays through.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Loops {
    /// Loop until stopped or replaced.
    #[default]
    Forever,
    /// Play the track n times. Zero is normalized to one pass.
    Times(u32),
}

/// The shared playback slot. One slot per backend: starting playback on
/// any track stops whatever the slot was playing before, so at most one
/// track is ever audible.
///
/// All calls happen on the thread owning the backend handle. A backend
/// may run its own mixer thread internally, but that is not exposed here.
pub trait AudioBackend {
    /// Registers the media at `path`, validating that it can be opened
    /// (and decoded, where the backend decodes at all).
    fn load(&mut self, path: &Path) -> Result<TrackId>;

    /// Frees the resource behind `id`. Stops playback first if `id` is
    /// the active track. Unknown ids are ignored.
    fn release(&mut self, id: TrackId);

    /// Plays `id` from the beginning, stopping the previously active
    /// track. Fails with `Error::NoMedia` for unregistered ids.
    fn play(&mut self, id: TrackId, loops: Loops) -> Result<()>;

    /// Like `play`, ramping volume from silence to the current level
    /// over `duration`. The duration is advisory to the backend's own
    /// timer and cannot be cancelled here.
    fn fade_in(&mut self, id: TrackId, duration: Duration, loops: Loops) -> Result<()>;

    /// Stops whatever the slot is playing.
    fn stop(&mut self);

    /// Pauses the slot, but only when `id` is the active track and it is
    /// playing. No-op otherwise.
    fn pause(&mut self, id: TrackId);

    /// Resumes the slot, but only when `id` is the active track and it
    /// is paused. No-op otherwise.
    fn resume(&mut self, id: TrackId);

    /// Sets the music volume, clamped into [0, 128].
    fn set_volume(&mut self, volume: i32);

    fn volume(&self) -> i32;

    /// `id`'s view of the slot: `Stopped` unless it is the active track.
    fn state(&self, id: TrackId) -> PlaybackState;
}
