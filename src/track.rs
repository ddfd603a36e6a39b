use crate::backend_trait::{AudioBackend, Loops, TrackId};
use crate::constants::PlaybackState;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

/// One piece of background music.
///
/// All tracks created against the same backend share its single playback
/// slot: playing one track stops whichever track was playing before.
/// The loaded resource is owned exclusively, released when the track is
/// dropped or when new media is loaded over it; `MusicTrack` is therefore
/// not `Clone`.
pub struct MusicTrack {
    backend: Rc<RefCell<dyn AudioBackend>>,
    track: Option<TrackId>,
}

impl MusicTrack {
    /// An empty track. `load_media` must be called before playback.
    pub fn new(backend: Rc<RefCell<dyn AudioBackend>>) -> MusicTrack {
        MusicTrack {
            backend,
            track: None,
        }
    }

    /// Creates a track and loads `path` immediately.
    pub fn with_media(backend: Rc<RefCell<dyn AudioBackend>>, path: &Path) -> Result<MusicTrack> {
        let mut track = MusicTrack::new(backend);
        track.load_media(path)?;
        Ok(track)
    }

    /// Loads `path`, releasing any previously held resource first. On
    /// failure the track is left without media.
    pub fn load_media(&mut self, path: &Path) -> Result<()> {
        if let Some(old) = self.track.take() {
            self.backend.borrow_mut().release(old);
        }
        self.track = Some(self.backend.borrow_mut().load(path)?);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.track.is_some()
    }

    /// Current music volume, in [0, 128].
    pub fn volume(&self) -> i32 {
        self.backend.borrow().volume()
    }

    /// Sets the music volume. Out-of-range values are clamped into
    /// [0, 128] by the backend, not rejected.
    pub fn set_volume(&mut self, volume: i32) {
        self.backend.borrow_mut().set_volume(volume);
    }

    /// Raises the volume by one, saturating at 128.
    pub fn volume_up(&mut self) {
        let volume = self.volume();
        self.backend.borrow_mut().set_volume(volume + 1);
    }

    /// Lowers the volume by one, saturating at 0.
    pub fn volume_down(&mut self) {
        let volume = self.volume();
        self.backend.borrow_mut().set_volume(volume - 1);
    }

    /// Plays this track from the beginning, stopping whatever the shared
    /// slot was playing. Fails with `Error::NoMedia` when nothing is
    /// loaded.
    pub fn play(&mut self, loops: Loops) -> Result<()> {
        let id = self.track.ok_or(Error::NoMedia)?;
        self.backend.borrow_mut().play(id, loops)
    }

    /// Like `play`, ramping from silence to the current volume over
    /// `duration`.
    pub fn fade_in(&mut self, duration: Duration, loops: Loops) -> Result<()> {
        let id = self.track.ok_or(Error::NoMedia)?;
        self.backend.borrow_mut().fade_in(id, duration, loops)
    }

    /// Pauses playback if this track is the one currently playing;
    /// no-op otherwise.
    pub fn pause(&mut self) {
        if let Some(id) = self.track {
            self.backend.borrow_mut().pause(id);
        }
    }

    /// Resumes playback if this track is the one currently paused;
    /// no-op otherwise.
    pub fn resume(&mut self) {
        if let Some(id) = self.track {
            self.backend.borrow_mut().resume(id);
        }
    }

    /// This track's view of the shared slot.
    pub fn state(&self) -> PlaybackState {
        self.track
            .map(|id| self.backend.borrow().state(id))
            .unwrap_or(PlaybackState::Stopped)
    }
}

impl Drop for MusicTrack {
    fn drop(&mut self) {
        if let Some(id) = self.track.take() {
            self.backend.borrow_mut().release(id);
        }
    }
}
