use crate::backend_trait::{AudioBackend, Loops, TrackId};
use crate::constants::{PlaybackState, MAX_VOLUME, MIN_VOLUME};
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Headless playback slot. Keeps the full resource table and state
/// machine but produces no audio. Loading still requires the file to
/// exist, so load failures behave like the real backend's.
pub struct NullBackend {
    next_id: u64,
    loaded: HashMap<TrackId, PathBuf>,
    active: Option<(TrackId, PlaybackState)>,
    volume: i32,
    released: u64,
}

impl NullBackend {
    pub fn new() -> NullBackend {
        NullBackend {
            next_id: 0,
            loaded: HashMap::new(),
            active: None,
            volume: MAX_VOLUME,
            released: 0,
        }
    }

    /// Number of resources currently registered.
    pub fn live_resources(&self) -> usize {
        self.loaded.len()
    }

    /// Number of resources released so far.
    pub fn released(&self) -> u64 {
        self.released
    }

    fn start(&mut self, id: TrackId) -> Result<()> {
        if !self.loaded.contains_key(&id) {
            return Err(Error::NoMedia);
        }
        self.active = Some((id, PlaybackState::Playing));
        Ok(())
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        NullBackend::new()
    }
}

impl AudioBackend for NullBackend {
    fn load(&mut self, path: &Path) -> Result<TrackId> {
        fs::metadata(path).map_err(|e| Error::Open {
            path: path.display().to_string(),
            source: e,
        })?;
        self.next_id += 1;
        let id = TrackId(self.next_id);
        self.loaded.insert(id, path.to_path_buf());
        Ok(id)
    }

    fn release(&mut self, id: TrackId) {
        if self.loaded.remove(&id).is_some() {
            self.released += 1;
            if matches!(self.active, Some((active, _)) if active == id) {
                self.active = None;
            }
        }
    }

    fn play(&mut self, id: TrackId, _loops: Loops) -> Result<()> {
        self.start(id)
    }

    fn fade_in(&mut self, id: TrackId, _duration: Duration, _loops: Loops) -> Result<()> {
        self.start(id)
    }

    fn stop(&mut self) {
        self.active = None;
    }

    fn pause(&mut self, id: TrackId) {
        if self.active == Some((id, PlaybackState::Playing)) {
            self.active = Some((id, PlaybackState::Paused));
        }
    }

    fn resume(&mut self, id: TrackId) {
        if self.active == Some((id, PlaybackState::Paused)) {
            self.active = Some((id, PlaybackState::Playing));
        }
    }

    fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(MIN_VOLUME, MAX_VOLUME);
    }

    fn volume(&self) -> i32 {
        self.volume
    }

    fn state(&self, id: TrackId) -> PlaybackState {
        match self.active {
            Some((active, state)) if active == id => state,
            _ => PlaybackState::Stopped,
        }
    }
}
