use crate::backend_trait::{AudioBackend, Loops, TrackId};
use crate::constants::{PlaybackState, MAX_VOLUME, MIN_VOLUME};
use crate::error::{Error, Result};
use crossbeam_channel::{unbounded, Sender};
use rodio::{Decoder, OutputStream, Source};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

enum Command {
    Play {
        epoch: u64,
        path: PathBuf,
        loops: Loops,
        fade: Option<Duration>,
        gain: f32,
    },
    Pause,
    Resume,
    Stop,
    SetVolume(f32),
    Tick,
}

/// Playback slot backed by rodio. A dedicated thread owns the output
/// stream and sink and is driven over a channel; decoding happens on
/// that thread, from the path registered at load time.
///
/// The commanded state lives on the caller side, so pause/resume
/// decisions never race the worker. The worker's shared view is only
/// consulted to notice a finite track that ran out, and each play is
/// tagged with an epoch so a stale report from an earlier track is
/// ignored.
pub struct RodioBackend {
    sender: Sender<Command>,
    slot: Arc<RwLock<(u64, PlaybackState)>>,
    loaded: HashMap<TrackId, PathBuf>,
    active: Option<(TrackId, PlaybackState)>,
    epoch: u64,
    volume: i32,
    next_id: u64,
}

impl RodioBackend {
    pub fn new() -> RodioBackend {
        let (sender, receiver) = unbounded();
        let slot = Arc::new(RwLock::new((0, PlaybackState::Stopped)));
        let slot_state = slot.clone();

        thread::spawn(move || {
            let (_stream, stream_handle) = OutputStream::try_default().unwrap();
            let mut sink = rodio::Sink::try_new(&stream_handle).unwrap();
            let mut epoch = 0;

            loop {
                let command = match receiver.recv() {
                    Ok(command) => command,
                    // All senders gone, backend dropped.
                    Err(_) => return,
                };
                match command {
                    Command::Play {
                        epoch: play_epoch,
                        path,
                        loops,
                        fade,
                        gain,
                    } => {
                        epoch = play_epoch;
                        if !sink.empty() {
                            sink.stop();
                            sink = rodio::Sink::try_new(&stream_handle).unwrap();
                        }
                        sink.set_volume(gain);
                        if let Err(e) = queue_track(&sink, &path, loops, fade) {
                            log::error!("playback of {} failed: {}", path.display(), e);
                            *slot_state.write().unwrap() = (epoch, PlaybackState::Stopped);
                            continue;
                        }
                        sink.play();
                        *slot_state.write().unwrap() = (epoch, PlaybackState::Playing);
                    }
                    Command::Pause => {
                        sink.pause();
                        *slot_state.write().unwrap() = (epoch, PlaybackState::Paused);
                    }
                    Command::Resume => {
                        sink.play();
                        *slot_state.write().unwrap() = (epoch, PlaybackState::Playing);
                    }
                    Command::Stop => {
                        sink.stop();
                        *slot_state.write().unwrap() = (epoch, PlaybackState::Stopped);
                    }
                    Command::SetVolume(gain) => sink.set_volume(gain),
                    Command::Tick => {
                        // Housekeeping: a finite track that ran out.
                        if sink.empty() {
                            *slot_state.write().unwrap() = (epoch, PlaybackState::Stopped);
                        }
                    }
                }
            }
        });

        RodioBackend {
            sender,
            slot,
            loaded: HashMap::new(),
            active: None,
            epoch: 0,
            volume: MAX_VOLUME,
            next_id: 0,
        }
    }

    fn gain(volume: i32) -> f32 {
        volume as f32 / MAX_VOLUME as f32
    }

    /// Whether the worker has seen the current play run dry. A report
    /// from an earlier epoch is stale and ignored.
    fn slot_ended(&self) -> bool {
        self.sender.send(Command::Tick).unwrap();
        let (epoch, state) = *self.slot.read().unwrap();
        epoch == self.epoch && state == PlaybackState::Stopped
    }

    fn start(&mut self, id: TrackId, loops: Loops, fade: Option<Duration>) -> Result<()> {
        let path = self.loaded.get(&id).ok_or(Error::NoMedia)?.clone();
        log::debug!("play {} loops {:?} fade {:?}", path.display(), loops, fade);
        self.epoch += 1;
        self.active = Some((id, PlaybackState::Playing));
        self.sender
            .send(Command::Play {
                epoch: self.epoch,
                path,
                loops,
                fade,
                gain: RodioBackend::gain(self.volume),
            })
            .unwrap();
        Ok(())
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        RodioBackend::new()
    }
}

impl AudioBackend for RodioBackend {
    fn load(&mut self, path: &Path) -> Result<TrackId> {
        // Open and decode once up front so bad paths fail here, not on
        // the playback thread.
        decode(path)?;
        self.next_id += 1;
        let id = TrackId(self.next_id);
        self.loaded.insert(id, path.to_path_buf());
        Ok(id)
    }

    fn release(&mut self, id: TrackId) {
        if self.loaded.remove(&id).is_some()
            && matches!(self.active, Some((active, _)) if active == id)
        {
            self.stop();
        }
    }

    fn play(&mut self, id: TrackId, loops: Loops) -> Result<()> {
        self.start(id, loops, None)
    }

    fn fade_in(&mut self, id: TrackId, duration: Duration, loops: Loops) -> Result<()> {
        self.start(id, loops, Some(duration))
    }

    fn stop(&mut self) {
        self.active = None;
        self.sender.send(Command::Stop).unwrap();
    }

    fn pause(&mut self, id: TrackId) {
        if self.state(id) == PlaybackState::Playing {
            self.sender.send(Command::Pause).unwrap();
            self.active = Some((id, PlaybackState::Paused));
        }
    }

    fn resume(&mut self, id: TrackId) {
        if self.state(id) == PlaybackState::Paused {
            self.sender.send(Command::Resume).unwrap();
            self.active = Some((id, PlaybackState::Playing));
        }
    }

    fn set_volume(&mut self, volume: i32) {
        self.volume = volume.clamp(MIN_VOLUME, MAX_VOLUME);
        self.sender
            .send(Command::SetVolume(RodioBackend::gain(self.volume)))
            .unwrap();
    }

    fn volume(&self) -> i32 {
        self.volume
    }

    fn state(&self, id: TrackId) -> PlaybackState {
        match self.active {
            Some((active, commanded)) if active == id => {
                if commanded == PlaybackState::Playing && self.slot_ended() {
                    PlaybackState::Stopped
                } else {
                    commanded
                }
            }
            _ => PlaybackState::Stopped,
        }
    }
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).map_err(|e| Error::Open {
        path: path.display().to_string(),
        source: e,
    })?;
    Decoder::new(BufReader::new(file)).map_err(|e| Error::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn queue_track(sink: &rodio::Sink, path: &Path, loops: Loops, fade: Option<Duration>) -> Result<()> {
    match loops {
        Loops::Forever => {
            let source = decode(path)?.repeat_infinite();
            match fade {
                Some(duration) => sink.append(source.fade_in(duration)),
                None => sink.append(source),
            }
        }
        Loops::Times(n) => {
            // Decoders are not cloneable, re-decode per pass.
            for pass in 0..n.max(1) {
                let source = decode(path)?;
                match fade.filter(|_| pass == 0) {
                    Some(duration) => sink.append(source.fade_in(duration)),
                    None => sink.append(source),
                }
            }
        }
    }
    Ok(())
}
