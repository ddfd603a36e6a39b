use bgmplayer::{Error, Loops, MusicTrack, NullBackend, PlaybackState};
use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

fn backend() -> Rc<RefCell<NullBackend>> {
    Rc::new(RefCell::new(NullBackend::new()))
}

fn media(name: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("bgmplayer-playback-{name}"));
    fs::write(&path, b"xxxx").unwrap();
    path
}

#[test]
fn set_volume_clamps_into_range() {
    let backend = backend();
    let mut track = MusicTrack::new(backend);
    for (input, expected) in [(-1, 0), (0, 0), (64, 64), (128, 128), (129, 128), (9000, 128)] {
        track.set_volume(input);
        assert_eq!(track.volume(), expected);
    }
}

#[test]
fn volume_steps_saturate_at_the_bounds() {
    let backend = backend();
    let mut track = MusicTrack::new(backend);

    track.set_volume(128);
    track.volume_up();
    assert_eq!(track.volume(), 128);

    track.set_volume(0);
    track.volume_down();
    assert_eq!(track.volume(), 0);

    track.set_volume(64);
    track.volume_up();
    assert_eq!(track.volume(), 65);
    track.volume_down();
    assert_eq!(track.volume(), 64);
}

#[test]
fn playing_one_track_stops_the_other() {
    let backend = backend();
    let mut a = MusicTrack::with_media(backend.clone(), &media("slot-a")).unwrap();
    let mut b = MusicTrack::with_media(backend.clone(), &media("slot-b")).unwrap();

    a.play(Loops::Forever).unwrap();
    assert_eq!(a.state(), PlaybackState::Playing);
    assert_eq!(b.state(), PlaybackState::Stopped);

    b.play(Loops::Forever).unwrap();
    assert_eq!(a.state(), PlaybackState::Stopped);
    assert_eq!(b.state(), PlaybackState::Playing);
}

#[test]
fn fade_in_claims_the_slot_like_play() {
    let backend = backend();
    let mut a = MusicTrack::with_media(backend.clone(), &media("fade-a")).unwrap();
    let mut b = MusicTrack::with_media(backend.clone(), &media("fade-b")).unwrap();

    a.play(Loops::Forever).unwrap();
    b.fade_in(Duration::from_millis(500), Loops::Times(2)).unwrap();
    assert_eq!(a.state(), PlaybackState::Stopped);
    assert_eq!(b.state(), PlaybackState::Playing);
}

#[test]
fn pause_right_after_play_takes_effect() {
    let backend = backend();
    let mut track = MusicTrack::with_media(backend.clone(), &media("immediate")).unwrap();

    track.play(Loops::Forever).unwrap();
    assert_eq!(track.state(), PlaybackState::Playing);

    // no intervening state poll: the commanded state must already be
    // visible, not whatever the slot reported before the play
    track.pause();
    assert_eq!(track.state(), PlaybackState::Paused);

    track.resume();
    assert_eq!(track.state(), PlaybackState::Playing);
}

#[test]
fn pause_applies_only_to_the_playing_track() {
    let backend = backend();
    let mut a = MusicTrack::with_media(backend.clone(), &media("pause-a")).unwrap();
    let mut b = MusicTrack::with_media(backend.clone(), &media("pause-b")).unwrap();

    a.play(Loops::Forever).unwrap();
    b.pause();
    assert_eq!(a.state(), PlaybackState::Playing);
    assert_eq!(b.state(), PlaybackState::Stopped);

    a.pause();
    assert_eq!(a.state(), PlaybackState::Paused);
}

#[test]
fn resume_applies_only_to_the_paused_track() {
    let backend = backend();
    let mut a = MusicTrack::with_media(backend.clone(), &media("resume-a")).unwrap();
    let mut b = MusicTrack::with_media(backend.clone(), &media("resume-b")).unwrap();

    a.play(Loops::Forever).unwrap();
    a.resume();
    assert_eq!(a.state(), PlaybackState::Playing);

    b.resume();
    assert_eq!(b.state(), PlaybackState::Stopped);

    a.pause();
    a.resume();
    assert_eq!(a.state(), PlaybackState::Playing);
}

#[test]
fn missing_media_is_a_recoverable_load_error() {
    let backend = backend();
    let missing = env::temp_dir().join("bgmplayer-playback-missing");
    assert!(matches!(
        MusicTrack::with_media(backend.clone(), &missing),
        Err(Error::Open { .. })
    ));

    // the same instance can retry with a good path
    let mut track = MusicTrack::new(backend.clone());
    assert!(track.load_media(&missing).is_err());
    track.load_media(&media("retry")).unwrap();
    track.play(Loops::Forever).unwrap();
    assert_eq!(track.state(), PlaybackState::Playing);
}

#[test]
fn reloading_frees_the_previous_resource() {
    let backend = backend();
    let mut track = MusicTrack::with_media(backend.clone(), &media("reload-1")).unwrap();
    track.play(Loops::Forever).unwrap();

    track.load_media(&media("reload-2")).unwrap();
    assert_eq!(backend.borrow().live_resources(), 1);
    assert_eq!(backend.borrow().released(), 1);
    // the replaced resource was the active one, so the slot stopped
    assert_eq!(track.state(), PlaybackState::Stopped);
}
