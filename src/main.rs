use anyhow::Result;
use argh::FromArgs;
use bgmplayer::app::App;
use bgmplayer::utils::config;
use bgmplayer::utils::logger::{self, Level};
use bgmplayer::{AudioBackend, Loops, MusicTrack, PlaybackState, RodioBackend};
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

#[derive(FromArgs)]
/// Loop a background-music track from the terminal.
struct Args {
    /// audio file to play
    #[argh(positional)]
    path: PathBuf,

    /// startup volume, 0 to 128 (default from config)
    #[argh(option, short = 'v')]
    volume: Option<i32>,

    /// fade the track in over this many milliseconds
    #[argh(option, short = 'f')]
    fade: Option<u64>,

    /// play the track this many times instead of looping forever
    #[argh(option, short = 't')]
    times: Option<u32>,

    /// log level: trace, debug, info, warn, error or critical
    #[argh(option, short = 'l')]
    log_level: Option<Level>,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    logger::init()?;
    let config = config::get_set_config();
    logger::set_level(args.log_level.unwrap_or(config.log_level));

    let loops = match args.times {
        Some(n) => Loops::Times(n),
        None => Loops::Forever,
    };
    let fade = Duration::from_millis(args.fade.unwrap_or(config.fade_in_ms));

    let backend: Rc<RefCell<dyn AudioBackend>> = Rc::new(RefCell::new(RodioBackend::new()));
    let mut app = App::new();
    app.start();

    let mut track = MusicTrack::with_media(backend, &args.path)?;
    track.set_volume(args.volume.unwrap_or(config.volume));
    if args.fade.is_some() {
        track.fade_in(fade, loops)?;
    } else {
        track.play(loops)?;
    }

    println!("space pause/resume, +/- volume, f fade back in, q quit");
    enable_raw_mode()?;
    // Leave the terminal sane even when the loop errors out.
    let looped = key_loop(&mut app, &mut track, loops, fade, args.times.is_some());
    disable_raw_mode()?;
    looped?;

    app.end();
    Ok(())
}

fn key_loop(
    app: &mut App,
    track: &mut MusicTrack,
    loops: Loops,
    fade: Duration,
    finite: bool,
) -> Result<()> {
    loop {
        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') => match track.state() {
                        PlaybackState::Playing => track.pause(),
                        PlaybackState::Paused => track.resume(),
                        PlaybackState::Stopped => track.play(loops)?,
                    },
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        track.volume_up();
                        show_volume(track)?;
                    }
                    KeyCode::Char('-') => {
                        track.volume_down();
                        show_volume(track)?;
                    }
                    KeyCode::Char('f') => track.fade_in(fade, loops)?,
                    _ => {}
                }
            }
        } else {
            app.update();
            // A finite run ends when the track runs out.
            if finite && track.state() == PlaybackState::Stopped {
                return Ok(());
            }
        }
    }
}

fn show_volume(track: &MusicTrack) -> Result<()> {
    // Raw mode, so carriage return by hand.
    print!("volume {}\r\n", track.volume());
    std::io::stdout().flush()?;
    Ok(())
}
