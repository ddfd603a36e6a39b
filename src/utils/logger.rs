use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU8, Ordering};

/// Severity levels accepted by the façade. `Critical` maps onto the
/// `log` crate's Error level, which is the highest it has.
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Debug,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::FromRepr,
)]
#[repr(u8)]
#[strum(ascii_case_insensitive)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Critical,
}

impl Level {
    fn filter(self) -> LevelFilter {
        match self {
            Level::Trace => LevelFilter::Trace,
            Level::Debug => LevelFilter::Debug,
            Level::Info => LevelFilter::Info,
            Level::Warn => LevelFilter::Warn,
            Level::Error | Level::Critical => LevelFilter::Error,
        }
    }
}

// The façade level, kept alongside log::max_level because Critical and
// Error both filter as Error.
static CURRENT: AtomicU8 = AtomicU8::new(Level::Info as u8);

/// Installs the process-wide logger, a log4rs console appender. Call
/// once; call sites then use the ordinary `log` macros.
pub fn init() -> anyhow::Result<()> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let config = log4rs::config::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Trace))?;
    log4rs::init_config(config)?;
    set_level(Level::Info);
    Ok(())
}

pub fn set_level(level: Level) {
    CURRENT.store(level as u8, Ordering::Relaxed);
    log::set_max_level(level.filter());
}

pub fn level() -> Level {
    Level::from_repr(CURRENT.load(Ordering::Relaxed)).unwrap_or(Level::Info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn level_roundtrips() {
        for level in [
            Level::Trace,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Critical,
        ] {
            set_level(level);
            assert_eq!(super::level(), level);
        }
        set_level(Level::Info);
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!(Level::from_str("debug").unwrap(), Level::Debug);
        assert_eq!(Level::from_str("CRITICAL").unwrap(), Level::Critical);
        assert!(Level::from_str("loud").is_err());
    }

    #[test]
    fn critical_filters_as_error() {
        assert_eq!(Level::Critical.filter(), LevelFilter::Error);
    }
}
