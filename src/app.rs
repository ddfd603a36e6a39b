use core::fmt;

/// Lifecycle phase of the hosting application.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Phase {
    #[default]
    Start,
    Update,
    End,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Tracks which phase the application is in. The phase only moves
/// forward: Start, then Update for the whole run, then End.
#[derive(Default)]
pub struct App {
    phase: Phase,
}

impl App {
    pub fn new() -> App {
        App::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn start(&mut self) {
        if self.phase == Phase::Start {
            log::info!("app started");
            self.phase = Phase::Update;
        }
    }

    /// Per-tick hook; meaningful only while in the Update phase.
    pub fn update(&mut self) {
        if self.phase == Phase::Update {
            log::trace!("app tick");
        }
    }

    pub fn end(&mut self) {
        if self.phase != Phase::End {
            log::info!("app ended");
            self.phase = Phase::End;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_only_moves_forward() {
        let mut app = App::new();
        assert_eq!(app.phase(), Phase::Start);

        app.start();
        assert_eq!(app.phase(), Phase::Update);

        // starting twice stays in Update
        app.start();
        app.update();
        assert_eq!(app.phase(), Phase::Update);

        app.end();
        assert_eq!(app.phase(), Phase::End);
        app.start();
        assert_eq!(app.phase(), Phase::End);
    }
}
