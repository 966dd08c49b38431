// Transition logging must survive the Info filter both front ends install.

use lookback_core::*;
use std::sync::Mutex;

struct Capture {
    lines: Mutex<Vec<(log::Level, String)>>,
}

impl log::Log for Capture {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Info
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push((record.level(), record.args().to_string()));
            }
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    lines: Mutex::new(Vec::new()),
};

#[test]
fn state_transitions_are_logged_at_info() {
    _ = log::set_logger(&CAPTURE);
    log::set_max_level(log::LevelFilter::Info);

    let mut n = Narrative::new(Timeline::default());
    n.advance(ScrollProgress::new(1.75, constants::MAX_PHASES));

    let lines = CAPTURE.lines.lock().expect("capture lock");
    assert!(
        lines
            .iter()
            .any(|(level, msg)| *level == log::Level::Info
                && msg.starts_with("[narrative] hubble Hidden -> Visible")),
        "{lines:?}"
    );
    assert!(
        lines
            .iter()
            .any(|(_, msg)| msg.starts_with("[narrative] caption hubble Hidden -> Visible")),
        "{lines:?}"
    );
}
