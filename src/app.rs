use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{info, trace};

use crate::runtime::AppEvent;
use crate::session::Status;
use crate::timer::Sampler;
use crate::typing_test::TypingTest;

/// Modifiers that turn a character key into a command rather than input.
const CHORD_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL.union(KeyModifiers::ALT);

/// Glue between the event queue and the typing test.
///
/// Keeps a sampler alive exactly while the test is running.
#[derive(Debug)]
pub struct App {
    pub test: TypingTest,
    events: Sender<AppEvent>,
    sample_interval: Duration,
    sampler: Option<Sampler>,
    should_quit: bool,
}

impl App {
    pub fn new(test: TypingTest, events: Sender<AppEvent>, sample_interval: Duration) -> Self {
        Self {
            test,
            events,
            sample_interval,
            sampler: None,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn sampler_running(&self) -> bool {
        self.sampler.as_ref().is_some_and(Sampler::is_running)
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        self.handle_event_at(event, Instant::now())
    }

    pub fn handle_event_at(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Key(key) => self.on_key(key, now),
            AppEvent::Tick { run_id } => {
                if run_id == self.test.run_id() {
                    self.test.on_tick_at(now);
                } else {
                    trace!(run_id, current = self.test.run_id(), "stale tick dropped");
                }
            }
            AppEvent::Resize => {}
        }
        self.sync_sampler();
    }

    /// Cancel sampling first, then start a fresh run.
    pub fn reset(&mut self) {
        self.stop_sampler();
        self.test.reset();
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char(_) if key.modifiers.intersects(CHORD_MODIFIERS) => {
                trace!(?key, "chord ignored");
            }
            KeyCode::Tab => self.reset(),
            KeyCode::Backspace => {
                let mut value = self.test.state().current_input.clone();
                if value.pop().is_some() {
                    self.test.submit_at(&value, now);
                }
            }
            KeyCode::Char(c) => {
                let mut value = self.test.state().current_input.clone();
                value.push(c);
                self.test.submit_at(&value, now);
            }
            _ => {}
        }
    }

    fn quit(&mut self) {
        info!("quit requested");
        self.stop_sampler();
        self.should_quit = true;
    }

    fn sync_sampler(&mut self) {
        match self.test.status() {
            Status::Running if !self.sampler_running() => {
                self.sampler = Some(Sampler::start(
                    self.test.run_id(),
                    self.sample_interval,
                    self.events.clone(),
                ));
            }
            Status::Running => {}
            Status::Idle | Status::Finished => self.stop_sampler(),
        }
    }

    fn stop_sampler(&mut self) {
        if let Some(mut sampler) = self.sampler.take() {
            sampler.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TestConfig;
    use crate::word_supply::WordSupply;
    use std::sync::mpsc;

    struct Fixed(Vec<&'static str>);

    impl WordSupply for Fixed {
        fn generate(&mut self, count: usize, _include_symbols: bool) -> Vec<String> {
            self.0.iter().take(count).map(|w| w.to_string()).collect()
        }

        fn capacity(&self, _include_symbols: bool) -> usize {
            self.0.len()
        }
    }

    fn new_app(words: usize) -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        let test = TypingTest::new(
            TestConfig::words(words).unwrap(),
            Box::new(Fixed(vec!["to", "be", "or"])),
        );
        (App::new(test, tx, Duration::from_secs(60)), rx)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_builds_input_and_starts_sampler() {
        let (mut app, _rx) = new_app(3);
        assert!(!app.sampler_running());

        type_str(&mut app, "tx");
        app.handle_event(key(KeyCode::Backspace));

        assert_eq!(app.test.state().current_input, "t");
        assert_eq!(app.test.status(), Status::Running);
        assert!(app.sampler_running());
    }

    #[test]
    fn test_backspace_on_empty_input_is_noop() {
        let (mut app, _rx) = new_app(3);
        app.handle_event(key(KeyCode::Backspace));

        assert_eq!(app.test.status(), Status::Idle);
        assert!(!app.sampler_running());
    }

    #[test]
    fn test_finish_stops_sampler() {
        let (mut app, _rx) = new_app(2);
        type_str(&mut app, "to be ");

        assert!(app.test.has_finished());
        assert!(!app.sampler_running());
    }

    #[test]
    fn test_tab_resets_and_stops_sampler() {
        let (mut app, _rx) = new_app(3);
        type_str(&mut app, "to ");
        assert!(app.sampler_running());

        app.handle_event(key(KeyCode::Tab));

        assert_eq!(app.test.status(), Status::Idle);
        assert_eq!(app.test.run_id(), 1);
        assert_eq!(app.test.state().correct_chars, 0);
        assert!(!app.sampler_running());
    }

    #[test]
    fn test_stale_tick_is_dropped() {
        let (mut app, _rx) = new_app(3);
        let t0 = Instant::now();
        app.handle_event_at(key(KeyCode::Char('t')), t0);
        app.handle_event(key(KeyCode::Tab));
        app.handle_event_at(key(KeyCode::Char('t')), t0);

        app.handle_event_at(AppEvent::Tick { run_id: 0 }, t0 + Duration::from_secs(1));
        assert!(app.test.state().wpm_samples.is_empty());

        app.handle_event_at(AppEvent::Tick { run_id: 1 }, t0 + Duration::from_secs(1));
        assert_eq!(app.test.state().wpm_samples.len(), 1);
    }

    #[test]
    fn test_control_chords_are_not_typed() {
        let (mut app, _rx) = new_app(3);
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('w'),
            KeyModifiers::CONTROL,
        )));
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('t'),
            KeyModifiers::ALT,
        )));

        assert_eq!(app.test.state().current_input, "");
        assert_eq!(app.test.status(), Status::Idle);
        assert!(!app.should_quit());
        assert!(!app.sampler_running());
    }

    #[test]
    fn test_shifted_characters_are_typed() {
        let (mut app, _rx) = new_app(3);
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('T'),
            KeyModifiers::SHIFT,
        )));

        assert_eq!(app.test.state().current_input, "T");
        assert_eq!(app.test.status(), Status::Running);
    }

    #[test]
    fn test_escape_and_ctrl_c_quit() {
        let (mut app, _rx) = new_app(3);
        app.handle_event(key(KeyCode::Esc));
        assert!(app.should_quit());

        let (mut app, _rx) = new_app(3);
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
        assert_eq!(app.test.state().current_input, "");
    }
}
