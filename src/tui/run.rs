//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui,
//! and to the quiz service via [`QuizApi`].
//!
//! Architecture: producers feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key events
//! - Request threads: one per service call, send the result back
//! - Timer threads: one per scheduled next question
//! The event loop consumes from the channel, dispatching to pure handlers.

use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::client::QuizApi;

use super::state::{Action, App, AppEvent, Effect, InputMode, Job, Request};
use super::update::{handle_background_event, plan, step};
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// In `Typing` mode printable characters become answer text, so commands
/// move to Tab, Esc and Ctrl chords. Returns None for unmapped keys.
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Navigate => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
            KeyCode::Enter => Some(Action::Enter),
            KeyCode::Char('r') => Some(Action::Retry),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char(c @ '1'..='9') => Some(Action::NumberKey(c as u8 - b'0')),
            _ => None,
        },
        InputMode::Typing => match key.code {
            KeyCode::Char('r') if ctrl => Some(Action::Retry),
            KeyCode::Char('h') if ctrl => Some(Action::RevealHint),
            KeyCode::Char(_) if ctrl => None,
            KeyCode::Char(c) => Some(Action::Input(c)),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Enter => Some(Action::Enter),
            KeyCode::Tab => Some(Action::RevealHint),
            KeyCode::Esc => Some(Action::ChangeTopic),
            _ => None,
        },
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key presses to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore releases, mouse, resize
                Err(_) => break,
            }
        }
    });
}

/// Call the quiz service for one request and wrap the result as an event.
pub fn perform(request: Request, api: &dyn QuizApi) -> AppEvent {
    match request {
        Request::Topics => AppEvent::TopicsLoaded(api.topics()),
        Request::Question { topic_id, generation } => AppEvent::QuestionLoaded {
            generation,
            result: api.question(topic_id),
        },
        Request::Submit { submission, generation } => AppEvent::AnswerJudged {
            generation,
            result: api.submit(&submission),
        },
    }
}

/// Start a job on its own thread. Results travel back over `tx`.
fn spawn_job(job: Job, api: &Arc<dyn QuizApi>, delay: Duration, tx: &mpsc::Sender<AppEvent>) {
    let tx = tx.clone();
    match job {
        Job::Request(request) => {
            debug!(?request, "spawning request");
            let api = Arc::clone(api);
            thread::spawn(move || {
                // Receiver gone means the TUI is shutting down
                let _ = tx.send(perform(request, api.as_ref()));
            });
        }
        Job::Timer { generation } => {
            debug!(generation = generation.0, ?delay, "scheduling next question");
            thread::spawn(move || {
                thread::sleep(delay);
                let _ = tx.send(AppEvent::NextQuestionDue { generation });
            });
        }
    }
}

/// Settle the App for an effect and start whatever work it needs.
fn dispatch(
    effect: Effect,
    app: &mut App,
    api: &Arc<dyn QuizApi>,
    delay: Duration,
    tx: &mpsc::Sender<AppEvent>,
) {
    if let Some(job) = plan(app, effect) {
        spawn_job(job, api, delay, tx);
    }
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI event loop against the quiz service.
///
/// Sets up the terminal, requests the topic list, and runs until the user
/// quits. `next_question_delay` is the pause between a verdict and the
/// next question.
pub fn run(api: Arc<dyn QuizApi>, next_question_delay: Duration) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    with_cleanup(
        || event_loop(&mut terminal, &api, next_question_delay),
        restore_terminal,
    )
}

/// Run `body`, then `cleanup` regardless of the outcome. The body's error wins.
fn with_cleanup<T>(
    body: impl FnOnce() -> io::Result<T>,
    cleanup: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    let result = body();
    let cleaned = cleanup();
    let value = result?;
    cleaned?;
    Ok(value)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    api: &Arc<dyn QuizApi>,
    next_question_delay: Duration,
) -> io::Result<()> {
    let mut app = App::new();

    let (tx, rx) = mpsc::channel::<AppEvent>();

    spawn_key_reader(tx.clone());
    dispatch(Effect::LoadTopics, &mut app, api, next_question_delay, &tx);
    info!("quiz session started");

    loop {
        terminal.draw(|frame| render(&app, frame))?;

        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        let effect = match event {
            AppEvent::Key(key) => map_key(key, app.screen.input_mode())
                .and_then(|action| step(&mut app, &action)),
            background_event => handle_background_event(&mut app, background_event),
        };

        if let Some(effect) = effect {
            dispatch(effect, &mut app, api, next_question_delay, &tx);
        }
    }

    info!("quiz session ended");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn ctrl_c_quits_in_both_modes() {
        assert_eq!(map_key(ctrl('c'), InputMode::Navigate), Some(Action::Quit));
        assert_eq!(map_key(ctrl('c'), InputMode::Typing), Some(Action::Quit));
    }

    #[test]
    fn vim_and_arrow_keys_move_in_topic_list() {
        for (code, action) in [
            (KeyCode::Char('j'), Action::MoveDown),
            (KeyCode::Down, Action::MoveDown),
            (KeyCode::Char('k'), Action::MoveUp),
            (KeyCode::Up, Action::MoveUp),
        ] {
            assert_eq!(map_key(key(code), InputMode::Navigate), Some(action));
        }
    }

    #[test]
    fn number_keys_pick_topics() {
        for n in 1..=9u8 {
            let k = key(KeyCode::Char((b'0' + n) as char));
            assert_eq!(map_key(k, InputMode::Navigate), Some(Action::NumberKey(n)));
        }
        assert_eq!(map_key(key(KeyCode::Char('0')), InputMode::Navigate), None);
    }

    #[test]
    fn letters_are_text_while_typing() {
        for c in ['q', 'j', 'r', '1', ' '] {
            assert_eq!(map_key(key(KeyCode::Char(c)), InputMode::Typing), Some(Action::Input(c)));
        }
    }

    #[test]
    fn typing_mode_commands() {
        assert_eq!(map_key(key(KeyCode::Enter), InputMode::Typing), Some(Action::Enter));
        assert_eq!(map_key(key(KeyCode::Backspace), InputMode::Typing), Some(Action::Backspace));
        assert_eq!(map_key(key(KeyCode::Tab), InputMode::Typing), Some(Action::RevealHint));
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Typing), Some(Action::ChangeTopic));
        assert_eq!(map_key(ctrl('r'), InputMode::Typing), Some(Action::Retry));
        assert_eq!(map_key(ctrl('h'), InputMode::Typing), Some(Action::RevealHint));
        assert_eq!(map_key(ctrl('x'), InputMode::Typing), None);
    }

    #[test]
    fn navigate_mode_retry_and_quit() {
        assert_eq!(map_key(key(KeyCode::Char('r')), InputMode::Navigate), Some(Action::Retry));
        assert_eq!(map_key(key(KeyCode::Char('q')), InputMode::Navigate), Some(Action::Quit));
        assert_eq!(map_key(key(KeyCode::Char('z')), InputMode::Navigate), None);
    }

    #[test]
    fn cleanup_runs_when_the_loop_fails() {
        let mut restored = false;
        let result: io::Result<()> = with_cleanup(
            || Err(io::Error::other("draw failed")),
            || {
                restored = true;
                Ok(())
            },
        );
        assert!(restored);
        assert_eq!(result.unwrap_err().to_string(), "draw failed");
    }

    #[test]
    fn cleanup_error_surfaces_after_success() {
        let result = with_cleanup(|| Ok(7), || Err(io::Error::other("restore failed")));
        assert!(result.is_err());
        assert_eq!(with_cleanup(|| Ok(7), || Ok(())).unwrap(), 7);
    }

    #[test]
    fn esc_on_topic_list_does_not_quit() {
        // Esc leaves a question; a second Esc must not exit the program
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Typing), Some(Action::ChangeTopic));
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Navigate), None);
    }
}
