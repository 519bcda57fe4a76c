//! TUI state algebra: pure types, zero effects.
//!
//! These types define the entire TUI state space. Illegal states should be
//! unrepresentable: a session (and so a selected topic) exists only inside
//! `Screen::ActiveQuestion`.
//!
//! Design principle: Screen variants carry only per-screen state. The topic
//! list and the request generation are shared and live in App.

use crossterm::event::KeyEvent;

use crate::error::QuizError;
use crate::session::{Generation, Session};
use crate::types::{AnswerSubmission, Question, Topic, TopicId};

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Three kinds of producers feed a single mpsc channel:
/// - A key reader thread sends `Key` variants
/// - Request worker threads send results
/// - Timer threads send `NextQuestionDue`
///
/// Results that belong to a session carry the generation current when
/// the request was issued.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// `GET /topics` finished.
    TopicsLoaded(Result<Vec<Topic>, QuizError>),
    /// `POST /get_question` finished.
    QuestionLoaded {
        generation: Generation,
        result: Result<Question, QuizError>,
    },
    /// `POST /submit_answer` finished.
    AnswerJudged {
        generation: Generation,
        result: Result<bool, QuizError>,
    },
    /// The pause after a verdict elapsed.
    NextQuestionDue { generation: Generation },
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Fetch status of the topic list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TopicsStatus {
    #[default]
    Loading,
    Loaded(Vec<Topic>),
    Failed(String),
}

impl TopicsStatus {
    /// Loaded topics, or an empty slice while loading / after failure.
    pub fn topics(&self) -> &[Topic] {
        match self {
            TopicsStatus::Loaded(topics) => topics,
            _ => &[],
        }
    }
}

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// Current screen. Carries the session while a topic is active.
    pub screen: Screen,

    /// Topic list, shared across screens.
    pub topics: TopicsStatus,

    /// Current request generation; older results are dropped.
    pub generation: Generation,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Pick a topic from the list.
    TopicSelection {
        /// Focused row index.
        cursor: usize,
    },

    /// Answering questions for one topic.
    ActiveQuestion(Session),
}

/// Default screen is topic selection (also the placeholder during transitions).
impl Default for Screen {
    fn default() -> Self {
        Screen::TopicSelection { cursor: 0 }
    }
}

/// Which key map applies: list navigation or free text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Navigate,
    Typing,
}

impl Screen {
    pub fn input_mode(&self) -> InputMode {
        match self {
            Screen::TopicSelection { .. } => InputMode::Navigate,
            Screen::ActiveQuestion(_) => InputMode::Typing,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Screen::ActiveQuestion(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            Screen::ActiveQuestion(session) => Some(session),
            _ => None,
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move cursor up in the topic list.
    MoveUp,
    /// Move cursor down in the topic list.
    MoveDown,
    /// Select the focused topic / submit the typed answer.
    Enter,
    /// Pick a topic by its 1-based position.
    NumberKey(u8),
    /// Append a character to the answer.
    Input(char),
    /// Delete the last character of the answer.
    Backspace,
    /// Show the hint for the current question.
    RevealHint,
    /// Return to topic selection.
    ChangeTopic,
    /// Re-issue the request that failed.
    Retry,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// Pure code describes WHAT should happen, the effects boundary decides HOW.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Quit the application.
    Quit,
    /// Render `screen` and execute `effect`.
    Effect { screen: Screen, effect: Effect },
}

/// Side effect requested by a pure transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the topic list.
    LoadTopics,
    /// Start a new generation and fetch a question for the topic.
    FetchQuestion { topic_id: TopicId },
    /// Send an answer for judgment under the current generation.
    SubmitAnswer(AnswerSubmission),
    /// After the configured pause, fetch the next question.
    ScheduleNextQuestion,
    /// Start a new generation without a request, orphaning everything in flight.
    CancelPending,
}

/// Work the effects boundary must start for an accepted effect.
///
/// Produced by [`super::update::plan`] once the App's generation has been
/// settled, so every job already knows which generation it reports under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Call the quiz service on a worker thread.
    Request(Request),
    /// Sleep for the configured pause, then send `NextQuestionDue`.
    Timer { generation: Generation },
}

/// A single call to the quiz service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Topics,
    Question {
        topic_id: TopicId,
        generation: Generation,
    },
    Submit {
        submission: AnswerSubmission,
        generation: Generation,
    },
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    /// Create an App on the topic screen, topics still loading.
    pub fn new() -> Self {
        App {
            screen: Screen::default(),
            topics: TopicsStatus::Loading,
            generation: Generation::default(),
            should_quit: false,
        }
    }

    /// Create an App with the topic list already known.
    pub fn with_topics(topics: Vec<Topic>) -> Self {
        App {
            topics: TopicsStatus::Loaded(topics),
            ..App::new()
        }
    }
}

impl Default for App {
    fn default() -> Self {
        App::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> Topic {
        Topic {
            id: TopicId(1),
            name: "Animals".into(),
        }
    }

    #[test]
    fn app_starts_on_topic_selection_loading() {
        let app = App::new();
        assert_eq!(app.screen, Screen::TopicSelection { cursor: 0 });
        assert_eq!(app.topics, TopicsStatus::Loading);
        assert_eq!(app.generation, Generation(0));
        assert!(!app.should_quit);
    }

    #[test]
    fn app_with_topics_is_loaded() {
        let app = App::with_topics(vec![animals()]);
        assert_eq!(app.topics.topics(), &[animals()]);
    }

    #[test]
    fn topics_slice_is_empty_unless_loaded() {
        assert!(TopicsStatus::Loading.topics().is_empty());
        assert!(TopicsStatus::Failed("boom".into()).topics().is_empty());
    }

    #[test]
    fn input_mode_follows_screen() {
        assert_eq!(Screen::default().input_mode(), InputMode::Navigate);
        let active = Screen::ActiveQuestion(Session::start(animals()));
        assert_eq!(active.input_mode(), InputMode::Typing);
    }

    #[test]
    fn session_only_exists_on_active_question() {
        assert!(Screen::default().session().is_none());
        let active = Screen::ActiveQuestion(Session::start(animals()));
        assert_eq!(active.session().map(|s| s.topic.id), Some(TopicId(1)));
    }

    #[test]
    fn transition_variants_are_distinguishable() {
        let t1 = Transition::Screen(Screen::default());
        let t2 = Transition::Quit;
        let t3 = Transition::Effect {
            screen: Screen::default(),
            effect: Effect::LoadTopics,
        };
        assert_ne!(t1, t2);
        assert_ne!(t2, t3);
    }
}
