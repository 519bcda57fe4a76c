//! Pure state transitions: (Screen, Action) → Transition.
//!
//! This is the core logic of the quiz controller. Fully testable without a
//! terminal or a network. Each screen defines which actions it accepts.
//! Unhandled actions return the current screen unchanged (no-op).
//!
//! Three entry points:
//! - `update`: user actions
//! - `handle_background_event`: results coming back from workers and timers
//! - `plan`: turn an accepted effect into a job, settling the generation

use tracing::{debug, info, warn};

use crate::session::{AnswerPhase, QuestionStatus, Session};

use super::state::{Action, App, AppEvent, Effect, Job, Request, Screen, TopicsStatus, Transition};

/// Pure state transition function.
///
/// Given the current screen, an action, and a read-only view of the topic
/// list, produces the next transition.
pub fn update(screen: Screen, action: &Action, topics: &TopicsStatus) -> Transition {
    match screen {
        Screen::TopicSelection { cursor } => update_topic_selection(cursor, action, topics),
        Screen::ActiveQuestion(session) => update_active_question(session, action, topics),
    }
}

/// Apply a user action to the App, returning the effect to run (if any).
pub fn step(app: &mut App, action: &Action) -> Option<Effect> {
    let screen = std::mem::take(&mut app.screen);
    match update(screen, action, &app.topics) {
        Transition::Screen(screen) => {
            app.screen = screen;
            None
        }
        Transition::Quit => {
            app.should_quit = true;
            None
        }
        Transition::Effect { screen, effect } => {
            app.screen = screen;
            Some(effect)
        }
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// TopicSelection: cursor movement, pick a topic, retry a failed load.
fn update_topic_selection(cursor: usize, action: &Action, topics: &TopicsStatus) -> Transition {
    let list = topics.topics();
    let len = list.len();

    match action {
        Action::MoveUp => Transition::Screen(Screen::TopicSelection {
            cursor: cursor.saturating_sub(1),
        }),
        Action::MoveDown => {
            let new_cursor = if len == 0 { 0 } else { (cursor + 1).min(len - 1) };
            Transition::Screen(Screen::TopicSelection { cursor: new_cursor })
        }
        Action::Enter => select_topic(cursor, topics),
        Action::NumberKey(n) if *n >= 1 => select_topic(usize::from(*n) - 1, topics),
        Action::Retry => match topics {
            TopicsStatus::Failed(_) => Transition::Effect {
                screen: Screen::TopicSelection { cursor: 0 },
                effect: Effect::LoadTopics,
            },
            _ => Transition::Screen(Screen::TopicSelection { cursor }),
        },
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::TopicSelection { cursor }),
    }
}

/// Start a session for the topic at `index`, if there is one.
fn select_topic(index: usize, topics: &TopicsStatus) -> Transition {
    match topics.topics().get(index) {
        Some(topic) => Transition::Effect {
            effect: Effect::FetchQuestion { topic_id: topic.id },
            screen: Screen::ActiveQuestion(Session::start(topic.clone())),
        },
        None => Transition::Screen(Screen::TopicSelection {
            cursor: index.min(topics.topics().len().saturating_sub(1)),
        }),
    }
}

/// ActiveQuestion: typing, submit, hint, retry, back to topics.
fn update_active_question(mut session: Session, action: &Action, topics: &TopicsStatus) -> Transition {
    match action {
        Action::Input(c) => {
            session.push_char(*c);
            Transition::Screen(Screen::ActiveQuestion(session))
        }
        Action::Backspace => {
            session.pop_char();
            Transition::Screen(Screen::ActiveQuestion(session))
        }
        Action::Enter => match session.begin_submit() {
            Some(submission) => Transition::Effect {
                screen: Screen::ActiveQuestion(session),
                effect: Effect::SubmitAnswer(submission),
            },
            None => Transition::Screen(Screen::ActiveQuestion(session)),
        },
        Action::RevealHint => {
            session.reveal_hint();
            Transition::Screen(Screen::ActiveQuestion(session))
        }
        Action::Retry => {
            if matches!(session.question, QuestionStatus::Failed(_)) {
                session.begin_fetch();
                let topic_id = session.topic.id;
                Transition::Effect {
                    screen: Screen::ActiveQuestion(session),
                    effect: Effect::FetchQuestion { topic_id },
                }
            } else {
                Transition::Screen(Screen::ActiveQuestion(session))
            }
        }
        Action::ChangeTopic => {
            // Land the cursor on the topic we just left
            let cursor = topics
                .topics()
                .iter()
                .position(|t| t.id == session.topic.id)
                .unwrap_or(0);
            Transition::Effect {
                screen: Screen::TopicSelection { cursor },
                effect: Effect::CancelPending,
            }
        }
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::ActiveQuestion(session)),
    }
}

// ============================================================================
// BACKGROUND EVENTS
// ============================================================================

/// Fold a worker or timer result into the App.
///
/// Results tagged with a generation other than the App's current one are
/// stale (the user moved on, or a newer request superseded them) and are
/// dropped. Returns a follow-up effect when the result calls for one.
pub fn handle_background_event(app: &mut App, event: AppEvent) -> Option<Effect> {
    match event {
        AppEvent::Key(_) => None,

        AppEvent::TopicsLoaded(Ok(topics)) => {
            info!(count = topics.len(), "topics loaded");
            if let Screen::TopicSelection { cursor } = &mut app.screen {
                *cursor = (*cursor).min(topics.len().saturating_sub(1));
            }
            app.topics = TopicsStatus::Loaded(topics);
            None
        }
        AppEvent::TopicsLoaded(Err(e)) => {
            warn!(error = %e, "failed to load topics");
            app.topics = TopicsStatus::Failed(e.to_string());
            None
        }

        AppEvent::QuestionLoaded { generation, result } => {
            if generation != app.generation {
                debug!(stale = generation.0, current = app.generation.0, "dropping stale question");
                return None;
            }
            let session = app.screen.session_mut()?;
            match result {
                Ok(question) => {
                    debug!(topic = %session.topic.id, "question loaded");
                    session.apply_question(question);
                }
                Err(e) => {
                    warn!(topic = %session.topic.id, error = %e, "failed to load question");
                    session.fail_question(e.to_string());
                }
            }
            None
        }

        AppEvent::AnswerJudged { generation, result } => {
            if generation != app.generation {
                debug!(stale = generation.0, current = app.generation.0, "dropping stale verdict");
                return None;
            }
            let session = app.screen.session_mut()?;
            match result {
                Ok(correct) => {
                    session.apply_verdict(correct);
                    info!(
                        correct,
                        score = session.scoreboard.score(),
                        attempted = session.scoreboard.attempted(),
                        "answer judged"
                    );
                    (session.answer_phase == AnswerPhase::Judged)
                        .then_some(Effect::ScheduleNextQuestion)
                }
                Err(e) => {
                    warn!(error = %e, "failed to submit answer");
                    session.fail_submit(e.to_string());
                    None
                }
            }
        }

        AppEvent::NextQuestionDue { generation } => {
            if generation != app.generation {
                debug!(stale = generation.0, current = app.generation.0, "dropping stale timer");
                return None;
            }
            let session = app.screen.session_mut()?;
            session.begin_fetch();
            Some(Effect::FetchQuestion {
                topic_id: session.topic.id,
            })
        }
    }
}

// ============================================================================
// EFFECT PLANNING
// ============================================================================

/// Settle the App for an accepted effect and describe the work to start.
///
/// Fetches and cancellations open a new generation; submissions and timers
/// belong to the current one.
pub fn plan(app: &mut App, effect: Effect) -> Option<Job> {
    match effect {
        Effect::LoadTopics => {
            app.topics = TopicsStatus::Loading;
            Some(Job::Request(Request::Topics))
        }
        Effect::FetchQuestion { topic_id } => {
            app.generation = app.generation.next();
            Some(Job::Request(Request::Question {
                topic_id,
                generation: app.generation,
            }))
        }
        Effect::SubmitAnswer(submission) => Some(Job::Request(Request::Submit {
            submission,
            generation: app.generation,
        })),
        Effect::ScheduleNextQuestion => Some(Job::Timer {
            generation: app.generation,
        }),
        Effect::CancelPending => {
            app.generation = app.generation.next();
            None
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
