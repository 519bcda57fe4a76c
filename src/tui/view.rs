//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches based on the current Screen variant. The only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::session::{AnswerPhase, Feedback, QuestionStatus, Session};

use super::state::{App, Screen, TopicsStatus};
use super::theme;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title bar at top, content in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(&app.screen), chunks[0]);
    frame.render_widget(render_help(app), chunks[2]);

    let content_area = chunks[1];

    match &app.screen {
        Screen::TopicSelection { cursor } => {
            render_topic_selection(&app.topics, *cursor, frame, content_area);
        }
        Screen::ActiveQuestion(session) => {
            render_active_question(session, frame, content_area);
        }
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

fn render_title(screen: &Screen) -> Paragraph<'static> {
    let title = match screen {
        Screen::TopicSelection { .. } => "blank-quiz · Select a Topic".to_string(),
        Screen::ActiveQuestion(session) => format!("Topic: {}", session.topic.name),
    };
    Paragraph::new(Line::from(Span::styled(title, theme::STYLE_TITLE)))
}

/// Help line showing available keybindings for the current state.
fn render_help(app: &App) -> Paragraph<'static> {
    let help_text = match &app.screen {
        Screen::TopicSelection { .. } => match app.topics {
            TopicsStatus::Failed(_) => "[r] retry  [q] quit",
            _ => "[j/k] move  [Enter] start  [1-9] pick  [q] quit",
        },
        Screen::ActiveQuestion(session) => match (&session.question, session.answer_phase) {
            (QuestionStatus::Failed(_), _) => "[^R] retry  [Esc] change topic  [^C] quit",
            (QuestionStatus::Loaded(_), AnswerPhase::Open) => {
                "[Enter] submit  [Tab] hint  [Esc] change topic  [^C] quit"
            }
            _ => "[Esc] change topic  [^C] quit",
        },
    };
    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// SCREEN: TOPIC SELECTION
// ============================================================================

fn render_topic_selection(topics: &TopicsStatus, cursor: usize, frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("")];

    match topics {
        TopicsStatus::Loading => {
            lines.push(Line::from(Span::styled("  Loading topics...", theme::STYLE_PENDING)));
        }
        TopicsStatus::Failed(msg) => {
            lines.push(Line::from(Span::styled(
                format!("  Could not load topics: {}", msg),
                theme::STYLE_ERROR,
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  Press "),
                Span::styled("[r]", theme::STYLE_INTERACTIVE),
                Span::raw(" to retry."),
            ]));
        }
        TopicsStatus::Loaded(list) if list.is_empty() => {
            lines.push(Line::from(Span::styled("  (no topics available)", theme::STYLE_DIM)));
        }
        TopicsStatus::Loaded(list) => {
            for (i, topic) in list.iter().enumerate() {
                let number = if i < 9 {
                    format!("[{}] ", i + 1)
                } else {
                    "    ".to_string()
                };
                let spans = vec![
                    Span::raw("  "),
                    Span::styled(number, theme::STYLE_INTERACTIVE),
                    Span::styled(topic.name.clone(), theme::STYLE_IMPORTANT),
                ];
                let line = if i == cursor {
                    Line::from(spans).style(theme::STYLE_CURSOR)
                } else {
                    Line::from(spans)
                };
                lines.push(line);
            }
        }
    }

    // Scroll: keep the cursor row visible (+1 for the leading blank line)
    let visible_height = area.height as usize;
    let scroll_offset = if cursor + 1 >= visible_height {
        cursor + 2 - visible_height
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: ACTIVE QUESTION
// ============================================================================

fn render_active_question(session: &Session, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Score: "),
            Span::styled(session.scoreboard.to_string(), theme::STYLE_CORRECT),
        ]),
        Line::from(""),
    ];

    match &session.question {
        QuestionStatus::Idle => {}
        QuestionStatus::Loading => {
            lines.push(Line::from(Span::styled("  Loading question...", theme::STYLE_PENDING)));
        }
        QuestionStatus::Failed(msg) => {
            lines.push(Line::from(Span::styled(
                format!("  Could not load a question: {}", msg),
                theme::STYLE_ERROR,
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  Press "),
                Span::styled("[Ctrl+R]", theme::STYLE_INTERACTIVE),
                Span::raw(" to retry."),
            ]));
        }
        QuestionStatus::Loaded(question) => {
            lines.push(Line::from(Span::styled(
                format!("  {}", question.sentence),
                theme::STYLE_IMPORTANT,
            )));
            lines.push(Line::from(""));
            for choice in &question.choices {
                lines.push(Line::from(vec![
                    Span::styled("    • ", theme::STYLE_DIM),
                    Span::raw(choice.clone()),
                ]));
            }
            lines.push(Line::from(""));
            lines.extend(render_answer_lines(session));

            if session.hint_visible {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("  Hint: {}", question.hint),
                    theme::STYLE_HINT,
                )));
            }
        }
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Input box and feedback below it.
fn render_answer_lines(session: &Session) -> Vec<Line<'static>> {
    let cursor = if session.answer_phase == AnswerPhase::Open { "█" } else { "" };
    let input = if session.input.is_empty() && session.answer_phase == AnswerPhase::Open {
        Span::styled("Fill in the blank", theme::STYLE_DIM)
    } else {
        Span::raw(session.input.clone())
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("  > ", theme::STYLE_INTERACTIVE),
        input,
        Span::styled(cursor, theme::STYLE_INTERACTIVE),
    ])];

    if session.answer_phase == AnswerPhase::Judging {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Checking...", theme::STYLE_PENDING)));
    }

    if let Some(feedback) = &session.feedback {
        let style = match feedback {
            Feedback::Correct => theme::STYLE_CORRECT,
            Feedback::Incorrect { .. } | Feedback::SubmitFailed(_) => theme::STYLE_ERROR,
        };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {}", feedback), style)));
    }

    lines
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Question, Topic, TopicId};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(70, 20);
        Terminal::new(backend).unwrap()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn animals() -> Topic {
        Topic { id: TopicId(1), name: "Animals".into() }
    }

    fn elephant() -> Question {
        Question {
            sentence: "The ___ is big.".into(),
            choices: vec!["cat".into(), "dog".into(), "elephant".into()],
            answer: "elephant".into(),
            hint: "largest land animal".into(),
        }
    }

    fn app_on(session: Session) -> App {
        App {
            screen: Screen::ActiveQuestion(session),
            ..App::with_topics(vec![animals()])
        }
    }

    fn loaded_session() -> Session {
        let mut session = Session::start(animals());
        session.apply_question(elephant());
        session
    }

    #[test]
    fn loading_topics_renders() {
        let mut terminal = make_terminal();
        let app = App::new();
        terminal.draw(|frame| render(&app, frame)).unwrap();
        assert!(buffer_text(&terminal).contains("Loading topics"));
    }

    #[test]
    fn topic_list_shows_names_and_numbers() {
        let mut terminal = make_terminal();
        let app = App::with_topics(vec![
            animals(),
            Topic { id: TopicId(2), name: "History".into() },
        ]);
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("[1] Animals"));
        assert!(text.contains("[2] History"));
    }

    #[test]
    fn failed_topics_offer_retry() {
        let mut terminal = make_terminal();
        let mut app = App::new();
        app.topics = TopicsStatus::Failed("connection refused".into());
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("connection refused"));
        assert!(text.contains("retry"));
    }

    #[test]
    fn loading_question_is_explicit() {
        let mut terminal = make_terminal();
        let app = app_on(Session::start(animals()));
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Loading question"));
        assert!(text.contains("Topic: Animals"));
        assert!(text.contains("0 / 0"));
    }

    #[test]
    fn question_shows_sentence_and_choices() {
        let mut terminal = make_terminal();
        let app = app_on(loaded_session());
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("The ___ is big."));
        assert!(text.contains("elephant"));
        assert!(text.contains("Fill in the blank"));
        assert!(!text.contains("largest land animal"), "hint hidden until revealed");
    }

    #[test]
    fn revealed_hint_is_shown() {
        let mut terminal = make_terminal();
        let mut session = loaded_session();
        session.reveal_hint();
        let app = app_on(session);
        terminal.draw(|frame| render(&app, frame)).unwrap();
        assert!(buffer_text(&terminal).contains("Hint: largest land animal"));
    }

    #[test]
    fn incorrect_feedback_reveals_answer() {
        let mut terminal = make_terminal();
        let mut session = loaded_session();
        session.push_char('c');
        session.begin_submit();
        session.apply_verdict(false);
        let app = app_on(session);
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("The answer was: elephant"));
        assert!(text.contains("0 / 1"));
    }

    #[test]
    fn failed_question_offers_retry() {
        let mut terminal = make_terminal();
        let mut session = Session::start(animals());
        session.fail_question("HTTP 500".into());
        let app = app_on(session);
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("HTTP 500"));
        assert!(text.contains("Ctrl+R"));
    }

    #[test]
    fn help_changes_with_answer_phase() {
        let open = app_on(loaded_session());
        let mut judging = loaded_session();
        judging.begin_submit();
        let judging = app_on(judging);

        let mut terminal = make_terminal();
        terminal.draw(|frame| render(&open, frame)).unwrap();
        assert!(buffer_text(&terminal).contains("[Enter] submit"));

        terminal.draw(|frame| render(&judging, frame)).unwrap();
        let text = buffer_text(&terminal);
        assert!(!text.contains("[Enter] submit"));
        assert!(text.contains("Checking"));
    }

    #[test]
    fn long_topic_list_scrolls_to_cursor() {
        let mut terminal = make_terminal();
        let topics: Vec<Topic> = (1..=40)
            .map(|i| Topic { id: TopicId(i), name: format!("Topic number {}", i) })
            .collect();
        let mut app = App::with_topics(topics);
        app.screen = Screen::TopicSelection { cursor: 39 };
        terminal.draw(|frame| render(&app, frame)).unwrap();
        assert!(buffer_text(&terminal).contains("Topic number 40"));
    }
}
