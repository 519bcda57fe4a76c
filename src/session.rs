//! Quiz session state: pure data and transitions, zero effects.
//!
//! A `Session` exists only while a topic is selected, so "active question
//! without a topic" cannot be represented. Network results are applied
//! through the methods here; the effects layer decides when.

use std::fmt;

use crate::types::{AnswerSubmission, Question, Topic};

// ============================================================================
// GENERATIONS
// ============================================================================

/// Request token. Background results tagged with an older generation
/// than the current one are stale and must be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

// ============================================================================
// SCOREBOARD
// ============================================================================

/// Correct / attempted counters for one session.
///
/// The only mutator records a whole judged attempt, so
/// `score <= attempted` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    score: u32,
    attempted: u32,
}

impl Scoreboard {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn attempted(&self) -> u32 {
        self.attempted
    }

    /// Count one judged answer.
    pub fn record(&mut self, correct: bool) {
        self.attempted += 1;
        if correct {
            self.score += 1;
        }
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.score, self.attempted)
    }
}

// ============================================================================
// QUESTION + ANSWER STATUS
// ============================================================================

/// Where the current question is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QuestionStatus {
    #[default]
    Idle,
    Loading,
    Loaded(Question),
    /// Fetch failed; message shown alongside a retry hint.
    Failed(String),
}

impl QuestionStatus {
    pub fn question(&self) -> Option<&Question> {
        match self {
            QuestionStatus::Loaded(q) => Some(q),
            _ => None,
        }
    }
}

/// Whether the loaded question is still accepting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerPhase {
    /// Input is editable and Enter submits.
    #[default]
    Open,
    /// Submitted, waiting for the verdict.
    Judging,
    /// Verdict shown; next question is scheduled.
    Judged,
}

/// Message shown under the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { answer: String },
    /// Submission failed; the answer can be sent again.
    SubmitFailed(String),
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => write!(f, "✅ Correct!"),
            Feedback::Incorrect { answer } => {
                write!(f, "❌ Incorrect! The answer was: {}", answer)
            }
            Feedback::SubmitFailed(msg) => {
                write!(f, "⚠ Could not submit ({}). Press Enter to retry.", msg)
            }
        }
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Everything that belongs to one selected topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub topic: Topic,
    pub scoreboard: Scoreboard,
    pub question: QuestionStatus,
    pub answer_phase: AnswerPhase,
    /// What the user has typed so far.
    pub input: String,
    pub feedback: Option<Feedback>,
    pub hint_visible: bool,
}

impl Session {
    /// Start a fresh session for `topic`, already waiting on its first question.
    pub fn start(topic: Topic) -> Self {
        let mut session = Session {
            topic,
            scoreboard: Scoreboard::default(),
            question: QuestionStatus::Idle,
            answer_phase: AnswerPhase::Open,
            input: String::new(),
            feedback: None,
            hint_visible: false,
        };
        session.begin_fetch();
        session
    }

    /// Clear the previous question and mark the next one as loading.
    pub fn begin_fetch(&mut self) {
        self.question = QuestionStatus::Loading;
        self.answer_phase = AnswerPhase::Open;
        self.input.clear();
        self.feedback = None;
        self.hint_visible = false;
    }

    pub fn apply_question(&mut self, question: Question) {
        self.question = QuestionStatus::Loaded(question);
        self.answer_phase = AnswerPhase::Open;
        self.input.clear();
    }

    pub fn fail_question(&mut self, message: String) {
        self.question = QuestionStatus::Failed(message);
    }

    /// True when Enter should send the current input.
    pub fn can_submit(&self) -> bool {
        self.answer_phase == AnswerPhase::Open && self.question.question().is_some()
    }

    /// Move to `Judging` and return the payload to send, if submitting is allowed.
    pub fn begin_submit(&mut self) -> Option<AnswerSubmission> {
        if !self.can_submit() {
            return None;
        }
        let question = self.question.question()?;
        let submission = AnswerSubmission::new(self.topic.id, question, &self.input);
        self.answer_phase = AnswerPhase::Judging;
        Some(submission)
    }

    /// Apply the service's verdict. Ignored unless a submission is in flight.
    pub fn apply_verdict(&mut self, correct: bool) {
        if self.answer_phase != AnswerPhase::Judging {
            return;
        }
        self.scoreboard.record(correct);
        self.feedback = Some(if correct {
            Feedback::Correct
        } else {
            let answer = self
                .question
                .question()
                .map(|q| q.answer.clone())
                .unwrap_or_default();
            Feedback::Incorrect { answer }
        });
        self.answer_phase = AnswerPhase::Judged;
    }

    /// Submission failed: reopen the answer, counters untouched.
    pub fn fail_submit(&mut self, message: String) {
        if self.answer_phase != AnswerPhase::Judging {
            return;
        }
        self.answer_phase = AnswerPhase::Open;
        self.feedback = Some(Feedback::SubmitFailed(message));
    }

    /// Once shown, the hint stays visible until the next question.
    pub fn reveal_hint(&mut self) {
        if self.question.question().is_some() {
            self.hint_visible = true;
        }
    }

    /// Editing needs a visible, unanswered question.
    pub fn push_char(&mut self, c: char) {
        if self.can_submit() {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.can_submit() {
            self.input.pop();
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
