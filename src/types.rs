//! Domain and wire types for blank-quiz.
//!
//! Wire payloads mirror the quiz service's JSON exactly. Domain types
//! (`Question`) hold the parsed form the session works with.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::choices::{join_choices, split_choices};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Opaque topic identifier assigned by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(pub i64);

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// DOMAIN
// ============================================================================

/// A question category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
}

/// One fill-in-the-blank challenge, with choices already split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Sentence with a blank (e.g. "The ___ is big.").
    pub sentence: String,
    /// Candidate answers in service order.
    pub choices: Vec<String>,
    /// The expected answer.
    pub answer: String,
    pub hint: String,
}

impl From<QuestionPayload> for Question {
    fn from(payload: QuestionPayload) -> Self {
        Question {
            sentence: payload.sentence,
            choices: split_choices(&payload.choices),
            answer: payload.answer,
            hint: payload.hint,
        }
    }
}

// ============================================================================
// WIRE PAYLOADS
// ============================================================================

/// Body of `POST /get_question`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionRequest {
    pub topic_id: TopicId,
}

/// Successful body of `POST /get_question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub sentence: String,
    /// Choices as one `", "`-delimited string.
    pub choices: String,
    pub answer: String,
    pub hint: String,
}

/// Body of `POST /submit_answer`: the full question context plus the guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub topic_id: TopicId,
    pub sentence: String,
    pub choices: String,
    pub answer: String,
    pub hint: String,
    pub user_answer: String,
}

impl AnswerSubmission {
    /// Build a submission for `question`, rejoining its choices.
    pub fn new(topic_id: TopicId, question: &Question, user_answer: &str) -> Self {
        AnswerSubmission {
            topic_id,
            sentence: question.sentence.clone(),
            choices: join_choices(&question.choices),
            answer: question.answer.clone(),
            hint: question.hint.clone(),
            user_answer: user_answer.to_string(),
        }
    }
}

/// Body returned by `POST /submit_answer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
}

/// Server-side cumulative tally returned by `GET /score/{topic_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: u64,
    pub attempted: u64,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for CLI reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn elephant() -> Question {
        Question {
            sentence: "The ___ is big.".into(),
            choices: vec!["cat".into(), "dog".into(), "elephant".into()],
            answer: "elephant".into(),
            hint: "largest land animal".into(),
        }
    }

    #[test]
    fn topic_list_deserializes_from_service_shape() {
        let json = r#"[{"id":1,"name":"Animals"},{"id":2,"name":"History"}]"#;
        let topics: Vec<Topic> = serde_json::from_str(json).unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].id, TopicId(1));
        assert_eq!(topics[1].name, "History");
    }

    #[test]
    fn question_payload_splits_choices() {
        let payload = QuestionPayload {
            sentence: "The ___ is big.".into(),
            choices: "cat, dog, elephant".into(),
            answer: "elephant".into(),
            hint: "largest land animal".into(),
        };
        assert_eq!(Question::from(payload), elephant());
    }

    #[test]
    fn submission_rejoins_choices_with_delimiter() {
        let sub = AnswerSubmission::new(TopicId(1), &elephant(), "cat");
        assert_eq!(sub.choices, "cat, dog, elephant");
        assert_eq!(sub.user_answer, "cat");
        assert_eq!(sub.topic_id, TopicId(1));
    }

    #[test]
    fn submission_serializes_all_service_fields() {
        let sub = AnswerSubmission::new(TopicId(7), &elephant(), "elephant");
        let value = serde_json::to_value(&sub).unwrap();
        assert_eq!(value["topic_id"], 7);
        for field in ["sentence", "choices", "answer", "hint", "user_answer"] {
            assert!(value[field].is_string(), "missing field {}", field);
        }
    }

    #[test]
    fn question_request_is_flat_topic_id() {
        let body = serde_json::to_string(&QuestionRequest { topic_id: TopicId(3) }).unwrap();
        assert_eq!(body, r#"{"topic_id":3}"#);
    }

    #[test]
    fn topic_id_displays_as_number() {
        assert_eq!(TopicId(42).to_string(), "42");
    }
}
