//! Quiz service client.
//!
//! `QuizApi` is the seam between the session and the network: the TUI's
//! worker threads call it, tests substitute a scripted implementation.
//!
//! Structure:
//! - Pure functions: URL building, body decoding
//! - Effect functions: the blocking HTTP calls

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::{QuizError, Result};
use crate::types::{
    AnswerSubmission, Question, QuestionPayload, QuestionRequest, ScoreSummary, Topic, TopicId,
    Verdict,
};

const TOPICS: &str = "/topics";
const GET_QUESTION: &str = "/get_question";
const SUBMIT_ANSWER: &str = "/submit_answer";
const SCORE: &str = "/score";

/// Operations offered by the quiz service.
pub trait QuizApi: Send + Sync {
    /// `GET /topics`
    fn topics(&self) -> Result<Vec<Topic>>;

    /// `POST /get_question`
    fn question(&self, topic_id: TopicId) -> Result<Question>;

    /// `POST /submit_answer`. Returns whether the answer was judged correct.
    fn submit(&self, submission: &AnswerSubmission) -> Result<bool>;

    /// `GET /score/{topic_id}`
    fn score(&self, topic_id: TopicId) -> Result<ScoreSummary>;
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// `/get_question` answers either a question or `{"error": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuestionReply {
    Question(QuestionPayload),
    Error { error: String },
}

/// Join the base address and an endpoint path.
pub fn endpoint_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Decode a JSON body, mapping shape mismatches to `InvalidResponse`.
pub fn decode<T: DeserializeOwned>(endpoint: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| QuizError::InvalidResponse {
        endpoint,
        detail: e.to_string(),
    })
}

/// Decode a `/get_question` body into a parsed question.
pub fn decode_question(body: &str) -> Result<Question> {
    match decode::<QuestionReply>(GET_QUESTION, body)? {
        QuestionReply::Question(payload) => Ok(payload.into()),
        QuestionReply::Error { error } => Err(QuizError::Service(error)),
    }
}

// ============================================================================
// HTTP CLIENT
// ============================================================================

/// Blocking HTTP implementation of [`QuizApi`].
#[derive(Debug, Clone)]
pub struct HttpQuizApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpQuizApi {
    /// Build a client for the configured service address and timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            base_url: config.api_url.clone(),
            client,
        })
    }

    /// Send a request and return the body text of a successful response.
    fn fetch(&self, endpoint: &'static str, request: reqwest::blocking::RequestBuilder) -> Result<String> {
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, status = status.as_u16(), "quiz service returned error status");
            return Err(QuizError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        debug!(endpoint, bytes = body.len(), "quiz service responded");
        Ok(body)
    }
}

impl QuizApi for HttpQuizApi {
    #[instrument(skip(self))]
    fn topics(&self) -> Result<Vec<Topic>> {
        let request = self.client.get(endpoint_url(&self.base_url, TOPICS));
        let body = self.fetch(TOPICS, request)?;
        decode(TOPICS, &body)
    }

    #[instrument(skip(self))]
    fn question(&self, topic_id: TopicId) -> Result<Question> {
        let request = self
            .client
            .post(endpoint_url(&self.base_url, GET_QUESTION))
            .json(&QuestionRequest { topic_id });
        let body = self.fetch(GET_QUESTION, request)?;
        decode_question(&body)
    }

    #[instrument(skip(self, submission), fields(topic_id = %submission.topic_id))]
    fn submit(&self, submission: &AnswerSubmission) -> Result<bool> {
        let request = self
            .client
            .post(endpoint_url(&self.base_url, SUBMIT_ANSWER))
            .json(submission);
        let body = self.fetch(SUBMIT_ANSWER, request)?;
        let verdict: Verdict = decode(SUBMIT_ANSWER, &body)?;
        Ok(verdict.correct)
    }

    #[instrument(skip(self))]
    fn score(&self, topic_id: TopicId) -> Result<ScoreSummary> {
        let path = format!("{}/{}", SCORE, topic_id);
        let request = self.client.get(endpoint_url(&self.base_url, &path));
        let body = self.fetch(SCORE, request)?;
        decode(SCORE, &body)
    }
}

// ============================================================================
// TESTS
// ============================================================================
