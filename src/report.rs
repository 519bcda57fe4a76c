//! Output formatting for the one-shot CLI commands.
//!
//! Pure functions: (data, OutputFormat) → String. No I/O.

use serde::Serialize;

use crate::types::{OutputFormat, ScoreSummary, Topic, TopicId};

/// Format the topic list.
pub fn format_topics(topics: &[Topic], format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_topics_human(topics),
        OutputFormat::Json => format_json(&topics),
    }
}

/// Format a topic's server-side score.
pub fn format_score(topic_id: TopicId, summary: &ScoreSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_score_human(topic_id, summary),
        OutputFormat::Json => format_json(&ScoreReport {
            topic_id,
            score: summary.score,
            attempted: summary.attempted,
        }),
    }
}

#[derive(Serialize)]
struct ScoreReport {
    topic_id: TopicId,
    score: u64,
    attempted: u64,
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_topics_human(topics: &[Topic]) -> String {
    if topics.is_empty() {
        return "No topics available.\n".to_string();
    }

    let width = topics
        .iter()
        .map(|t| t.id.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::from("=== Topics ===\n");
    for topic in topics {
        out.push_str(&format!("  {:>width$}  {}\n", topic.id.0, topic.name, width = width));
    }
    out
}

fn format_score_human(topic_id: TopicId, summary: &ScoreSummary) -> String {
    let pct = if summary.attempted > 0 {
        u128::from(summary.score) * 100 / u128::from(summary.attempted)
    } else {
        0
    };
    format!(
        "Topic {}: {} / {} correct ({}%)\n",
        topic_id, summary.score, summary.attempted, pct
    )
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    // Plain structs of strings and integers always serialize
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}

// ============================================================================
// TESTS
// ============================================================================
