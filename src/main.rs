//! blank-quiz CLI
//!
//! Play a fill-in-the-blank quiz in the terminal, or query the quiz
//! service directly.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::error;

use blank_quiz::client::{HttpQuizApi, QuizApi};
use blank_quiz::config::{Config, Overrides};
use blank_quiz::logging::{self, LogTarget};
use blank_quiz::report::{format_score, format_topics};
use blank_quiz::types::{OutputFormat, TopicId};

#[derive(Parser)]
#[command(name = "blank-quiz")]
#[command(about = "Fill-in-the-blank quiz in your terminal")]
#[command(version)]
struct Cli {
    /// Quiz service address (env: QUIZ_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// HTTP timeout in seconds (env: QUIZ_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Pause before the next question, in milliseconds (env: QUIZ_NEXT_DELAY_MS)
    #[arg(long, global = true)]
    next_delay_ms: Option<u64>,

    /// Log file for interactive sessions
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive quiz (default)
    Play,

    /// List the topics offered by the service
    Topics {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Show the service's recorded score for a topic
    Score {
        /// Topic id (see `topics`)
        topic_id: i64,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let overrides = Overrides {
        api_url: cli.api_url,
        timeout_secs: cli.timeout_secs,
        next_delay_ms: cli.next_delay_ms,
        log_file: cli.log_file,
    };

    let result = Config::load(overrides).and_then(|config| match cli.command {
        None | Some(Commands::Play) => cmd_play(&config),
        Some(Commands::Topics { format }) => cmd_topics(&config, format.into()),
        Some(Commands::Score { topic_id, format }) => {
            cmd_score(&config, TopicId(topic_id), format.into())
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// PROGRESS HELPERS
// ============================================================================

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run `f` behind a spinner in human mode, silently in JSON mode.
fn with_spinner<T>(format: OutputFormat, msg: &str, f: impl FnOnce() -> T) -> T {
    if format == OutputFormat::Human {
        let sp = spinner(msg);
        let out = f();
        sp.finish_and_clear();
        out
    } else {
        f()
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_play(config: &Config) -> Result<(), String> {
    logging::init(&LogTarget::File(config.log_file.clone()))
        .map_err(|e| format!("cannot open log file {}: {}", config.log_file.display(), e))?;

    let api: Arc<dyn QuizApi> = Arc::new(HttpQuizApi::new(config).map_err(|e| e.to_string())?);
    blank_quiz::tui::run(api, config.next_question_delay).map_err(|e| e.to_string())
}

fn cmd_topics(config: &Config, format: OutputFormat) -> Result<(), String> {
    logging::init(&LogTarget::Stderr).map_err(|e| e.to_string())?;
    let api = HttpQuizApi::new(config).map_err(|e| e.to_string())?;

    let topics = with_spinner(format, &format!("Fetching topics from {}...", config.api_url), || {
        api.topics()
    })
    .map_err(|e| e.to_string())?;

    print!("{}", format_topics(&topics, format));
    Ok(())
}

fn cmd_score(config: &Config, topic_id: TopicId, format: OutputFormat) -> Result<(), String> {
    logging::init(&LogTarget::Stderr).map_err(|e| e.to_string())?;
    let api = HttpQuizApi::new(config).map_err(|e| e.to_string())?;

    let summary = with_spinner(format, &format!("Fetching score for topic {}...", topic_id), || {
        api.score(topic_id)
    })
    .map_err(|e| e.to_string())?;

    print!("{}", format_score(topic_id, &summary, format));
    Ok(())
}
