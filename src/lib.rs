//! blank-quiz: terminal client for a fill-in-the-blank quiz service.

pub mod choices;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod session;
pub mod tui;
pub mod types;
