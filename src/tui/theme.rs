//! TUI color semantics and style constants.
//!
//! Color semantics:
//! - Green: correct answer, score
//! - Yellow: hint, transient states (loading, judging)
//! - Red: incorrect answer, errors
//! - Cyan: interactive elements (keybinding hints, input)
//! - Dim: de-emphasized (choices numbering, help line)
//! - Bold: important (sentence, topic names)

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Correct / success: green.
pub const STYLE_CORRECT: Style = Style::new().fg(Color::Green);

/// Hint / pending: yellow.
pub const STYLE_PENDING: Style = Style::new().fg(Color::Yellow);

/// Incorrect / error: red.
pub const STYLE_ERROR: Style = Style::new().fg(Color::Red);

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text: bold.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Cursor row in a list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Hint text.
pub const STYLE_HINT: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::ITALIC);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);
