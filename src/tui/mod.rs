//! TUI module for the interactive quiz.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Screen, Action, Transition, Effect)
//! - `update`: Pure transitions and background-event folding
//! - `view`: Pure rendering
//! - `theme`: Style constants
//! - `run`: Effects (terminal, threads, network)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
