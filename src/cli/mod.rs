//! CLI interface and argument parsing
//!
//! This module handles command-line parsing, task listings and shell
//! completion.

pub mod app;
pub mod listing;

// Re-export main types
pub use app::*;
pub use listing::*;
