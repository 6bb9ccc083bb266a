//! Task file parsing, validation and loading
//!
//! This module handles prereq.yml task files and turns their definitions
//! into registry calls.

pub mod load;
pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use load::*;
pub use parse::*;
pub use schema::*;
pub use types::*;
