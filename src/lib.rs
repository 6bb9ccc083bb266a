//! prereq - a dependency-driven task runner
//!
//! Tasks form a named graph. Invoking a task runs each of its transitive
//! prerequisites first, exactly once, in declared order, and reports
//! circular dependencies with the offending path.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

// Re-export commonly used types
pub use error::{PrereqError, Result, TaskError};
pub use runner::{Action, Arity, BoundArgs, Context, Options, Registry, Task};

/// Current version of prereq
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
