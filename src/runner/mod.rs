//! Task graph and invocation engine
//!
//! This module holds the task registry, the task entity, argument binding,
//! descriptions and the engine that invokes tasks with their prerequisites.

pub mod args;
pub mod command;
pub mod context;
pub mod description;
pub mod filelist;
pub mod interpolate;
pub mod invoke;
pub mod registry;
pub mod task;

// Re-export main types
pub use args::*;
pub use command::*;
pub use context::*;
pub use description::*;
pub use filelist::*;
pub use interpolate::*;
pub use registry::*;
pub use task::*;
