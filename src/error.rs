//! Error types for prereq

use std::io;
use thiserror::Error;

/// Result type alias for prereq operations
pub type Result<T> = std::result::Result<T, PrereqError>;

/// Main error type for prereq
#[derive(Error, Debug)]
pub enum PrereqError {
    /// Task file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task graph and invocation errors
    #[error(transparent)]
    Task(#[from] TaskError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised by the task registry and the invocation engine
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),

    #[error("Don't know how to build task '{0}'")]
    NotFound(String),

    /// Failure raised by an action, passed through untouched
    #[error(transparent)]
    Action(#[from] anyhow::Error),
}

/// Task file parsing and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to find task file (searched: {0})")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid task name '{0}': names must be non-empty and must not contain '[', ']' or ','")]
    InvalidTaskName(String),

    #[error("Invalid file pattern '{pattern}': {error}")]
    InvalidPattern { pattern: String, error: String },
}

/// Shell action errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Command failed with exit code {0:?}")]
    CommandFailed(Option<i32>),

    #[error("Failed to start '{program}': {error}")]
    Spawn { program: String, error: String },
}

/// Specialized result type for the task engine
pub type TaskResult<T> = std::result::Result<T, TaskError>;

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
