//! Task file validation
//!
//! Cycles are not checked here; the engine reports them when a task is
//! invoked.

use crate::config::types::{Config, TaskDef};
use crate::error::{ConfigError, ConfigResult};

/// Characters reserved for the `name[a,b]` command-line syntax
const RESERVED_CHARS: &[char] = &['[', ']', ','];

/// Validate a complete task file
pub fn validate_config(config: &Config) -> ConfigResult<()> {
    if let Some(interpreter) = &config.interpreter {
        if interpreter.is_empty() {
            return Err(ConfigError::Invalid(
                "interpreter must name a program".to_string(),
            ));
        }
    }

    for (name, task) in &config.tasks {
        validate_task(name, task)?;
    }

    Ok(())
}

/// Validate a single task definition
pub fn validate_task(name: &str, task: &TaskDef) -> ConfigResult<()> {
    validate_task_name(name)?;

    for dep in &task.deps {
        if dep.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "Task '{}' has an empty prerequisite name",
                name
            )));
        }
    }

    for pattern in &task.files {
        glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.clone(),
            error: e.to_string(),
        })?;
    }

    Ok(())
}

/// Check that a task name can be used on the command line
pub fn validate_task_name(name: &str) -> ConfigResult<()> {
    if name.trim().is_empty() || name.contains(RESERVED_CHARS) {
        return Err(ConfigError::InvalidTaskName(name.to_string()));
    }
    Ok(())
}
