//! Core configuration types
//!
//! This module defines the data structures that represent a prereq.yml task file.

use serde::{Deserialize, Serialize};

/// Top-level task file structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Program name shown in task listings (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Interpreter used for `run` commands (e.g., ["sh", "-c"])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<Vec<String>>,

    /// Tasks in the order they appear in the file
    #[serde(default, deserialize_with = "deserialize_tasks")]
    pub tasks: Vec<(String, TaskDef)>,
}

impl Config {
    /// Look up a task definition by name
    pub fn task(&self, name: &str) -> Option<&TaskDef> {
        self.tasks
            .iter()
            .find(|(task_name, _)| task_name == name)
            .map(|(_, def)| def)
    }
}

/// A task definition
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TaskDef {
    /// Description, optionally starting with `[arg, names]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,

    /// Prerequisite task names
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_names"
    )]
    pub deps: Vec<String>,

    /// Glob patterns whose matches become prerequisites
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_names"
    )]
    pub files: Vec<String>,

    /// Commands to run, one action each
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_names"
    )]
    pub run: Vec<String>,

    /// Don't echo commands before running them
    #[serde(default)]
    pub quiet: bool,
}

/// Custom deserializer keeping tasks in file order
fn deserialize_tasks<'de, D>(deserializer: D) -> Result<Vec<(String, TaskDef)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Mapping(mapping) => {
            let mut tasks = Vec::new();
            for (key, item) in mapping {
                let name = match key {
                    Value::String(name) => name,
                    other => {
                        return Err(D::Error::custom(format!(
                            "task name must be a string, got {:?}",
                            other
                        )))
                    }
                };
                // A bare `name:` declares an empty task
                let def = match item {
                    Value::Null => TaskDef::default(),
                    item => TaskDef::deserialize(item).map_err(D::Error::custom)?,
                };
                tasks.push((name, def));
            }
            Ok(tasks)
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("tasks must be a mapping of task names")),
    }
}

/// Custom deserializer for name lists that handles both single values and arrays
fn deserialize_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let value = Value::deserialize(deserializer)?;

    match value {
        Value::String(s) => Ok(vec![s]),
        Value::Sequence(seq) => {
            let mut names = Vec::new();
            for item in seq {
                let name = String::deserialize(item).map_err(D::Error::custom)?;
                names.push(name);
            }
            Ok(names)
        }
        Value::Null => Ok(Vec::new()),
        _ => Err(D::Error::custom("expected a string or a list of strings")),
    }
}
