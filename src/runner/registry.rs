//! Task registry
//!
//! The registry owns every task of a session, keyed by name, together with
//! the pending description for the next task definition.

use crate::error::{TaskError, TaskResult};
use crate::runner::description::DescriptionStore;
use crate::runner::task::Task;
use std::collections::HashMap;
use tracing::debug;

/// Index of a task inside its registry
pub(crate) type TaskId = usize;

/// Table of tasks in registration order
#[derive(Default)]
pub struct Registry {
    pub(crate) tasks: Vec<Task>,
    index: HashMap<String, TaskId>,
    descriptions: DescriptionStore,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the description of the next task to be defined
    pub fn describe(&mut self, text: impl Into<String>) {
        if self.descriptions.is_pending() {
            debug!("replacing a description no task has picked up");
        }
        self.descriptions.declare(text);
    }

    /// Look up a task, creating it if needed
    ///
    /// A pending description is consumed either way and merged into the
    /// task's metadata.
    pub fn define(&mut self, name: &str) -> &mut Task {
        let id = self.intern(name);
        &mut self.tasks[id]
    }

    /// Alias of `define`
    pub fn lookup_or_create(&mut self, name: &str) -> &mut Task {
        self.define(name)
    }

    /// Find an existing task; never creates one
    pub fn get(&self, name: &str) -> TaskResult<&Task> {
        let id = self.find(name)?;
        Ok(&self.tasks[id])
    }

    pub fn get_mut(&mut self, name: &str) -> TaskResult<&mut Task> {
        let id = self.find(name)?;
        Ok(&mut self.tasks[id])
    }

    pub fn exists(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All tasks in first-registration order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn all(&self) -> Vec<&Task> {
        self.tasks().collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every task and any pending description
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.index.clear();
        self.descriptions.clear();
    }

    pub(crate) fn find(&self, name: &str) -> TaskResult<TaskId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| TaskError::NotFound(name.to_string()))
    }

    /// Look up or create a task, then merge any pending description into it
    pub(crate) fn intern(&mut self, name: &str) -> TaskId {
        let id = self.resolve(name);

        if let Some(description) = self.descriptions.take() {
            self.tasks[id].apply_description(description);
        }

        id
    }

    /// Look up a task, creating a blank placeholder if it is missing
    ///
    /// Pending descriptions are left for the next definition.
    pub(crate) fn resolve(&mut self, name: &str) -> TaskId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }

        debug!(task = name, "creating task");
        let id = self.tasks.len();
        self.tasks.push(Task::new(name));
        self.index.insert(name.to_string(), id);
        id
    }
}
