//! Task entity
//!
//! A task is a named node in the graph: its prerequisites, the actions
//! attached to it, its description metadata and whether it already ran.

use crate::runner::args::{bind, ArgValue, Arity, BoundArgs};
use crate::runner::description::Description;
use std::fmt;
use std::rc::Rc;

/// Result returned by an action
pub type ActionResult = anyhow::Result<()>;

type ActionFn = dyn Fn(&Task, &BoundArgs) -> ActionResult;

/// Behaviour attached to a task
///
/// The declared arity is fixed when the action is created; the task's
/// arguments are bound against it each time the action runs.
#[derive(Clone)]
pub struct Action {
    arity: Arity,
    body: Rc<ActionFn>,
}

impl Action {
    /// Create an action taking the given parameters after the task itself
    pub fn new<F>(arity: Arity, body: F) -> Self
    where
        F: Fn(&Task, &BoundArgs) -> ActionResult + 'static,
    {
        Action {
            arity,
            body: Rc::new(body),
        }
    }

    /// Create an action that only receives the task
    pub fn simple<F>(body: F) -> Self
    where
        F: Fn(&Task) -> ActionResult + 'static,
    {
        Self::new(Arity::NONE, move |task, _| body(task))
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Run the action with the task's current arguments
    pub fn call(&self, task: &Task) -> ActionResult {
        let bound = bind(self.arity, task.args());
        (self.body)(task, &bound)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("arity", &self.arity).finish()
    }
}

/// Decides whether a task has work to do
///
/// Tasks without a check always need to run.
pub trait NeededCheck {
    /// Label shown as the task's class when investigating it
    fn kind(&self) -> &str;

    fn needed(&self, task: &Task) -> bool;
}

/// A named unit of work in the task graph
pub struct Task {
    name: String,
    prerequisites: Vec<String>,
    actions: Vec<Action>,
    pub(crate) already_invoked: bool,
    args: Vec<ArgValue>,
    arg_names: Vec<String>,
    comment: Option<String>,
    full_comment: Option<String>,
    needed_check: Option<Rc<dyn NeededCheck>>,
}

impl Task {
    /// Create a blank task
    pub fn new(name: impl Into<String>) -> Self {
        Task {
            name: name.into(),
            prerequisites: Vec::new(),
            actions: Vec::new(),
            already_invoked: false,
            args: Vec::new(),
            arg_names: Vec::new(),
            comment: None,
            full_comment: None,
            needed_check: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Whether the task already ran during this session
    pub fn already_invoked(&self) -> bool {
        self.already_invoked
    }

    /// Arguments bound to this task's actions
    pub fn args(&self) -> &[ArgValue] {
        &self.args
    }

    pub fn arg_names(&self) -> &[String] {
        &self.arg_names
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn full_comment(&self) -> Option<&str> {
        self.full_comment.as_deref()
    }

    /// Append prerequisites, keeping their order and any duplicates
    pub fn enhance<P: IntoPrerequisites>(&mut self, prerequisites: P) -> &mut Self {
        self.prerequisites.extend(prerequisites.into_prerequisites());
        self
    }

    /// Append an action
    pub fn add_action(&mut self, action: Action) -> &mut Self {
        self.actions.push(action);
        self
    }

    /// Append prerequisites and, when given, an action
    pub fn attach<P: IntoPrerequisites>(
        &mut self,
        prerequisites: P,
        action: Option<Action>,
    ) -> &mut Self {
        self.enhance(prerequisites);
        if let Some(action) = action {
            self.add_action(action);
        }
        self
    }

    /// Replace the task's arguments
    pub fn set_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(|arg| Some(arg.into())).collect();
        self
    }

    /// Replace the task's arguments, allowing missing values
    pub fn set_arg_values(&mut self, args: Vec<ArgValue>) -> &mut Self {
        self.args = args;
        self
    }

    pub fn set_needed_check(&mut self, check: Rc<dyn NeededCheck>) -> &mut Self {
        self.needed_check = Some(check);
        self
    }

    /// Whether the task has work to do
    pub fn is_needed(&self) -> bool {
        self.needed_check
            .as_ref()
            .map_or(true, |check| check.needed(self))
    }

    /// Class label used by `investigation`
    pub fn kind(&self) -> &str {
        self.needed_check
            .as_ref()
            .map_or("Task", |check| check.kind())
    }

    /// Merge a consumed description into this task
    ///
    /// Comments accumulate, separated by `" / "`.
    pub fn apply_description(&mut self, description: Description) {
        if !description.arg_names.is_empty() {
            self.arg_names = description.arg_names;
        }

        if let Some(comment) = description.comment {
            self.comment = Some(match self.comment.take() {
                Some(existing) => format!("{} / {}", existing, comment),
                None => comment,
            });
        }

        if description.full_comment.is_some() {
            self.full_comment = description.full_comment;
        }
    }

    /// Declared argument names rendered as `[a,b]`
    pub fn arg_description(&self) -> Option<String> {
        if self.arg_names.is_empty() {
            None
        } else {
            Some(format!("[{}]", self.arg_names.join(",")))
        }
    }

    /// Plain name
    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Name followed by the declared argument names, e.g. `build[a,b]`
    pub fn name_with_args(&self) -> String {
        match self.arg_description() {
            Some(args) => format!("{}{}", self.name, args),
            None => self.name.clone(),
        }
    }

    /// Human-readable dump of the task's state
    pub fn investigation(&self) -> String {
        let rule = "-".repeat(30);
        let mut out = String::new();
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("Investigating {}\n", self.name));
        out.push_str(&format!("class: {}\n", self.kind()));
        out.push_str(&format!("task needed: {}\n", self.is_needed()));
        if !self.arg_names.is_empty() {
            out.push_str(&format!("arg names: {}\n", self.arg_names.join(", ")));
        }
        out.push_str("pre-requisites:\n");
        for prerequisite in &self.prerequisites {
            out.push_str(&format!("--{}\n", prerequisite));
        }
        out.push_str(&rule);
        out.push('\n');
        out
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("prerequisites", &self.prerequisites)
            .field("actions", &self.actions.len())
            .field("already_invoked", &self.already_invoked)
            .field("args", &self.args)
            .field("arg_names", &self.arg_names)
            .field("comment", &self.comment)
            .finish()
    }
}

/// Anything that can be turned into an ordered list of task names
pub trait IntoPrerequisites {
    fn into_prerequisites(self) -> Vec<String>;
}

impl IntoPrerequisites for () {
    fn into_prerequisites(self) -> Vec<String> {
        Vec::new()
    }
}

impl IntoPrerequisites for &str {
    fn into_prerequisites(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoPrerequisites for String {
    fn into_prerequisites(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoPrerequisites for &String {
    fn into_prerequisites(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<T: Into<String>> IntoPrerequisites for Vec<T> {
    fn into_prerequisites(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<String>, const N: usize> IntoPrerequisites for [T; N] {
    fn into_prerequisites(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: AsRef<str>> IntoPrerequisites for &[T] {
    fn into_prerequisites(self) -> Vec<String> {
        self.iter().map(|name| name.as_ref().to_string()).collect()
    }
}
