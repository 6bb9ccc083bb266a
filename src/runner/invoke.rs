//! Invocation engine
//!
//! Invoking a task runs its prerequisites first, depth first and in
//! declared order, then its own actions. Every task runs at most once per
//! registry; revisiting a task that is still on the call chain is a cycle.

use crate::error::{TaskError, TaskResult};
use crate::runner::args::ArgValue;
use crate::runner::context::Context;
use crate::runner::registry::{Registry, TaskId};
use std::collections::HashMap;
use tracing::debug;

/// Names of the tasks currently being invoked, outermost first
#[derive(Debug, Default)]
struct InvocationChain {
    names: Vec<String>,
}

impl InvocationChain {
    /// Push `name`, failing if it is already on the chain
    fn enter(&mut self, name: &str) -> TaskResult<()> {
        if self.names.iter().any(|n| n == name) {
            let mut cycle = self.names.clone();
            cycle.push(name.to_string());
            return Err(TaskError::CircularDependency(cycle.join(" => ")));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    fn leave(&mut self) {
        self.names.pop();
    }
}

impl Registry {
    /// Invoke a task and, before it, all of its prerequisites
    ///
    /// The root task must exist; prerequisites are created on first
    /// reference.
    pub fn invoke(&mut self, name: &str, ctx: &mut Context) -> TaskResult<()> {
        let id = self.find(name)?;
        let mut chain = InvocationChain::default();
        self.invoke_with_chain(id, &mut chain, ctx)
    }

    /// Run a task's actions without touching its prerequisites
    pub fn execute(&self, name: &str, ctx: &mut Context) -> TaskResult<()> {
        let id = self.find(name)?;
        self.execute_task(id, ctx)
    }

    fn invoke_with_chain(
        &mut self,
        id: TaskId,
        chain: &mut InvocationChain,
        ctx: &mut Context,
    ) -> TaskResult<()> {
        let task = &self.tasks[id];
        if task.already_invoked {
            debug!(task = task.name(), "already invoked");
            return Ok(());
        }

        chain.enter(task.name())?;

        if ctx.options.trace {
            ctx.trace_line(&format!("Invoke {}", task.name()));
        }

        let prerequisites = task.prerequisites().to_vec();
        for prerequisite in &prerequisites {
            let prerequisite_id = self.resolve(prerequisite);
            self.propagate_args(id, prerequisite_id);
            self.invoke_with_chain(prerequisite_id, chain, ctx)?;
        }

        chain.leave();

        let task = &mut self.tasks[id];
        task.already_invoked = true;

        if !task.is_needed() {
            debug!(task = task.name(), "not needed, skipping actions");
            return Ok(());
        }

        self.execute_task(id, ctx)
    }

    fn execute_task(&self, id: TaskId, ctx: &mut Context) -> TaskResult<()> {
        let task = &self.tasks[id];

        if ctx.options.dry_run {
            ctx.trace_line(&format!("Execute (dry run) {}", task.name()));
            return Ok(());
        }

        if ctx.options.trace {
            ctx.trace_line(&format!("Execute {}", task.name()));
        }

        for action in task.actions() {
            action.call(task)?;
        }

        Ok(())
    }

    /// Pass named arguments from a task to one of its prerequisites
    ///
    /// Only happens when both sides declare argument names; values are
    /// matched by name, missing names bind to nothing.
    fn propagate_args(&mut self, from: TaskId, to: TaskId) {
        let parent = &self.tasks[from];
        let child = &self.tasks[to];
        if parent.arg_names().is_empty() || child.arg_names().is_empty() {
            return;
        }

        let named: HashMap<&str, &ArgValue> = parent
            .arg_names()
            .iter()
            .map(String::as_str)
            .zip(parent.args())
            .collect();

        let args: Vec<ArgValue> = child
            .arg_names()
            .iter()
            .map(|name| named.get(name.as_str()).and_then(|value| (*value).clone()))
            .collect();

        debug!(from = parent.name(), to = child.name(), "propagating arguments");
        self.tasks[to].set_arg_values(args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{Action, MemorySink};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(runlist: &Rc<RefCell<Vec<String>>>) -> Action {
        let runlist = Rc::clone(runlist);
        Action::simple(move |task| {
            runlist.borrow_mut().push(task.name().to_string());
            Ok(())
        })
    }

    #[test]
    fn test_chain_reports_cycle() {
        let mut chain = InvocationChain::default();
        chain.enter("t1").unwrap();
        chain.enter("t2").unwrap();
        let err = chain.enter("t1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Circular dependency detected: t1 => t2 => t1"
        );
    }

    #[test]
    fn test_chain_is_case_sensitive() {
        let mut chain = InvocationChain::default();
        chain.enter("a").unwrap();
        assert!(chain.enter("A").is_ok());
        chain.leave();
        chain.leave();
        assert!(chain.enter("a").is_ok());
    }

    #[test]
    fn test_prerequisites_run_first() {
        let runlist = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new();
        registry
            .define("t1")
            .attach(["t2", "t3"], Some(recorder(&runlist)));
        registry.define("t2").add_action(recorder(&runlist));
        registry.define("t3").add_action(recorder(&runlist));

        registry.invoke("t1", &mut Context::new()).unwrap();
        assert_eq!(*runlist.borrow(), vec!["t2", "t3", "t1"]);
    }

    #[test]
    fn test_self_prerequisite_is_a_cycle() {
        let mut registry = Registry::new();
        registry.define("a").enhance("a");

        let err = registry.invoke("a", &mut Context::new()).unwrap_err();
        assert!(matches!(err, TaskError::CircularDependency(ref path) if path == "a => a"));
    }

    #[test]
    fn test_execute_skips_prerequisites() {
        let runlist = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new();
        registry.define("t1").attach("t2", Some(recorder(&runlist)));
        registry.define("t2").add_action(recorder(&runlist));

        registry.execute("t1", &mut Context::new()).unwrap();
        registry.execute("t1", &mut Context::new()).unwrap();
        assert_eq!(*runlist.borrow(), vec!["t1", "t1"]);
        assert!(!registry.get("t1").unwrap().already_invoked());
    }

    #[test]
    fn test_trace_lines_in_order() {
        let sink = MemorySink::new();
        let mut ctx = Context::new().with_trace(true).with_sink(sink.clone());
        let mut registry = Registry::new();
        registry.define("t1").enhance("t2");

        registry.invoke("t1", &mut ctx).unwrap();
        assert_eq!(
            sink.lines(),
            vec!["Invoke t1", "Invoke t2", "Execute t2", "Execute t1"]
        );
    }
}
