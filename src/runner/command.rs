//! Shell command actions
//!
//! Commands listed under `run` in a task file become actions that run
//! through the configured interpreter with the task's arguments available
//! as `${name}` references and environment variables.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::args::{Arity, BoundArgs};
use crate::runner::context::Verbosity;
use crate::runner::interpolate;
use crate::runner::task::{Action, Task};
use colored::Colorize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command as StdCommand, Stdio};
use std::rc::Rc;
use tracing::debug;

/// Interpreter and working directory shared by all shell actions
#[derive(Debug, Clone)]
pub struct Shell {
    /// Interpreter and its arguments (e.g., ["sh", "-c"])
    pub interpreter: Vec<String>,

    /// Directory commands run in
    pub working_dir: PathBuf,

    /// Verbosity level for echoing commands
    pub verbosity: Verbosity,
}

impl Shell {
    pub fn new(working_dir: PathBuf) -> Self {
        Shell {
            interpreter: vec!["sh".to_string(), "-c".to_string()],
            working_dir,
            verbosity: Verbosity::Normal,
        }
    }

    /// Set the interpreter
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Run a command line after interpolating `vars` into it
    pub fn run(
        &self,
        command_line: &str,
        vars: &HashMap<String, String>,
        quiet: bool,
    ) -> ExecutionResult<()> {
        let exec_str = interpolate(command_line, vars);

        if !quiet && self.verbosity >= Verbosity::Normal {
            eprintln!("{}", exec_str.dimmed());
        }

        let (program, interpreter_args) = match self.interpreter.split_first() {
            Some(split) => split,
            None => {
                return Err(ExecutionError::Spawn {
                    program: String::new(),
                    error: "no interpreter configured".to_string(),
                })
            }
        };

        let mut command = StdCommand::new(program);
        command.args(interpreter_args);
        command.arg(&exec_str);
        command.current_dir(&self.working_dir);

        command.stdin(Stdio::inherit());
        command.stdout(Stdio::inherit());
        command.stderr(Stdio::inherit());

        for (key, value) in vars {
            command.env(key, value);
        }

        debug!(command = %exec_str, "running shell command");
        let status = command.status().map_err(|e| ExecutionError::Spawn {
            program: program.clone(),
            error: e.to_string(),
        })?;

        if !status.success() {
            return Err(ExecutionError::CommandFailed(status.code()));
        }

        Ok(())
    }
}

/// Build an action running `command_line` through `shell` for a task
/// declaring `params` argument names
pub fn shell_action(
    shell: &Rc<Shell>,
    command_line: impl Into<String>,
    params: usize,
    quiet: bool,
) -> Action {
    let shell = Rc::clone(shell);
    let command_line = command_line.into();
    Action::new(Arity::fixed(params), move |task, args| {
        let vars = task_vars(task, args);
        shell.run(&command_line, &vars, quiet)?;
        Ok(())
    })
}

/// Variables visible to a task's commands: its bound arguments by name,
/// plus `task` for the task name
fn task_vars(task: &Task, args: &BoundArgs) -> HashMap<String, String> {
    let mut vars: HashMap<String, String> = task
        .arg_names()
        .iter()
        .zip(args.values())
        .filter_map(|(name, value)| value.as_ref().map(|v| (name.clone(), v.clone())))
        .collect();
    vars.insert("task".to_string(), task.name().to_string());
    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Description;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn shell() -> Shell {
        Shell::new(env::temp_dir()).with_verbosity(Verbosity::Silent)
    }

    #[test]
    fn test_run_simple_command() {
        let vars = HashMap::new();
        assert!(shell().run("echo test", &vars, false).is_ok());
    }

    #[test]
    fn test_run_failing_command() {
        let result = shell().run("exit 3", &HashMap::new(), true);
        assert!(matches!(result, Err(ExecutionError::CommandFailed(Some(3)))));
    }

    #[test]
    fn test_missing_interpreter() {
        let result = shell()
            .with_interpreter(vec!["definitely-not-a-shell-prereq".to_string()])
            .run("true", &HashMap::new(), true);
        assert!(matches!(result, Err(ExecutionError::Spawn { .. })));
    }

    #[test]
    fn test_action_sees_bound_arguments() {
        let temp_dir = TempDir::new().unwrap();
        let shell = Rc::new(
            Shell::new(temp_dir.path().to_path_buf()).with_verbosity(Verbosity::Silent),
        );

        let mut task = Task::new("greet");
        task.apply_description(Description::parse("[name, greeting] Greet someone"));
        task.set_args(["bob"]);

        let action = shell_action(&shell, "echo \"${task}:${name}:$greeting\" > out.txt", 2, true);
        action.call(&task).unwrap();

        let output = fs::read_to_string(temp_dir.path().join("out.txt")).unwrap();
        assert_eq!(output.trim(), "greet:bob:");
    }
}
