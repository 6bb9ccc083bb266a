//! Loading a task file into a registry

use crate::config::types::Config;
use crate::error::ConfigResult;
use crate::runner::{shell_action, FileList, Registry, Shell};
use std::rc::Rc;
use tracing::debug;

/// Register every task of `config`, in file order
///
/// Each definition goes through the same calls a program would make:
/// describe, define, enhance, then one action per command.
pub fn load_tasks(config: &Config, registry: &mut Registry, shell: Shell) -> ConfigResult<()> {
    let shell = match &config.interpreter {
        Some(interpreter) => shell.with_interpreter(interpreter.clone()),
        None => shell,
    };
    let shell = Rc::new(shell);

    for (name, def) in &config.tasks {
        let mut files = FileList::new();
        for pattern in &def.files {
            files = files.include(pattern.as_str())?;
        }

        if let Some(desc) = &def.desc {
            registry.describe(desc.as_str());
        }

        let task = registry.define(name);
        task.enhance(def.deps.as_slice()).enhance(files);

        let params = task.arg_names().len();
        for command_line in &def.run {
            task.add_action(shell_action(&shell, command_line.as_str(), params, def.quiet));
        }

        debug!(
            task = name.as_str(),
            prerequisites = task.prerequisites().len(),
            actions = task.actions().len(),
            "loaded task"
        );
    }

    Ok(())
}
