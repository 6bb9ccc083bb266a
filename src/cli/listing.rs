//! Human-facing task listings
//!
//! Renders the `--tasks`, `--describe` and `--prereqs` views of a registry.

use crate::runner::{Registry, Task};
use regex::Regex;

/// One line per described task: `prog name[args]  # comment`
pub fn list_tasks(registry: &Registry, program: &str, pattern: Option<&Regex>) -> String {
    let tasks: Vec<&Task> = described(registry, pattern).collect();
    let width = tasks
        .iter()
        .map(|task| task.name_with_args().chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for task in tasks {
        if let Some(comment) = task.comment() {
            out.push_str(&format!(
                "{} {:<width$}  # {}\n",
                program,
                task.name_with_args(),
                comment,
                width = width
            ));
        }
    }
    out
}

/// Full description of every described task
pub fn describe_tasks(registry: &Registry, program: &str, pattern: Option<&Regex>) -> String {
    let mut out = String::new();
    for task in described(registry, pattern) {
        out.push_str(&format!("{} {}\n", program, task.name_with_args()));
        let text = task.full_comment().or(task.comment()).unwrap_or_default();
        for line in text.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str(&format!("    {}\n", line));
            }
        }
        out.push('\n');
    }
    out
}

/// Every task followed by its prerequisites
pub fn list_prerequisites(registry: &Registry, program: &str) -> String {
    let mut out = String::new();
    for task in registry.tasks() {
        out.push_str(&format!("{} {}\n", program, task.name()));
        for prerequisite in task.prerequisites() {
            out.push_str(&format!("    {}\n", prerequisite));
        }
    }
    out
}

fn described<'a>(
    registry: &'a Registry,
    pattern: Option<&'a Regex>,
) -> impl Iterator<Item = &'a Task> + 'a {
    registry
        .tasks()
        .filter(|task| task.comment().is_some())
        .filter(move |task| pattern.map_or(true, |re| re.is_match(task.name())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.describe("[target, profile] Build the project");
        registry.define("build");
        registry.describe("Run tests");
        registry.define("test").enhance("build");
        registry.define("hidden");
        registry.describe(
            "
            Deploy everything

            Pushes the release to every host.
            ",
        );
        registry.define("deploy").enhance(["build", "test"]);
        registry
    }

    #[test]
    fn test_list_tasks_aligns_comments() {
        let out = list_tasks(&registry(), "prereq", None);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "prereq build[target,profile]  # Build the project",
                "prereq test                   # Run tests",
                "prereq deploy                 # Deploy everything",
            ]
        );
    }

    #[test]
    fn test_list_tasks_with_pattern() {
        let re = Regex::new("^te").unwrap();
        let out = list_tasks(&registry(), "prereq", Some(&re));
        assert_eq!(out, "prereq test  # Run tests\n");
    }

    #[test]
    fn test_describe_uses_full_comment() {
        let re = Regex::new("deploy").unwrap();
        let out = describe_tasks(&registry(), "prereq", Some(&re));
        assert_eq!(
            out,
            "prereq deploy\n    Deploy everything\n\n    Pushes the release to every host.\n\n"
        );
    }

    #[test]
    fn test_list_prerequisites() {
        let out = list_prerequisites(&registry(), "prereq");
        assert!(out.contains("prereq test\n    build\n"));
        assert!(out.contains("prereq hidden\n"));
        assert!(out.contains("prereq deploy\n    build\n    test\n"));
    }
}
