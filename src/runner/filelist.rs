//! File lists
//!
//! An ordered collection of names built from glob patterns, usable
//! anywhere a list of prerequisites is accepted.

use crate::error::{ConfigError, ConfigResult};
use crate::runner::task::IntoPrerequisites;
use glob::Pattern;
use tracing::warn;

/// Ordered list of file names resolved from patterns
#[derive(Debug, Clone, Default)]
pub struct FileList {
    includes: Vec<String>,
    excludes: Vec<Pattern>,
}

impl FileList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name or a glob pattern
    ///
    /// Entries without glob metacharacters are kept as written, whether
    /// or not the file exists.
    pub fn include(mut self, pattern: impl Into<String>) -> ConfigResult<Self> {
        let pattern = pattern.into();
        if is_glob(&pattern) {
            compile(&pattern)?;
        }
        self.includes.push(pattern);
        Ok(self)
    }

    /// Drop every resolved name matching `pattern`
    pub fn exclude(mut self, pattern: &str) -> ConfigResult<Self> {
        self.excludes.push(compile(pattern)?);
        Ok(self)
    }

    /// Expand the patterns, in include order
    pub fn resolve(&self) -> Vec<String> {
        let mut names = Vec::new();

        for include in &self.includes {
            if !is_glob(include) {
                names.push(include.clone());
                continue;
            }

            let paths = match glob::glob(include) {
                Ok(paths) => paths,
                Err(e) => {
                    warn!(pattern = %include, error = %e, "skipping invalid pattern");
                    continue;
                }
            };

            let mut matched: Vec<String> = paths
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path.display().to_string()),
                    Err(e) => {
                        warn!(error = %e, "skipping unreadable path");
                        None
                    }
                })
                .collect();
            matched.sort();
            names.extend(matched);
        }

        names.retain(|name| !self.excludes.iter().any(|p| p.matches(name)));
        names
    }
}

impl IntoPrerequisites for FileList {
    fn into_prerequisites(self) -> Vec<String> {
        self.resolve()
    }
}

impl IntoPrerequisites for &FileList {
    fn into_prerequisites(self) -> Vec<String> {
        self.resolve()
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn compile(pattern: &str) -> ConfigResult<Pattern> {
    Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Task;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_plain_names_are_kept() {
        let list = FileList::new()
            .include("b")
            .unwrap()
            .include("c")
            .unwrap();
        assert_eq!(list.resolve(), vec!["b", "c"]);
    }

    #[test]
    fn test_filelist_as_prerequisites() {
        let list = FileList::new().include("b").unwrap().include("c").unwrap();
        let mut task = Task::new("a");
        task.enhance(list);
        assert_eq!(task.prerequisites(), &["b", "c"]);
    }

    #[test]
    fn test_glob_expansion_is_sorted() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["z.c", "a.c", "m.h"] {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }

        let pattern = format!("{}/*.c", temp_dir.path().display());
        let names = FileList::new().include(pattern).unwrap().resolve();

        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("a.c"));
        assert!(names[1].ends_with("z.c"));
    }

    #[test]
    fn test_exclude() {
        let list = FileList::new()
            .include("main.c")
            .unwrap()
            .include("main.o")
            .unwrap()
            .exclude("*.o")
            .unwrap();
        assert_eq!(list.resolve(), vec!["main.c"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = FileList::new().include("src/[*.c");
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }
}
