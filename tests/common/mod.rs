//! Common test utilities

#![allow(dead_code)]

use prereq::runner::Action;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

/// Create a temporary directory with a prereq.yml file
pub fn create_test_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("prereq.yml");
    fs::write(&config_path, content).unwrap();
    (temp_dir, config_path)
}

/// Create a test config with a subdirectory to run from
pub fn create_test_config_in_subdir(content: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("prereq.yml");
    let sub_dir = temp_dir.path().join("subdir");

    fs::write(&config_path, content).unwrap();
    fs::create_dir(&sub_dir).unwrap();

    (temp_dir, config_path, sub_dir)
}

/// Shared list of task names, appended to by `recorder` actions
pub type RunList = Rc<RefCell<Vec<String>>>;

pub fn run_list() -> RunList {
    Rc::new(RefCell::new(Vec::new()))
}

/// Action that records the name of the task it runs for
pub fn recorder(runlist: &RunList) -> Action {
    let runlist = Rc::clone(runlist);
    Action::simple(move |task| {
        runlist.borrow_mut().push(task.name().to_string());
        Ok(())
    })
}
