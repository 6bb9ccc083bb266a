//! Main CLI application

use crate::cli::listing::{describe_tasks, list_prerequisites, list_tasks};
use crate::config::{load_dotenv, load_tasks, parse_config_auto, parse_config_file, validate_config};
use crate::error::{ConfigError, PrereqError};
use crate::runner::{Context, Options, Registry, Shell, Verbosity};
use clap::{Arg, ArgAction, ArgMatches, Command};
use clap_complete::Shell as CompletionShell;
use regex::Regex;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Task invoked when none is named on the command line
pub const DEFAULT_TASK: &str = "default";

/// Build the clap command
pub fn build_command() -> Command {
    Command::new("prereq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A dependency-driven task runner")
        .arg(
            Arg::new("targets")
                .value_name("TASK[ARGS]")
                .help("Tasks to invoke, e.g. build or build[x86,release]")
                .num_args(0..),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to the prereq.yml task file"),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Show what would execute without running any action")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("trace")
                .short('t')
                .long("trace")
                .help("Trace every invocation and execution")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tasks")
                .short('T')
                .long("tasks")
                .value_name("PATTERN")
                .help("List tasks with descriptions, optionally matching PATTERN")
                .num_args(0..=1)
                .default_missing_value(""),
        )
        .arg(
            Arg::new("describe")
                .short('D')
                .long("describe")
                .value_name("PATTERN")
                .help("Show full task descriptions, optionally matching PATTERN")
                .num_args(0..=1)
                .default_missing_value(""),
        )
        .arg(
            Arg::new("prereqs")
                .short('P')
                .long("prereqs")
                .help("List every task with its prerequisites")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Don't echo commands")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .help("Print a shell completion script")
                .value_parser(clap::value_parser!(CompletionShell)),
        )
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<(), PrereqError> {
    let matches = build_command().get_matches();
    run_with_matches(&matches)
}

/// Run the CLI application with already parsed arguments
pub fn run_with_matches(matches: &ArgMatches) -> Result<(), PrereqError> {
    if let Some(shell) = matches.get_one::<CompletionShell>("completions") {
        clap_complete::generate(*shell, &mut build_command(), "prereq", &mut io::stdout());
        return Ok(());
    }

    let verbosity = get_verbosity(matches);
    init_logging(verbosity);

    let (config, config_path) = match matches.get_one::<String>("file") {
        Some(path) => {
            let path = PathBuf::from(path);
            (parse_config_file(&path)?, path)
        }
        None => parse_config_auto()?,
    };
    validate_config(&config)?;
    load_dotenv(&config_path)?;

    // Task names and file patterns are relative to the task file
    env::set_current_dir(config_dir(&config_path))?;
    let working_dir = env::current_dir()?;
    debug!(dir = %working_dir.display(), "changed to task file directory");

    let mut registry = Registry::new();
    load_tasks(
        &config,
        &mut registry,
        Shell::new(working_dir).with_verbosity(verbosity),
    )?;

    let program = config.name.as_deref().unwrap_or("prereq");

    if let Some(pattern) = matches.get_one::<String>("tasks") {
        print!("{}", list_tasks(&registry, program, compile_filter(pattern)?.as_ref()));
        return Ok(());
    }
    if let Some(pattern) = matches.get_one::<String>("describe") {
        print!("{}", describe_tasks(&registry, program, compile_filter(pattern)?.as_ref()));
        return Ok(());
    }
    if matches.get_flag("prereqs") {
        print!("{}", list_prerequisites(&registry, program));
        return Ok(());
    }

    let mut ctx = Context::new()
        .with_options(Options {
            dry_run: matches.get_flag("dry-run"),
            trace: matches.get_flag("trace"),
        })
        .with_verbosity(verbosity);

    let requests: Vec<String> = match matches.get_many::<String>("targets") {
        Some(targets) => targets.cloned().collect(),
        None => vec![DEFAULT_TASK.to_string()],
    };

    for request in &requests {
        let (name, args) = parse_task_request(request);
        if !args.is_empty() {
            registry.get_mut(&name)?.set_args(args);
        }
        registry.invoke(&name, &mut ctx)?;
    }

    Ok(())
}

/// Split `name[a, b]` into the task name and its arguments
pub fn parse_task_request(request: &str) -> (String, Vec<String>) {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"^([^\[]+)\[(.*)\]$").expect("valid task pattern"));

    match re.captures(request) {
        Some(caps) => {
            let args = if caps[2].trim().is_empty() {
                Vec::new()
            } else {
                caps[2].split(',').map(|arg| arg.trim().to_string()).collect()
            };
            (caps[1].to_string(), args)
        }
        None => (request.to_string(), Vec::new()),
    }
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Install the tracing subscriber; `RUST_LOG` wins over the verbosity flag
fn init_logging(verbosity: Verbosity) {
    let level = if verbosity >= Verbosity::Verbose {
        "prereq=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn compile_filter(pattern: &str) -> Result<Option<Regex>, ConfigError> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(pattern)
        .map(Some)
        .map_err(|e| ConfigError::Invalid(format!("Invalid task pattern '{}': {}", pattern, e)))
}

fn config_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
