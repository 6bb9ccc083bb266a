//! Execution context for task invocation
//!
//! The context carries the run-wide mode flags and the sink that trace
//! lines are written to. The engine reads the flags but never changes them.

use std::cell::RefCell;
use std::rc::Rc;

/// Run-wide execution modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Report what would execute without running any action
    pub dry_run: bool,

    /// Report every invocation and execution
    pub trace: bool,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

/// Destination for `Invoke` / `Execute` trace lines
pub trait TraceSink {
    fn emit(&mut self, line: &str);
}

/// Writes trace lines to standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

impl TraceSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("** {}", line);
    }
}

/// Keeps trace lines in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl TraceSink for MemorySink {
    fn emit(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

/// Execution context that tracks state during task invocation
pub struct Context {
    /// Dry-run and trace flags
    pub options: Options,

    /// Verbosity level
    pub verbosity: Verbosity,

    sink: Box<dyn TraceSink>,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            options: Options::default(),
            verbosity: Verbosity::Normal,
            sink: Box::new(StdoutSink),
        }
    }

    /// Set the execution modes
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.options.dry_run = dry_run;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.options.trace = trace;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Send trace lines somewhere other than stdout
    pub fn with_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Emit a trace line; silent runs emit nothing
    pub fn trace_line(&mut self, line: &str) {
        if self.verbosity > Verbosity::Silent {
            self.sink.emit(line);
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
