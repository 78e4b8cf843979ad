//! The console: parse, dispatch, log.
//!
//! [`Console`] owns the command registry and the history, talks to the
//! embedder through an optional output sink, and runs the single-line
//! pipeline: echo, parse, lookup, dispatch, record. Parsing and lookup
//! failures are silent toward the sink (a forgiving REPL, not a strict
//! one) and surface only as `debug!` telemetry.
//!
//! Everything is single-threaded and synchronous; an embedding host
//! must serialize calls to `execute` and the registration API.

use std::rc::Rc;

use tracing::{debug, warn};

use crate::argument::Argument;
use crate::collection::Collection;
use crate::command::{Command, CommandHandle, Commands};
use crate::history::{DEFAULT_HISTORY_LIMIT, History};
use crate::tokenizer::parse_invocation;
use crate::value::Value;

/// Where console output goes: one call per line. Absent sinks discard
/// everything.
pub type OutputSink = Rc<dyn Fn(&str)>;

/// Prefix for echoed input lines.
const PROMPT: &str = "$";

/// An in-process developer console.
///
/// ```
/// use devconsole::{Argument, Console, TypeKind, Value};
///
/// let mut console = Console::new();
/// console.add_command(
///     "greet",
///     |args| {
///         let name = args.first().and_then(Value::as_str).unwrap_or("world");
///         Value::from(format!("hello {name}"))
///     },
///     vec![Argument::with_kind("name", TypeKind::String, "who to greet")],
///     "Print a greeting",
/// );
///
/// console.execute("greet(console)");
/// assert_eq!(console.history().len(), 1);
/// ```
pub struct Console {
    commands: Commands,
    history: History,
    output: Option<OutputSink>,
}

impl Console {
    /// A console without an output sink; all output is discarded.
    pub fn new() -> Self {
        Self {
            commands: Commands::new(),
            history: History::new(None, DEFAULT_HISTORY_LIMIT),
            output: None,
        }
    }

    /// A console writing through `out`, one call per line.
    pub fn with_output<F>(out: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        let sink: OutputSink = Rc::new(out);
        Self {
            commands: Commands::new(),
            history: History::new(Some(sink.clone()), DEFAULT_HISTORY_LIMIT),
            output: Some(sink),
        }
    }

    /// Write one line to the output sink, if there is one.
    pub fn write_line(&self, message: &str) {
        if let Some(out) = &self.output {
            out(message);
        }
    }

    /// Register a command, overwriting any command of the same name.
    pub fn add_command<F>(
        &mut self,
        name: &str,
        target: F,
        arguments: Vec<Argument>,
        description: &str,
    ) where
        F: Fn(&[Value]) -> Value + 'static,
    {
        let key = Value::from(name);
        if self.commands.contains_key(&key) {
            warn!("overwriting existing command '{name}'");
        }
        let command = Command::new(name, target)
            .arguments(arguments)
            .description(description);
        self.commands
            .set_value(key, Value::Command(CommandHandle::new(command)));
    }

    /// Register a prebuilt command; the first registration of a name
    /// wins. Returns whether the command was stored.
    pub fn register_command(&mut self, name: &str, command: CommandHandle) -> bool {
        let key = Value::from(name);
        if self.commands.contains_key(&key) {
            return false;
        }
        self.commands.set_value(key, Value::Command(command));
        true
    }

    pub fn remove_command(&mut self, name: &str) {
        self.commands.remove(&Value::from(name));
    }

    /// Look up a command by exact name.
    pub fn get_command(&self, name: &str) -> Option<CommandHandle> {
        self.commands
            .get_value(&Value::from(name))
            .and_then(Value::as_command)
            .cloned()
    }

    /// All commands whose name starts with `prefix`.
    pub fn get_commands(&self, prefix: &str) -> Collection {
        self.commands.find(prefix)
    }

    /// Complete a partial command name (see [`Commands::autocomplete`]).
    pub fn autocomplete(&self, partial: &str) -> String {
        self.commands.autocomplete(partial)
    }

    /// Run one input line through the pipeline.
    ///
    /// The raw line is echoed first. A line that is not an invocation,
    /// or that names no registered command, is dropped silently. A found
    /// command is dispatched and the line recorded in history whether or
    /// not its argument checks passed; history keeps attempted commands,
    /// not only successful ones.
    pub fn execute(&mut self, input: &str) {
        self.write_line(&format!("{PROMPT} {input}"));

        let invocation = match parse_invocation(input) {
            Ok(invocation) => invocation,
            Err(error) => {
                debug!("discarding input that is not an invocation: {error}");
                return;
            }
        };

        let Some(command) = self.get_command(invocation.name) else {
            debug!("unknown command '{}'", invocation.name);
            return;
        };

        command.execute(&invocation.args);
        self.history.push(input);
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Write the numbered history to the output sink.
    pub fn print_history(&self) {
        self.history.print_all();
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("commands", &self.commands.len())
            .field("history", &self.history)
            .field("has_output", &self.output.is_some())
            .finish()
    }
}
