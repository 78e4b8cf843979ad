//! Commands, shared command handles and the name-keyed registry.

use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

use crate::argument::Argument;
use crate::collection::Collection;
use crate::types::CheckResult;
use crate::value::Value;

/// Callable a command dispatches to. Receives the normalized argument
/// values in declaration order; may receive fewer values than declared
/// arguments when trailing tokens were omitted.
pub type CommandTarget = Box<dyn Fn(&[Value]) -> Value>;

/// A named callable bound to an ordered list of typed arguments.
///
/// ```
/// use devconsole::{Argument, Command, TypeKind, Value};
///
/// let mut teleport = Command::new("teleport", |args| {
///     Value::Bool(!args.is_empty())
/// })
/// .description("Move the player")
/// .argument(Argument::with_kind("target", TypeKind::Vector2, "destination"));
///
/// assert_eq!(teleport.execute(&["3;4"]), Value::Bool(true));
/// ```
pub struct Command {
    name: String,
    target: CommandTarget,
    arguments: Vec<Argument>,
    description: String,
}

impl Command {
    pub fn new<F>(name: impl Into<String>, target: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        Self {
            name: name.into(),
            target: Box::new(target),
            arguments: Vec::new(),
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a positional argument.
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Append several positional arguments at once.
    pub fn arguments(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn argument_list(&self) -> &[Argument] {
        &self.arguments
    }

    /// Validate and normalize each positional token, then invoke the
    /// target.
    ///
    /// A `Failed` check aborts at once with `Bool(false)`; a `Canceled`
    /// check aborts with `Bool(true)` as a deliberate no-op. The target
    /// never runs in either case. Extra tokens beyond the declared
    /// arguments are ignored; missing trailing tokens mean the target
    /// receives fewer values than declared.
    pub fn execute(&mut self, tokens: &[&str]) -> Value {
        let mut normalized = Vec::new();
        for (argument, token) in self.arguments.iter_mut().zip(tokens) {
            match argument.set_value(token) {
                CheckResult::Ok => {
                    if let Some(value) = argument.normalized_value() {
                        normalized.push(value.clone());
                    }
                }
                CheckResult::Failed => return Value::Bool(false),
                CheckResult::Canceled => return Value::Bool(true),
            }
        }
        (self.target)(&normalized)
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("arguments", &self.arguments.len())
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Shared handle to a registered command.
///
/// This is the opaque command reference carried by [`Value::Command`].
/// Handles compare and hash by identity: two handles are equal only when
/// they refer to the same command instance.
#[derive(Clone)]
pub struct CommandHandle(Rc<RefCell<Command>>);

impl CommandHandle {
    pub fn new(command: Command) -> Self {
        Self(Rc::new(RefCell::new(command)))
    }

    pub fn name(&self) -> String {
        self.0.borrow().name().to_string()
    }

    pub fn description(&self) -> String {
        self.0.borrow().get_description().to_string()
    }

    /// Dispatch through the shared handle. Dispatch is not reentrant:
    /// a target must not invoke its own command again.
    pub fn execute(&self, tokens: &[&str]) -> Value {
        self.0.borrow_mut().execute(tokens)
    }
}

impl PartialEq for CommandHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for CommandHandle {}

impl Hash for CommandHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl std::fmt::Debug for CommandHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.try_borrow() {
            Ok(command) => write!(f, "CommandHandle({})", command.name()),
            Err(_) => write!(f, "CommandHandle(<executing>)"),
        }
    }
}

/// Name-keyed command registry.
///
/// A [`Collection`] keyed by command name (`Value::String`), storing
/// [`Value::Command`] handles, with prefix search and
/// longest-common-prefix autocomplete on top.
#[derive(Debug, Clone, Default)]
pub struct Commands {
    collection: Collection,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries whose name starts with `prefix`, as a new collection.
    pub fn find(&self, prefix: &str) -> Collection {
        self.collection.filter(|key, _, _, _| {
            key.as_str().is_some_and(|name| name.starts_with(prefix))
        })
    }

    /// Complete a partial command name.
    ///
    /// A single prefix match returns that name verbatim, even when it is
    /// the input itself. Otherwise the longest common prefix across all
    /// matches other than the exact input is returned; with no such
    /// candidates the input comes back unchanged.
    pub fn autocomplete(&self, partial: &str) -> String {
        let matches = self.find(partial);
        if matches.len() == 1 {
            if let Some(name) = matches.get_by_index(0).and_then(Value::as_command).map(CommandHandle::name) {
                return name;
            }
        }

        let mut candidates: Vec<String> = matches
            .values()
            .filter_map(Value::as_command)
            .map(CommandHandle::name)
            .filter(|name| name != partial)
            .collect();
        if candidates.is_empty() {
            return partial.to_string();
        }
        candidates.sort();
        longest_common_prefix(&candidates)
    }
}

impl Deref for Commands {
    type Target = Collection;

    fn deref(&self) -> &Collection {
        &self.collection
    }
}

impl DerefMut for Commands {
    fn deref_mut(&mut self) -> &mut Collection {
        &mut self.collection
    }
}

/// Longest prefix shared by every candidate, scanning position by
/// position until a candidate runs out or candidates disagree.
fn longest_common_prefix(candidates: &[String]) -> String {
    let Some(first) = candidates.first() else {
        return String::new();
    };
    let mut end = first.len();
    for candidate in &candidates[1..] {
        let shared = first
            .bytes()
            .zip(candidate.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        end = end.min(shared);
    }
    while !first.is_char_boundary(end) {
        end -= 1;
    }
    first[..end].to_string()
}
