//! A minimal, embeddable developer console.
//!
//! devconsole parses single lines of the form `name(arg1,arg2,...)`,
//! matches them against registered commands, validates and normalizes
//! each argument through a typed check layer, dispatches, and records
//! the line in a bounded scrollback history:
//!
//! - **Value**: dynamically-tagged value model shared by commands,
//!   arguments and collections
//! - **Collection**: insertion-ordered `Value -> Value` container with a
//!   stateful iteration cursor
//! - **ArgType**: capability-based argument types (`check` /
//!   `normalize` / `describe`) with a closed variant set
//! - **Command / Commands**: typed callables and the name-keyed registry
//!   with prefix search and longest-common-prefix autocomplete
//! - **Console**: the echo–parse–lookup–dispatch–record pipeline
//!
//! # Quick Start
//!
//! ```
//! use devconsole::prelude::*;
//!
//! let mut console = Console::with_output(|line| println!("{line}"));
//!
//! console.add_command(
//!     "teleport",
//!     |args| {
//!         match args.first() {
//!             Some(Value::Vector2(position)) => {
//!                 // move the player...
//!                 Value::Vector2(*position)
//!             }
//!             _ => Value::Bool(false),
//!         }
//!     },
//!     vec![Argument::with_kind("target", TypeKind::Vector2, "destination")],
//!     "Move the player to a position",
//! );
//!
//! console.execute("teleport(3;4)");
//! assert_eq!(console.autocomplete("tele"), "teleport");
//! ```
//!
//! The console is single-threaded by design: command handles are
//! `Rc`-based, dispatch is synchronous, and an embedding host must
//! serialize access. Output goes through a single "write one line"
//! callback supplied at construction; without one, output is discarded.

pub mod argument;
pub mod collection;
pub mod command;
pub mod console;
pub mod history;
pub mod tokenizer;
pub mod types;
pub mod value;

pub use argument::Argument;
pub use collection::Collection;
pub use command::{Command, CommandHandle, CommandTarget, Commands};
pub use console::{Console, OutputSink};
pub use history::{DEFAULT_HISTORY_LIMIT, History};
pub use tokenizer::{Invocation, ParseError, parse_invocation};
pub use types::{
    AnyType, ArgType, BoolType, CheckResult, FilterMode, FilterType, FloatType, IntType,
    PatternType, StringType, TypeKind, Vector2Type, Vector3Type,
};
pub use value::{Value, ValueMap};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::argument::Argument;
    pub use crate::collection::Collection;
    pub use crate::command::{Command, CommandHandle, Commands};
    pub use crate::console::{Console, OutputSink};
    pub use crate::history::History;
    pub use crate::tokenizer::parse_invocation;
    pub use crate::types::{ArgType, CheckResult, FilterMode, FilterType, TypeKind};
    pub use crate::value::{Value, ValueMap};
}
