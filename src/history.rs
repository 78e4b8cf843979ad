//! Bounded, deduplicating scrollback of executed input lines.

use std::ops::{Deref, DerefMut};

use crate::collection::Collection;
use crate::console::OutputSink;
use crate::value::Value;

/// Default number of lines kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Log of executed input lines, keyed by insertion order.
///
/// Never stores the same line twice in a row, and never grows past its
/// configured maximum: pushing onto a full history evicts the oldest
/// entry first.
pub struct History {
    collection: Collection,
    output: Option<OutputSink>,
    max_length: usize,
}

impl History {
    pub fn new(output: Option<OutputSink>, max_length: usize) -> Self {
        Self {
            collection: Collection::new(),
            output,
            max_length,
        }
    }

    /// Record one input line. A line equal to the current last entry is
    /// dropped.
    pub fn push(&mut self, line: &str) {
        let value = Value::from(line);
        let len = self.collection.len();
        if len > 0 && self.collection.get_by_index(len as i64 - 1) == Some(&value) {
            return;
        }
        if len == self.max_length {
            self.pop();
        }
        self.collection.add(value);
    }

    /// Remove and return the oldest entry.
    pub fn pop(&mut self) -> Option<Value> {
        let oldest = self.collection.get_by_index(0).cloned();
        if oldest.is_some() {
            self.collection.remove_by_index(0);
        }
        oldest
    }

    /// Write every stored line to the output sink, numbered from 1.
    /// Without a sink this is a no-op.
    pub fn print_all(&self) {
        let Some(out) = &self.output else {
            return;
        };
        for (index, line) in self.collection.values().enumerate() {
            if let Some(text) = line.as_str() {
                out(&format!("{}. {}", index + 1, text));
            }
        }
    }
}

impl Deref for History {
    type Target = Collection;

    fn deref(&self) -> &Collection {
        &self.collection
    }
}

impl DerefMut for History {
    fn deref_mut(&mut self) -> &mut Collection {
        &mut self.collection
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("len", &self.collection.len())
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}
