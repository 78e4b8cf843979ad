//! Named, typed command parameter slot.

use crate::types::{ArgType, CheckResult, TypeKind};
use crate::value::Value;

/// One positional parameter of a command.
///
/// Constructed once at registration time. Each invocation runs the raw
/// token through the bound type and stores the normalized value; a value
/// from a prior invocation stays visible until the next successful
/// `set_value` overwrites it.
pub struct Argument {
    name: String,
    kind: Box<dyn ArgType>,
    description: String,
    value: Option<Value>,
}

impl Argument {
    pub fn new(
        name: impl Into<String>,
        kind: Box<dyn ArgType>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            value: None,
        }
    }

    /// Build an argument from a [`TypeKind`] tag.
    pub fn with_kind(
        name: impl Into<String>,
        kind: TypeKind,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, kind.build(), description)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Name of the bound type.
    pub fn type_name(&self) -> &str {
        self.kind.describe()
    }

    /// Validate one raw token and, on success, store its normalized
    /// form. `Failed`/`Canceled` leave the stored value untouched.
    pub fn set_value(&mut self, token: &str) -> CheckResult {
        let raw = Value::from(token);
        match self.kind.check(&raw) {
            CheckResult::Ok => {
                self.value = Some(self.kind.normalize(&raw));
                CheckResult::Ok
            }
            other => other,
        }
    }

    /// The normalized value from the most recent successful `set_value`.
    pub fn normalized_value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl std::fmt::Debug for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argument")
            .field("name", &self.name)
            .field("type", &self.kind.describe())
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
