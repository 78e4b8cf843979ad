//! Argument type layer: validation and normalization.
//!
//! Each console argument is bound to one [`ArgType`]. A type can vet a
//! raw token ([`check`](ArgType::check)) and turn it into its typed
//! [`Value`] form ([`normalize`](ArgType::normalize)). The variant set
//! is closed; [`TypeKind`] maps a tag to a constructor so callers never
//! subclass anything.

use lazy_static::lazy_static;
use regex::Regex;

use crate::value::Value;

lazy_static! {
    // Compiled once; every Int/Float/tuple type shares these.
    static ref INT_GRAMMAR: Regex = Regex::new(r"^[+-]?\d+$").expect("int grammar");
    static ref FLOAT_GRAMMAR: Regex =
        Regex::new(r"^[+-]?([0-9]*[\.,]?[0-9]+|[0-9]+[\.,]?[0-9]*)([eE][+-]?[0-9]+)?$")
            .expect("float grammar");
}

/// Tri-state outcome of a type check.
///
/// `Failed` is a hard rejection: the whole dispatch aborts with an
/// error result. `Canceled` is a soft rejection: the dispatch aborts
/// silently, as a deliberate no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckResult {
    Ok,
    Failed,
    Canceled,
}

/// Capability set shared by all argument types.
///
/// The defaults accept everything and normalize to the input itself,
/// matching the unconstrained type.
pub trait ArgType {
    /// Human-readable type name.
    fn describe(&self) -> &str;

    fn check(&self, _value: &Value) -> CheckResult {
        CheckResult::Ok
    }

    fn normalize(&self, value: &Value) -> Value {
        value.clone()
    }
}

/// Unconstrained type: everything passes, nothing changes.
#[derive(Debug, Default)]
pub struct AnyType;

impl AnyType {
    pub fn new() -> Self {
        Self
    }
}

impl ArgType for AnyType {
    fn describe(&self) -> &str {
        "Any"
    }
}

/// Boolean type. Never rejects; anything that is not the text `"true"`
/// or `"1"` (case-insensitive) normalizes to `false`.
#[derive(Debug, Default)]
pub struct BoolType;

impl BoolType {
    pub fn new() -> Self {
        Self
    }
}

impl ArgType for BoolType {
    fn describe(&self) -> &str {
        "Bool"
    }

    fn normalize(&self, value: &Value) -> Value {
        match value.as_str() {
            Some(text) => {
                let lowered = text.to_lowercase();
                Value::Bool(lowered == "true" || lowered == "1")
            }
            None => Value::Bool(false),
        }
    }
}

/// Text type: coerces any scalar to its textual form.
#[derive(Debug, Default)]
pub struct StringType;

impl StringType {
    pub fn new() -> Self {
        Self
    }
}

impl ArgType for StringType {
    fn describe(&self) -> &str {
        "String"
    }

    /// Booleans become `"true"`/`"false"`, numbers their decimal form.
    ///
    /// # Panics
    ///
    /// Panics on non-scalar input. Binding a String argument to a value
    /// it cannot represent is a registration-time programming mistake,
    /// not a user-input problem, and is not recoverable here.
    fn normalize(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.clone()),
            Value::Bool(b) => Value::String(if *b { "true" } else { "false" }.to_string()),
            Value::Int(n) => Value::String(n.to_string()),
            Value::Float(f) => Value::String(f.to_string()),
            other => panic!(
                "String argument cannot represent a {} value",
                other.type_name()
            ),
        }
    }
}

/// Membership mode for [`FilterType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Allow,
    Deny,
}

/// Filtered-set type: accepts values by allow- or deny-list membership.
/// Rejection is `Canceled` (the user picked something not on offer),
/// never `Failed`.
#[derive(Debug)]
pub struct FilterType {
    list: Vec<Value>,
    mode: FilterMode,
}

impl FilterType {
    pub fn new(list: Vec<Value>, mode: FilterMode) -> Self {
        Self { list, mode }
    }
}

impl ArgType for FilterType {
    fn describe(&self) -> &str {
        "Filter"
    }

    fn check(&self, value: &Value) -> CheckResult {
        let member = self.list.iter().any(|candidate| candidate == value);
        let accepted = match self.mode {
            FilterMode::Allow => member,
            FilterMode::Deny => !member,
        };
        if accepted {
            CheckResult::Ok
        } else {
            CheckResult::Canceled
        }
    }
}

/// Regex-backed composite: full-string match against a stored pattern.
/// The numeric and tuple types embed one of these.
#[derive(Debug, Clone)]
pub struct PatternType {
    name: String,
    pattern: Regex,
}

impl PatternType {
    pub fn new(name: impl Into<String>, pattern: Regex) -> Self {
        Self {
            name: name.into(),
            pattern,
        }
    }

    /// Compile a custom pattern.
    pub fn from_pattern(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self::new(name, Regex::new(pattern)?))
    }

    /// Whole-string match, regardless of anchors in the pattern.
    fn matches(&self, text: &str) -> bool {
        self.pattern
            .find(text)
            .is_some_and(|m| m.start() == 0 && m.end() == text.len())
    }

    /// The matched text, when the whole string matches.
    pub fn extract_match<'a>(&self, value: &'a Value) -> Option<&'a str> {
        let text = value.as_str()?;
        self.matches(text).then_some(text)
    }
}

impl ArgType for PatternType {
    fn describe(&self) -> &str {
        &self.name
    }

    fn check(&self, value: &Value) -> CheckResult {
        match value.as_str() {
            Some(text) if self.matches(text) => CheckResult::Ok,
            _ => CheckResult::Failed,
        }
    }
}

/// Integer type with the grammar `[+-]?digits`.
#[derive(Debug, Clone)]
pub struct IntType {
    pattern: PatternType,
}

impl IntType {
    pub fn new() -> Self {
        Self {
            pattern: PatternType::new("Int", INT_GRAMMAR.clone()),
        }
    }
}

impl Default for IntType {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgType for IntType {
    fn describe(&self) -> &str {
        self.pattern.describe()
    }

    fn check(&self, value: &Value) -> CheckResult {
        self.pattern.check(value)
    }

    fn normalize(&self, value: &Value) -> Value {
        self.pattern
            .extract_match(value)
            .and_then(|text| text.parse::<i64>().ok())
            .map_or(Value::None, Value::Int)
    }
}

/// Float type: decimal or scientific notation, with `.` or `,` as the
/// fraction separator.
#[derive(Debug, Clone)]
pub struct FloatType {
    pattern: PatternType,
}

impl FloatType {
    pub fn new() -> Self {
        Self {
            pattern: PatternType::new("Float", FLOAT_GRAMMAR.clone()),
        }
    }
}

impl Default for FloatType {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgType for FloatType {
    fn describe(&self) -> &str {
        self.pattern.describe()
    }

    fn check(&self, value: &Value) -> CheckResult {
        self.pattern.check(value)
    }

    fn normalize(&self, value: &Value) -> Value {
        self.pattern
            .extract_match(value)
            .and_then(parse_float)
            .map_or(Value::None, Value::Float)
    }
}

/// 2D numeric tuple: `x;y`, each component in Float grammar, missing
/// trailing components defaulting to zero.
#[derive(Debug, Clone)]
pub struct Vector2Type {
    pattern: PatternType,
}

impl Vector2Type {
    pub fn new() -> Self {
        Self {
            pattern: PatternType::new("Vector2", FLOAT_GRAMMAR.clone()),
        }
    }
}

impl Default for Vector2Type {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgType for Vector2Type {
    fn describe(&self) -> &str {
        self.pattern.describe()
    }

    fn check(&self, value: &Value) -> CheckResult {
        check_components(&self.pattern, value, 2)
    }

    fn normalize(&self, value: &Value) -> Value {
        match normalized_components(value, 2).as_deref() {
            Some([x, y]) => Value::Vector2([*x, *y]),
            _ => Value::None,
        }
    }
}

/// 3D numeric tuple: `x;y;z`.
#[derive(Debug, Clone)]
pub struct Vector3Type {
    pattern: PatternType,
}

impl Vector3Type {
    pub fn new() -> Self {
        Self {
            pattern: PatternType::new("Vector3", FLOAT_GRAMMAR.clone()),
        }
    }
}

impl Default for Vector3Type {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgType for Vector3Type {
    fn describe(&self) -> &str {
        self.pattern.describe()
    }

    fn check(&self, value: &Value) -> CheckResult {
        check_components(&self.pattern, value, 3)
    }

    fn normalize(&self, value: &Value) -> Value {
        match normalized_components(value, 3).as_deref() {
            Some([x, y, z]) => Value::Vector3([*x, *y, *z]),
            _ => Value::None,
        }
    }
}

/// Split tuple text on `;` into exactly `count` components.
///
/// Trailing empty components count as missing; missing trailing
/// components default to `"0"`; extra components are ignored. No
/// components at all is a malformed tuple (`None`).
fn tuple_components(text: &str, count: usize) -> Option<Vec<&str>> {
    let mut parts: Vec<&str> = text.split(';').collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    if parts.is_empty() {
        return None;
    }
    parts.truncate(count);
    while parts.len() < count {
        parts.push("0");
    }
    Some(parts)
}

fn check_components(pattern: &PatternType, value: &Value, count: usize) -> CheckResult {
    let Some(text) = value.as_str() else {
        return CheckResult::Failed;
    };
    let Some(parts) = tuple_components(text, count) else {
        return CheckResult::Failed;
    };
    for part in parts {
        if pattern.check(&Value::from(part)) == CheckResult::Failed {
            return CheckResult::Failed;
        }
    }
    CheckResult::Ok
}

fn normalized_components(value: &Value, count: usize) -> Option<Vec<f64>> {
    let parts = tuple_components(value.as_str()?, count)?;
    parts.into_iter().map(parse_float).collect()
}

/// Parse a Float-grammar token, treating `,` as the decimal point.
fn parse_float(text: &str) -> Option<f64> {
    text.replace(',', ".").parse::<f64>().ok()
}

/// Tag for every type constructible without configuration.
///
/// [`FilterType`] and [`PatternType`] carry configuration and are built
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Any,
    Bool,
    Int,
    Float,
    String,
    Vector2,
    Vector3,
}

impl TypeKind {
    pub fn build(self) -> Box<dyn ArgType> {
        match self {
            TypeKind::Any => Box::new(AnyType::new()),
            TypeKind::Bool => Box::new(BoolType::new()),
            TypeKind::Int => Box::new(IntType::new()),
            TypeKind::Float => Box::new(FloatType::new()),
            TypeKind::String => Box::new(StringType::new()),
            TypeKind::Vector2 => Box::new(Vector2Type::new()),
            TypeKind::Vector3 => Box::new(Vector3Type::new()),
        }
    }
}
