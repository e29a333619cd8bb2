//! Value types shared by the CLI surface and the schema surface.
//!
//! CLI settings are stored as [`ClickValue`]s so a descriptor can keep an
//! open, mergeable mapping of them while the constructors stay strongly typed.
//! Callables (default factories, callbacks, completion hooks) are wrapped in
//! [`Callable`], which is cheap to clone and compares by identity.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Zero-argument factory producing a default value at resolution time.
pub type FactoryFn = dyn Fn() -> Value + Send + Sync;

/// Post-parse hook: receives the parameter name and the parsed value.
pub type CallbackFn = dyn Fn(&str, Value) -> Result<Value, String> + Send + Sync;

/// Completion hook: receives the incomplete word being completed.
pub type ShellCompleteFn = dyn Fn(&str) -> Vec<CompletionItem> + Send + Sync;

/// Shared handle to a callable stored in descriptor state.
///
/// Two handles are equal only when they point at the same closure.
pub struct Callable<F: ?Sized>(Arc<F>);

/// Default computed when the value is resolved rather than when declared.
pub type DefaultFactory = Callable<FactoryFn>;

/// Callback invoked by the CLI layer after a value is parsed.
pub type Callback = Callable<CallbackFn>;

/// Custom shell-completion source.
pub type ShellComplete = Callable<ShellCompleteFn>;

impl<F: ?Sized> Clone for Callable<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> PartialEq for Callable<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<F: ?Sized> fmt::Debug for Callable<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<callable>")
    }
}

impl Callable<FactoryFn> {
    /// Wraps a default factory.
    ///
    /// # Examples
    ///
    /// ```
    /// use param_descriptor_core::DefaultFactory;
    ///
    /// let factory = DefaultFactory::new(|| serde_json::json!(["a", "b"]));
    /// assert_eq!(factory.call(), serde_json::json!(["a", "b"]));
    /// ```
    pub fn new(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Produces a fresh default value.
    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl Callable<CallbackFn> {
    /// Wraps a post-parse callback.
    pub fn new(f: impl Fn(&str, Value) -> Result<Value, String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Runs the callback for `param` with the parsed `value`.
    pub fn call(&self, param: &str, value: Value) -> Result<Value, String> {
        (self.0)(param, value)
    }
}

impl Callable<ShellCompleteFn> {
    /// Wraps a shell-completion source.
    pub fn new(f: impl Fn(&str) -> Vec<CompletionItem> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Returns completion candidates for `incomplete`.
    pub fn call(&self, incomplete: &str) -> Vec<CompletionItem> {
        (self.0)(incomplete)
    }
}

/// A single shell-completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    /// Completed value.
    pub value: String,
    /// Optional help shown next to the candidate.
    pub help: Option<String>,
}

impl CompletionItem {
    /// Creates a candidate without help text.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            help: None,
        }
    }
}

/// CLI value type of a parameter.
///
/// Independent of the schema type; the CLI builder uses it to pick a value
/// parser. Adapted to the vocabulary of command-line libraries.
///
/// # Examples
///
/// ```
/// use param_descriptor_core::ClickType;
///
/// assert_eq!(ClickType::default(), ClickType::Any);
/// let fmt = ClickType::Choice(vec!["json".into(), "yaml".into()]);
/// assert!(matches!(fmt, ClickType::Choice(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClickType {
    /// Free-form text.
    String,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Boolean value.
    Bool,
    /// Any filesystem path.
    Path,
    /// File path.
    File,
    /// Directory path.
    Directory,
    /// UUID.
    Uuid,
    /// One of a fixed set of choices.
    Choice(Vec<String>),
    /// Unknown/any type (the default).
    #[default]
    Any,
}

/// Default supplied on the CLI surface: a literal or a factory.
///
/// A factory means "compute when resolved", which the schema side turns into
/// a default factory.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDefault {
    /// Literal default value.
    Value(Value),
    /// Zero-argument callable.
    Factory(DefaultFactory),
}

impl ParamDefault {
    /// Literal default.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Callable default.
    pub fn factory(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self::Factory(DefaultFactory::new(f))
    }

    /// Returns `true` for a callable default.
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Factory(_))
    }
}

impl From<ParamDefault> for ClickValue {
    fn from(default: ParamDefault) -> Self {
        match default {
            ParamDefault::Value(value) => ClickValue::Literal(value),
            ParamDefault::Factory(factory) => ClickValue::Factory(factory),
        }
    }
}

/// Environment variable(s) a parameter falls back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvVar {
    /// A single variable name.
    Single(String),
    /// Several names, tried in order.
    Many(Vec<String>),
}

impl EnvVar {
    /// Variable names in lookup order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(name) => vec![name.as_str()],
            Self::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for EnvVar {
    fn from(name: &str) -> Self {
        Self::Single(name.to_string())
    }
}

impl From<String> for EnvVar {
    fn from(name: String) -> Self {
        Self::Single(name)
    }
}

impl From<Vec<String>> for EnvVar {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl From<EnvVar> for ClickValue {
    fn from(envvar: EnvVar) -> Self {
        match envvar {
            EnvVar::Single(name) => ClickValue::Str(name),
            EnvVar::Many(names) => ClickValue::List(names),
        }
    }
}

/// Setting that is either a switch or a custom text (`prompt`,
/// `show_default`, `confirmation_prompt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoolOrText {
    /// Plain on/off.
    Flag(bool),
    /// Enabled with custom text.
    Text(String),
}

impl BoolOrText {
    /// Returns `true` unless this is `Flag(false)`.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Flag(false))
    }
}

impl Default for BoolOrText {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl From<bool> for BoolOrText {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<&str> for BoolOrText {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<BoolOrText> for ClickValue {
    fn from(value: BoolOrText) -> Self {
        match value {
            BoolOrText::Flag(flag) => ClickValue::Bool(flag),
            BoolOrText::Text(text) => ClickValue::Str(text),
        }
    }
}

/// A single CLI-surface setting.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickValue {
    /// Explicitly unset.
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
    /// Arbitrary literal (defaults, flag values).
    Literal(Value),
    Factory(DefaultFactory),
    Callback(Callback),
    ShellComplete(ShellComplete),
}

impl ClickValue {
    /// Returns `true` for [`ClickValue::Null`] and a literal JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Literal(Value::Null))
    }

    /// Returns `true` for values that hold a closure.
    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Self::Factory(_) | Self::Callback(_) | Self::ShellComplete(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            Self::Literal(Value::Bool(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Literal(value) => value.as_i64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(text) => Some(text),
            Self::Literal(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    /// Renders the setting as JSON.
    ///
    /// Closures have no data representation; they render as a marker string
    /// such as `"<factory>"`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Int(n) => Value::from(*n),
            Self::Str(text) => Value::String(text.clone()),
            Self::List(items) => Value::from(items.clone()),
            Self::Literal(value) => value.clone(),
            Self::Factory(_) => Value::String("<factory>".to_string()),
            Self::Callback(_) => Value::String("<callback>".to_string()),
            Self::ShellComplete(_) => Value::String("<shell_complete>".to_string()),
        }
    }
}

impl fmt::Display for ClickValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Factory(_) => f.write_str("<factory>"),
            Self::Callback(_) => f.write_str("<callback>"),
            Self::ShellComplete(_) => f.write_str("<shell_complete>"),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl From<bool> for ClickValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for ClickValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for ClickValue {
    fn from(text: &str) -> Self {
        Self::Str(text.to_string())
    }
}

impl From<String> for ClickValue {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<Value> for ClickValue {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<Callback> for ClickValue {
    fn from(callback: Callback) -> Self {
        Self::Callback(callback)
    }
}

impl From<ShellComplete> for ClickValue {
    fn from(complete: ShellComplete) -> Self {
        Self::ShellComplete(complete)
    }
}

impl<T: Into<ClickValue>> From<Option<T>> for ClickValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_callable_equality_is_identity() {
        let a = DefaultFactory::new(|| json!(1));
        let b = DefaultFactory::new(|| json!(1));

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_option_converts_to_null() {
        let none: Option<i64> = None;
        assert_eq!(ClickValue::from(none), ClickValue::Null);
        assert_eq!(ClickValue::from(Some(3_i64)), ClickValue::Int(3));
    }

    #[test]
    fn test_click_value_display() {
        assert_eq!(ClickValue::Str("x".into()).to_string(), "\"x\"");
        assert_eq!(ClickValue::Null.to_string(), "null");
        let factory = ClickValue::Factory(DefaultFactory::new(|| json!(0)));
        assert_eq!(factory.to_string(), "<factory>");
        assert!(factory.is_callable());
    }

    #[test]
    fn test_click_type_deserializes_choice() {
        let ty: ClickType = serde_json::from_value(json!({"choice": ["a", "b"]})).unwrap();
        assert_eq!(ty, ClickType::Choice(vec!["a".into(), "b".into()]));

        let ty: ClickType = serde_json::from_value(json!("int")).unwrap();
        assert_eq!(ty, ClickType::Int);
    }

    #[test]
    fn test_env_var_names() {
        let many = EnvVar::Many(vec!["A".into(), "B".into()]);
        assert_eq!(many.names(), vec!["A", "B"]);
        assert_eq!(ClickValue::from(EnvVar::from("A")), ClickValue::Str("A".into()));
    }
}
