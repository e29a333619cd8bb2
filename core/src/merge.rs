//! Accumulating state: CLI settings and declaration lists.
//!
//! Descriptors can be configured more than once before their schema field is
//! finalized (a subclass or decorator adding declarations, for instance).
//! Both pieces of accumulated state therefore *merge* instead of replacing:
//!
//! - [`ClickData`] is merged key by key with [`merge_into`]; later values
//!   win, earlier keys are never dropped.
//! - [`Declarations`] only grows; entries already present are skipped.
//!
//! # Example
//!
//! ```
//! use param_descriptor_core::{ClickData, ClickValue, merge_into};
//!
//! let base = ClickData::new().with("nargs", 2_i64).with("help", "Files");
//! let merged = merge_into(base, ClickData::new().with("nargs", 3_i64));
//!
//! assert_eq!(merged.nargs(), Some(3));
//! assert_eq!(merged.help(), Some("Files"));
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::ClickValue;

/// Insertion-ordered mapping of CLI-surface settings.
///
/// Keys keep the position of their first insertion; re-inserting a key
/// replaces the value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickData {
    entries: IndexMap<String, ClickValue>,
}

impl ClickData {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a setting (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ClickValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key`, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ClickValue>,
    ) -> Option<ClickValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ClickValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates settings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClickValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Setting names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The `default` setting, if captured.
    pub fn default_value(&self) -> Option<&ClickValue> {
        self.get("default")
    }

    /// The `help` text, if set to a string.
    pub fn help(&self) -> Option<&str> {
        self.get("help").and_then(ClickValue::as_str)
    }

    /// The `nargs` setting, if set to an integer.
    pub fn nargs(&self) -> Option<i64> {
        self.get("nargs").and_then(ClickValue::as_int)
    }

    /// Reads a boolean setting, treating anything else as absent.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(ClickValue::as_bool)
    }

    /// Renders the mapping as a JSON object (closures become markers).
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect();
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<ClickValue>> FromIterator<(K, V)> for ClickData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (key, value) in iter {
            data.insert(key, value);
        }
        data
    }
}

impl fmt::Display for ClickData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        f.write_str("}")
    }
}

/// Merges `incoming` over `existing`.
///
/// The result holds every key of both mappings; for keys present in both,
/// the incoming value wins. Keys keep the position of their first
/// appearance.
///
/// # Examples
///
/// ```
/// use param_descriptor_core::{ClickData, ClickValue, merge_into};
///
/// let first = ClickData::new().with("hidden", true).with("count", false);
/// let second = ClickData::new().with("count", true).with("metavar", "N");
///
/// let merged = merge_into(first, second);
/// assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["hidden", "count", "metavar"]);
/// assert_eq!(merged.get("count"), Some(&ClickValue::Bool(true)));
/// ```
pub fn merge_into(mut existing: ClickData, incoming: ClickData) -> ClickData {
    for (key, value) in incoming.entries {
        existing.entries.insert(key, value);
    }
    existing
}

/// Ordered, duplicate-free declaration names of a parameter.
///
/// Every variant has a fixed base set that always leads the list. The first
/// update filters incoming names against that base set; every later update
/// filters against the accumulated list.
///
/// # Examples
///
/// ```
/// use param_descriptor_core::Declarations;
///
/// let mut decls = Declarations::new(&[]);
/// decls.extend(["-v", "--verbose"]);
/// decls.extend(["-v"]);
/// assert_eq!(decls.as_slice(), ["-v", "--verbose"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarations {
    base: &'static [&'static str],
    items: Vec<String>,
    updated: bool,
}

impl Declarations {
    /// Creates a list holding only `base`.
    pub fn new(base: &'static [&'static str]) -> Self {
        Self {
            base,
            items: base.iter().map(|decl| (*decl).to_string()).collect(),
            updated: false,
        }
    }

    /// Appends the declarations not yet present, in the given order.
    pub fn extend<I, S>(&mut self, decls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let incoming = decls.into_iter().map(Into::into);

        if self.updated {
            for decl in incoming {
                if self.items.contains(&decl) {
                    debug!(decl = %decl, "skipping already declared name");
                    continue;
                }
                self.items.push(decl);
            }
            return;
        }

        let mut items: Vec<String> = self.base.iter().map(|decl| (*decl).to_string()).collect();
        for decl in incoming {
            if self.base.contains(&decl.as_str()) || items.contains(&decl) {
                debug!(decl = %decl, "skipping base or repeated declaration");
                continue;
            }
            items.push(decl);
        }
        self.items = items;
        self.updated = true;
    }

    /// The fixed base declarations of the variant.
    pub fn base(&self) -> &'static [&'static str] {
        self.base
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn contains(&self, decl: &str) -> bool {
        self.items.iter().any(|item| item == decl)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
