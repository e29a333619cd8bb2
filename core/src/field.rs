//! Schema-field value object embedded in every descriptor.
//!
//! [`SchemaField`] is what the schema-building side consumes: default or
//! default factory, description, title/alias and cardinality bounds. It is
//! built from [`SchemaParams`] once reconciliation has folded the CLI
//! settings in, and never changes afterwards.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::DefaultFactory;
use crate::validate::{ValidationError, validate_field};

/// Static default of a schema field.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldDefault {
    /// No static default.
    #[default]
    Undefined,
    /// Literal default (may be JSON `null`).
    Value(Value),
}

impl FieldDefault {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Undefined => None,
            Self::Value(value) => Some(value),
        }
    }
}

/// Schema-surface construction parameters.
///
/// `default` is normally left undefined: reconciliation fills it from the
/// CLI default. Keys without a dedicated field go into `extra` and reach
/// the schema field unchanged.
///
/// # Examples
///
/// ```
/// use param_descriptor_core::SchemaParams;
///
/// let params = SchemaParams::default()
///     .with_description("Output file")
///     .with_extra("examples", serde_json::json!(["out.txt"]));
/// assert_eq!(params.description.as_deref(), Some("Output file"));
/// assert_eq!(params.extra.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaParams {
    pub default: FieldDefault,
    pub default_factory: Option<DefaultFactory>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub alias: Option<String>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
    /// Pass-through options for the schema layer.
    pub extra: BTreeMap<String, Value>,
}

impl SchemaParams {
    pub fn with_default_factory(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default_factory = Some(DefaultFactory::new(f));
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn with_min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    pub fn with_extra(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

/// Schema field as seen by the schema-building collaborator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaField {
    default: FieldDefault,
    default_factory: Option<DefaultFactory>,
    description: Option<String>,
    title: Option<String>,
    alias: Option<String>,
    min_items: Option<usize>,
    max_items: Option<usize>,
    extra: BTreeMap<String, Value>,
}

impl SchemaField {
    /// Builds a field from parameters without validating it.
    ///
    /// Call [`validate`](Self::validate) before handing the field out.
    pub fn new(params: SchemaParams) -> Self {
        Self {
            default: params.default,
            default_factory: params.default_factory,
            description: params.description,
            title: params.title,
            alias: params.alias,
            min_items: params.min_items,
            max_items: params.max_items,
            extra: params.extra,
        }
    }

    /// Checks internal consistency, failing on the first problem found.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ConflictingDefaults`] when both a static
    /// default and a default factory are set, and
    /// [`ValidationError::InvalidCardinality`] when `min_items > max_items`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match validate_field(self).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn default(&self) -> &FieldDefault {
        &self.default
    }

    pub fn default_factory(&self) -> Option<&DefaultFactory> {
        self.default_factory.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn min_items(&self) -> Option<usize> {
        self.min_items
    }

    pub fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// A field without static default and without factory must be supplied.
    pub fn is_required(&self) -> bool {
        self.default.is_undefined() && self.default_factory.is_none()
    }

    /// Produces the default the validation engine would use.
    ///
    /// The factory runs on every call; a static default is cloned.
    ///
    /// # Examples
    ///
    /// ```
    /// use param_descriptor_core::{SchemaField, SchemaParams};
    ///
    /// let field = SchemaField::new(SchemaParams::default().with_default_factory(|| 42.into()));
    /// assert_eq!(field.resolve_default(), Some(serde_json::json!(42)));
    /// ```
    pub fn resolve_default(&self) -> Option<Value> {
        if let Some(factory) = &self.default_factory {
            return Some(factory.call());
        }
        self.default.as_value().cloned()
    }

    /// Renders the field as a JSON-schema fragment.
    ///
    /// Factories are not invoked; their presence is recorded as
    /// `"x-default-factory": true`.
    pub fn to_json_schema(&self) -> Value {
        let mut schema: Map<String, Value> = self
            .extra
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        if let Some(title) = &self.title {
            schema.insert("title".into(), Value::String(title.clone()));
        }
        if let Some(description) = &self.description {
            schema.insert("description".into(), Value::String(description.clone()));
        }
        if let Some(alias) = &self.alias {
            schema.insert("x-alias".into(), Value::String(alias.clone()));
        }
        if let FieldDefault::Value(value) = &self.default {
            schema.insert("default".into(), value.clone());
        }
        if self.default_factory.is_some() {
            schema.insert("x-default-factory".into(), Value::Bool(true));
        }
        if let Some(min) = self.min_items {
            schema.insert("minItems".into(), Value::from(min));
        }
        if let Some(max) = self.max_items {
            schema.insert("maxItems".into(), Value::from(max));
        }

        Value::Object(schema)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_field_without_default_is_required() {
        let field = SchemaField::new(SchemaParams::default());
        assert!(field.is_required());
        assert_eq!(field.resolve_default(), None);
    }

    #[test]
    fn test_null_default_is_not_required() {
        let field = SchemaField::new(SchemaParams {
            default: FieldDefault::Value(Value::Null),
            ..Default::default()
        });
        assert!(!field.is_required());
        assert_eq!(field.resolve_default(), Some(Value::Null));
    }

    #[test]
    fn test_json_schema_fragment() {
        let field = SchemaField::new(
            SchemaParams {
                default: FieldDefault::Value(json!(["a", "b"])),
                ..Default::default()
            }
            .with_description("Pair")
            .with_min_items(2)
            .with_max_items(2)
            .with_extra("type", json!("array")),
        );

        assert_eq!(
            field.to_json_schema(),
            json!({
                "type": "array",
                "description": "Pair",
                "default": ["a", "b"],
                "minItems": 2,
                "maxItems": 2,
            })
        );
    }

    #[test]
    fn test_json_schema_marks_factory() {
        let field = SchemaField::new(SchemaParams::default().with_default_factory(|| json!(0)));
        let schema = field.to_json_schema();
        assert_eq!(schema["x-default-factory"], json!(true));
        assert!(schema.get("default").is_none());
    }
}
