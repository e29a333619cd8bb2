//! Field descriptor core: CLI data, declarations and the embedded schema
//! field, joined by [`reconcile`].
//!
//! Construction runs in a fixed order:
//!
//! 1. the CLI-surface parameters are merged into [`ClickData`];
//! 2. [`reconcile`] folds the merged data into the schema parameters
//!    (default vs. default factory, description, cardinality);
//! 3. a [`SchemaField`] is built and validated.
//!
//! A failed validation leaves no descriptor behind, and an amended
//! descriptor keeps its previous state.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::merge::{ClickData, Declarations, merge_into};
use crate::validate::ValidationError;
use crate::{
    Callback, ClickType, ClickValue, EnvVar, FieldDefault, NamedDescriptor, ParamDefault,
    PositionalDescriptor, SchemaField, SchemaParams, ShellComplete,
};

/// Parameters shared by every descriptor variant.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonParams {
    pub required: Option<bool>,
    pub default: Option<ParamDefault>,
    pub callback: Option<Callback>,
    pub nargs: Option<i64>,
    pub multiple: bool,
    pub metavar: Option<String>,
    pub expose_value: bool,
    pub is_eager: bool,
    pub envvar: Option<EnvVar>,
    pub shell_complete: Option<ShellComplete>,
    /// Schema-surface parameters forwarded after reconciliation.
    pub schema: SchemaParams,
}

impl Default for CommonParams {
    fn default() -> Self {
        Self {
            required: None,
            default: None,
            callback: None,
            nargs: None,
            multiple: false,
            metavar: None,
            expose_value: true,
            is_eager: false,
            envvar: None,
            shell_complete: None,
            schema: SchemaParams::default(),
        }
    }
}

impl CommonParams {
    /// Splits into the CLI settings to merge and the schema parameters.
    fn into_parts(self) -> (ClickData, SchemaParams) {
        let data = ClickData::new()
            .with("required", self.required)
            .with("default", self.default)
            .with("callback", self.callback)
            .with("nargs", self.nargs)
            .with("multiple", self.multiple)
            .with("metavar", self.metavar)
            .with("expose_value", self.expose_value)
            .with("is_eager", self.is_eager)
            .with("envvar", self.envvar)
            .with("shell_complete", self.shell_complete);
        (data, self.schema)
    }
}

/// Computes the effective schema parameters from CLI data.
///
/// - A callable CLI default becomes the default factory unless one was
///   given explicitly; any other captured default, unset (null) included,
///   becomes the static default.
/// - A non-empty `help` becomes the description unless one was given.
/// - `nargs > 1` pins both `min_items` and `max_items`.
///
/// # Examples
///
/// ```
/// use param_descriptor_core::{ClickData, SchemaParams, reconcile};
///
/// let data = ClickData::new().with("help", "Do X").with("nargs", 3_i64);
/// let params = reconcile(&data, SchemaParams::default());
///
/// assert_eq!(params.description.as_deref(), Some("Do X"));
/// assert_eq!((params.min_items, params.max_items), (Some(3), Some(3)));
/// ```
pub fn reconcile(click_data: &ClickData, mut params: SchemaParams) -> SchemaParams {
    match click_data.default_value() {
        Some(ClickValue::Factory(factory)) if params.default_factory.is_none() => {
            params.default_factory = Some(factory.clone());
        }
        None => {}
        Some(ClickValue::Null) => params.default = FieldDefault::Value(Value::Null),
        Some(value) => params.default = FieldDefault::Value(value.to_json()),
    }

    if params.description.is_none() {
        if let Some(help) = click_data.help().filter(|help| !help.is_empty()) {
            params.description = Some(help.to_string());
        }
    }

    let nargs = click_data.nargs().unwrap_or(1);
    if nargs > 1 {
        let pinned = nargs as usize;
        params.min_items = Some(pinned);
        params.max_items = Some(pinned);
    }

    debug!(
        default = ?params.default,
        has_factory = params.default_factory.is_some(),
        min_items = ?params.min_items,
        max_items = ?params.max_items,
        "reconciled schema parameters"
    );
    params
}

/// Shared state of every descriptor variant.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    variant: &'static str,
    click_data: ClickData,
    click_decls: Declarations,
    click_type: Option<ClickType>,
    field: SchemaField,
}

impl FieldDescriptor {
    /// Builds and validates a descriptor in one step.
    ///
    /// # Errors
    ///
    /// Propagates the [`ValidationError`] of the resulting schema field.
    ///
    /// # Examples
    ///
    /// ```
    /// use param_descriptor_core::{CommonParams, FieldDescriptor, ParamDefault};
    ///
    /// let descriptor = FieldDescriptor::build(
    ///     "Custom",
    ///     &["--base"],
    ///     CommonParams {
    ///         default: Some(ParamDefault::value(5)),
    ///         ..Default::default()
    ///     },
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(descriptor.click_decls(), ["--base"]);
    /// assert_eq!(descriptor.schema_field().resolve_default(), Some(5.into()));
    /// ```
    pub fn build(
        variant: &'static str,
        base_decls: &'static [&'static str],
        params: CommonParams,
    ) -> Result<Self, ValidationError> {
        let mut descriptor = Self::blank(variant, base_decls);
        descriptor.initialize(params)?;
        Ok(descriptor)
    }

    /// State before the shared initializer has run.
    pub(crate) fn blank(variant: &'static str, base_decls: &'static [&'static str]) -> Self {
        Self {
            variant,
            click_data: ClickData::new(),
            click_decls: Declarations::new(base_decls),
            click_type: None,
            field: SchemaField::new(SchemaParams::default()),
        }
    }

    /// Merges the common parameters, reconciles and rebuilds the field.
    ///
    /// Nothing is committed unless the new field validates.
    pub(crate) fn initialize(&mut self, params: CommonParams) -> Result<(), ValidationError> {
        let (incoming, schema) = params.into_parts();
        let click_data = merge_into(self.click_data.clone(), incoming);
        let field = SchemaField::new(reconcile(&click_data, schema));
        field.validate()?;

        debug!(variant = self.variant, keys = click_data.len(), "initialized descriptor");
        self.click_data = click_data;
        self.field = field;
        Ok(())
    }

    /// Name of the concrete variant.
    pub fn variant(&self) -> &'static str {
        self.variant
    }

    pub fn click_data(&self) -> &ClickData {
        &self.click_data
    }

    /// Merges `data` into the current settings; nothing is removed.
    pub fn set_click_data(&mut self, data: ClickData) {
        self.click_data = merge_into(std::mem::take(&mut self.click_data), data);
    }

    pub fn click_decls(&self) -> &[String] {
        self.click_decls.as_slice()
    }

    /// Appends declarations that are not yet present.
    pub fn set_click_decls<I, S>(&mut self, decls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.click_decls.extend(decls);
    }

    pub fn click_type(&self) -> Option<&ClickType> {
        self.click_type.as_ref()
    }

    pub fn set_click_type(&mut self, click_type: Option<ClickType>) {
        self.click_type = click_type;
    }

    /// The embedded schema field.
    pub fn schema_field(&self) -> &SchemaField {
        &self.field
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> data={}", self.variant, self.click_data)
    }
}

/// Either descriptor variant, for mixed collections.
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Named(NamedDescriptor),
    Positional(PositionalDescriptor),
}

impl Descriptor {
    /// Shared state of the wrapped descriptor.
    pub fn core(&self) -> &FieldDescriptor {
        match self {
            Self::Named(named) => named,
            Self::Positional(positional) => positional,
        }
    }

    pub fn core_mut(&mut self) -> &mut FieldDescriptor {
        match self {
            Self::Named(named) => named,
            Self::Positional(positional) => positional,
        }
    }

    /// `"named"` or `"positional"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Named(_) => "named",
            Self::Positional(_) => "positional",
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.core(), f)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::DefaultFactory;

    #[test]
    fn test_callable_default_becomes_factory() {
        let data = ClickData::new().with("default", ParamDefault::factory(|| json!([1, 2])));
        let params = reconcile(&data, SchemaParams::default());

        assert!(params.default.is_undefined());
        let field = SchemaField::new(params);
        assert!(field.validate().is_ok());
        assert_eq!(field.resolve_default(), Some(json!([1, 2])));
    }

    #[test]
    fn test_unset_default_with_explicit_factory_conflicts() {
        let data = ClickData::new().with("default", ClickValue::Null);
        let explicit = DefaultFactory::new(|| json!("x"));
        let params = reconcile(
            &data,
            SchemaParams {
                default_factory: Some(explicit.clone()),
                ..Default::default()
            },
        );

        assert_eq!(params.default, FieldDefault::Value(Value::Null));
        assert_eq!(params.default_factory, Some(explicit));
        assert_eq!(
            SchemaField::new(params).validate(),
            Err(ValidationError::ConflictingDefaults)
        );
    }

    #[test]
    fn test_schema_factory_without_cli_default_conflicts() {
        let result = FieldDescriptor::build(
            "Custom",
            &[],
            CommonParams {
                schema: SchemaParams::default().with_default_factory(|| json!(1)),
                ..Default::default()
            },
        );

        assert_eq!(result.unwrap_err(), ValidationError::ConflictingDefaults);
    }

    #[test]
    fn test_literal_default_with_explicit_factory_conflicts() {
        let result = FieldDescriptor::build(
            "Custom",
            &[],
            CommonParams {
                default: Some(ParamDefault::value("x")),
                schema: SchemaParams::default().with_default_factory(|| json!("y")),
                ..Default::default()
            },
        );

        assert_eq!(result.unwrap_err(), ValidationError::ConflictingDefaults);
    }

    #[test]
    fn test_unset_default_is_static_null() {
        let descriptor = FieldDescriptor::build("Custom", &[], CommonParams::default()).unwrap();
        let field = descriptor.schema_field();

        assert_eq!(field.default(), &FieldDefault::Value(Value::Null));
        assert!(field.default_factory().is_none());
        assert!(!field.is_required());
    }

    #[test]
    fn test_missing_default_key_stays_undefined() {
        let params = reconcile(&ClickData::new(), SchemaParams::default());
        assert!(params.default.is_undefined());
    }

    #[test]
    fn test_explicit_description_wins_over_help() {
        let data = ClickData::new().with("help", "From help");
        let params = reconcile(&data, SchemaParams::default().with_description("Explicit"));
        assert_eq!(params.description.as_deref(), Some("Explicit"));
    }

    #[test]
    fn test_empty_help_is_not_a_description() {
        let data = ClickData::new().with("help", "");
        let params = reconcile(&data, SchemaParams::default());
        assert_eq!(params.description, None);
    }

    #[test]
    fn test_nargs_pins_cardinality_over_explicit_bounds() {
        let data = ClickData::new().with("nargs", 3_i64);
        let params = reconcile(
            &data,
            SchemaParams::default().with_min_items(1).with_max_items(9),
        );
        assert_eq!((params.min_items, params.max_items), (Some(3), Some(3)));
    }

    #[test]
    fn test_single_or_variadic_nargs_leaves_bounds() {
        for nargs in [1_i64, -1] {
            let data = ClickData::new().with("nargs", nargs);
            let params = reconcile(&data, SchemaParams::default());
            assert_eq!((params.min_items, params.max_items), (None, None));
        }
    }

    #[test]
    fn test_failed_initialize_keeps_previous_state() {
        let mut descriptor = FieldDescriptor::build(
            "Custom",
            &[],
            CommonParams {
                nargs: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
        let before = descriptor.clone();

        let err = descriptor
            .initialize(CommonParams {
                schema: SchemaParams::default().with_min_items(4).with_max_items(2),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(err, ValidationError::InvalidCardinality { min: 4, max: 2 });
        assert_eq!(descriptor, before);
    }

    #[test]
    fn test_set_click_data_merges() {
        let mut descriptor = FieldDescriptor::build("Custom", &[], CommonParams::default()).unwrap();
        descriptor.set_click_data(ClickData::new().with("metavar", "PATH"));
        descriptor.set_click_data(ClickData::new().with("hidden", true));

        assert_eq!(descriptor.click_data().get("metavar"), Some(&ClickValue::Str("PATH".into())));
        assert_eq!(descriptor.click_data().flag("hidden"), Some(true));
        assert_eq!(descriptor.click_data().flag("expose_value"), Some(true));
    }

    #[test]
    fn test_click_type_last_write_wins() {
        let mut descriptor = FieldDescriptor::build("Custom", &[], CommonParams::default()).unwrap();
        descriptor.set_click_type(Some(ClickType::Int));
        descriptor.set_click_type(Some(ClickType::Path));
        assert_eq!(descriptor.click_type(), Some(&ClickType::Path));
        descriptor.set_click_type(None);
        assert_eq!(descriptor.click_type(), None);
    }

    #[test]
    fn test_display_names_variant_and_data() {
        let descriptor = FieldDescriptor::build(
            "Custom",
            &[],
            CommonParams {
                nargs: Some(2),
                ..Default::default()
            },
        )
        .unwrap();

        let repr = descriptor.to_string();
        assert!(repr.starts_with("<Custom> data={required: null, default: null"));
        assert!(repr.contains("nargs: 2"));
    }
}
