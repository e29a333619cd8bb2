//! Positional argument descriptor.
//!
//! Only the settings that make sense for a positional argument can be
//! expressed: `required`, `default`, `nargs` and `envvar`, plus schema
//! parameters. Option-only settings have no setter here, so passing one is
//! a compile error:
//!
//! ```compile_fail
//! use param_descriptor_core::PositionalParams;
//!
//! let params = PositionalParams::default().with_count(true);
//! ```
//!
//! ```compile_fail
//! use param_descriptor_core::PositionalParams;
//!
//! let params = PositionalParams::default().with_prompt(true);
//! ```
//!
//! ```compile_fail
//! use param_descriptor_core::PositionalParams;
//!
//! let params = PositionalParams {
//!     is_flag: Some(true),
//!     ..Default::default()
//! };
//! ```

use std::ops::{Deref, DerefMut};

use serde_json::Value;

use crate::descriptor::{CommonParams, FieldDescriptor};
use crate::validate::ValidationError;
use crate::{EnvVar, ParamDefault, SchemaParams};

const VARIANT: &str = "PositionalDescriptor";
const BASE_DECLS: &[&str] = &[];

/// Construction parameters of a [`PositionalDescriptor`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionalParams {
    pub required: Option<bool>,
    pub default: Option<ParamDefault>,
    pub nargs: Option<i64>,
    pub envvar: Option<EnvVar>,
    pub schema: SchemaParams,
}

impl PositionalParams {
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Literal default.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(ParamDefault::value(value));
        self
    }

    /// Callable default, resolved by the schema side.
    pub fn with_default_factory(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(ParamDefault::factory(f));
        self
    }

    pub fn with_nargs(mut self, nargs: i64) -> Self {
        self.nargs = Some(nargs);
        self
    }

    pub fn with_envvar(mut self, envvar: impl Into<EnvVar>) -> Self {
        self.envvar = Some(envvar.into());
        self
    }

    pub fn with_schema(mut self, schema: SchemaParams) -> Self {
        self.schema = schema;
        self
    }
}

impl From<PositionalParams> for CommonParams {
    fn from(params: PositionalParams) -> Self {
        Self {
            required: params.required,
            default: params.default,
            nargs: params.nargs,
            envvar: params.envvar,
            schema: params.schema,
            ..Default::default()
        }
    }
}

/// Schema field that is also a positional CLI argument.
///
/// # Examples
///
/// ```
/// use param_descriptor_core::{PositionalDescriptor, PositionalParams};
///
/// let files = PositionalDescriptor::new(
///     PositionalParams::default().with_nargs(2).with_envvar("FILES"),
/// )
/// .unwrap();
///
/// assert_eq!(files.schema_field().min_items(), Some(2));
/// assert!(files.click_decls().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalDescriptor {
    core: FieldDescriptor,
}

impl PositionalDescriptor {
    /// Builds a positional descriptor.
    ///
    /// # Errors
    ///
    /// Propagates the schema field's [`ValidationError`].
    pub fn new(params: PositionalParams) -> Result<Self, ValidationError> {
        let core = FieldDescriptor::build(VARIANT, BASE_DECLS, params.into())?;
        Ok(Self { core })
    }

    /// Applies another round of parameters over the current state.
    ///
    /// Settings merge into the existing CLI data and the schema field is
    /// rebuilt; on error the descriptor is left unchanged.
    pub fn amend(&mut self, params: PositionalParams) -> Result<(), ValidationError> {
        self.core.initialize(params.into())
    }
}

impl Deref for PositionalDescriptor {
    type Target = FieldDescriptor;

    fn deref(&self) -> &FieldDescriptor {
        &self.core
    }
}

impl DerefMut for PositionalDescriptor {
    fn deref_mut(&mut self) -> &mut FieldDescriptor {
        &mut self.core
    }
}

impl std::fmt::Display for PositionalDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.core, f)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ClickValue;

    #[test]
    fn test_positional_captures_common_keys() {
        let arg = PositionalDescriptor::new(
            PositionalParams::default()
                .with_required(true)
                .with_envvar("SRC"),
        )
        .unwrap();

        let data = arg.click_data();
        assert_eq!(data.flag("required"), Some(true));
        assert_eq!(data.get("envvar"), Some(&ClickValue::Str("SRC".into())));
        assert_eq!(data.flag("multiple"), Some(false));
        assert_eq!(data.get("callback"), Some(&ClickValue::Null));
        assert!(!data.contains_key("prompt"));
    }

    #[test]
    fn test_positional_nargs_three_pins_bounds() {
        let arg = PositionalDescriptor::new(PositionalParams::default().with_nargs(3)).unwrap();
        assert_eq!(arg.schema_field().min_items(), Some(3));
        assert_eq!(arg.schema_field().max_items(), Some(3));
    }

    #[test]
    fn test_positional_factory_default() {
        let arg = PositionalDescriptor::new(
            PositionalParams::default().with_default_factory(|| json!("now")),
        )
        .unwrap();

        assert!(arg.schema_field().default().is_undefined());
        assert_eq!(arg.schema_field().resolve_default(), Some(json!("now")));
    }

    #[test]
    fn test_positional_passes_extra_schema_options() {
        let arg = PositionalDescriptor::new(
            PositionalParams::default()
                .with_schema(SchemaParams::default().with_extra("pattern", json!("^[a-z]+$"))),
        )
        .unwrap();

        assert_eq!(arg.schema_field().extra()["pattern"], json!("^[a-z]+$"));
    }

    #[test]
    fn test_positional_amend_merges_and_revalidates() {
        let mut arg = PositionalDescriptor::new(PositionalParams::default().with_envvar("A")).unwrap();
        arg.amend(PositionalParams::default().with_default(7)).unwrap();

        assert_eq!(arg.click_data().get("envvar"), Some(&ClickValue::Null));
        assert_eq!(arg.schema_field().resolve_default(), Some(json!(7)));

        let before = arg.clone();
        let err = arg.amend(
            PositionalParams::default()
                .with_schema(SchemaParams::default().with_min_items(2).with_max_items(1)),
        );
        assert!(err.is_err());
        assert_eq!(arg, before);
    }

    #[test]
    fn test_positional_display() {
        let arg = PositionalDescriptor::new(PositionalParams::default()).unwrap();
        assert!(arg.to_string().starts_with("<PositionalDescriptor> data={"));
    }
}
