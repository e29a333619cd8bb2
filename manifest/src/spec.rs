//! Serializable param entries of a manifest.
//!
//! Each entry is tagged with its `kind`. Positional entries reject
//! option-only keys such as `prompt` or `count` at deserialization time.
//!
//! # Example YAML
//!
//! ```yaml
//! - name: verbose
//!   kind: named
//!   decls: ["-v", "--verbose"]
//!   count: true
//!   help: Increase verbosity
//! - name: target
//!   kind: positional
//!   nargs: 2
//!   envvar: DEPLOY_TARGET
//!   schema:
//!     title: Deploy targets
//! ```

use std::collections::BTreeMap;

use param_descriptor_core::{
    BoolOrText, ClickType, EnvVar, NamedParams, ParamDefault, PositionalParams, SchemaParams,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema-surface settings of an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
    /// Pass-through options for the schema layer.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl From<SchemaSpec> for SchemaParams {
    fn from(spec: SchemaSpec) -> Self {
        Self {
            description: spec.description,
            title: spec.title,
            alias: spec.alias,
            min_items: spec.min_items,
            max_items: spec.max_items,
            extra: spec.extra,
            ..Default::default()
        }
    }
}

/// A named option entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamedSpec {
    pub name: String,
    pub decls: Vec<String>,
    pub click_type: Option<ClickType>,
    pub required: Option<bool>,
    pub default: Option<Value>,
    pub nargs: Option<i64>,
    pub multiple: bool,
    pub expose_value: bool,
    pub is_eager: bool,
    pub envvar: Option<EnvVar>,
    pub show_default: Option<BoolOrText>,
    pub prompt: BoolOrText,
    pub confirmation_prompt: BoolOrText,
    pub prompt_required: bool,
    pub hide_input: bool,
    pub is_flag: Option<bool>,
    pub flag_value: Option<Value>,
    pub count: bool,
    pub allow_from_autoenv: bool,
    pub help: Option<String>,
    pub hidden: bool,
    pub show_choices: bool,
    pub show_envvar: bool,
    pub schema: SchemaSpec,
}

impl Default for NamedSpec {
    fn default() -> Self {
        let params = NamedParams::default();
        Self {
            name: String::new(),
            decls: Vec::new(),
            click_type: None,
            required: params.required,
            default: None,
            nargs: params.nargs,
            multiple: params.multiple,
            expose_value: params.expose_value,
            is_eager: params.is_eager,
            envvar: None,
            show_default: None,
            prompt: params.prompt,
            confirmation_prompt: params.confirmation_prompt,
            prompt_required: params.prompt_required,
            hide_input: params.hide_input,
            is_flag: None,
            flag_value: None,
            count: params.count,
            allow_from_autoenv: params.allow_from_autoenv,
            help: None,
            hidden: params.hidden,
            show_choices: params.show_choices,
            show_envvar: params.show_envvar,
            schema: SchemaSpec::default(),
        }
    }
}

impl NamedSpec {
    /// Converts into constructor parameters.
    pub fn to_params(&self) -> NamedParams {
        NamedParams {
            decls: self.decls.clone(),
            required: self.required,
            default: self.default.clone().map(ParamDefault::Value),
            nargs: self.nargs,
            multiple: self.multiple,
            callback: None,
            expose_value: self.expose_value,
            is_eager: self.is_eager,
            envvar: self.envvar.clone(),
            show_default: self.show_default.clone(),
            prompt: self.prompt.clone(),
            confirmation_prompt: self.confirmation_prompt.clone(),
            prompt_required: self.prompt_required,
            hide_input: self.hide_input,
            is_flag: self.is_flag,
            flag_value: self.flag_value.clone(),
            count: self.count,
            allow_from_autoenv: self.allow_from_autoenv,
            help: self.help.clone(),
            hidden: self.hidden,
            show_choices: self.show_choices,
            show_envvar: self.show_envvar,
            schema: self.schema.clone().into(),
        }
    }
}

/// A positional argument entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PositionalSpec {
    pub name: String,
    pub click_type: Option<ClickType>,
    pub required: Option<bool>,
    pub default: Option<Value>,
    pub nargs: Option<i64>,
    pub envvar: Option<EnvVar>,
    pub schema: SchemaSpec,
}

impl PositionalSpec {
    /// Converts into constructor parameters.
    pub fn to_params(&self) -> PositionalParams {
        PositionalParams {
            required: self.required,
            default: self.default.clone().map(ParamDefault::Value),
            nargs: self.nargs,
            envvar: self.envvar.clone(),
            schema: self.schema.clone().into(),
        }
    }
}

/// One param entry, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamSpec {
    Named(NamedSpec),
    Positional(PositionalSpec),
}

impl ParamSpec {
    pub fn name(&self) -> &str {
        match self {
            Self::Named(spec) => &spec.name,
            Self::Positional(spec) => &spec.name,
        }
    }

    pub fn click_type(&self) -> Option<&ClickType> {
        match self {
            Self::Named(spec) => spec.click_type.as_ref(),
            Self::Positional(spec) => spec.click_type.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_spec_defaults_match_params() {
        let spec: ParamSpec = serde_yaml::from_str("kind: named\nname: v\n").unwrap();
        let ParamSpec::Named(named) = spec else {
            panic!("expected a named spec");
        };

        let params = named.to_params();
        assert!(params.expose_value);
        assert!(params.prompt_required);
        assert!(params.show_choices);
        assert!(params.allow_from_autoenv);
        assert_eq!(params.prompt, BoolOrText::Flag(false));
    }

    #[test]
    fn test_positional_spec_rejects_option_only_keys() {
        let yaml = "kind: positional\nname: src\ncount: true\n";
        assert!(serde_yaml::from_str::<ParamSpec>(yaml).is_err());
    }

    #[test]
    fn test_prompt_accepts_text_or_flag() {
        let yaml = "kind: named\nname: pw\nprompt: Password\nshow_default: true\n";
        let ParamSpec::Named(named) = serde_yaml::from_str::<ParamSpec>(yaml).unwrap() else {
            panic!("expected a named spec");
        };

        assert_eq!(named.prompt, BoolOrText::Text("Password".into()));
        assert_eq!(named.show_default, Some(BoolOrText::Flag(true)));
    }

    #[test]
    fn test_schema_extra_passes_through() {
        let yaml = "kind: positional\nname: n\nschema:\n  extra:\n    minimum: 1\n";
        let ParamSpec::Positional(spec) = serde_yaml::from_str::<ParamSpec>(yaml).unwrap() else {
            panic!("expected a positional spec");
        };

        let params = spec.to_params();
        assert_eq!(params.schema.extra["minimum"], serde_json::json!(1));
    }
}
