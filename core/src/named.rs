//! Named option descriptor.
//!
//! Accepts declaration spellings (`-v`, `--verbose`) and the option-only
//! settings (prompts, flags, counters, visibility). Those are written into
//! the descriptor before the shared initializer runs, because
//! reconciliation reads them back (`help` feeds the schema description).

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde_json::Value;
use tracing::debug;

use crate::descriptor::{CommonParams, FieldDescriptor};
use crate::merge::ClickData;
use crate::validate::ValidationError;
use crate::{BoolOrText, Callback, EnvVar, ParamDefault, SchemaParams};

const VARIANT: &str = "NamedDescriptor";
const BASE_DECLS: &[&str] = &[];

/// Construction parameters of a [`NamedDescriptor`].
///
/// Defaults follow the usual option conventions: values are exposed,
/// prompts are off, choices are shown and auto-env lookup is allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParams {
    pub decls: Vec<String>,
    pub required: Option<bool>,
    pub default: Option<ParamDefault>,
    pub nargs: Option<i64>,
    pub multiple: bool,
    pub callback: Option<Callback>,
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
    pub schema: SchemaParams,
}

impl Default for NamedParams {
    fn default() -> Self {
        Self {
            decls: Vec::new(),
            required: None,
            default: None,
            nargs: None,
            multiple: false,
            callback: None,
            expose_value: true,
            is_eager: false,
            envvar: None,
            show_default: None,
            prompt: BoolOrText::Flag(false),
            confirmation_prompt: BoolOrText::Flag(false),
            prompt_required: true,
            hide_input: false,
            is_flag: None,
            flag_value: None,
            count: false,
            allow_from_autoenv: true,
            help: None,
            hidden: false,
            show_choices: true,
            show_envvar: false,
            schema: SchemaParams::default(),
        }
    }
}

impl NamedParams {
    /// Starts from the given declaration spellings.
    pub fn new<I, S>(decls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            decls: decls.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(ParamDefault::value(value));
        self
    }

    pub fn with_default_factory(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(ParamDefault::factory(f));
        self
    }

    pub fn with_nargs(mut self, nargs: i64) -> Self {
        self.nargs = Some(nargs);
        self
    }

    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_callback(
        mut self,
        f: impl Fn(&str, Value) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        self.callback = Some(Callback::new(f));
        self
    }

    pub fn with_expose_value(mut self, expose: bool) -> Self {
        self.expose_value = expose;
        self
    }

    pub fn with_eager(mut self, eager: bool) -> Self {
        self.is_eager = eager;
        self
    }

    pub fn with_envvar(mut self, envvar: impl Into<EnvVar>) -> Self {
        self.envvar = Some(envvar.into());
        self
    }

    pub fn with_show_default(mut self, show: impl Into<BoolOrText>) -> Self {
        self.show_default = Some(show.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<BoolOrText>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_confirmation_prompt(mut self, prompt: impl Into<BoolOrText>) -> Self {
        self.confirmation_prompt = prompt.into();
        self
    }

    pub fn with_prompt_required(mut self, required: bool) -> Self {
        self.prompt_required = required;
        self
    }

    pub fn with_hide_input(mut self, hide: bool) -> Self {
        self.hide_input = hide;
        self
    }

    pub fn with_flag(mut self, is_flag: bool) -> Self {
        self.is_flag = Some(is_flag);
        self
    }

    pub fn with_flag_value(mut self, value: impl Into<Value>) -> Self {
        self.flag_value = Some(value.into());
        self
    }

    pub fn with_count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    pub fn with_allow_from_autoenv(mut self, allow: bool) -> Self {
        self.allow_from_autoenv = allow;
        self
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_show_choices(mut self, show: bool) -> Self {
        self.show_choices = show;
        self
    }

    pub fn with_show_envvar(mut self, show: bool) -> Self {
        self.show_envvar = show;
        self
    }

    pub fn with_schema(mut self, schema: SchemaParams) -> Self {
        self.schema = schema;
        self
    }

    /// Splits into declarations, option-only settings and common params.
    fn into_parts(self) -> (Vec<String>, ClickData, CommonParams) {
        let option_data = ClickData::new()
            .with("show_default", self.show_default)
            .with("prompt", self.prompt)
            .with("confirmation_prompt", self.confirmation_prompt)
            .with("prompt_required", self.prompt_required)
            .with("hide_input", self.hide_input)
            .with("is_flag", self.is_flag)
            .with("flag_value", self.flag_value)
            .with("count", self.count)
            .with("allow_from_autoenv", self.allow_from_autoenv)
            .with("help", self.help)
            .with("hidden", self.hidden)
            .with("show_choices", self.show_choices)
            .with("show_envvar", self.show_envvar);

        let common = CommonParams {
            required: self.required,
            default: self.default,
            nargs: self.nargs,
            multiple: self.multiple,
            callback: self.callback,
            expose_value: self.expose_value,
            is_eager: self.is_eager,
            envvar: self.envvar,
            schema: self.schema,
            ..Default::default()
        };

        (self.decls, option_data, common)
    }
}

/// Schema field that is also a named CLI option.
///
/// # Examples
///
/// ```
/// use param_descriptor_core::{NamedDescriptor, NamedParams};
///
/// let mut verbose = NamedDescriptor::new(
///     NamedParams::new(["-v", "--verbose"]).with_count(true).with_help("Do X"),
/// )
/// .unwrap();
/// assert_eq!(verbose.schema_field().description(), Some("Do X"));
///
/// verbose.amend(NamedParams::new(["-v"]).with_help("Do X")).unwrap();
/// assert_eq!(verbose.click_decls(), ["-v", "--verbose"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NamedDescriptor {
    core: FieldDescriptor,
}

impl NamedDescriptor {
    /// Builds a named descriptor.
    ///
    /// # Errors
    ///
    /// Propagates the schema field's [`ValidationError`].
    pub fn new(params: NamedParams) -> Result<Self, ValidationError> {
        let mut core = FieldDescriptor::blank(VARIANT, BASE_DECLS);
        Self::apply(&mut core, params)?;
        Ok(Self { core })
    }

    /// Applies another round of parameters over the current state.
    ///
    /// Declarations accumulate, settings merge, and the schema field is
    /// rebuilt; on error the descriptor is left unchanged.
    pub fn amend(&mut self, params: NamedParams) -> Result<(), ValidationError> {
        let mut next = self.core.clone();
        Self::apply(&mut next, params)?;
        self.core = next;
        Ok(())
    }

    fn apply(core: &mut FieldDescriptor, params: NamedParams) -> Result<(), ValidationError> {
        let (decls, option_data, common) = params.into_parts();
        debug!(decls = ?decls, "applying named option parameters");
        core.set_click_decls(decls);
        core.set_click_data(option_data);
        core.initialize(common)
    }

    /// Whether the option is a boolean switch or a counter.
    pub fn is_switch(&self) -> bool {
        let data = self.core.click_data();
        data.flag("is_flag") == Some(true) || data.flag("count") == Some(true)
    }
}

impl Deref for NamedDescriptor {
    type Target = FieldDescriptor;

    fn deref(&self) -> &FieldDescriptor {
        &self.core
    }
}

impl DerefMut for NamedDescriptor {
    fn deref_mut(&mut self) -> &mut FieldDescriptor {
        &mut self.core
    }
}

impl fmt::Display for NamedDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.core, f)
    }
}
