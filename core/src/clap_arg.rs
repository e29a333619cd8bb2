//! Hands descriptors to `clap` as [`clap::Arg`] values.
//!
//! Only the settings `clap` has a counterpart for are translated; prompts,
//! callbacks, eagerness and `expose_value` stay in the CLI data for callers
//! that drive those themselves. Parsing and coercion remain clap's job.

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, value_parser};

use crate::{ClickType, ClickValue, FieldDescriptor, NamedDescriptor, PositionalDescriptor};

impl NamedDescriptor {
    /// Builds a named `clap` argument.
    ///
    /// Declarations map to `short`/`long`, further spellings become aliases
    /// and `--on/--off` pairs contribute their first half.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Command;
    /// use param_descriptor_core::{NamedDescriptor, NamedParams};
    ///
    /// let verbose = NamedDescriptor::new(NamedParams::new(["-v", "--verbose"]).with_count(true))
    ///     .unwrap();
    /// let matches = Command::new("demo")
    ///     .arg(verbose.to_clap_arg("verbose"))
    ///     .try_get_matches_from(["demo", "-vv", "--verbose"])
    ///     .unwrap();
    /// assert_eq!(matches.get_count("verbose"), 3);
    /// ```
    pub fn to_clap_arg(&self, id: impl Into<String>) -> Arg {
        let mut arg = Arg::new(id.into());
        let (mut has_short, mut has_long) = (false, false);

        for decl in self.click_decls() {
            let decl = decl.split('/').next().unwrap_or(decl.as_str());
            if let Some(long) = decl.strip_prefix("--") {
                if has_long {
                    arg = arg.alias(long.to_string());
                } else {
                    arg = arg.long(long.to_string());
                    has_long = true;
                }
            } else if let Some(short) = decl.strip_prefix('-') {
                let mut chars = short.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) if !has_short => {
                        arg = arg.short(ch);
                        has_short = true;
                    }
                    (Some(ch), None) => arg = arg.short_alias(ch),
                    _ => arg = arg.alias(short.to_string()),
                }
            }
        }

        let data = self.click_data();
        let action = if data.flag("count") == Some(true) {
            ArgAction::Count
        } else if data.flag("is_flag") == Some(true) {
            ArgAction::SetTrue
        } else if data.flag("multiple") == Some(true) {
            ArgAction::Append
        } else {
            ArgAction::Set
        };
        let takes_value = matches!(action, ArgAction::Set | ArgAction::Append);
        arg = arg.action(action);

        if let Some(help) = data.help() {
            arg = arg.help(help.to_string());
        }
        arg = arg
            .hide(data.flag("hidden") == Some(true))
            .hide_env(data.flag("show_envvar") != Some(true));

        let arg = apply_common(arg, self, takes_value);
        if !takes_value {
            return arg;
        }

        // clap only accepts these on value-taking args.
        let show_default = data.get("show_default").is_some_and(|value| {
            !value.is_null() && value.as_bool() != Some(false)
        });
        arg.hide_default_value(!show_default)
            .hide_possible_values(data.flag("show_choices") == Some(false))
    }
}

impl PositionalDescriptor {
    /// Builds a positional `clap` argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Command;
    /// use param_descriptor_core::{PositionalDescriptor, PositionalParams};
    ///
    /// let files = PositionalDescriptor::new(PositionalParams::default().with_nargs(2)).unwrap();
    /// let matches = Command::new("demo")
    ///     .arg(files.to_clap_arg("files"))
    ///     .try_get_matches_from(["demo", "a.txt", "b.txt"])
    ///     .unwrap();
    /// let files: Vec<&String> = matches.get_many("files").unwrap().collect();
    /// assert_eq!(files, ["a.txt", "b.txt"]);
    /// ```
    pub fn to_clap_arg(&self, id: impl Into<String>) -> Arg {
        let arg = Arg::new(id.into()).action(ArgAction::Set);
        apply_common(arg, self, true)
    }
}

fn apply_common(mut arg: Arg, core: &FieldDescriptor, takes_value: bool) -> Arg {
    let data = core.click_data();

    if let Some(required) = data.flag("required") {
        arg = arg.required(required);
    }
    if let Some(envvar) = data.get("envvar") {
        // clap reads a single variable; the first name wins.
        match envvar {
            ClickValue::Str(name) => arg = arg.env(name.clone()),
            ClickValue::List(names) => {
                if let Some(name) = names.first() {
                    arg = arg.env(name.clone());
                }
            }
            _ => {}
        }
    }

    if !takes_value {
        return arg;
    }

    match data.nargs() {
        Some(n) if n > 1 => arg = arg.num_args(n as usize),
        Some(n) if n < 0 => arg = arg.num_args(1..),
        _ => {}
    }
    if let Some(metavar) = data.get("metavar").and_then(ClickValue::as_str) {
        arg = arg.value_name(metavar.to_string());
    }
    if let Some(default) = data.default_value().and_then(literal_default) {
        arg = arg.default_value(default);
    }

    match core.click_type() {
        Some(ClickType::Choice(choices)) => {
            arg = arg.value_parser(PossibleValuesParser::new(choices.clone()));
        }
        Some(ClickType::Int) => arg = arg.value_parser(value_parser!(i64)),
        Some(ClickType::Float) => arg = arg.value_parser(value_parser!(f64)),
        Some(ClickType::Bool) => arg = arg.value_parser(value_parser!(bool)),
        Some(ClickType::Path | ClickType::File | ClickType::Directory) => {
            arg = arg.value_parser(value_parser!(std::path::PathBuf));
        }
        _ => {}
    }

    arg
}

/// Scalar literal defaults clap can take as a string.
fn literal_default(value: &ClickValue) -> Option<String> {
    match value {
        ClickValue::Str(text) => Some(text.clone()),
        ClickValue::Int(n) => Some(n.to_string()),
        ClickValue::Bool(flag) => Some(flag.to_string()),
        ClickValue::Literal(serde_json::Value::String(text)) => Some(text.clone()),
        ClickValue::Literal(value @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => {
            Some(value.to_string())
        }
        _ => None,
    }
}
