//! Serializable views of constructed descriptors.
//!
//! [`ParamReport`] shows both faces of one descriptor (CLI data and schema
//! fragment); [`object_schema`] assembles the schema faces into a single
//! JSON-schema object for a whole manifest.

use param_descriptor_core::ClickType;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::manifest::BuiltParam;

/// Diagnostic view of one descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamReport {
    pub name: String,
    pub kind: &'static str,
    pub decls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_type: Option<ClickType>,
    pub click_data: Value,
    pub schema: Value,
    pub required: bool,
}

impl ParamReport {
    pub fn from_built(param: &BuiltParam) -> Self {
        let core = param.descriptor.core();
        Self {
            name: param.name.clone(),
            kind: param.descriptor.kind(),
            decls: core.click_decls().to_vec(),
            click_type: core.click_type().cloned(),
            click_data: core.click_data().to_json(),
            schema: core.schema_field().to_json_schema(),
            required: core.schema_field().is_required(),
        }
    }
}

/// Builds reports for every param, in order.
pub fn build_reports(params: &[BuiltParam]) -> Vec<ParamReport> {
    params.iter().map(ParamReport::from_built).collect()
}

/// Combines the schema fields of `params` into one object schema.
///
/// # Examples
///
/// ```
/// use param_descriptor_manifest::{Manifest, object_schema};
///
/// let manifest = Manifest::from_yaml_str(
///     "version: '1.0'\nparams:\n  - {name: src, kind: positional, nargs: 2}\n",
/// )
/// .unwrap();
/// let schema = object_schema(Some("copy"), &manifest.build().unwrap());
///
/// assert_eq!(schema["title"], "copy");
/// assert_eq!(schema["properties"]["src"]["minItems"], 2);
/// ```
pub fn object_schema(title: Option<&str>, params: &[BuiltParam]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in params {
        let field = param.descriptor.core().schema_field();
        properties.insert(param.name.clone(), field.to_json_schema());
        if field.is_required() {
            required.push(Value::String(param.name.clone()));
        }
    }

    let mut schema = Map::new();
    if let Some(title) = title {
        schema.insert("title".into(), Value::String(title.to_string()));
    }
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), Value::Array(required));
    }
    Value::Object(schema)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Manifest;

    #[test]
    fn test_report_shows_both_surfaces() {
        let manifest = Manifest::from_yaml_str(
            "version: '1.0'\nparams:\n  - name: name\n    kind: named\n    decls: ['--name']\n    help: Your name\n",
        )
        .unwrap();
        let reports = build_reports(&manifest.build().unwrap());

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.kind, "named");
        assert_eq!(report.decls, vec!["--name".to_string()]);
        assert_eq!(report.click_data["help"], json!("Your name"));
        assert_eq!(report.schema["description"], json!("Your name"));
        assert!(!report.required);
    }

    #[test]
    fn test_object_schema_omits_empty_required() {
        let schema = object_schema(None, &[]);
        assert_eq!(schema, json!({"type": "object", "properties": {}}));
    }
}
