use std::path::{Path, PathBuf};

use param_descriptor_core::{ClickType, Descriptor, FieldDefault, ValidationError};
use param_descriptor_manifest::{
    Manifest, ManifestError, NamedSpec, ParamSpec, PositionalSpec, SchemaSpec, build_reports,
    object_schema,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pd_manifest_integ_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &Path, file: &str, raw: &str) -> PathBuf {
    let path = dir.join(file);
    std::fs::write(&path, raw).unwrap();
    path
}

const DEPLOY_YAML: &str = r#"
version: "1.0"
name: deploy
description: Deploy a release
params:
  - name: verbose
    kind: named
    decls: ["-v", "--verbose"]
    count: true
    help: Increase verbosity
  - name: region
    kind: named
    decls: ["-r", "--region"]
    click_type:
      choice: [eu, us]
    default: eu
    show_default: true
  - name: target
    kind: positional
    nargs: 2
    required: true
    envvar: DEPLOY_TARGET
    schema:
      title: Targets
"#;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_yaml_manifest_loads_and_builds() {
    let dir = scratch_dir("yaml");
    let path = write(&dir, "deploy.yaml", DEPLOY_YAML);

    let manifest = Manifest::load(&path).unwrap();
    assert_eq!(manifest.name.as_deref(), Some("deploy"));
    assert_eq!(manifest.params.len(), 3);

    let params = manifest.build().unwrap();
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["verbose", "region", "target"]);

    let Descriptor::Named(region) = &params[1].descriptor else {
        panic!("region should be named");
    };
    assert_eq!(
        region.click_type(),
        Some(&ClickType::Choice(vec!["eu".into(), "us".into()]))
    );
    assert_eq!(region.schema_field().default(), &FieldDefault::Value(json!("eu")));

    let Descriptor::Positional(target) = &params[2].descriptor else {
        panic!("target should be positional");
    };
    assert_eq!(target.schema_field().min_items(), Some(2));
    assert_eq!(target.schema_field().max_items(), Some(2));
    assert_eq!(target.schema_field().title(), Some("Targets"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_json_round_trip_through_save() {
    let dir = scratch_dir("json");
    let mut manifest = Manifest::new("1.0");
    manifest.params.push(ParamSpec::Named(NamedSpec {
        name: "quiet".into(),
        decls: vec!["-q".into()],
        is_flag: Some(true),
        ..Default::default()
    }));
    manifest.params.push(ParamSpec::Positional(PositionalSpec {
        name: "path".into(),
        schema: SchemaSpec {
            description: Some("Input path".into()),
            ..Default::default()
        },
        ..Default::default()
    }));

    let path = dir.join("cli.json");
    manifest.save(&path).unwrap();
    let loaded = Manifest::load(&path).unwrap();
    assert_eq!(loaded, manifest);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = scratch_dir("ext");
    let path = write(&dir, "deploy.toml", "version = '1.0'");

    assert!(matches!(
        Manifest::load(&path),
        Err(ManifestError::UnsupportedFormat(_))
    ));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_positional_prompt_is_a_parse_error() {
    let raw = "version: '1.0'\nparams:\n  - {name: src, kind: positional, prompt: true}\n";
    assert!(matches!(
        Manifest::from_yaml_str(raw),
        Err(ManifestError::YamlError(_))
    ));
}

// ---------------------------------------------------------------------------
// Incremental configuration
// ---------------------------------------------------------------------------

#[test]
fn test_repeated_entries_amend_descriptor() {
    let raw = r#"
version: "1.0"
params:
  - name: output
    kind: named
    decls: ["-o", "--output"]
    help: Output file
  - name: output
    kind: named
    decls: ["-o", "--out"]
    hidden: true
"#;
    let params = Manifest::from_yaml_str(raw).unwrap().build().unwrap();
    assert_eq!(params.len(), 1);

    let core = params[0].descriptor.core();
    assert_eq!(core.click_decls(), ["-o", "--output", "--out"]);
    assert_eq!(core.click_data().flag("hidden"), Some(true));
    // The later entry wrote `help: null`, so the description is gone too.
    assert_eq!(core.click_data().help(), None);
    assert_eq!(core.schema_field().description(), None);
}

#[test]
fn test_failed_amend_reports_param_name() {
    let raw = r#"
version: "1.0"
params:
  - {name: files, kind: positional, nargs: 2}
  - name: files
    kind: positional
    schema: {min_items: 5, max_items: 2}
"#;
    match Manifest::from_yaml_str(raw).unwrap().build() {
        Err(ManifestError::Validation { name, source }) => {
            assert_eq!(name, "files");
            assert_eq!(source, ValidationError::InvalidCardinality { min: 5, max: 2 });
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[test]
fn test_reports_and_object_schema() {
    let manifest = Manifest::from_yaml_str(DEPLOY_YAML).unwrap();
    let params = manifest.build().unwrap();

    let reports = build_reports(&params);
    assert_eq!(reports[0].click_data["count"], json!(true));
    assert_eq!(reports[0].schema["description"], json!("Increase verbosity"));
    assert_eq!(reports[2].kind, "positional");

    let schema = object_schema(manifest.name.as_deref(), &params);
    assert_eq!(schema["title"], json!("deploy"));
    assert_eq!(schema["properties"]["region"]["default"], json!("eu"));
    assert_eq!(schema["properties"]["target"]["maxItems"], json!(2));
    // Every entry carries a static default (null when unset).
    assert!(schema.get("required").is_none());
}
