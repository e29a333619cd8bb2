//! Manifest loading example.
//!
//! Writes a small YAML manifest to a temporary directory, builds its
//! descriptors and prints the per-param reports together with the combined
//! object schema.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p param-descriptor-demos --example load_manifest
//! ```

use param_descriptor_manifest::{Manifest, build_reports, object_schema};

const MANIFEST: &str = r#"
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
"#;

fn main() {
    let dir = std::env::temp_dir().join("param_descriptor_example_manifest");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("deploy.yaml");
    std::fs::write(&path, MANIFEST).unwrap();

    let manifest = Manifest::load(&path).unwrap();
    let params = manifest.build().unwrap();
    println!("Built {} params from {}", params.len(), path.display());
    println!();

    for report in build_reports(&params) {
        println!("{} ({})", report.name, report.kind);
        println!("  decls:      {:?}", report.decls);
        println!("  click data: {}", report.click_data);
        println!("  schema:     {}", report.schema);
        println!("  required:   {}", report.required);
    }
    println!();

    let schema = object_schema(manifest.name.as_deref(), &params);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());

    let _ = std::fs::remove_dir_all(&dir);
}
