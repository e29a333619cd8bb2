//! Descriptor construction example.
//!
//! Builds a named option and a positional argument, amends the option the
//! way a decorator stack would, then shows both faces of each descriptor and
//! parses a command line through the derived `clap` arguments.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p param-descriptor-demos --example describe_options
//! ```

use clap::Command;
use param_descriptor_core::{
    ClickType, NamedDescriptor, NamedParams, PositionalDescriptor, PositionalParams, SchemaParams,
};
use serde_json::json;

fn main() {
    // Named option: -o/--output with a help text that doubles as the description
    let mut output = NamedDescriptor::new(
        NamedParams::new(["-o", "--output"])
            .with_default("out.txt")
            .with_help("Where to write results"),
    )
    .unwrap();

    // A later declaration adds a spelling and marks the option hidden.
    // Only the new spelling is appended; the repeated "-o" is ignored.
    output
        .amend(
            NamedParams::new(["-o", "--out"])
                .with_default("out.txt")
                .with_help("Where to write results")
                .with_hidden(true),
        )
        .unwrap();

    println!("{output}");
    println!("  decls:  {:?}", output.click_decls());
    println!("  schema: {}", output.schema_field().to_json_schema());
    println!();

    // Positional argument consuming exactly two values
    let mut pair = PositionalDescriptor::new(
        PositionalParams::default()
            .with_nargs(2)
            .with_schema(SchemaParams::default().with_title("Source and target")),
    )
    .unwrap();
    pair.set_click_type(Some(ClickType::Path));

    println!("{pair}");
    println!("  schema: {}", pair.schema_field().to_json_schema());
    println!();

    // Level switch with a computed default
    let level = NamedDescriptor::new(
        NamedParams::new(["--level"])
            .with_default_factory(|| json!(3))
            .with_help("Compression level"),
    )
    .unwrap();
    println!("{level}");
    println!(
        "  resolved default: {:?}",
        level.schema_field().resolve_default()
    );
    println!();

    // Drive clap with the descriptors
    let matches = Command::new("copy")
        .arg(output.to_clap_arg("output"))
        .arg(pair.to_clap_arg("paths"))
        .try_get_matches_from(["copy", "--out", "result.txt", "a.txt", "b.txt"])
        .unwrap();

    println!(
        "output = {:?}",
        matches.get_one::<String>("output").map(String::as_str)
    );
    let paths: Vec<String> = matches
        .get_many::<std::path::PathBuf>("paths")
        .into_iter()
        .flatten()
        .map(|p| p.display().to_string())
        .collect();
    println!("paths  = {paths:?}");
}
