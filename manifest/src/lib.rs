//! Declarative manifests for parameter descriptors.
//!
//! A manifest lists named options and positional arguments in YAML or JSON;
//! [`Manifest::build`] turns it into constructed descriptors, and the
//! [`report`](crate::ParamReport) helpers render them for inspection.
//!
//! # Quick start
//!
//! ```no_run
//! use param_descriptor_manifest::{Manifest, build_reports};
//!
//! let manifest = Manifest::load("deploy.yaml").unwrap();
//! let params = manifest.build().unwrap();
//! for report in build_reports(&params) {
//!     println!("{} ({}): {}", report.name, report.kind, report.schema);
//! }
//! ```

mod error;
mod manifest;
mod report;
mod spec;

pub use error::{ManifestError, Result};
pub use manifest::{BuiltParam, Manifest, ManifestFormat};
pub use report::{ParamReport, build_reports, object_schema};
pub use spec::{NamedSpec, ParamSpec, PositionalSpec, SchemaSpec};
