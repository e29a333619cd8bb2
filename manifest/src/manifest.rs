//! Descriptor manifests: a versioned list of param entries.
//!
//! Manifests are read from YAML (`.yaml`/`.yml`) or JSON (`.json`). Building
//! a manifest constructs one descriptor per distinct name; a later entry
//! with an existing name *amends* the earlier descriptor, the same way a
//! subclass adds declarations to an inherited option.
//!
//! # Examples
//!
//! ```
//! use param_descriptor_manifest::Manifest;
//!
//! let manifest = Manifest::from_yaml_str(r#"
//! version: "1.0"
//! name: deploy
//! params:
//!   - name: verbose
//!     kind: named
//!     decls: ["-v", "--verbose"]
//!     count: true
//!   - name: verbose
//!     kind: named
//!     decls: ["-v", "--loud"]
//! "#).unwrap();
//!
//! let params = manifest.build().unwrap();
//! assert_eq!(params.len(), 1);
//! assert_eq!(params[0].descriptor.core().click_decls(), ["-v", "--verbose", "--loud"]);
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use param_descriptor_core::{Descriptor, NamedDescriptor, PositionalDescriptor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ManifestError, Result};
use crate::spec::ParamSpec;

/// On-disk encoding of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::UnsupportedFormat`] for anything other than
    /// `json`, `yaml` or `yml`.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(ManifestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// A set of param entries for one command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest format version (e.g. `"1.0"`).
    pub version: String,
    /// Optional command name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Param entries, applied in order.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

/// A constructed descriptor and the name it was declared under.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltParam {
    pub name: String,
    pub descriptor: Descriptor,
}

impl Manifest {
    /// Creates an empty manifest.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            name: None,
            description: None,
            params: Vec::new(),
        }
    }

    /// Loads a manifest, choosing the decoder by file extension.
    ///
    /// # Errors
    ///
    /// Returns an I/O, JSON/YAML or unsupported-format error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ManifestFormat::from_path(path)?;
        let reader = BufReader::new(std::fs::File::open(path)?);
        let manifest: Self = match format {
            ManifestFormat::Json => serde_json::from_reader(reader)?,
            ManifestFormat::Yaml => serde_yaml::from_reader(reader)?,
        };
        info!(
            path = %path.display(),
            params = manifest.params.len(),
            "loaded descriptor manifest"
        );
        Ok(manifest)
    }

    /// Saves the manifest, choosing the encoder by file extension.
    ///
    /// # Errors
    ///
    /// Returns an I/O, JSON/YAML or unsupported-format error.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ManifestFormat::from_path(path)?;
        let writer = BufWriter::new(std::fs::File::create(path)?);
        match format {
            ManifestFormat::Json => serde_json::to_writer_pretty(writer, self)?,
            ManifestFormat::Yaml => serde_yaml::to_writer(writer, self)?,
        }
        Ok(())
    }

    /// Parses a YAML manifest.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Parses a JSON manifest.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Constructs every descriptor, in first-declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::EmptyParamName`],
    /// [`ManifestError::DuplicateParam`] when a name is reused with another
    /// kind, or [`ManifestError::Validation`] when a schema field is
    /// inconsistent.
    pub fn build(&self) -> Result<Vec<BuiltParam>> {
        let mut built: Vec<BuiltParam> = Vec::new();

        for spec in &self.params {
            let name = spec.name().trim();
            if name.is_empty() {
                return Err(ManifestError::EmptyParamName);
            }
            let invalid = |source| ManifestError::Validation {
                name: name.to_string(),
                source,
            };

            match built.iter_mut().find(|param| param.name == name) {
                Some(existing) => {
                    debug!(param = name, "amending descriptor");
                    match (&mut existing.descriptor, spec) {
                        (Descriptor::Named(descriptor), ParamSpec::Named(named)) => {
                            descriptor.amend(named.to_params()).map_err(invalid)?;
                        }
                        (Descriptor::Positional(descriptor), ParamSpec::Positional(positional)) => {
                            descriptor.amend(positional.to_params()).map_err(invalid)?;
                        }
                        _ => return Err(ManifestError::DuplicateParam(name.to_string())),
                    }
                    if let Some(click_type) = spec.click_type() {
                        existing
                            .descriptor
                            .core_mut()
                            .set_click_type(Some(click_type.clone()));
                    }
                }
                None => {
                    let mut descriptor = match spec {
                        ParamSpec::Named(named) => {
                            Descriptor::Named(NamedDescriptor::new(named.to_params()).map_err(invalid)?)
                        }
                        ParamSpec::Positional(positional) => Descriptor::Positional(
                            PositionalDescriptor::new(positional.to_params()).map_err(invalid)?,
                        ),
                    };
                    descriptor.core_mut().set_click_type(spec.click_type().cloned());
                    built.push(BuiltParam {
                        name: name.to_string(),
                        descriptor,
                    });
                }
            }
        }

        Ok(built)
    }
}
