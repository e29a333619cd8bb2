//! Unified parameter descriptors for CLI surfaces and data schemas.
//!
//! A descriptor describes one configurable value twice over: how it is
//! supplied on the command line (declarations, prompts, environment
//! fallback, completion) and how it behaves as a schema field (default or
//! default factory, description, cardinality). The two vocabularies overlap,
//! so construction reconciles them:
//!
//! - [`FieldDescriptor`]: shared state: merged [`ClickData`], accumulated
//!   [`Declarations`], an optional [`ClickType`] and the embedded
//!   [`SchemaField`].
//! - [`PositionalDescriptor`]: positional arguments (`required`, `default`,
//!   `nargs`, `envvar`).
//! - [`NamedDescriptor`]: named options with the full option surface.
//!
//! [`reconcile`] is the bridge: a callable CLI default becomes a default
//! factory, `help` becomes the description, and `nargs > 1` pins the item
//! bounds. Inconsistent results surface as [`ValidationError`]s.
//!
//! # Example
//!
//! ```
//! use param_descriptor_core::*;
//!
//! let tags = NamedDescriptor::new(
//!     NamedParams::new(["-t", "--tag"])
//!         .with_multiple(true)
//!         .with_default_factory(|| serde_json::json!([]))
//!         .with_help("Tags to attach"),
//! )
//! .unwrap();
//!
//! assert_eq!(tags.click_decls(), ["-t", "--tag"]);
//! assert_eq!(tags.schema_field().description(), Some("Tags to attach"));
//! assert_eq!(tags.schema_field().resolve_default(), Some(serde_json::json!([])));
//!
//! let pair = PositionalDescriptor::new(PositionalParams::default().with_nargs(2)).unwrap();
//! assert_eq!(pair.schema_field().max_items(), Some(2));
//! ```

#[cfg(feature = "clap")]
mod clap_arg;
mod descriptor;
mod field;
mod merge;
mod named;
mod positional;
mod types;
mod validate;

pub use descriptor::{CommonParams, Descriptor, FieldDescriptor, reconcile};
pub use field::{FieldDefault, SchemaField, SchemaParams};
pub use merge::{ClickData, Declarations, merge_into};
pub use named::{NamedDescriptor, NamedParams};
pub use positional::{PositionalDescriptor, PositionalParams};
pub use types::*;
pub use validate::{ValidationError, validate_field};
