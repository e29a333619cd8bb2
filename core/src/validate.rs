//! Schema-field consistency checks.
//!
//! Construction of a descriptor ends with [`SchemaField::validate`]; any
//! error found here propagates to the caller unchanged, and no descriptor is
//! produced.
//!
//! # Examples
//!
//! ```
//! use param_descriptor_core::*;
//!
//! let ok = SchemaField::new(SchemaParams::default().with_min_items(1).with_max_items(3));
//! assert!(validate_field(&ok).is_empty());
//!
//! let bad = SchemaField::new(SchemaParams::default().with_min_items(4).with_max_items(3));
//! assert_eq!(
//!     validate_field(&bad),
//!     vec![ValidationError::InvalidCardinality { min: 4, max: 3 }],
//! );
//! ```

use thiserror::Error;

use crate::{FieldDefault, SchemaField};

/// Schema-field validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A static default and a default factory were both requested.
    #[error("cannot specify both default and default_factory")]
    ConflictingDefaults,
    /// Minimum cardinality exceeds the maximum.
    #[error("min_items ({min}) cannot exceed max_items ({max})")]
    InvalidCardinality {
        /// Requested minimum number of items.
        min: usize,
        /// Requested maximum number of items.
        max: usize,
    },
}

/// Collects every consistency problem of `field`.
pub fn validate_field(field: &SchemaField) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if matches!(field.default(), FieldDefault::Value(_)) && field.default_factory().is_some() {
        errors.push(ValidationError::ConflictingDefaults);
    }

    if let (Some(min), Some(max)) = (field.min_items(), field.max_items()) {
        if min > max {
            errors.push(ValidationError::InvalidCardinality { min, max });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::SchemaParams;

    #[test]
    fn test_validate_rejects_default_with_factory() {
        let field = SchemaField::new(SchemaParams {
            default: FieldDefault::Value(json!(1)),
            ..SchemaParams::default().with_default_factory(|| json!(2))
        });

        assert_eq!(validate_field(&field), vec![ValidationError::ConflictingDefaults]);
        assert_eq!(field.validate(), Err(ValidationError::ConflictingDefaults));
    }

    #[test]
    fn test_validate_reports_all_problems() {
        let field = SchemaField::new(SchemaParams {
            default: FieldDefault::Value(json!(null)),
            ..SchemaParams::default()
                .with_default_factory(|| json!(2))
                .with_min_items(5)
                .with_max_items(1)
        });

        assert_eq!(validate_field(&field).len(), 2);
        assert_eq!(field.validate(), Err(ValidationError::ConflictingDefaults));
    }

    #[test]
    fn test_validate_accepts_equal_bounds() {
        let field = SchemaField::new(SchemaParams::default().with_min_items(3).with_max_items(3));
        assert!(field.validate().is_ok());
    }
}
