//! Error types for normalization and resolution.

use polars::prelude::PolarsError;
use subst_model::TableKind;
use thiserror::Error;

/// Errors raised while normalizing the two input tables.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A required column is absent after label normalization.
    #[error(
        "the {table} must contain the columns: {}; missing: {}",
        .required.join(", "),
        .missing.join(", ")
    )]
    MissingColumns {
        table: TableKind,
        required: Vec<String>,
        missing: Vec<String>,
    },

    /// Two labels collapse to the same normalized name.
    #[error("the {table} has columns that differ only by case or spacing: {}", .columns.join(", "))]
    DuplicateColumns {
        table: TableKind,
        columns: Vec<String>,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

/// Errors raised by a resolve pass.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Input tables failed normalization or validation.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// A row index does not fit the Polars index type.
    #[error("row {row} exceeds the maximum table size")]
    RowIndexOverflow { row: usize },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

impl ResolveError {
    /// Missing column names when the error is a missing-columns diagnostic.
    pub fn missing_columns(&self) -> Option<(TableKind, &[String])> {
        match self {
            ResolveError::Normalize(NormalizeError::MissingColumns { table, missing, .. }) => {
                Some((*table, missing.as_slice()))
            }
            _ => None,
        }
    }
}

/// Result type for resolve operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_names_columns() {
        let err = NormalizeError::MissingColumns {
            table: TableKind::Shortages,
            required: vec!["cur".into(), "codart".into(), "faltante".into(), "embalaje".into()],
            missing: vec!["embalaje".into()],
        };
        assert_eq!(
            err.to_string(),
            "the shortage table must contain the columns: cur, codart, faltante, embalaje; missing: embalaje"
        );
    }

    #[test]
    fn test_missing_columns_accessor() {
        let err: ResolveError = NormalizeError::MissingColumns {
            table: TableKind::Inventory,
            required: vec!["bodega".into()],
            missing: vec!["bodega".into()],
        }
        .into();
        let (table, missing) = err.missing_columns().unwrap();
        assert_eq!(table, TableKind::Inventory);
        assert_eq!(missing, ["bodega".to_string()]);
    }

    #[test]
    fn test_error_from_polars() {
        let err: ResolveError = PolarsError::ColumnNotFound("cur".into()).into();
        assert!(matches!(err, ResolveError::Polars(_)));
        assert!(err.missing_columns().is_none());
    }
}
