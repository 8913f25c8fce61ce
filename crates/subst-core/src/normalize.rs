//! Column label normalization and validation.
//!
//! Both tables have their labels lower-cased and trimmed so that joins do
//! not depend on how the source spelled a header. Values are untouched.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::debug;

use subst_model::columns::{EMB, EMBALAJE, EMBALAJE_ALTERNATIVA};
use subst_model::{TableKind, normalize_label};

use crate::error::NormalizeError;

/// The two input tables after label normalization and validation.
#[derive(Debug, Clone)]
pub struct NormalizedTables {
    pub shortages: DataFrame,
    pub inventory: DataFrame,
}

/// Normalizes and validates both tables.
///
/// The shortage table is validated first; when it lacks a required column
/// the inventory is not inspected. The inventory's alternative pack-size
/// column is renamed to `embalaje_alternativa` so it never collides with the
/// shortage table's own `embalaje`.
pub fn normalize(
    shortages: &DataFrame,
    inventory: &DataFrame,
) -> Result<NormalizedTables, NormalizeError> {
    let shortages = normalize_columns(shortages, TableKind::Shortages)?;
    check_required_columns(&shortages, TableKind::Shortages)?;

    let mut inventory = normalize_columns(inventory, TableKind::Inventory)?;
    rename_pack_size_column(&mut inventory)?;
    check_required_columns(&inventory, TableKind::Inventory)?;

    Ok(NormalizedTables {
        shortages,
        inventory,
    })
}

/// Returns a copy of `df` with every label lower-cased and trimmed.
pub fn normalize_columns(df: &DataFrame, table: TableKind) -> Result<DataFrame, NormalizeError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_label(name.as_str()))
        .collect();

    let mut seen = BTreeSet::new();
    let duplicates: BTreeSet<&str> = names
        .iter()
        .filter(|name| !seen.insert(name.as_str()))
        .map(String::as_str)
        .collect();
    if !duplicates.is_empty() {
        return Err(NormalizeError::DuplicateColumns {
            table,
            columns: duplicates.into_iter().map(str::to_string).collect(),
        });
    }

    let mut normalized = df.clone();
    normalized.set_column_names(names)?;
    Ok(normalized)
}

/// Renames the inventory's pack-size column to `embalaje_alternativa`.
///
/// The source may call it `emb` or `embalaje`; an existing
/// `embalaje_alternativa` column is left as is.
pub fn rename_pack_size_column(inventory: &mut DataFrame) -> Result<(), NormalizeError> {
    if has_column(inventory, EMBALAJE_ALTERNATIVA) {
        return Ok(());
    }
    for source in [EMB, EMBALAJE] {
        if has_column(inventory, source) {
            debug!(from = source, to = EMBALAJE_ALTERNATIVA, "renaming inventory pack size column");
            inventory.rename(source, EMBALAJE_ALTERNATIVA.into())?;
            break;
        }
    }
    Ok(())
}

/// Fails with [`NormalizeError::MissingColumns`] unless every required column
/// of `table` is present. Missing names are listed in required-column order.
pub fn check_required_columns(df: &DataFrame, table: TableKind) -> Result<(), NormalizeError> {
    let required = table.required_columns();
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !has_column(df, name))
        .map(|name| (*name).to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(NormalizeError::MissingColumns {
        table,
        required: required.iter().map(|name| (*name).to_string()).collect(),
        missing,
    })
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

    fn frame(names: &[&str]) -> DataFrame {
        let columns: Vec<Column> = names
            .iter()
            .map(|name| Series::new((*name).into(), vec!["v"]).into_column())
            .collect();
        DataFrame::new(columns).unwrap()
    }

    fn labels(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    #[test]
    fn labels_are_lowercased_and_trimmed() {
        let df = frame(&[" CUR", "CodArt ", "FALTANTE", "Embalaje"]);
        let normalized = normalize_columns(&df, TableKind::Shortages).unwrap();
        assert_eq!(labels(&normalized), vec!["cur", "codart", "faltante", "embalaje"]);
        // The input frame is not modified.
        assert_eq!(labels(&df)[0], " CUR");
    }

    #[test]
    fn colliding_labels_are_rejected() {
        let df = frame(&["Cur", "cur ", "codart"]);
        let err = normalize_columns(&df, TableKind::Inventory).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::DuplicateColumns { ref columns, .. } if columns == &vec!["cur".to_string()]
        ));
    }

    #[test]
    fn emb_is_renamed() {
        let mut df = frame(&["cur", "emb"]);
        rename_pack_size_column(&mut df).unwrap();
        assert_eq!(labels(&df), vec!["cur", EMBALAJE_ALTERNATIVA]);
    }

    #[test]
    fn embalaje_is_renamed_when_emb_absent() {
        let mut df = frame(&["cur", "embalaje"]);
        rename_pack_size_column(&mut df).unwrap();
        assert_eq!(labels(&df), vec!["cur", EMBALAJE_ALTERNATIVA]);
    }

    #[test]
    fn existing_alternative_column_is_kept() {
        let mut df = frame(&["emb", EMBALAJE_ALTERNATIVA]);
        rename_pack_size_column(&mut df).unwrap();
        assert_eq!(labels(&df), vec!["emb", EMBALAJE_ALTERNATIVA]);
    }

    #[test]
    fn missing_shortage_columns_are_listed() {
        let df = frame(&["cur", "codart", "faltante"]);
        let err = check_required_columns(&df, TableKind::Shortages).unwrap_err();
        match err {
            NormalizeError::MissingColumns { table, missing, .. } => {
                assert_eq!(table, TableKind::Shortages);
                assert_eq!(missing, vec!["embalaje"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shortage_is_validated_before_inventory() {
        let shortages = frame(&["cur"]);
        let inventory = frame(&["nothing"]);
        let err = normalize(&shortages, &inventory).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::MissingColumns {
                table: TableKind::Shortages,
                ..
            }
        ));
    }

    #[test]
    fn full_normalization() {
        let shortages = frame(&["CUR", "CODART", "FALTANTE", "EMBALAJE", "Extra"]);
        let inventory = frame(&[
            "Cur",
            "CodArt",
            "Opcion",
            "Emb",
            "UnidadesPresentacionLote",
            "Bodega",
            "Carta",
        ]);
        let tables = normalize(&shortages, &inventory).unwrap();
        assert_eq!(labels(&tables.shortages)[4], "extra");
        assert!(has_column(&tables.inventory, EMBALAJE_ALTERNATIVA));
        assert!(has_column(&tables.inventory, "carta"));
    }
}
