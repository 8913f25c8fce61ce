//! Projection of the chosen candidates to the result table.

use polars::prelude::{
    Column, DataFrame, DataType, IdxCa, IdxSize, IntoColumn, NamedFrom, Series,
};
use tracing::debug;

use subst_model::columns::{
    BODEGA, CANTIDAD_NECESARIA, CARTA, CODART, CODART_ALTERNATIVA, CUR, EMBALAJE,
    EMBALAJE_ALTERNATIVA, FALTANTE, OPCION_ALTERNATIVA, OUTPUT_COLUMNS, UNIDADES_LOTE,
};
use subst_model::{MatchedCandidate, ResolveOptions};

use crate::error::{ResolveError, Result};
use crate::normalize::has_column;

const SHORTAGE_OUTPUT: [&str; 4] = [CUR, CODART, FALTANTE, EMBALAJE];
const ALTERNATIVE_OUTPUT: [&str; 3] = [CODART_ALTERNATIVA, OPCION_ALTERNATIVA, EMBALAJE_ALTERNATIVA];
const STOCK_OUTPUT: [&str; 2] = [UNIDADES_LOTE, BODEGA];

fn row_indices(name: &str, rows: impl Iterator<Item = usize>) -> Result<IdxCa> {
    let indices = rows
        .map(|row| IdxSize::try_from(row).map_err(|_| ResolveError::RowIndexOverflow { row }))
        .collect::<Result<Vec<IdxSize>>>()?;
    Ok(IdxCa::from_vec(name.into(), indices))
}

/// Gathers the result table from the normalized frames.
///
/// `shortages` and `inventory` must be the frames the records were read from
/// (after [`crate::records::rename_alternative_columns`]). Every column except
/// `cantidad_necesaria` is taken from its source column, so dtypes survive.
///
/// An extra column present in both tables is taken from the inventory; the
/// shortage table only supplies extras the inventory lacks.
pub fn build_result_frame(
    shortages: &DataFrame,
    inventory: &DataFrame,
    chosen: &[MatchedCandidate<'_>],
    options: &ResolveOptions,
) -> Result<DataFrame> {
    let shortage_rows = row_indices("shortage_row", chosen.iter().map(|c| c.shortage.row))?;
    let inventory_rows = row_indices("inventory_row", chosen.iter().map(|c| c.candidate.row))?;

    let mut columns: Vec<Column> = Vec::with_capacity(OUTPUT_COLUMNS.len() + options.extra_columns.len());
    for name in SHORTAGE_OUTPUT {
        columns.push(shortages.column(name)?.take(&shortage_rows)?);
    }
    for name in ALTERNATIVE_OUTPUT {
        columns.push(inventory.column(name)?.take(&inventory_rows)?);
    }

    let quantities: Vec<Option<u64>> = chosen
        .iter()
        .map(|c| c.required_qty.map(|qty| qty.get()))
        .collect();
    columns.push(Series::new(CANTIDAD_NECESARIA.into(), quantities).into_column());

    for name in STOCK_OUTPUT {
        columns.push(inventory.column(name)?.take(&inventory_rows)?);
    }
    if has_column(inventory, CARTA) {
        columns.push(inventory.column(CARTA)?.take(&inventory_rows)?);
    }

    for name in options.extra_columns() {
        if OUTPUT_COLUMNS.contains(&name) {
            debug!(column = name, "extra column duplicates an output column");
            continue;
        }
        if has_column(inventory, name) {
            columns.push(inventory.column(name)?.take(&inventory_rows)?);
        } else if has_column(shortages, name) {
            columns.push(shortages.column(name)?.take(&shortage_rows)?);
        } else {
            debug!(column = name, "extra column not found; dropped");
        }
    }

    Ok(DataFrame::new(columns)?)
}

/// The zero-row result returned when the inputs fail validation.
///
/// Carries every fixed output column plus the requested extras. Source
/// dtypes are unknown at this point, so text columns are `String` and
/// `cantidad_necesaria` is `UInt64`.
pub fn empty_result_frame(options: &ResolveOptions) -> DataFrame {
    let extras = options
        .extra_columns()
        .filter(|name| !OUTPUT_COLUMNS.contains(name));
    let columns: Vec<Column> = OUTPUT_COLUMNS
        .iter()
        .copied()
        .chain(extras)
        .map(|name| {
            let dtype = if name == CANTIDAD_NECESARIA {
                DataType::UInt64
            } else {
                DataType::String
            };
            Series::new_empty(name.into(), &dtype).into_column()
        })
        .collect();
    DataFrame::new(columns).unwrap_or_default()
}
