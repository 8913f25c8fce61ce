//! Extraction of typed records from normalized frames.

use polars::prelude::{DataFrame, PolarsResult};
use tracing::debug;

use subst_common::{cell_f64, cell_text};
use subst_model::columns::{
    BODEGA, CODART, CODART_ALTERNATIVA, CUR, EMBALAJE, EMBALAJE_ALTERNATIVA, FALTANTE,
    OPCION, OPCION_ALTERNATIVA, UNIDADES_LOTE,
};
use subst_model::{InventoryRecord, ShortageRecord};

use crate::normalize::has_column;

/// Prefixes the inventory's product code and option columns so they cannot
/// be confused with the shortage table's columns of similar meaning.
pub fn rename_alternative_columns(inventory: &mut DataFrame) -> PolarsResult<()> {
    for (from, to) in [(CODART, CODART_ALTERNATIVA), (OPCION, OPCION_ALTERNATIVA)] {
        if has_column(inventory, from) && !has_column(inventory, to) {
            inventory.rename(from, to.into())?;
        }
    }
    Ok(())
}

/// Reads the shortage rows.
///
/// Rows without a `cur` or a `codart` can neither join nor group and are
/// skipped.
pub fn read_shortage_records(shortages: &DataFrame) -> PolarsResult<Vec<ShortageRecord>> {
    let cur = shortages.column(CUR)?;
    let codart = shortages.column(CODART)?;
    let faltante = shortages.column(FALTANTE)?;
    let embalaje = shortages.column(EMBALAJE)?;

    let mut records = Vec::with_capacity(shortages.height());
    let mut skipped = 0usize;
    for row in 0..shortages.height() {
        let (Some(cur), Some(item_code)) = (cell_text(cur, row)?, cell_text(codart, row)?) else {
            skipped += 1;
            continue;
        };
        records.push(ShortageRecord {
            row,
            cur,
            item_code,
            shortage_qty: cell_f64(faltante, row)?,
            pack_size: cell_f64(embalaje, row)?,
        });
    }

    if skipped > 0 {
        debug!(skipped, "shortage rows without cur or codart skipped");
    }
    Ok(records)
}

/// Reads the inventory rows after [`rename_alternative_columns`].
///
/// Rows without a `cur` cannot match any shortage and are skipped.
pub fn read_inventory_records(inventory: &DataFrame) -> PolarsResult<Vec<InventoryRecord>> {
    let cur = inventory.column(CUR)?;
    let codart = inventory.column(CODART_ALTERNATIVA)?;
    let opcion = inventory.column(OPCION_ALTERNATIVA)?;
    let embalaje = inventory.column(EMBALAJE_ALTERNATIVA)?;
    let lote = inventory.column(UNIDADES_LOTE)?;
    let bodega = inventory.column(BODEGA)?;

    let mut records = Vec::with_capacity(inventory.height());
    for row in 0..inventory.height() {
        let Some(cur) = cell_text(cur, row)? else {
            continue;
        };
        records.push(InventoryRecord {
            row,
            cur,
            alt_item_code: cell_text(codart, row)?,
            alt_option: cell_f64(opcion, row)?,
            alt_pack_size: cell_f64(embalaje, row)?,
            lot_units_available: cell_f64(lote, row)?,
            warehouse: cell_text(bodega, row)?,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn shortage_rows_without_keys_are_skipped() {
        let df = DataFrame::new(vec![
            Series::new(CUR.into(), vec![Some("A1"), None, Some("A3")]).into_column(),
            Series::new(CODART.into(), vec![Some("X"), Some("Y"), None]).into_column(),
            Series::new(FALTANTE.into(), vec![Some(10i64), Some(2), Some(3)]).into_column(),
            Series::new(EMBALAJE.into(), vec![None, Some(1.0), Some(1.0)]).into_column(),
        ])
        .unwrap();

        let records = read_shortage_records(&df).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_code, "X");
        assert_eq!(records[0].shortage_qty, Some(10.0));
        assert_eq!(records[0].pack_size, None);
    }

    #[test]
    fn inventory_columns_are_prefixed_and_read() {
        let mut df = DataFrame::new(vec![
            Series::new(CUR.into(), vec!["A1", "A1"]).into_column(),
            Series::new(CODART.into(), vec!["Y1", "Y2"]).into_column(),
            Series::new(OPCION.into(), vec!["1", "0"]).into_column(),
            Series::new(EMBALAJE_ALTERNATIVA.into(), vec![Some("2"), None]).into_column(),
            Series::new(UNIDADES_LOTE.into(), vec!["12", "-1"]).into_column(),
            Series::new(BODEGA.into(), vec!["B01", "B02"]).into_column(),
        ])
        .unwrap();

        rename_alternative_columns(&mut df).unwrap();
        assert!(has_column(&df, CODART_ALTERNATIVA));
        assert!(!has_column(&df, CODART));

        let records = read_inventory_records(&df).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].alt_item_code.as_deref(), Some("Y1"));
        assert_eq!(records[0].alt_pack_size, Some(2.0));
        assert!(records[0].is_offer() && records[0].has_stock());
        assert!(!records[1].is_offer());
        assert!(!records[1].has_stock());
        assert_eq!(records[1].warehouse.as_deref(), Some("B02"));
    }
}
