//! Normalized column labels.
//!
//! Source tables carry Spanish column labels in arbitrary case and with
//! stray whitespace. Every label is passed through [`normalize_label`] once at
//! ingestion; all lookups afterwards use the constants below.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shared matching code between a shortage item and its alternatives.
pub const CUR: &str = "cur";
/// Product code (shortage item in the shortage table, candidate in the inventory).
pub const CODART: &str = "codart";
/// Units missing for the shortage item.
pub const FALTANTE: &str = "faltante";
/// Pack size of the shortage item.
pub const EMBALAJE: &str = "embalaje";
/// Inventory ranking / validity flag before it is prefixed.
pub const OPCION: &str = "opcion";
/// Inventory pack size label as exported by the inventory source.
pub const EMB: &str = "emb";
/// Lot stock on hand, the sufficiency measure.
pub const UNIDADES_LOTE: &str = "unidadespresentacionlote";
/// Warehouse identifier.
pub const BODEGA: &str = "bodega";
/// Reference document carried through to the result.
pub const CARTA: &str = "carta";

/// Candidate product code after the resolver prefixes inventory columns.
pub const CODART_ALTERNATIVA: &str = "codart_alternativa";
/// Candidate ranking flag after the resolver prefixes inventory columns.
pub const OPCION_ALTERNATIVA: &str = "opcion_alternativa";
/// Candidate pack size, renamed during normalization.
pub const EMBALAJE_ALTERNATIVA: &str = "embalaje_alternativa";
/// Packaging-adjusted replacement quantity, derived by the resolver.
pub const CANTIDAD_NECESARIA: &str = "cantidad_necesaria";

/// Columns every shortage table must carry.
pub const REQUIRED_SHORTAGE_COLUMNS: &[&str] = &[CUR, CODART, FALTANTE, EMBALAJE];

/// Columns every inventory catalog must carry once normalized.
///
/// `carta` is a pass-through column and is not required.
pub const REQUIRED_INVENTORY_COLUMNS: &[&str] = &[
    CUR,
    CODART,
    OPCION,
    EMBALAJE_ALTERNATIVA,
    UNIDADES_LOTE,
    BODEGA,
];

/// Fixed result columns, in output order. Caller extras follow.
pub const OUTPUT_COLUMNS: &[&str] = &[
    CUR,
    CODART,
    FALTANTE,
    EMBALAJE,
    CODART_ALTERNATIVA,
    OPCION_ALTERNATIVA,
    EMBALAJE_ALTERNATIVA,
    CANTIDAD_NECESARIA,
    UNIDADES_LOTE,
    BODEGA,
    CARTA,
];

/// Lower-cases and trims a column label, dropping a UTF-8 byte order mark.
pub fn normalize_label(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Which of the two input tables a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableKind {
    /// The list of out-of-stock items.
    Shortages,
    /// The inventory catalog searched for alternatives.
    Inventory,
}

impl TableKind {
    /// Required column set for this table.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            TableKind::Shortages => REQUIRED_SHORTAGE_COLUMNS,
            TableKind::Inventory => REQUIRED_INVENTORY_COLUMNS,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Shortages => f.write_str("shortage table"),
            TableKind::Inventory => f.write_str("inventory table"),
        }
    }
}
