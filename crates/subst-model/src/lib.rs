//! Data model for shortage substitution.
//!
//! This crate provides the typed vocabulary shared by the ingestion,
//! resolution and presentation layers:
//! - **Columns**: normalized column labels of the shortage table, the inventory
//!   catalog and the result table
//! - **Records**: strongly-typed rows extracted once the tables are normalized
//! - **Quantities**: packaging-adjusted replacement quantities
//! - **Options**: caller configuration for a resolve pass
//!
//! # Module Organization
//!
//! - [`columns`]: column name constants and required column sets
//! - [`records`]: `ShortageRecord`, `InventoryRecord`, `MatchedCandidate`
//! - [`quantity`]: `RequiredQty`
//! - [`options`]: `ResolveOptions`

pub mod columns;
pub mod options;
pub mod quantity;
pub mod records;

pub use columns::{
    OUTPUT_COLUMNS, REQUIRED_INVENTORY_COLUMNS, REQUIRED_SHORTAGE_COLUMNS, TableKind,
    normalize_label,
};
pub use options::ResolveOptions;
pub use quantity::RequiredQty;
pub use records::{InventoryRecord, JoinOrder, MatchedCandidate, ShortageRecord};
