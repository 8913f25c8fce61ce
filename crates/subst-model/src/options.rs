//! Caller configuration for a resolve pass.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::columns::normalize_label;

/// Options controlling which inventory rows are considered and which extra
/// columns are carried into the result.
///
/// Column names are normalized the same way table labels are, so
/// `"Proveedor "` and `"proveedor"` select the same column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolveOptions {
    /// Extra columns to keep when present among the joined columns.
    pub extra_columns: BTreeSet<String>,
    /// Warehouses candidates may come from. Empty means every warehouse.
    pub warehouses: BTreeSet<String>,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an extra column to carry through.
    #[must_use]
    pub fn with_extra_column(mut self, name: impl AsRef<str>) -> Self {
        self.add_extra_column(name);
        self
    }

    /// Restrict candidates to a warehouse (cumulative).
    #[must_use]
    pub fn with_warehouse(mut self, warehouse: impl AsRef<str>) -> Self {
        self.add_warehouse(warehouse);
        self
    }

    pub fn add_extra_column(&mut self, name: impl AsRef<str>) {
        let name = normalize_label(name.as_ref());
        if !name.is_empty() {
            self.extra_columns.insert(name);
        }
    }

    pub fn add_warehouse(&mut self, warehouse: impl AsRef<str>) {
        let warehouse = warehouse.as_ref().trim();
        if !warehouse.is_empty() {
            self.warehouses.insert(warehouse.to_string());
        }
    }

    /// Merge another set of options into this one (union of both sets).
    pub fn merge(&mut self, other: ResolveOptions) {
        for name in other.extra_columns {
            self.add_extra_column(name);
        }
        for warehouse in other.warehouses {
            self.add_warehouse(warehouse);
        }
    }

    /// True when `warehouse` passes the warehouse restriction.
    ///
    /// A missing warehouse never passes an active restriction.
    pub fn allows_warehouse(&self, warehouse: Option<&str>) -> bool {
        if self.warehouses.is_empty() {
            return true;
        }
        warehouse.is_some_and(|w| self.warehouses.contains(w.trim()))
    }

    /// Extra column names, normalized, in sorted order.
    pub fn extra_columns(&self) -> impl Iterator<Item = &str> {
        self.extra_columns.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_columns_are_normalized() {
        let options = ResolveOptions::new()
            .with_extra_column(" Proveedor ")
            .with_extra_column("proveedor")
            .with_extra_column("   ");
        assert_eq!(options.extra_columns().collect::<Vec<_>>(), vec!["proveedor"]);
    }

    #[test]
    fn empty_warehouse_set_allows_everything() {
        let options = ResolveOptions::new();
        assert!(options.allows_warehouse(Some("B01")));
        assert!(options.allows_warehouse(None));
    }

    #[test]
    fn warehouse_restriction() {
        let options = ResolveOptions::new().with_warehouse("B01");
        assert!(options.allows_warehouse(Some("B01")));
        assert!(options.allows_warehouse(Some(" B01 ")));
        assert!(!options.allows_warehouse(Some("B02")));
        assert!(!options.allows_warehouse(None));
    }

    #[test]
    fn merge_unions_sets() {
        let mut base = ResolveOptions::new().with_warehouse("B01");
        base.merge(
            ResolveOptions::new()
                .with_warehouse("B02")
                .with_extra_column("Lote"),
        );
        assert_eq!(base.warehouses.len(), 2);
        assert!(base.extra_columns.contains("lote"));
    }
}
