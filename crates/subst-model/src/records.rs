//! Typed rows of the shortage table and the inventory catalog.
//!
//! Records are extracted once, after the column labels have been normalized
//! and validated. They keep the index of the source row so pass-through
//! columns can be gathered from the original frame with their dtypes intact.

use serde::{Deserialize, Serialize};

use crate::quantity::RequiredQty;

/// One out-of-stock item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortageRecord {
    /// Row index in the shortage table.
    pub row: usize,
    /// Shared matching code.
    pub cur: String,
    /// The shortage item's own product code.
    pub item_code: String,
    /// Units missing. `None` when the cell is empty or not numeric.
    pub shortage_qty: Option<f64>,
    /// Packaging multiplier of the shortage item.
    pub pack_size: Option<f64>,
}

/// One entry of the inventory catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Row index in the inventory catalog.
    pub row: usize,
    /// Shared matching code.
    pub cur: String,
    /// Candidate product code.
    pub alt_item_code: Option<String>,
    /// Ranking / validity flag. Only values above zero are substitution offers.
    pub alt_option: Option<f64>,
    /// Packaging multiplier of the candidate.
    pub alt_pack_size: Option<f64>,
    /// Stock on hand in lot presentation.
    pub lot_units_available: Option<f64>,
    /// Warehouse identifier.
    pub warehouse: Option<String>,
}

impl InventoryRecord {
    /// True when there is stock on hand (`lot_units_available > 0`).
    pub fn has_stock(&self) -> bool {
        self.lot_units_available.is_some_and(|units| units > 0.0)
    }

    /// True when the row is a substitution offer (`alt_option > 0`).
    pub fn is_offer(&self) -> bool {
        self.alt_option.is_some_and(|option| option > 0.0)
    }

    /// Available lot units, treating a missing value as zero.
    pub fn lot_units(&self) -> f64 {
        self.lot_units_available.unwrap_or(0.0)
    }
}

/// Position of a joined row: shortage row first, then inventory row.
///
/// This is the order an inner join produces and the tie-break used when two
/// candidates have the same lot stock.
pub type JoinOrder = (usize, usize);

/// A shortage joined with one inventory candidate sharing its `cur`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedCandidate<'a> {
    /// The shortage being covered.
    pub shortage: &'a ShortageRecord,
    /// The candidate alternative.
    pub candidate: &'a InventoryRecord,
    /// Replacement quantity in the candidate's packaging, if computable.
    pub required_qty: Option<RequiredQty>,
}

impl<'a> MatchedCandidate<'a> {
    /// Joins a shortage with a candidate and derives the required quantity.
    pub fn new(shortage: &'a ShortageRecord, candidate: &'a InventoryRecord) -> Self {
        let required_qty = RequiredQty::compute(
            shortage.shortage_qty,
            shortage.pack_size,
            candidate.alt_pack_size,
        );
        Self {
            shortage,
            candidate,
            required_qty,
        }
    }

    /// Shortage item code, the grouping key.
    pub fn item_code(&self) -> &str {
        &self.shortage.item_code
    }

    /// Candidate lot stock.
    pub fn lot_units(&self) -> f64 {
        self.candidate.lot_units()
    }

    /// Join position used for deterministic tie-breaks.
    pub fn join_order(&self) -> JoinOrder {
        (self.shortage.row, self.candidate.row)
    }

    /// True when the candidate's lot stock alone covers `needed` units.
    ///
    /// A missing requirement is never covered.
    pub fn covers(&self, needed: Option<f64>) -> bool {
        needed.is_some_and(|needed| self.lot_units() >= needed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortage() -> ShortageRecord {
        ShortageRecord {
            row: 0,
            cur: "A1".to_string(),
            item_code: "X".to_string(),
            shortage_qty: Some(10.0),
            pack_size: Some(2.0),
        }
    }

    fn candidate(lot: Option<f64>, option: Option<f64>) -> InventoryRecord {
        InventoryRecord {
            row: 3,
            cur: "A1".to_string(),
            alt_item_code: Some("Y".to_string()),
            alt_option: option,
            alt_pack_size: Some(5.0),
            lot_units_available: lot,
            warehouse: Some("B01".to_string()),
        }
    }

    #[test]
    fn stock_and_offer_flags() {
        assert!(candidate(Some(1.0), Some(1.0)).has_stock());
        assert!(!candidate(Some(0.0), Some(1.0)).has_stock());
        assert!(!candidate(None, Some(1.0)).has_stock());
        assert!(candidate(Some(1.0), Some(2.0)).is_offer());
        assert!(!candidate(Some(1.0), Some(0.0)).is_offer());
        assert!(!candidate(Some(1.0), None).is_offer());
    }

    #[test]
    fn matched_candidate_derives_quantity() {
        let shortage = shortage();
        let inventory = candidate(Some(12.0), Some(1.0));
        let matched = MatchedCandidate::new(&shortage, &inventory);

        assert_eq!(matched.required_qty, Some(RequiredQty::new(4)));
        assert_eq!(matched.join_order(), (0, 3));
        assert!(matched.covers(Some(10.0)));
        assert!(!matched.covers(Some(13.0)));
        assert!(!matched.covers(None));
    }
}
