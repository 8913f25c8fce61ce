//! Packaging-adjusted replacement quantities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of alternative units needed to cover a shortage.
///
/// Computed as `ceil(shortage_qty * pack_size / alt_pack_size)`. Partial packs
/// always round up so the shortage is fully covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredQty(u64);

impl RequiredQty {
    /// Converts a shortage expressed in the shortage item's packaging into
    /// units of the alternative's packaging.
    ///
    /// Returns `None` when either pack size is missing, when the alternative
    /// pack size is not positive, or when the inputs do not produce a finite,
    /// non-negative quantity.
    ///
    /// # Examples
    ///
    /// ```
    /// use subst_model::RequiredQty;
    ///
    /// assert_eq!(RequiredQty::compute(Some(10.0), Some(1.0), Some(1.0)).map(|q| q.get()), Some(10));
    /// assert_eq!(RequiredQty::compute(Some(10.0), Some(3.0), Some(4.0)).map(|q| q.get()), Some(8));
    /// assert_eq!(RequiredQty::compute(Some(10.0), None, Some(4.0)), None);
    /// assert_eq!(RequiredQty::compute(Some(10.0), Some(1.0), Some(0.0)), None);
    /// ```
    pub fn compute(
        shortage_qty: Option<f64>,
        pack_size: Option<f64>,
        alt_pack_size: Option<f64>,
    ) -> Option<Self> {
        let (qty, pack, alt_pack) = (shortage_qty?, pack_size?, alt_pack_size?);
        if alt_pack <= 0.0 {
            return None;
        }
        let units = (qty * pack / alt_pack).ceil();
        if !units.is_finite() || units < 0.0 || units > u64::MAX as f64 {
            return None;
        }
        Some(Self(units as u64))
    }

    /// Wraps an already computed quantity.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// The quantity as an integer.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequiredQty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_partial_packs_up() {
        // 5 units of 2 = 10 base units, packed by 3 → 3.33 packs → 4
        let qty = RequiredQty::compute(Some(5.0), Some(2.0), Some(3.0)).unwrap();
        assert_eq!(qty.get(), 4);
    }

    #[test]
    fn exact_division_is_not_rounded_up() {
        let qty = RequiredQty::compute(Some(12.0), Some(2.0), Some(6.0)).unwrap();
        assert_eq!(qty.get(), 4);
    }

    #[test]
    fn missing_operands_propagate_null() {
        assert_eq!(RequiredQty::compute(None, Some(1.0), Some(1.0)), None);
        assert_eq!(RequiredQty::compute(Some(1.0), None, Some(1.0)), None);
        assert_eq!(RequiredQty::compute(Some(1.0), Some(1.0), None), None);
    }

    #[test]
    fn non_positive_alternative_pack_is_null() {
        assert_eq!(RequiredQty::compute(Some(1.0), Some(1.0), Some(0.0)), None);
        assert_eq!(RequiredQty::compute(Some(1.0), Some(1.0), Some(-2.0)), None);
    }

    #[test]
    fn negative_result_is_null() {
        assert_eq!(RequiredQty::compute(Some(-3.0), Some(1.0), Some(1.0)), None);
    }

    #[test]
    fn display_prints_integer() {
        assert_eq!(RequiredQty::new(12).to_string(), "12");
    }
}
