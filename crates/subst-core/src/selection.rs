//! Best-candidate selection.
//!
//! Candidates are grouped by shortage item code. Within a group the policy
//! is sufficiency first, then closest fit:
//!
//! 1. If any candidate's lot stock covers the shortage, pick the covering
//!    candidate with the smallest lot stock (least over-allocation).
//! 2. Otherwise pick the candidate with the largest lot stock (best effort).
//!
//! Ties on lot stock are broken by join order in both branches: the earliest
//! shortage row, then the earliest inventory row, wins.

use std::cmp::Ordering;

use subst_common::parse_f64;
use subst_model::MatchedCandidate;

/// Orders item codes numerically when both parse as numbers.
///
/// Numeric codes sort before text codes; text codes compare as strings.
/// Codes with the same numeric value (`"7"`, `"7.0"`) fall back to string
/// order, so only identical codes compare equal.
pub fn item_order(a: &str, b: &str) -> Ordering {
    match (parse_f64(a), parse_f64(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Orders candidates by lot stock, then by join order.
fn fit_order(a: &MatchedCandidate<'_>, b: &MatchedCandidate<'_>) -> Ordering {
    a.lot_units()
        .total_cmp(&b.lot_units())
        .then_with(|| a.join_order().cmp(&b.join_order()))
}

/// Orders candidates by largest lot stock, then by join order.
fn fallback_order(a: &MatchedCandidate<'_>, b: &MatchedCandidate<'_>) -> Ordering {
    b.lot_units()
        .total_cmp(&a.lot_units())
        .then_with(|| a.join_order().cmp(&b.join_order()))
}

/// Sorts candidates by item code (see [`item_order`]), then lot stock, then join order.
pub fn sort_candidates(candidates: &mut [MatchedCandidate<'_>]) {
    candidates.sort_by(|a, b| {
        item_order(a.item_code(), b.item_code()).then_with(|| fit_order(a, b))
    });
}

/// Picks the best candidate of one item-code group.
///
/// The requirement is read from the group's first row in sorted order; all
/// rows of a group describe the same shortage item. Returns `None` only for
/// an empty group.
pub fn select_best<'g, 'a>(group: &'g [MatchedCandidate<'a>]) -> Option<&'g MatchedCandidate<'a>> {
    let needed = group.first()?.shortage.shortage_qty;
    group
        .iter()
        .filter(|candidate| candidate.covers(needed))
        .min_by(|a, b| fit_order(a, b))
        .or_else(|| group.iter().min_by(|a, b| fallback_order(a, b)))
}

/// Selects exactly one candidate per item code.
///
/// The result is ordered by item code. Groups are independent: the choice
/// for one item never affects another.
pub fn select_substitutes<'a>(mut candidates: Vec<MatchedCandidate<'a>>) -> Vec<MatchedCandidate<'a>> {
    sort_candidates(&mut candidates);
    candidates
        .chunk_by(|a, b| a.item_code() == b.item_code())
        .filter_map(select_best)
        .cloned()
        .collect()
}
