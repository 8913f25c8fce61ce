//! Candidate filtering and the shortage/inventory join.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use subst_model::{InventoryRecord, MatchedCandidate, ResolveOptions, ShortageRecord};

/// Distinct `cur` values present in the shortage table.
pub fn shortage_codes(shortages: &[ShortageRecord]) -> BTreeSet<&str> {
    shortages.iter().map(|record| record.cur.as_str()).collect()
}

/// Keeps inventory rows that can be offered as substitutes.
///
/// In order: the row's `cur` must belong to a shortage, its warehouse must
/// pass the warehouse restriction (none when the option set is empty), and it
/// must have lot stock above zero.
pub fn filter_inventory<'a>(
    inventory: &'a [InventoryRecord],
    codes: &BTreeSet<&str>,
    options: &ResolveOptions,
) -> Vec<&'a InventoryRecord> {
    let relevant: Vec<&InventoryRecord> = inventory
        .iter()
        .filter(|record| codes.contains(record.cur.as_str()))
        .collect();
    let in_scope: Vec<&InventoryRecord> = relevant
        .iter()
        .copied()
        .filter(|record| options.allows_warehouse(record.warehouse.as_deref()))
        .collect();
    let available: Vec<&InventoryRecord> = in_scope
        .iter()
        .copied()
        .filter(|record| record.has_stock())
        .collect();

    debug!(
        inventory = inventory.len(),
        matching_cur = relevant.len(),
        in_warehouse_scope = in_scope.len(),
        with_stock = available.len(),
        "inventory filtered"
    );
    available
}

/// Inner-joins shortages with candidates on `cur`, keeping only substitution
/// offers (`opcion_alternativa > 0`).
///
/// Output follows join order: shortage rows in table order, and for each
/// shortage its candidates in inventory order. A shortage without candidates
/// produces no rows.
pub fn join_candidates<'a>(
    shortages: &'a [ShortageRecord],
    candidates: &[&'a InventoryRecord],
) -> Vec<MatchedCandidate<'a>> {
    let mut by_cur: BTreeMap<&str, Vec<&'a InventoryRecord>> = BTreeMap::new();
    for &candidate in candidates {
        by_cur.entry(candidate.cur.as_str()).or_default().push(candidate);
    }

    let mut joined = Vec::new();
    let mut informational = 0usize;
    for shortage in shortages {
        let Some(matches) = by_cur.get(shortage.cur.as_str()) else {
            continue;
        };
        for &candidate in matches {
            if candidate.is_offer() {
                joined.push(MatchedCandidate::new(shortage, candidate));
            } else {
                informational += 1;
            }
        }
    }

    debug!(
        joined = joined.len(),
        informational, "shortages joined to candidates"
    );
    joined
}
