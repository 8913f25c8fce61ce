//! The resolve pass: normalize, filter, join, select, project.

use std::collections::BTreeSet;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, error, info, info_span};

use subst_model::{MatchedCandidate, ResolveOptions, ShortageRecord};

use crate::candidates::{filter_inventory, join_candidates, shortage_codes};
use crate::error::Result;
use crate::normalize::normalize;
use crate::output::{build_result_frame, empty_result_frame};
use crate::records::{read_inventory_records, read_shortage_records, rename_alternative_columns};
use crate::selection::{item_order, select_substitutes};

/// Counts describing one resolve pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionSummary {
    /// Distinct shortage item codes in the input.
    pub shortages: usize,
    /// Joined candidate rows considered by the selection.
    pub candidates: usize,
    /// Item codes with a chosen substitute (rows in the result).
    pub resolved: usize,
    /// Item codes without any candidate, in ascending order.
    pub unresolved: Vec<String>,
}

/// Result table together with its summary.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub table: DataFrame,
    pub summary: ResolutionSummary,
}

/// Resolves every shortage to at most one substitute.
///
/// Both frames are borrowed and never modified. On a missing required column
/// the error is [`crate::NormalizeError::MissingColumns`] wrapped in
/// [`crate::ResolveError`].
pub fn resolve(
    shortages: &DataFrame,
    inventory: &DataFrame,
    options: &ResolveOptions,
) -> Result<DataFrame> {
    resolve_with_summary(shortages, inventory, options).map(|resolution| resolution.table)
}

/// Like [`resolve`], but reports validation failures by logging them and
/// returning the empty result table.
pub fn resolve_or_empty(
    shortages: &DataFrame,
    inventory: &DataFrame,
    options: &ResolveOptions,
) -> DataFrame {
    match resolve(shortages, inventory, options) {
        Ok(table) => table,
        Err(err) => {
            error!(error = %err, "cannot resolve substitutes");
            empty_result_frame(options)
        }
    }
}

/// Like [`resolve`], also returning a [`ResolutionSummary`].
pub fn resolve_with_summary(
    shortages: &DataFrame,
    inventory: &DataFrame,
    options: &ResolveOptions,
) -> Result<Resolution> {
    let span = info_span!(
        "resolve",
        shortage_rows = shortages.height(),
        inventory_rows = inventory.height()
    );
    let _guard = span.enter();
    let start = Instant::now();

    let tables = normalize(shortages, inventory)?;
    let shortage_df = tables.shortages;
    let mut inventory_df = tables.inventory;
    rename_alternative_columns(&mut inventory_df)?;

    let shortage_records = read_shortage_records(&shortage_df)?;
    let inventory_records = read_inventory_records(&inventory_df)?;

    let codes = shortage_codes(&shortage_records);
    let available = filter_inventory(&inventory_records, &codes, options);
    let joined = join_candidates(&shortage_records, &available);
    let candidates = joined.len();
    let chosen = select_substitutes(joined);

    let table = build_result_frame(&shortage_df, &inventory_df, &chosen, options)?;
    let summary = summarize(&shortage_records, &chosen, candidates);

    info!(
        shortages = summary.shortages,
        candidates = summary.candidates,
        resolved = summary.resolved,
        unresolved = summary.unresolved.len(),
        duration_ms = start.elapsed().as_millis(),
        "resolve complete"
    );
    Ok(Resolution { table, summary })
}

fn summarize(
    shortages: &[ShortageRecord],
    chosen: &[MatchedCandidate<'_>],
    candidates: usize,
) -> ResolutionSummary {
    let items: BTreeSet<&str> = shortages.iter().map(|s| s.item_code.as_str()).collect();
    let resolved: BTreeSet<&str> = chosen.iter().map(MatchedCandidate::item_code).collect();
    let mut unresolved: Vec<String> = items
        .difference(&resolved)
        .map(|item| (*item).to_string())
        .collect();
    unresolved.sort_by(|a, b| item_order(a, b));
    if !unresolved.is_empty() {
        debug!(count = unresolved.len(), "shortage items without a substitute");
    }

    ResolutionSummary {
        shortages: items.len(),
        candidates,
        resolved: resolved.len(),
        unresolved,
    }
}
