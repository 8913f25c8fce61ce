use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{Level, debug, enabled, info, info_span, trace};

use subst_cli::config::{RunConfig, load_config};
use subst_cli::export::write_table;
use subst_cli::logging::redact_value;
use subst_common::any_to_string;
use subst_core::normalize::rename_pack_size_column;
use subst_core::{Resolution, ResolutionSummary, empty_result_frame, normalize_columns, resolve_with_summary};
use subst_ingest::{TableFormat, list_sheets, read_table};
use subst_model::columns::{CODART, CODART_ALTERNATIVA};
use subst_model::{REQUIRED_INVENTORY_COLUMNS, REQUIRED_SHORTAGE_COLUMNS, ResolveOptions, TableKind, normalize_label};

use crate::cli::{ColumnsArgs, ResolveArgs};
use crate::summary::{ColumnCheck, ColumnsReport};

pub fn run_resolve(args: &ResolveArgs) -> Result<Resolution> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RunConfig::default(),
    };
    config
        .shortages
        .override_with(args.shortages.as_deref(), args.shortages_sheet.as_deref());
    config
        .inventory
        .override_with(args.inventory.as_deref(), args.inventory_sheet.as_deref());
    let options = merge_options(config.resolve, args);

    let shortage_path = config.shortages.require_path("shortages")?;
    let inventory_path = config.inventory.require_path("inventory")?;

    let ingest_span = info_span!("ingest");
    let ingest_start = Instant::now();
    let (shortages, inventory) = ingest_span.in_scope(|| -> Result<_> {
        let shortages = read_table(shortage_path, config.shortages.sheet.as_deref())
            .with_context(|| format!("read shortage table {}", shortage_path.display()))?;
        let inventory = read_table(inventory_path, config.inventory.sheet.as_deref())
            .with_context(|| format!("read inventory table {}", inventory_path.display()))?;
        Ok((shortages, inventory))
    })?;
    info!(
        shortage_rows = shortages.height(),
        inventory_rows = inventory.height(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let resolution = match resolve_with_summary(&shortages, &inventory, &options) {
        Ok(resolution) => resolution,
        Err(error) if error.missing_columns().is_some() => {
            eprintln!("error: {error}");
            Resolution {
                table: empty_result_frame(&options),
                summary: ResolutionSummary::default(),
            }
        }
        Err(error) => return Err(error).context("resolve substitutes"),
    };
    trace_selection(&resolution.table);

    if let Some(path) = &args.output {
        let format = write_table(&resolution.table, path)?;
        info!(path = %path.display(), format = ?format, rows = resolution.table.height(), "result written");
    }
    Ok(resolution)
}

pub fn run_columns(args: &ColumnsArgs) -> Result<ColumnsReport> {
    let sheets = match TableFormat::from_path(&args.path)? {
        TableFormat::Spreadsheet => list_sheets(&args.path)
            .with_context(|| format!("list sheets of {}", args.path.display()))?,
        TableFormat::Csv => Vec::new(),
    };
    let df = read_table(&args.path, args.sheet.as_deref())
        .with_context(|| format!("read {}", args.path.display()))?;
    let labels: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_label(name.as_str()))
        .collect();
    let checks = column_checks(&df, &args.path)?;
    Ok(ColumnsReport {
        sheets,
        labels,
        checks,
    })
}

fn column_checks(df: &DataFrame, path: &Path) -> Result<Vec<ColumnCheck>> {
    let shortages = normalize_columns(df, TableKind::Shortages)
        .with_context(|| format!("normalize columns of {}", path.display()))?;
    let mut inventory = shortages.clone();
    rename_pack_size_column(&mut inventory)?;

    let present = |df: &DataFrame, name: &str| df.get_column_index(name).is_some();
    let mut checks: Vec<ColumnCheck> = REQUIRED_SHORTAGE_COLUMNS
        .iter()
        .map(|&column| ColumnCheck {
            table: "shortages",
            column,
            present: present(&shortages, column),
        })
        .collect();
    checks.extend(REQUIRED_INVENTORY_COLUMNS.iter().map(|&column| ColumnCheck {
        table: "inventory",
        column,
        present: present(&inventory, column),
    }));
    debug!(
        missing = checks.iter().filter(|check| !check.present).count(),
        "required columns checked"
    );
    Ok(checks)
}

fn merge_options(mut options: ResolveOptions, args: &ResolveArgs) -> ResolveOptions {
    for column in &args.extra_columns {
        options.add_extra_column(column);
    }
    for warehouse in &args.warehouses {
        options.add_warehouse(warehouse);
    }
    options
}

fn trace_selection(table: &DataFrame) {
    if !enabled!(Level::TRACE) {
        return;
    }
    let (Ok(items), Ok(substitutes)) = (table.column(CODART), table.column(CODART_ALTERNATIVA))
    else {
        return;
    };
    for row in 0..table.height() {
        let item = items.get(row).map(any_to_string).unwrap_or_default();
        let substitute = substitutes.get(row).map(any_to_string).unwrap_or_default();
        trace!(
            item = redact_value(&item),
            substitute = redact_value(&substitute),
            "substitute selected"
        );
    }
}
