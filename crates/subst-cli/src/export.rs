//! Writing the result table to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, CsvWriter, DataFrame, SerWriter};
use serde_json::{Map, Number, Value};

use subst_common::{any_to_f64, any_to_string};

/// Output file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` selects JSON; anything else is written as CSV.
    pub fn from_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json { Self::Json } else { Self::Csv }
    }
}

/// Writes `table` to `path` in the format implied by its extension.
pub fn write_table(table: &DataFrame, path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path);
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => {
            let mut table = table.clone();
            CsvWriter::new(&mut writer)
                .include_header(true)
                .finish(&mut table)
                .with_context(|| format!("write CSV {}", path.display()))?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &table_records(table))
                .with_context(|| format!("write JSON {}", path.display()))?;
            writer.write_all(b"\n")?;
        }
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(format)
}

/// Converts the table to one JSON object per row, keyed by column name.
///
/// Numeric columns become JSON numbers, nulls become `null`, everything else
/// is written as text.
pub fn table_records(table: &DataFrame) -> Vec<Map<String, Value>> {
    let columns = table.get_columns();
    (0..table.height())
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    let value = column.get(row).map_or(Value::Null, json_value);
                    (column.name().to_string(), value)
                })
                .collect()
        })
        .collect()
}

fn json_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::Float32(_) | AnyValue::Float64(_) => any_to_f64(value)
            .and_then(Number::from_f64)
            .map_or(Value::Null, Value::Number),
        other => Value::String(any_to_string(other)),
    }
}
