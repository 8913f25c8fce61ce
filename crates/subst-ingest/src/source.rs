//! Format detection and table loading dispatch.

use std::path::Path;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};
use crate::sheet::read_sheet_table;

/// Table file formats understood by [`read_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values with a single header row.
    Csv,
    /// A spreadsheet workbook (xlsx, xlsm, xls, ods).
    Spreadsheet,
}

impl TableFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "csv" | "txt" => Ok(TableFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(TableFormat::Spreadsheet),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Loads a table from a CSV file or a worksheet.
///
/// `sheet` selects a worksheet by name (case-insensitive) and is ignored for
/// CSV input.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<DataFrame> {
    let format = TableFormat::from_path(path)?;

    let start = Instant::now();
    let df = match format {
        TableFormat::Csv => {
            if let Some(sheet) = sheet {
                warn!(
                    path = %path.display(),
                    sheet = %sheet,
                    "sheet name ignored for CSV input"
                );
            }
            read_csv_table(path)?
        }
        TableFormat::Spreadsheet => read_sheet_table(path, sheet)?,
    };

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "table loaded"
    );
    Ok(df)
}
