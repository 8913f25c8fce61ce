//! Spreadsheet reading (XLSX, XLSM, XLS, ODS) via calamine.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use polars::prelude::*;

use crate::csv::{check_file_size, validate_dataframe_shape};
use crate::error::{IngestError, Result};

/// A single worksheet cell reduced to what the DataFrame needs.
#[derive(Debug, Clone, PartialEq)]
enum SheetCell {
    Empty,
    Number(f64),
    Text(String),
}

impl SheetCell {
    fn from_data(cell: &Data) -> Self {
        match cell {
            Data::Empty => SheetCell::Empty,
            Data::Int(v) => SheetCell::Number(*v as f64),
            Data::Float(v) => SheetCell::Number(*v),
            Data::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    SheetCell::Empty
                } else {
                    SheetCell::Text(trimmed.to_string())
                }
            }
            Data::Bool(b) => SheetCell::Text(b.to_string()),
            other => SheetCell::Text(other.to_string()),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, SheetCell::Empty)
    }

    fn to_text(&self) -> Option<String> {
        match self {
            SheetCell::Empty => None,
            SheetCell::Number(v) => Some(v.to_string()),
            SheetCell::Text(s) => Some(s.clone()),
        }
    }
}

static EMPTY_CELL: SheetCell = SheetCell::Empty;

fn workbook_error(path: &Path, err: impl ToString) -> IngestError {
    IngestError::Workbook {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Lists the sheet names of a workbook in workbook order.
pub fn list_sheets(path: &Path) -> Result<Vec<String>> {
    check_file_size(path)?;
    let workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;
    Ok(workbook.sheet_names())
}

/// Reads one worksheet into a DataFrame.
///
/// The first non-empty row is the header. `sheet = None` reads the first
/// sheet. Fully blank rows are skipped. A column whose non-empty cells are all
/// numeric becomes `Float64`; any other column becomes `String`. Trailing
/// columns with neither a label nor data are dropped.
pub fn read_sheet_table(path: &Path, sheet: Option<&str>) -> Result<DataFrame> {
    check_file_size(path)?;
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(path, e))?;
    let sheet_names = workbook.sheet_names();

    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|candidate| candidate.trim().eq_ignore_ascii_case(name.trim()))
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: name.to_string(),
                available: sheet_names.join(", "),
            })?,
        None => sheet_names.first().cloned().ok_or_else(|| IngestError::EmptyTable {
            path: path.to_path_buf(),
        })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| workbook_error(path, e))?;

    tracing::debug!(
        path = %path.display(),
        sheet = %sheet_name,
        "reading worksheet"
    );

    let df = range_to_dataframe(&range, path)?;
    validate_dataframe_shape(&df, path)?;
    Ok(df)
}

fn range_to_dataframe(range: &Range<Data>, path: &Path) -> Result<DataFrame> {
    let mut rows = range
        .rows()
        .map(|row| row.iter().map(SheetCell::from_data).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(SheetCell::is_empty));

    let Some(header) = rows.next() else {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    };
    let body: Vec<Vec<SheetCell>> = rows.collect();

    let mut columns = Vec::with_capacity(header.len());
    for (index, label) in header.iter().enumerate() {
        let cells: Vec<&SheetCell> = body
            .iter()
            .map(|row| row.get(index).unwrap_or(&EMPTY_CELL))
            .collect();

        let Some(name) = label.to_text() else {
            if cells.iter().all(|cell| cell.is_empty()) {
                continue;
            }
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
                index,
            });
        };

        columns.push(build_column(&name, &cells));
    }

    Ok(DataFrame::new(columns)?)
}

fn build_column(name: &str, cells: &[&SheetCell]) -> Column {
    let numeric = cells
        .iter()
        .all(|cell| matches!(cell, SheetCell::Empty | SheetCell::Number(_)));

    if numeric {
        let values: Vec<Option<f64>> = cells
            .iter()
            .map(|cell| match cell {
                SheetCell::Number(v) => Some(*v),
                _ => None,
            })
            .collect();
        Series::new(name.into(), values).into_column()
    } else {
        let values: Vec<Option<String>> = cells.iter().map(|cell| cell.to_text()).collect();
        Series::new(name.into(), values).into_column()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_from(rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), cell);
            }
        }
        range
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn numeric_columns_become_float() {
        let range = range_from(vec![
            vec![text("CUR"), text("Faltante"), text("Embalaje")],
            vec![text("A1"), Data::Int(10), Data::Float(1.0)],
            vec![text("A2"), Data::Float(2.5), Data::Empty],
        ]);
        let df = range_to_dataframe(&range, Path::new("faltantes.xlsx")).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("CUR").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("Faltante").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("Embalaje").unwrap().get(1).unwrap(), AnyValue::Null);
    }

    #[test]
    fn mixed_columns_become_text() {
        let range = range_from(vec![
            vec![text("codart")],
            vec![Data::Float(1234.0)],
            vec![text("AB-1")],
        ]);
        let df = range_to_dataframe(&range, Path::new("inventario.xlsx")).unwrap();
        let column = df.column("codart").unwrap();
        assert_eq!(column.dtype(), &DataType::String);
        assert_eq!(column.get(0).unwrap(), AnyValue::String("1234"));
    }

    #[test]
    fn blank_rows_and_unlabelled_empty_columns_are_skipped() {
        let range = range_from(vec![
            vec![Data::Empty, Data::Empty, Data::Empty],
            vec![text("cur"), text("bodega"), Data::Empty],
            vec![text("A1"), text("B01"), Data::Empty],
            vec![Data::Empty, Data::Empty, Data::Empty],
            vec![text("A2"), text("B02"), Data::Empty],
        ]);
        let df = range_to_dataframe(&range, Path::new("inventario.xlsx")).unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn unlabelled_column_with_data_is_rejected() {
        let range = range_from(vec![
            vec![text("cur"), Data::Empty],
            vec![text("A1"), Data::Int(3)],
        ]);
        let result = range_to_dataframe(&range, Path::new("inventario.xlsx"));
        assert!(matches!(
            result,
            Err(IngestError::EmptyColumnName { index: 1, .. })
        ));
    }
}
