//! Integration tests for table loading.

use std::io::Write;
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, DataType};
use subst_ingest::{IngestError, TableFormat, list_sheets, read_table};

/// Workbook with a `Hoja1` shortage sheet and a `Hoja3` inventory sheet.
fn workbook() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/faltantes_inventario.xlsx")
}

fn temp_table(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write file");
    file.flush().expect("flush file");
    file
}

#[test]
fn reads_shortage_csv() {
    let file = temp_table(
        ".csv",
        " CUR ,CodArt,FALTANTE,Embalaje\nA1,X,10,1\nA1,Z,3,\n",
    );
    let df = read_table(file.path(), None).expect("read csv");

    assert_eq!(df.height(), 2);
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    // Labels are left untouched until normalization.
    assert!(names.iter().any(|name| name.trim() == "CUR"));
    assert_eq!(
        df.column("Embalaje").expect("column").get(1).expect("cell"),
        AnyValue::Null
    );
}

#[test]
fn sheet_argument_is_ignored_for_csv() {
    let file = temp_table(".csv", "cur,codart\nA1,Y1\n");
    let df = read_table(file.path(), Some("Hoja1")).expect("read csv");
    assert_eq!(df.height(), 1);
}

#[test]
fn rejects_unknown_extension() {
    let file = temp_table(".json", "{}");
    let result = read_table(file.path(), None);
    assert!(matches!(result, Err(IngestError::UnsupportedFormat { .. })));
}

#[test]
fn corrupt_workbook_is_reported() {
    let file = temp_table(".xlsx", "not a zip archive");
    let result = read_table(file.path(), None);
    assert!(matches!(result, Err(IngestError::Workbook { .. })));
}

#[test]
fn lists_workbook_sheets_in_order() {
    let sheets = list_sheets(&workbook()).expect("list sheets");
    assert_eq!(sheets, vec!["Hoja1".to_string(), "Hoja3".to_string()]);
}

#[test]
fn first_sheet_is_read_by_default() {
    let path = workbook();
    assert_eq!(TableFormat::from_path(&path).expect("format"), TableFormat::Spreadsheet);

    let df = read_table(&path, None).expect("read workbook");
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["CUR", "CodArt", "Faltante", "Embalaje"]);
    assert_eq!(df.height(), 2);
    assert_eq!(df.column("Faltante").expect("column").dtype(), &DataType::Float64);
}

#[test]
fn sheet_is_selected_case_insensitively() {
    let df = read_table(&workbook(), Some("hoja3")).expect("read inventory sheet");
    assert_eq!(df.height(), 3);
    assert_eq!(df.width(), 7);
    assert_eq!(
        df.column("CodArt").expect("column").get(1).expect("cell"),
        AnyValue::String("Y2")
    );
    assert_eq!(
        df.column("UnidadesPresentacionLote").expect("column").get(1).expect("cell"),
        AnyValue::Float64(12.0)
    );
}

#[test]
fn unknown_sheet_lists_available_sheets() {
    let err = read_table(&workbook(), Some("Hoja9")).unwrap_err();
    match &err {
        IngestError::SheetNotFound { sheet, available, .. } => {
            assert_eq!(sheet, "Hoja9");
            assert_eq!(available, "Hoja1, Hoja3");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("available: Hoja1, Hoja3"));
}

#[test]
fn missing_workbook_is_not_found() {
    let result = read_table(Path::new("/nonexistent/inventario.xlsx"), Some("Hoja3"));
    assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
}
