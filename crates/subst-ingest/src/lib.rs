//! Table ingestion for shortage substitution.
//!
//! This crate loads the two source tables (the shortage list and the
//! inventory catalog) from local files into Polars DataFrames. Column labels
//! are left as found; normalization happens in the resolver.
//!
//! # Features
//!
//! - **CSV Loading**: header row plus data, every column read as text
//! - **Spreadsheet Loading**: XLSX, XLSM, XLS and ODS workbooks, first sheet
//!   or a named sheet
//! - **File Checks**: size limit, UTF-16 rejection, empty table detection
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use subst_ingest::read_table;
//!
//! let shortages = read_table(Path::new("faltantes.xlsx"), Some("Hoja1"))?;
//! let inventory = read_table(Path::new("inventario.csv"), None)?;
//! ```

mod csv;
mod error;
mod sheet;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{MAX_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_table, validate_encoding};

// === Spreadsheet Reading ===
pub use sheet::{list_sheets, read_sheet_table};

// === Dispatch ===
pub use source::{TableFormat, read_table};
