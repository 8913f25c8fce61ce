//! Shared utilities for the shortage substitution crates.
//!
//! Source tables arrive with whatever dtypes the CSV or spreadsheet reader
//! inferred: item codes may be integers in one file and strings in the next,
//! quantities may be `Int64`, `Float64` or text. The helpers here read single
//! cells from a Polars column into the plain Rust values the resolver works
//! with.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    any_to_f64, any_to_string, cell_f64, cell_text, format_numeric, parse_f64,
};
