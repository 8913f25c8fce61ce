//! Shortage substitution core.
//!
//! Given a table of out-of-stock items and an inventory catalog, finds for
//! each shortage item the single best substitute sharing its `cur` code.
//!
//! # Pipeline
//!
//! 1. **Normalize**: lower-case and trim column labels, rename the inventory
//!    pack-size column, validate required columns ([`normalize()`])
//! 2. **Filter**: keep inventory rows for shortage `cur` codes, in the allowed
//!    warehouses, with lot stock ([`filter_inventory`])
//! 3. **Join**: pair shortages with substitution offers ([`join_candidates`])
//! 4. **Select**: one candidate per item code ([`select_substitutes`])
//! 5. **Project**: gather the result table ([`build_result_frame`])
//!
//! [`resolve()`] runs all five stages.
//!
//! # Example
//!
//! ```ignore
//! use subst_core::resolve;
//! use subst_model::ResolveOptions;
//!
//! let options = ResolveOptions::new().with_warehouse("B01");
//! let result = resolve(&shortages, &inventory, &options)?;
//! ```

mod error;

pub mod candidates;
pub mod normalize;
pub mod output;
pub mod records;
pub mod resolve;
pub mod selection;

pub use error::{NormalizeError, ResolveError, Result};

pub use candidates::{filter_inventory, join_candidates, shortage_codes};
pub use normalize::{NormalizedTables, normalize, normalize_columns};
pub use output::{build_result_frame, empty_result_frame};
pub use resolve::{Resolution, ResolutionSummary, resolve, resolve_or_empty, resolve_with_summary};
pub use selection::{item_order, select_best, select_substitutes};
