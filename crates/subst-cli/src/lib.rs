//! Library side of the `subst` binary: run configuration, result export and
//! logging setup.

pub mod config;
pub mod export;
pub mod logging;
