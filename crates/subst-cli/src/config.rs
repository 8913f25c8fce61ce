//! TOML run configuration.
//!
//! ```toml
//! [shortages]
//! path = "faltantes.xlsx"
//! sheet = "Hoja1"
//!
//! [inventory]
//! path = "inventario.xlsx"
//! sheet = "Hoja3"
//!
//! [resolve]
//! extra_columns = ["proveedor"]
//! warehouses = ["B01"]
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use subst_model::ResolveOptions;

/// Location of one input table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableSource {
    pub path: Option<PathBuf>,
    /// Workbook sheet; ignored for CSV files.
    pub sheet: Option<String>,
}

impl TableSource {
    /// Replaces fields with the command-line values that are set.
    pub fn override_with(&mut self, path: Option<&Path>, sheet: Option<&str>) {
        if let Some(path) = path {
            self.path = Some(path.to_path_buf());
        }
        if let Some(sheet) = sheet {
            self.sheet = Some(sheet.to_string());
        }
    }

    /// The table path, or an error naming the missing flag.
    pub fn require_path(&self, flag: &str) -> Result<&Path> {
        match &self.path {
            Some(path) => Ok(path.as_path()),
            None => bail!("no {flag} table given; pass --{flag} PATH or set [{flag}] path in the config file"),
        }
    }
}

/// Everything a resolve run needs besides the tables themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub shortages: TableSource,
    pub inventory: TableSource,
    pub resolve: ResolveOptions,
}

impl RunConfig {
    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: RunConfig = toml::from_str(content).context("parse config")?;
        // Re-insert through the options API so names are normalized.
        let resolve = std::mem::take(&mut config.resolve);
        config.resolve.merge(resolve);
        Ok(config)
    }

    fn rebase_paths(&mut self, base: &Path) {
        for source in [&mut self.shortages, &mut self.inventory] {
            if let Some(path) = source.path.as_mut()
                && path.is_relative()
            {
                *path = base.join(&*path);
            }
        }
    }
}

/// Loads a config file, resolving relative table paths against its directory.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let mut config =
        RunConfig::from_toml(&content).with_context(|| format!("load config {}", path.display()))?;
    if let Some(base) = path.parent() {
        config.rebase_paths(base);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(RunConfig::from_toml("").unwrap(), RunConfig::default());
    }

    #[test]
    fn resolve_names_are_normalized() {
        let config = RunConfig::from_toml(
            r#"
            [resolve]
            extra_columns = [" Proveedor"]
            warehouses = ["B01 "]
            "#,
        )
        .unwrap();
        assert!(config.resolve.extra_columns.contains("proveedor"));
        assert!(config.resolve.warehouses.contains("B01"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RunConfig::from_toml("[shortages]\nfile = \"a.csv\"").is_err());
    }

    #[test]
    fn misspelled_resolve_key_is_rejected() {
        let err = RunConfig::from_toml("[resolve]\nwarehouse = [\"B01\"]\n").unwrap_err();
        assert!(format!("{err:#}").contains("warehouse"));
    }

    #[test]
    fn command_line_overrides_file() {
        let mut source = TableSource {
            path: Some(PathBuf::from("a.xlsx")),
            sheet: Some("Hoja1".to_string()),
        };
        source.override_with(Some(Path::new("b.csv")), None);
        assert_eq!(source.path.as_deref(), Some(Path::new("b.csv")));
        assert_eq!(source.sheet.as_deref(), Some("Hoja1"));
    }

    #[test]
    fn missing_path_names_the_flag() {
        let err = TableSource::default().require_path("inventory").unwrap_err();
        assert!(err.to_string().contains("--inventory"));
    }
}
