//! Size catalog: allowed size labels per product
//!
//! Stored as JSON in `~/.lotsize/catalog.json`:
//!
//! ```json
//! { "productSizes": { "RING": { "options": ["6", "7", "8"] } } }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{LotsizeError, Result};

/// Size options of one product
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeInfo {
    #[serde(default)]
    pub options: Vec<String>,
}

/// Product name → allowed sizes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeCatalog {
    #[serde(default)]
    product_sizes: HashMap<String, SizeInfo>,
}

impl SizeCatalog {
    /// Default catalog location (`~/.lotsize/catalog.json`)
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| LotsizeError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(".lotsize").join("catalog.json"))
    }

    /// Load a catalog file. A missing file is an empty catalog.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "size catalog not found, no sizes available");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let catalog: SizeCatalog = serde_json::from_str(&content).map_err(|e| {
            LotsizeError::Catalog(format!("invalid catalog {}: {}", path.display(), e))
        })?;
        debug!(
            path = %path.display(),
            products = catalog.product_sizes.len(),
            "size catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog in memory
    pub fn from_products<I, S>(products: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        let product_sizes = products
            .into_iter()
            .map(|(name, options)| (name.into().to_uppercase(), SizeInfo { options }))
            .collect();
        Self { product_sizes }
    }

    /// Allowed sizes for a product (name matched case-insensitively)
    pub fn sizes_for(&self, product_name: &str) -> Vec<String> {
        self.product_sizes
            .get(&product_name.to_uppercase())
            .map(|info| info.options.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.product_sizes.is_empty()
    }
}

/// Parse a `--sizes` list such as `"S, M,L"`; blanks and repeats are dropped
pub fn parse_size_list(list: &str) -> Vec<String> {
    let mut sizes: Vec<String> = Vec::new();
    for size in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !sizes.iter().any(|s| s == size) {
            sizes.push(size.to_string());
        }
    }
    sizes
}
