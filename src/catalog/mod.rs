//! Read-only product table and the search/category filter over it.

mod error;

pub use error::*;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, instrument};
use crate::domain::Product;

const EMBEDDED_FIXTURE: &str = include_str!("./resources/products.json");

pub const ALL_CATEGORIES: &str = "all";

/// Category selector of the catalog view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    fn accepts(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub category: CategoryFilter,
}

impl CatalogQuery {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }
}

/// The immutable fixture table.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Loads the product list compiled into the binary.
    pub fn from_fixture() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_FIXTURE)
    }

    /// Loads a product list from an external JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        info!(path = %path.display(), products = catalog.len(), "Loaded external fixture");
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(content)?;
        Self::from_products(products)
    }

    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[cfg(test)]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// `"all"` followed by every distinct category in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for product in &self.products {
            if !categories.iter().any(|c| c == &product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Conjunctive search + category filter, preserving fixture order.
    #[instrument(skip(self), fields(search = %query.search, category = %query.category))]
    pub fn filter(&self, query: &CatalogQuery) -> Vec<Product> {
        let needle = query.search.to_lowercase();
        let found: Vec<Product> = self
            .products
            .iter()
            .filter(|product| product.matches_search(&needle) && query.category.accepts(&product.category))
            .cloned()
            .collect();
        debug!(found = found.len(), "Filtered catalog");
        found
    }
}
