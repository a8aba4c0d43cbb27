use crate::catalog::CatalogQuery;
use crate::domain::Product;
use super::View;

/// One product as the catalog shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub product: Product,
    /// The transient "added" confirmation is still showing.
    pub recently_added: bool,
    pub in_cart: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub query: CatalogQuery,
    pub categories: Vec<String>,
    pub cards: Vec<ProductCard>,
}

impl CatalogPage {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Tab bar state: active view plus the two badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavHeader {
    pub view: View,
    pub cart_items: u32,
    pub order_count: usize,
}
