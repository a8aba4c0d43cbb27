use serde::{Deserialize, Serialize};

pub type ProductId = String;

/// A catalog entry. Loaded once from the fixture and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Price in whole rubles.
    pub price: u64,
    #[serde(default)]
    pub old_price: Option<u64>,
    /// Discount in percent, shown as a badge on the card.
    #[serde(default)]
    pub discount: Option<u8>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub reviews: Option<u32>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            price,
            old_price: None,
            discount: None,
            rating: None,
            reviews: None,
            brand: None,
            material: None,
            size: None,
            color: None,
            emoji: None,
            in_stock: true,
        }
    }

    #[cfg(test)]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[cfg(test)]
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Case-insensitive substring match over name and description.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    pub fn emoji_or_default(&self) -> &str {
        self.emoji.as_deref().unwrap_or("📦")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_in_stock_defaults_to_true() {
        let json = r#"{"id":"p1","name":"Кабель","description":"USB-C","category":"Аксессуары","price":490}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.in_stock);
        assert_eq!(product.old_price, None);
    }

    #[test]
    fn camel_case_fields_are_read() {
        let json = r#"{"id":"p2","name":"X","description":"","category":"C","price":10,"oldPrice":15,"inStock":false}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.old_price, Some(15));
        assert!(!product.in_stock);
    }

    #[test]
    fn search_is_case_insensitive_for_cyrillic() {
        let product = Product::new("p1", "Игровые НАУШНИКИ", "Аудио", 100);
        assert!(product.matches_search("наушники"));
        assert!(!product.matches_search("колонка"));
    }
}
