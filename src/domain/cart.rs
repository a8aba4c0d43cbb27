use serde::{Deserialize, Serialize};
use super::product::Product;

/// A product snapshot paired with a positive quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> u64 {
        self.product.price * u64::from(self.quantity)
    }
}

/// Mapping from product id to quantity, kept in insertion order.
///
/// Every line has `quantity >= 1`; a line whose quantity would drop to zero
/// is removed instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, returning the new quantity.
    /// A line already at `u32::MAX` stays there.
    pub fn add(&mut self, product: Product) -> u32 {
        match self.lines.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                line.quantity
            }
            None => {
                self.lines.push(CartLine { product, quantity: 1 });
                1
            }
        }
    }

    /// Sets the quantity of an existing line. Zero removes it.
    ///
    /// Returns `false` when no line exists for `id`.
    pub fn set_quantity(&mut self, id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(id);
        }
        match self.lines.iter_mut().find(|line| line.product.id == id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn quantity_of(&self, id: &str) -> Option<u32> {
        self.lines
            .iter()
            .find(|line| line.product.id == id)
            .map(|line| line.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ price × quantity over current lines.
    pub fn total(&self) -> u64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ quantity, shown as the badge on the cart tab.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            total: self.total(),
            item_count: self.item_count(),
        }
    }
}

/// Immutable copy of the cart handed out to views.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub total: u64,
    pub item_count: u32,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
