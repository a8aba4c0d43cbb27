use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};
use crate::domain::{Cart, Product, ProductId};
use crate::error::ShopError;

/// The screen currently shown by the coordinator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Catalog,
    Cart,
    Checkout,
    Orders,
    Bot,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Catalog => "Каталог",
            View::Cart => "Корзина",
            View::Checkout => "Оформление заказа",
            View::Orders => "Заказы",
            View::Bot => "🤖 Bot Preview",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Catalog => "catalog",
            View::Cart => "cart",
            View::Checkout => "checkout",
            View::Orders => "orders",
            View::Bot => "bot",
        };
        f.write_str(name)
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "catalog" => Ok(View::Catalog),
            "cart" => Ok(View::Cart),
            "checkout" => Ok(View::Checkout),
            "orders" => Ok(View::Orders),
            "bot" => Ok(View::Bot),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

/// User-triggered changes to the coordinator state.
#[derive(Debug, Clone)]
pub enum ShopEvent {
    AddToCart(Product),
    SetQuantity { product_id: ProductId, quantity: i64 },
    Remove(ProductId),
    /// Switching to `Checkout` requires a non-empty cart.
    Navigate(View),
    /// An order was stored: the cart empties and history is shown.
    OrderPlaced,
}

#[derive(Debug, Clone, Default)]
pub struct ShopState {
    cart: Cart,
    view: View,
}

impl ShopState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Applies one event. A rejected event leaves the state untouched.
    pub fn apply(&mut self, event: ShopEvent) -> Result<(), ShopError> {
        match event {
            ShopEvent::AddToCart(product) => {
                if !product.in_stock {
                    warn!(product_id = %product.id, "Refusing to add out-of-stock product");
                    return Err(ShopError::OutOfStock(product.id));
                }
                let id = product.id.clone();
                let quantity = self.cart.add(product);
                info!(product_id = %id, quantity, "Added to cart");
            }
            ShopEvent::SetQuantity { product_id, quantity } => {
                // Zero or below removes the line.
                let Ok(quantity) = u32::try_from(quantity.max(0)) else {
                    warn!(%product_id, quantity, "Refusing quantity above the cart limit");
                    return Err(ShopError::QuantityOutOfRange(quantity));
                };
                if self.cart.set_quantity(&product_id, quantity) {
                    info!(%product_id, quantity, "Cart quantity updated");
                } else {
                    debug!(%product_id, "Quantity update for product not in cart ignored");
                }
            }
            ShopEvent::Remove(product_id) => {
                if self.cart.remove(&product_id) {
                    info!(%product_id, "Removed from cart");
                } else {
                    debug!(%product_id, "Remove for product not in cart ignored");
                }
            }
            ShopEvent::Navigate(view) => {
                if view == View::Checkout && self.cart.is_empty() {
                    warn!("Checkout requested with an empty cart");
                    return Err(ShopError::EmptyCart);
                }
                debug!(from = %self.view, to = %view, "Switching view");
                self.view = view;
            }
            ShopEvent::OrderPlaced => {
                self.cart.clear();
                self.view = View::Orders;
            }
        }
        Ok(())
    }
}
