use thiserror::Error;
use crate::order_actor::OrderError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ShopError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),
    #[error("Quantity out of range: {0}")]
    QuantityOutOfRange(i64),
    #[error("Cart is empty")]
    EmptyCart,
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BotError {
    #[error("No such button on the current keyboard: {0}")]
    UnknownButton(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
