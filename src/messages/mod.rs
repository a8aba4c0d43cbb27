use tokio::sync::oneshot;
use crate::catalog::CatalogQuery;
use crate::domain::{CartSnapshot, ChatTurn, Order, OrderDraft, ProductId};
use crate::error::{BotError, ShopError};
use crate::shop::{CatalogPage, NavHeader, ProductCard, View};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests handled by the root coordinator. Each variant carries its
/// parameters and a oneshot channel for the reply.
#[derive(Debug)]
pub enum ShopRequest {
    Catalog {
        query: CatalogQuery,
        respond_to: ServiceResponse<CatalogPage, ShopError>,
    },
    Product {
        product_id: ProductId,
        respond_to: ServiceResponse<ProductCard, ShopError>,
    },
    AddToCart {
        product_id: ProductId,
        respond_to: ServiceResponse<CartSnapshot, ShopError>,
    },
    UpdateQuantity {
        product_id: ProductId,
        quantity: i64,
        respond_to: ServiceResponse<CartSnapshot, ShopError>,
    },
    RemoveFromCart {
        product_id: ProductId,
        respond_to: ServiceResponse<CartSnapshot, ShopError>,
    },
    GetCart {
        respond_to: ServiceResponse<CartSnapshot, ShopError>,
    },
    Navigate {
        view: View,
        respond_to: ServiceResponse<View, ShopError>,
    },
    PlaceOrder {
        draft: OrderDraft,
        respond_to: ServiceResponse<Order, ShopError>,
    },
    ListOrders {
        respond_to: ServiceResponse<Vec<Order>, ShopError>,
    },
    Header {
        respond_to: ServiceResponse<NavHeader, ShopError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum BotRequest {
    Press {
        label: String,
        respond_to: ServiceResponse<(), BotError>,
    },
    GetTranscript {
        respond_to: ServiceResponse<Vec<ChatTurn>, BotError>,
    },
    Shutdown,
}
