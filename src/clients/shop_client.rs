use tokio::sync::mpsc;
use tracing::{debug, instrument};
use crate::catalog::CatalogQuery;
use crate::domain::{CartSnapshot, Order, OrderDraft, ProductId};
use crate::error::ShopError;
use crate::messages::ShopRequest;
use crate::shop::{CatalogPage, NavHeader, ProductCard, View};

/// Client for the root coordinator.
#[derive(Clone)]
pub struct ShopClient {
    sender: mpsc::Sender<ShopRequest>,
}

impl ShopClient {
    pub fn new(sender: mpsc::Sender<ShopRequest>) -> Self {
        Self { sender }
    }

    /// Manual method for the fire-and-forget shutdown message
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ShopError> {
        debug!("Sending shutdown request");
        self.sender
            .send(ShopRequest::Shutdown)
            .await
            .map_err(|e| ShopError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(ShopClient => fn catalog(query: CatalogQuery) -> CatalogPage as ShopRequest::Catalog, Error = ShopError);
client_method!(ShopClient => fn product(product_id: ProductId) -> ProductCard as ShopRequest::Product, Error = ShopError);
client_method!(ShopClient => fn add_to_cart(product_id: ProductId) -> CartSnapshot as ShopRequest::AddToCart, Error = ShopError);
client_method!(ShopClient => fn update_quantity(product_id: ProductId, quantity: i64) -> CartSnapshot as ShopRequest::UpdateQuantity, Error = ShopError);
client_method!(ShopClient => fn remove_from_cart(product_id: ProductId) -> CartSnapshot as ShopRequest::RemoveFromCart, Error = ShopError);
client_method!(ShopClient => fn cart() -> CartSnapshot as ShopRequest::GetCart, Error = ShopError);
client_method!(ShopClient => fn navigate(view: View) -> View as ShopRequest::Navigate, Error = ShopError);
client_method!(ShopClient => fn place_order(draft: OrderDraft) -> Order as ShopRequest::PlaceOrder, Error = ShopError);
client_method!(ShopClient => fn orders() -> Vec<Order> as ShopRequest::ListOrders, Error = ShopError);
client_method!(ShopClient => fn header() -> NavHeader as ShopRequest::Header, Error = ShopError);
