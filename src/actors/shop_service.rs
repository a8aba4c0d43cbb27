use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use crate::catalog::{Catalog, CatalogQuery};
use crate::clients::{OrderClient, ShopClient};
use crate::domain::{CartSnapshot, Order, OrderCreate, OrderDraft, Product, ProductId};
use crate::error::ShopError;
use crate::messages::{ServiceResponse, ShopRequest};
use crate::order_actor::{validate_draft, OrderError};
use crate::shop::{CatalogPage, NavHeader, ProductCard, ShopEvent, ShopState};

// =============================================================================
// SHOP SERVICE (ROOT COORDINATOR)
// =============================================================================

/// Owns the cart and the active view, and orchestrates order placement
/// against the order log.
pub struct ShopService {
    receiver: mpsc::Receiver<ShopRequest>,
    catalog: Arc<Catalog>,
    order_client: OrderClient,
    state: ShopState,
    added_until: HashMap<ProductId, Instant>,
    added_indicator: Duration,
}

impl ShopService {
    pub fn new(
        buffer_size: usize,
        catalog: Arc<Catalog>,
        order_client: OrderClient,
        added_indicator: Duration,
    ) -> (Self, ShopClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            catalog,
            order_client,
            state: ShopState::new(),
            added_until: HashMap::new(),
            added_indicator,
        };
        let client = ShopClient::new(sender);
        (service, client)
    }

    #[instrument(name = "shop_service", skip(self))]
    pub async fn run(mut self) {
        info!(products = self.catalog.len(), "ShopService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ShopRequest::Catalog { query, respond_to } => {
                    self.handle_catalog(query, respond_to);
                }
                ShopRequest::Product { product_id, respond_to } => {
                    self.handle_product(product_id, respond_to);
                }
                ShopRequest::AddToCart { product_id, respond_to } => {
                    self.handle_add_to_cart(product_id, respond_to);
                }
                ShopRequest::UpdateQuantity { product_id, quantity, respond_to } => {
                    let result = self.apply(ShopEvent::SetQuantity { product_id, quantity });
                    let _ = respond_to.send(result);
                }
                ShopRequest::RemoveFromCart { product_id, respond_to } => {
                    let result = self.apply(ShopEvent::Remove(product_id));
                    let _ = respond_to.send(result);
                }
                ShopRequest::GetCart { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.cart().snapshot()));
                }
                ShopRequest::Navigate { view, respond_to } => {
                    let result = self.state.apply(ShopEvent::Navigate(view)).map(|_| self.state.view());
                    let _ = respond_to.send(result);
                }
                ShopRequest::PlaceOrder { draft, respond_to } => {
                    self.handle_place_order(draft, respond_to).await;
                }
                ShopRequest::ListOrders { respond_to } => {
                    self.handle_list_orders(respond_to).await;
                }
                ShopRequest::Header { respond_to } => {
                    self.handle_header(respond_to).await;
                }
                ShopRequest::Shutdown => {
                    info!("ShopService shutting down");
                    break;
                }
            }
        }
        info!("ShopService stopped");
    }

    fn apply(&mut self, event: ShopEvent) -> Result<CartSnapshot, ShopError> {
        self.state.apply(event)?;
        Ok(self.state.cart().snapshot())
    }

    fn card(&self, product: Product, now: Instant) -> ProductCard {
        let recently_added = self
            .added_until
            .get(&product.id)
            .is_some_and(|deadline| now < *deadline);
        let in_cart = self.state.cart().quantity_of(&product.id);
        ProductCard { product, recently_added, in_cart }
    }

    #[instrument(skip(self, respond_to))]
    fn handle_catalog(&mut self, query: CatalogQuery, respond_to: ServiceResponse<CatalogPage, ShopError>) {
        debug!("Processing catalog request");
        let now = Instant::now();
        self.added_until.retain(|_, deadline| now < *deadline);

        let cards = self
            .catalog
            .filter(&query)
            .into_iter()
            .map(|product| self.card(product, now))
            .collect();
        let page = CatalogPage {
            query,
            categories: self.catalog.categories(),
            cards,
        };
        let _ = respond_to.send(Ok(page));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_product(&self, product_id: ProductId, respond_to: ServiceResponse<ProductCard, ShopError>) {
        debug!("Processing product request");
        let result = match self.catalog.get(&product_id) {
            Some(product) => Ok(self.card(product.clone(), Instant::now())),
            None => Err(ShopError::ProductNotFound(product_id)),
        };
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_add_to_cart(&mut self, product_id: ProductId, respond_to: ServiceResponse<CartSnapshot, ShopError>) {
        debug!("Processing add_to_cart request");
        let Some(product) = self.catalog.get(&product_id).cloned() else {
            warn!("Product not in catalog");
            let _ = respond_to.send(Err(ShopError::ProductNotFound(product_id)));
            return;
        };

        let result = self.apply(ShopEvent::AddToCart(product));
        if result.is_ok() {
            self.added_until
                .insert(product_id, Instant::now() + self.added_indicator);
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, draft, respond_to))]
    async fn handle_place_order(&mut self, draft: OrderDraft, respond_to: ServiceResponse<Order, ShopError>) {
        info!("Processing place_order request");

        // Step 1: Validate the form
        if let Err(errors) = validate_draft(&draft) {
            warn!(errors = %errors, "Order form rejected");
            let _ = respond_to.send(Err(OrderError::Validation(errors).into()));
            return;
        }

        // Step 2: Snapshot the cart
        let cart = self.state.cart();
        if cart.is_empty() {
            warn!("Order submitted with an empty cart");
            let _ = respond_to.send(Err(ShopError::EmptyCart));
            return;
        }
        let params = OrderCreate {
            contact: draft,
            items: cart.lines().to_vec(),
            total: cart.total(),
        };

        // Step 3: Append to the order log
        let order = match self.order_client.create_order(params).await {
            Ok(order) => order,
            Err(e) => {
                error!(error = %e, "Order log refused the order");
                let _ = respond_to.send(Err(e.into()));
                return;
            }
        };

        // Step 4: Clear the cart and show history
        if let Err(e) = self.state.apply(ShopEvent::OrderPlaced) {
            error!(error = %e, "Failed to reset state after order");
        }
        info!(order_id = %order.id, status = order.status.as_str(), total = order.total, "Order placed successfully");
        let _ = respond_to.send(Ok(order));
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_list_orders(&self, respond_to: ServiceResponse<Vec<Order>, ShopError>) {
        debug!("Processing list_orders request");
        let result = self.order_client.list_orders().await.map_err(ShopError::from);
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_header(&self, respond_to: ServiceResponse<NavHeader, ShopError>) {
        let result = self
            .order_client
            .count_orders()
            .await
            .map(|order_count| NavHeader {
                view: self.state.view(),
                cart_items: self.state.cart().item_count(),
                order_count,
            })
            .map_err(ShopError::from);
        let _ = respond_to.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use crate::actor_framework::ResourceActor;
    use crate::catalog::CategoryFilter;
    use crate::shop::View;

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::from_products(vec![
                Product::new("1", "Наушники", "Аудио", 1_000).with_description("Беспроводные"),
                Product::new("2", "Колонка", "Аудио", 500),
                Product::new("3", "Станция", "Умные", 700).out_of_stock(),
            ])
            .unwrap(),
        )
    }

    fn start() -> ShopClient {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("DEMO-{}", counter.fetch_add(1, Ordering::SeqCst));
        let (order_actor, order_inner) = ResourceActor::<Order>::new(8, next_id);
        tokio::spawn(order_actor.run());
        let (service, client) =
            ShopService::new(8, catalog(), OrderClient::new(order_inner), Duration::from_millis(2_000));
        tokio::spawn(service.run());
        client
    }

    #[tokio::test]
    async fn test_unknown_and_out_of_stock_products_are_refused() {
        let client = start();
        assert_eq!(
            client.add_to_cart("404".to_string()).await,
            Err(ShopError::ProductNotFound("404".to_string()))
        );
        assert_eq!(
            client.add_to_cart("3".to_string()).await,
            Err(ShopError::OutOfStock("3".to_string()))
        );
        assert!(client.cart().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_header_badges_follow_cart_and_orders() {
        let client = start();
        client.add_to_cart("1".to_string()).await.unwrap();
        client.add_to_cart("1".to_string()).await.unwrap();
        client.add_to_cart("2".to_string()).await.unwrap();

        let header = client.header().await.unwrap();
        assert_eq!(header.cart_items, 3);
        assert_eq!(header.order_count, 0);
        assert_eq!(header.view, View::Catalog);
    }

    #[tokio::test]
    async fn test_catalog_page_reports_cart_quantities() {
        let client = start();
        client.add_to_cart("2".to_string()).await.unwrap();
        let page = client
            .catalog(CatalogQuery::new("", CategoryFilter::parse("Аудио")))
            .await
            .unwrap();
        assert_eq!(page.cards.len(), 2);
        assert_eq!(page.cards[1].in_cart, Some(1));
        assert_eq!(page.cards[0].in_cart, None);
        assert_eq!(page.categories, vec!["all", "Аудио", "Умные"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_added_indicator_expires() {
        let client = start();
        client.add_to_cart("1".to_string()).await.unwrap();
        assert!(client.product("1".to_string()).await.unwrap().recently_added);

        tokio::time::sleep(Duration::from_millis(1_500)).await;
        assert!(client.product("1".to_string()).await.unwrap().recently_added);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(!client.product("1".to_string()).await.unwrap().recently_added);
    }

    #[tokio::test(start_paused = true)]
    async fn test_re_adding_extends_added_indicator() {
        let client = start();
        client.add_to_cart("1".to_string()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        client.add_to_cart("1".to_string()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert!(client.product("1".to_string()).await.unwrap().recently_added);

        tokio::time::sleep(Duration::from_millis(1_100)).await;
        assert!(!client.product("1".to_string()).await.unwrap().recently_added);
    }

    #[tokio::test]
    async fn test_oversized_quantity_does_not_break_the_coordinator() {
        let client = start();
        client.add_to_cart("1".to_string()).await.unwrap();
        assert_eq!(
            client.update_quantity("1".to_string(), 99_999_999_999).await,
            Err(ShopError::QuantityOutOfRange(99_999_999_999))
        );

        let cart = client.add_to_cart("1".to_string()).await.unwrap();
        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.total, 2_000);
    }

    #[tokio::test]
    async fn test_remove_and_update_return_fresh_snapshot() {
        let client = start();
        client.add_to_cart("1".to_string()).await.unwrap();
        client.add_to_cart("2".to_string()).await.unwrap();

        let cart = client.update_quantity("1".to_string(), 3).await.unwrap();
        assert_eq!(cart.total, 3 * 1_000 + 500);

        let cart = client.remove_from_cart("2".to_string()).await.unwrap();
        assert_eq!(cart.total, 3_000);
        assert_eq!(cart.item_count, 3);

        let cart = client.update_quantity("1".to_string(), -1).await.unwrap();
        assert!(cart.is_empty());
    }
}
