#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use crate::actor_framework::{Entity, FrameworkError};
    use crate::actors::ShopService;
    use crate::app_system::ShopSystem;
    use crate::catalog::{Catalog, CatalogQuery, CategoryFilter};
    use crate::clients::{OrderClient, ShopClient};
    use crate::config::ShopConfig;
    use crate::domain::{Order, OrderDraft, OrderStatus, Product, DEMO_NOTICE};
    use crate::error::ShopError;
    use crate::mock_framework::{create_mock_client, expect_count, expect_create, expect_list};
    use crate::order_actor::{Field, OrderError};
    use crate::shop::View;

    fn valid_draft() -> OrderDraft {
        OrderDraft {
            name: "Иванов Иван Иванович".to_string(),
            phone: "+7 (999) 123-45-67".to_string(),
            email: "ivan@example.com".to_string(),
            address: "г. Москва, ул. Ленина, д. 1, кв. 1".to_string(),
            ..OrderDraft::default()
        }
    }

    fn mocked_shop() -> (ShopClient, tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<Order>>) {
        let catalog = Catalog::from_products(vec![
            Product::new("1", "Наушники", "Аудио", 2_000),
            Product::new("2", "Колонка", "Аудио", 500),
        ])
        .unwrap();
        let (inner, order_rx) = create_mock_client::<Order>(10);
        let (service, client) =
            ShopService::new(10, Arc::new(catalog), OrderClient::new(inner), Duration::from_millis(2_000));
        tokio::spawn(service.run());
        (client, order_rx)
    }

    #[tokio::test]
    async fn test_order_placement_flow() {
        // 1. Setup mocks
        let (shop, mut order_rx) = mocked_shop();
        shop.add_to_cart("1".to_string()).await.unwrap();
        shop.add_to_cart("2".to_string()).await.unwrap();
        shop.update_quantity("2".to_string(), 2).await.unwrap();

        // 2. Execute placement in background
        let task_shop = shop.clone();
        let order_task = tokio::spawn(async move { task_shop.place_order(valid_draft()).await });

        // 3. Verify the order log receives the cart snapshot
        let (payload, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(payload.total, 3_000);
        assert_eq!(payload.items.len(), 2);
        assert_eq!(payload.items[1].quantity, 2);
        assert_eq!(payload.contact.name, "Иванов Иван Иванович");
        let order = Order::from_create_params("DEMO-1".to_string(), payload).unwrap();
        responder.send(Ok(order.clone())).unwrap();

        // 4. Verify result and the reset state
        let result = order_task.await.unwrap();
        assert_eq!(result, Ok(order));
        assert!(shop.cart().await.unwrap().is_empty());

        let header_shop = shop.clone();
        let header_task = tokio::spawn(async move { header_shop.header().await });
        let responder = expect_count(&mut order_rx).await.expect("Expected Order Count");
        responder.send(Ok(1)).unwrap();
        let header = header_task.await.unwrap().unwrap();
        assert_eq!(header.view, View::Orders);
        assert_eq!(header.cart_items, 0);
        assert_eq!(header.order_count, 1);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_order_log() {
        let (shop, mut order_rx) = mocked_shop();
        shop.add_to_cart("1".to_string()).await.unwrap();

        let draft = OrderDraft { phone: "звоните".to_string(), ..valid_draft() };
        let result = shop.place_order(draft).await;
        match result {
            Err(ShopError::Order(OrderError::Validation(errors))) => {
                assert_eq!(errors.len(), 1);
                assert!(errors.get(Field::Phone).is_some());
            }
            other => panic!("Unexpected result: {:?}", other),
        }
        assert!(order_rx.try_recv().is_err());
        assert_eq!(shop.cart().await.unwrap().item_count, 1);
    }

    #[tokio::test]
    async fn test_rejected_order_keeps_cart() {
        let (shop, mut order_rx) = mocked_shop();
        shop.add_to_cart("2".to_string()).await.unwrap();

        let task_shop = shop.clone();
        let order_task = tokio::spawn(async move { task_shop.place_order(valid_draft()).await });
        let (_, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        responder.send(Err(FrameworkError::Rejected("log is full".to_string()))).unwrap();

        let result = order_task.await.unwrap();
        assert_eq!(
            result,
            Err(ShopError::Order(OrderError::Rejected("log is full".to_string())))
        );
        assert_eq!(shop.cart().await.unwrap().total, 500);
    }

    #[tokio::test]
    async fn test_orders_come_from_the_log() {
        let (shop, mut order_rx) = mocked_shop();
        let list_task = tokio::spawn(async move { shop.orders().await });
        let responder = expect_list(&mut order_rx).await.expect("Expected Order List");
        responder.send(Ok(vec![])).unwrap();
        assert_eq!(list_task.await.unwrap(), Ok(vec![]));
    }

    // -------------------------------------------------------------------------
    // Full system, embedded catalog
    // -------------------------------------------------------------------------

    fn system() -> ShopSystem {
        ShopSystem::new(&ShopConfig::default(), Catalog::from_fixture().unwrap())
    }

    #[tokio::test]
    async fn test_valid_order_clears_cart_and_is_logged() {
        let system = system();
        let shop = &system.shop_client;
        shop.add_to_cart("1".to_string()).await.unwrap();
        shop.add_to_cart("1".to_string()).await.unwrap();
        shop.add_to_cart("7".to_string()).await.unwrap();
        assert_eq!(shop.navigate(View::Checkout).await, Ok(View::Checkout));

        let order = shop.place_order(valid_draft()).await.unwrap();
        assert!(order.id.starts_with("DEMO-"));
        assert_eq!(order.total, 2 * 29_990 + 3_990);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.notice, DEMO_NOTICE);

        assert!(shop.cart().await.unwrap().is_empty());
        let orders = shop.orders().await.unwrap();
        assert_eq!(orders, vec![order.clone()]);
        assert_eq!(system.order_client.get_order(order.id.clone()).await, Ok(Some(order)));

        let header = shop.header().await.unwrap();
        assert_eq!(header.view, View::Orders);
        assert_eq!(header.order_count, 1);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_name_and_bad_email_place_nothing() {
        let system = system();
        let shop = &system.shop_client;
        shop.add_to_cart("3".to_string()).await.unwrap();

        let draft = OrderDraft {
            name: String::new(),
            email: "ivan@".to_string(),
            ..valid_draft()
        };
        let Err(ShopError::Order(OrderError::Validation(errors))) = shop.place_order(draft).await else {
            panic!("Expected validation errors");
        };
        assert_eq!(errors.len(), 2);
        assert!(errors.get(Field::Name).is_some());
        assert!(errors.get(Field::Email).is_some());

        assert!(shop.orders().await.unwrap().is_empty());
        assert_eq!(shop.cart().await.unwrap().item_count, 1);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_checkout_and_submit_need_items() {
        let system = system();
        let shop = &system.shop_client;
        assert_eq!(shop.navigate(View::Checkout).await, Err(ShopError::EmptyCart));
        assert_eq!(shop.place_order(valid_draft()).await, Err(ShopError::EmptyCart));
        assert_eq!(system.order_client.count_orders().await, Ok(0));
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_search_and_category_filters() {
        let system = system();
        let shop = &system.shop_client;

        let page = shop
            .catalog(CatalogQuery::new("НАУШНИКИ", CategoryFilter::All))
            .await
            .unwrap();
        let ids: Vec<_> = page.cards.iter().map(|c| c.product.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "11"]);

        let page = shop
            .catalog(CatalogQuery::new("наушники", CategoryFilter::parse("Аудиотехника")))
            .await
            .unwrap();
        assert_eq!(page.cards.len(), 2);

        let page = shop
            .catalog(CatalogQuery::new("телевизор", CategoryFilter::All))
            .await
            .unwrap();
        assert!(page.is_empty());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_orders_accumulate_with_increasing_ids() {
        let system = system();
        let shop = &system.shop_client;
        let mut ids = Vec::new();
        for product_id in ["5", "9"] {
            shop.add_to_cart(product_id.to_string()).await.unwrap();
            ids.push(shop.place_order(valid_draft()).await.unwrap().id);
        }
        let logged: Vec<_> = shop.orders().await.unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(logged, ids);
        let millis: Vec<i64> = ids
            .iter()
            .map(|id| id.trim_start_matches("DEMO-").parse().unwrap())
            .collect();
        assert!(millis[0] < millis[1]);
        system.shutdown().await.unwrap();
    }
}
