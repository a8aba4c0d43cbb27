//! # Mock Framework
//!
//! Utilities for driving code that talks to a [`ResourceClient`] without
//! spinning up a real `ResourceActor`.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_count`] to answer
//! each request by hand.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest};
use tokio::sync::{mpsc, oneshot};

/// Creates a mock client and a receiver for asserting requests.
///
/// The receiver stands in for the actor: the test inspects each request as
/// it arrives and decides the reply (success, rejection, or silence).
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Count request
pub async fn expect_count<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<usize, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::Count { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::OrderClient;
    use crate::domain::{CartLine, Order, OrderCreate, OrderDraft, Product};
    use crate::order_actor::OrderError;

    fn params() -> OrderCreate {
        OrderCreate {
            contact: OrderDraft::default(),
            items: vec![CartLine { product: Product::new("1", "Наушники", "Аудио", 500), quantity: 2 }],
            total: 1_000,
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Order>(10);

        let create_task = tokio::spawn(async move { client.create(params()).await });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.total, 1_000);
        let order = Order::from_create_params("DEMO-1".to_string(), payload).unwrap();
        responder.send(Ok(order.clone())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(order));
    }

    #[tokio::test]
    async fn test_framework_errors_reach_typed_client() {
        let (inner, mut receiver) = create_mock_client::<Order>(10);
        let client = OrderClient::new(inner);

        let count_task = tokio::spawn(async move { client.count_orders().await });
        let responder = expect_count(&mut receiver).await.expect("Expected Count request");
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();

        let result = count_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    }
}
