use crate::actor_framework::ResourceClient;
use crate::domain::Order;
use crate::order_actor::OrderError;

/// Client for the append-only order log.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_resource_client!(OrderClient, Order, OrderError, order);
