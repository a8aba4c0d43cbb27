use chrono::Utc;
use crate::actor_framework::{Entity, FrameworkError};
use crate::domain::{Order, OrderCreate, OrderStatus, DEMO_NOTICE};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;

    fn id(&self) -> &String {
        &self.id
    }

    /// Creates a new Order from creation parameters.
    ///
    /// Every order placed through the demo starts as `Processing` and carries
    /// the demo notice.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, FrameworkError> {
        Ok(Self {
            id,
            contact: params.contact,
            items: params.items,
            total: params.total,
            status: OrderStatus::Processing,
            notice: DEMO_NOTICE.to_string(),
            created_at: Utc::now(),
        })
    }

    /// Refuses orders whose snapshot is empty or whose total disagrees with it.
    fn on_create(&mut self) -> Result<(), FrameworkError> {
        if self.items.is_empty() {
            return Err(FrameworkError::Rejected("order has no items".to_string()));
        }
        let computed: u64 = self.items.iter().map(|line| line.line_total()).sum();
        if computed != self.total {
            return Err(FrameworkError::Rejected(format!(
                "order total {} does not match items total {}",
                self.total, computed
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartLine, OrderDraft, Product};

    fn params(total: u64) -> OrderCreate {
        OrderCreate {
            contact: OrderDraft::default(),
            items: vec![CartLine {
                product: Product::new("p1", "Мышь", "Периферия", 1_000),
                quantity: 3,
            }],
            total,
        }
    }

    #[test]
    fn new_orders_are_processing() {
        let mut order = Order::from_create_params("DEMO-1".to_string(), params(3_000)).unwrap();
        assert!(order.on_create().is_ok());
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.status.as_str(), "processing");
        assert_eq!(order.notice, DEMO_NOTICE);
    }

    #[test]
    fn mismatched_total_is_rejected() {
        let mut order = Order::from_create_params("DEMO-1".to_string(), params(10)).unwrap();
        assert!(matches!(order.on_create(), Err(FrameworkError::Rejected(_))));
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        let mut order = Order::from_create_params(
            "DEMO-1".to_string(),
            OrderCreate { contact: OrderDraft::default(), items: vec![], total: 0 },
        )
        .unwrap();
        assert!(order.on_create().is_err());
    }
}
