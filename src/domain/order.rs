use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::cart::CartLine;

pub type OrderId = String;

pub const DEMO_NOTICE: &str =
    "Это демо-заказ. В реальной версии будет обработан платеж и отправлена доставка.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    #[default]
    Courier,
    Pickup,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
}

impl std::str::FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "courier" => Ok(Self::Courier),
            "pickup" => Ok(Self::Pickup),
            other => Err(format!("unknown delivery method: {other}")),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "cash" => Ok(Self::Cash),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Checkout form contents, validated before it becomes an [`Order`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub comment: String,
    pub delivery_method: DeliveryMethod,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    #[allow(dead_code)]
    Completed,
    #[allow(dead_code)]
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Failed => "failed",
        }
    }
}

/// A placed order. Immutable once stored in the order log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub contact: OrderDraft,
    pub items: Vec<CartLine>,
    pub total: u64,
    pub status: OrderStatus,
    pub notice: String,
    pub created_at: DateTime<Utc>,
}

/// Parameters for appending a new order to the log.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub contact: OrderDraft,
    pub items: Vec<CartLine>,
    pub total: u64,
}
