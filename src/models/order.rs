use crate::entities::{OrderStatus, order_entity as orders};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub menu_id: i64,
    #[schema(example = "12 MG Road, Pune")]
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub customer_id: i64,
    pub menu_id: i64,
    pub address: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<orders::Model> for OrderResponse {
    fn from(m: orders::Model) -> Self {
        Self {
            id: m.id,
            customer_id: m.customer_id,
            menu_id: m.menu_id,
            address: m.address,
            status: m.status,
            created_at: m.created_at,
        }
    }
}
