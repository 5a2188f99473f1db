use crate::entities::review_entity as reviews;
use crate::models::PaginatedResponse;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    #[schema(example = 5)]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    pub customer_id: i64,
    pub tiffin_service_id: i64,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<reviews::Model> for ReviewResponse {
    fn from(m: reviews::Model) -> Self {
        Self {
            id: m.id,
            customer_id: m.customer_id,
            tiffin_service_id: m.tiffin_service_id,
            rating: m.rating,
            comment: m.comment,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewListResponse {
    /// Mean rating over all reviews of the service, two decimal places
    #[schema(value_type = Option<String>)]
    pub average_rating: Option<Decimal>,
    #[schema(value_type = Object)]
    pub reviews: PaginatedResponse<ReviewResponse>,
}
