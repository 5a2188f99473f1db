use crate::entities::tiffin_service_entity as services;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceProfileResponse {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<services::Model> for ServiceProfileResponse {
    fn from(m: services::Model) -> Self {
        Self {
            id: m.id,
            owner_id: m.owner_id,
            name: m.name,
            address: m.address,
            phone: m.phone,
            is_verified: m.is_verified,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateServiceProfileRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    #[schema(example = "+919876543210")]
    pub phone: Option<String>,
}
