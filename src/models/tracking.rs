use crate::entities::{MealStatus, tracking_entity as tracking};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarkDayRequest {
    #[schema(value_type = String, example = "2026-05-06")]
    pub date: NaiveDate,
    pub status: MealStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrackingEntryResponse {
    pub id: i64,
    pub enrollment_id: i64,
    #[schema(value_type = String)]
    pub date: NaiveDate,
    pub status: MealStatus,
    pub updated_at: DateTime<Utc>,
}

impl From<tracking::Model> for TrackingEntryResponse {
    fn from(m: tracking::Model) -> Self {
        Self {
            id: m.id,
            enrollment_id: m.enrollment_id,
            date: m.date,
            status: m.status,
            updated_at: m.updated_at,
        }
    }
}

/// Result of marking a day: the entry after the write, plus the owning
/// enrollment's end date and whether this call extended it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarkDayResponse {
    pub entry: TrackingEntryResponse,
    pub end_date: DateTime<Utc>,
    pub extended: bool,
}
