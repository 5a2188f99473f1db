use crate::models::EnrollmentResponse;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OwnerRevenue {
    #[schema(value_type = String, example = "1250.00")]
    pub total_revenue: Decimal,
    #[schema(value_type = String, example = "750.00")]
    pub monthly_revenue: Decimal,
    pub active_subscribers: u64,
    pub total_menus: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerStats {
    /// Newest first
    pub active_enrollments: Vec<EnrollmentResponse>,
    pub total_enrollments: u64,
    pub primary_enrollment: Option<EnrollmentResponse>,
    pub days_remaining: i64,
}
