//! Enrollment views and the lifecycle rules derived from the two stored
//! facts of an enrollment: its `active` flag and its `end_date`.

use crate::entities::{enrollment_entity as enrollments, plan_entity as plans};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Enrollments with at most this many days left are "expiring soon".
pub const EXPIRING_SOON_DAYS: i64 = 7;

pub const PAYMENT_STATUS_PAID: &str = "Paid";

/// Presentation label of an enrollment. Never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentState {
    Active,
    ExpiringSoon,
    ExpiringToday,
    Expired,
}

/// Whole calendar days between `today` and the end date; 0 when inactive
/// or already past. A 30-day plan started today reports 30.
pub fn days_remaining(active: bool, end_date: DateTime<Utc>, today: NaiveDate) -> i64 {
    if !active {
        return 0;
    }
    (end_date.date_naive() - today).num_days().max(0)
}

impl EnrollmentState {
    pub fn derive(active: bool, end_date: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if !active || now > end_date {
            return EnrollmentState::Expired;
        }
        match days_remaining(active, end_date, now.date_naive()) {
            0 => EnrollmentState::ExpiringToday,
            d if d <= EXPIRING_SOON_DAYS => EnrollmentState::ExpiringSoon,
            _ => EnrollmentState::Active,
        }
    }
}

impl enrollments::Model {
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        days_remaining(self.active, self.end_date, today)
    }

    pub fn state(&self, now: DateTime<Utc>) -> EnrollmentState {
        EnrollmentState::derive(self.active, self.end_date, now)
    }
}

/// Simulated card details; only presence is checked.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    #[schema(example = "4111111111111111")]
    pub card_number: String,
    #[schema(example = "12/29")]
    pub expiry: String,
    #[schema(example = "123")]
    pub cvv: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: i64,
    pub customer_id: i64,
    pub plan_id: i64,
    pub menu_id: i64,
    pub plan_title: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub active: bool,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub days_remaining: i64,
    pub state: EnrollmentState,
}

impl EnrollmentResponse {
    pub fn new(m: enrollments::Model, plan: Option<&plans::Model>, now: DateTime<Utc>) -> Self {
        Self {
            days_remaining: m.days_remaining(now.date_naive()),
            state: m.state(now),
            id: m.id,
            customer_id: m.customer_id,
            plan_id: m.plan_id,
            menu_id: m.menu_id,
            plan_title: plan.map(|p| p.title.clone()),
            price: plan.map(|p| p.price),
            start_date: m.start_date,
            end_date: m.end_date,
            active: m.active,
            payment_status: m.payment_status,
            created_at: m.created_at,
        }
    }
}
