use crate::entities::{Weekday, daily_menu_entity as daily_menus, menu_entity as menus, plan_entity as plans};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Meal descriptions for each day of the week.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct WeeklyMeals {
    #[serde(default)]
    pub monday: String,
    #[serde(default)]
    pub tuesday: String,
    #[serde(default)]
    pub wednesday: String,
    #[serde(default)]
    pub thursday: String,
    #[serde(default)]
    pub friday: String,
    #[serde(default)]
    pub saturday: String,
    #[serde(default)]
    pub sunday: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMenuRequest {
    #[schema(example = "North Indian Thali")]
    pub title: String,
    pub description: String,
    #[schema(value_type = String, example = "2400.00")]
    pub monthly_price: Decimal,
    pub image_path: Option<String>,
    #[serde(default)]
    pub week: WeeklyMeals,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMenuRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub monthly_price: Option<Decimal>,
    pub image_path: Option<String>,
    pub week: Option<WeeklyMeals>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct MenuQuery {
    /// Case-insensitive title filter
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlanResponse {
    pub id: i64,
    pub menu_id: i64,
    pub title: String,
    pub duration_days: i32,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub description: String,
    pub active: bool,
    /// Whether the requesting customer holds an active enrollment on this plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_subscribed: Option<bool>,
}

impl From<plans::Model> for PlanResponse {
    fn from(m: plans::Model) -> Self {
        Self {
            id: m.id,
            menu_id: m.menu_id,
            title: m.title,
            duration_days: m.duration_days,
            price: m.price,
            description: m.description,
            active: m.active,
            is_subscribed: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuResponse {
    pub id: i64,
    pub tiffin_service_id: i64,
    pub title: String,
    pub description: String,
    #[schema(value_type = String)]
    pub monthly_price: Decimal,
    pub image_path: Option<String>,
    pub week: WeeklyMeals,
    pub plans: Vec<PlanResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuResponse {
    pub fn new(m: menus::Model, plans: Vec<PlanResponse>) -> Self {
        Self {
            id: m.id,
            tiffin_service_id: m.tiffin_service_id,
            title: m.title,
            description: m.description,
            monthly_price: m.monthly_price,
            image_path: m.image_path,
            week: WeeklyMeals {
                monday: m.monday,
                tuesday: m.tuesday,
                wednesday: m.wednesday,
                thursday: m.thursday,
                friday: m.friday,
                saturday: m.saturday,
                sunday: m.sunday,
            },
            plans,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatePlanRequest {
    #[schema(example = "Monthly")]
    pub title: String,
    #[schema(example = 30)]
    pub duration_days: i32,
    #[schema(value_type = String, example = "2400.00")]
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDailyMenuRequest {
    pub day: Weekday,
    pub food_description: String,
    pub image_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DailyMenuResponse {
    pub id: i64,
    pub menu_id: i64,
    pub day: Weekday,
    pub food_description: String,
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<daily_menus::Model> for DailyMenuResponse {
    fn from(m: daily_menus::Model) -> Self {
        Self {
            id: m.id,
            menu_id: m.menu_id,
            day: m.day,
            food_description: m.food_description,
            image_path: m.image_path,
            created_at: m.created_at,
        }
    }
}
