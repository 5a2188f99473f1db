use crate::entities::{enrollment_entity as enrollments, plan_entity as plans};
use crate::error::AppResult;
use crate::models::*;
use crate::services::enrollment_service::sweep_expired;
use crate::services::menu_service::owner_menu_ids;
use crate::utils::SharedClock;
use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::collections::HashSet;

/// Midnight UTC on the first day of `now`'s month.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Sums plan prices in exact decimal arithmetic, two decimal places.
pub fn sum_prices<'a, I>(prices: I) -> Decimal
where
    I: IntoIterator<Item = &'a Decimal>,
{
    let mut total: Decimal = prices.into_iter().sum();
    total.rescale(2);
    total
}

#[derive(Clone)]
pub struct StatsService {
    pool: DatabaseConnection,
    clock: SharedClock,
}

impl StatsService {
    pub fn new(pool: DatabaseConnection, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    pub async fn owner_revenue(&self, actor: &Actor) -> AppResult<OwnerRevenue> {
        let owner_id = actor.require_owner()?;
        let now = self.clock.now();
        sweep_expired(&self.pool, now).await?;

        let menu_ids = owner_menu_ids(&self.pool, owner_id).await?;
        if menu_ids.is_empty() {
            return Ok(OwnerRevenue {
                total_revenue: sum_prices([]),
                monthly_revenue: sum_prices([]),
                active_subscribers: 0,
                total_menus: 0,
            });
        }

        let active = enrollments::Entity::find()
            .filter(enrollments::Column::MenuId.is_in(menu_ids.clone()))
            .filter(enrollments::Column::Active.eq(true))
            .find_also_related(plans::Entity)
            .all(&self.pool)
            .await?;

        let since = month_start(now);
        let mut all_prices = Vec::with_capacity(active.len());
        let mut month_prices = Vec::new();
        let mut customers = HashSet::new();
        for (enrollment, plan) in &active {
            customers.insert(enrollment.customer_id);
            let Some(plan) = plan else { continue };
            all_prices.push(plan.price);
            if enrollment.created_at >= since {
                month_prices.push(plan.price);
            }
        }

        let revenue = OwnerRevenue {
            total_revenue: sum_prices(&all_prices),
            monthly_revenue: sum_prices(&month_prices),
            active_subscribers: customers.len() as u64,
            total_menus: menu_ids.len() as u64,
        };
        log::debug!("Revenue for owner {owner_id}: {revenue:?}");
        Ok(revenue)
    }

    pub async fn customer_stats(&self, actor: &Actor) -> AppResult<CustomerStats> {
        let customer_id = actor.require_customer()?;
        let now = self.clock.now();
        sweep_expired(&self.pool, now).await?;

        let active: Vec<EnrollmentResponse> = enrollments::Entity::find()
            .filter(enrollments::Column::CustomerId.eq(customer_id))
            .filter(enrollments::Column::Active.eq(true))
            .order_by_desc(enrollments::Column::CreatedAt)
            .order_by_desc(enrollments::Column::Id)
            .find_also_related(plans::Entity)
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|(e, p)| EnrollmentResponse::new(e, p.as_ref(), now))
            .collect();

        let total_enrollments = enrollments::Entity::find()
            .filter(enrollments::Column::CustomerId.eq(customer_id))
            .count(&self.pool)
            .await?;

        let primary_enrollment = active.first().cloned();
        let days_remaining = primary_enrollment
            .as_ref()
            .map_or(0, |e| e.days_remaining);

        Ok(CustomerStats {
            active_enrollments: active,
            total_enrollments,
            primary_enrollment,
            days_remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_month_start() {
        let now = Utc.with_ymd_and_hms(2026, 5, 17, 13, 45, 0).unwrap();
        assert_eq!(
            month_start(now),
            Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_sum_prices_is_exact() {
        let prices = [dec!(500.00), dec!(750.00)];
        assert_eq!(sum_prices(&prices), dec!(1250.00));
        assert_eq!(sum_prices(&prices).to_string(), "1250.00");

        let cents = [dec!(0.10); 3];
        assert_eq!(sum_prices(&cents), dec!(0.30));
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        assert_eq!(sum_prices([]).to_string(), "0.00");
    }
}
