use crate::entities::{enrollment_entity as enrollments, plan_entity as plans};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::menu_service::{ensure_menu_owner, owner_menu_ids};
use crate::utils::SharedClock;
use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};

/// End date used when an enrollment is created without one.
pub fn default_end_date(start: DateTime<Utc>, duration_days: i32) -> DateTime<Utc> {
    start + Duration::days(i64::from(duration_days))
}

/// Deactivates every active enrollment whose end date is before `now`.
/// Returns the number of rows flipped; a second call at the same instant
/// flips nothing.
pub async fn sweep_expired<C>(db: &C, now: DateTime<Utc>) -> AppResult<u64>
where
    C: ConnectionTrait,
{
    let res = enrollments::Entity::update_many()
        .col_expr(enrollments::Column::Active, Expr::value(false))
        .filter(enrollments::Column::Active.eq(true))
        .filter(enrollments::Column::EndDate.lt(now))
        .exec(db)
        .await?;

    if res.rows_affected > 0 {
        log::info!("Expired enrollments deactivated: {}", res.rows_affected);
    }
    Ok(res.rows_affected)
}

/// Pushes the end date `days` forward and persists it immediately.
pub async fn extend_by_days<C>(
    db: &C,
    enrollment: enrollments::Model,
    days: i64,
) -> AppResult<enrollments::Model>
where
    C: ConnectionTrait,
{
    if days < 1 {
        return Err(AppError::ValidationError(
            "Extension must be at least one day".to_string(),
        ));
    }
    let id = enrollment.id;
    let new_end = enrollment.end_date + Duration::days(days);
    let mut am = enrollment.into_active_model();
    am.end_date = Set(new_end);
    let updated = am.update(db).await?;
    log::info!("Enrollment {id} extended by {days} day(s) to {new_end}");
    Ok(updated)
}

/// Creates a paid, active enrollment on `plan` for `customer_id`. Lapsed
/// enrollments are swept first so they never block a new one.
pub async fn create_enrollment<C>(
    db: &C,
    customer_id: i64,
    plan: &plans::Model,
    now: DateTime<Utc>,
) -> AppResult<enrollments::Model>
where
    C: ConnectionTrait,
{
    sweep_expired(db, now).await?;

    let existing = enrollments::Entity::find()
        .filter(enrollments::Column::CustomerId.eq(customer_id))
        .filter(enrollments::Column::MenuId.eq(plan.menu_id))
        .filter(enrollments::Column::Active.eq(true))
        .one(db)
        .await?;
    if existing.is_some() {
        log::warn!(
            "Customer {customer_id} already has an active enrollment on menu {}",
            plan.menu_id
        );
        return Err(AppError::DuplicateActiveEnrollment);
    }

    let created = enrollments::ActiveModel {
        customer_id: Set(customer_id),
        plan_id: Set(plan.id),
        menu_id: Set(plan.menu_id),
        start_date: Set(now),
        end_date: Set(default_end_date(now, plan.duration_days)),
        active: Set(true),
        payment_status: Set(PAYMENT_STATUS_PAID.to_string()),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(AppError::from_enrollment_write)?;

    log::info!(
        "Enrollment {} created: customer {customer_id}, plan {}, ends {}",
        created.id,
        plan.id,
        created.end_date
    );
    Ok(created)
}

#[derive(Clone)]
pub struct EnrollmentService {
    pool: DatabaseConnection,
    clock: SharedClock,
}

impl EnrollmentService {
    pub fn new(pool: DatabaseConnection, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    pub async fn sweep_expired(&self) -> AppResult<u64> {
        sweep_expired(&self.pool, self.clock.now()).await
    }

    pub async fn create_enrollment(
        &self,
        customer_id: i64,
        plan_id: i64,
    ) -> AppResult<enrollments::Model> {
        let plan = plans::Entity::find_by_id(plan_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Subscription plan not found".to_string()))?;
        create_enrollment(&self.pool, customer_id, &plan, self.clock.now()).await
    }

    /// Simulated checkout: any non-empty card details count as a successful
    /// payment, after which the enrollment is created.
    pub async fn subscribe(
        &self,
        actor: &Actor,
        plan_id: i64,
        req: SubscribeRequest,
    ) -> AppResult<EnrollmentResponse> {
        let customer_id = actor.require_customer()?;

        if req.card_number.trim().is_empty()
            || req.expiry.trim().is_empty()
            || req.cvv.trim().is_empty()
        {
            return Err(AppError::ValidationError(
                "Card number, expiry and CVV are required".to_string(),
            ));
        }

        let plan = plans::Entity::find_by_id(plan_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Subscription plan not found".to_string()))?;
        if !plan.active {
            return Err(AppError::ValidationError(
                "Subscription plan is not available".to_string(),
            ));
        }

        let now = self.clock.now();
        let created = create_enrollment(&self.pool, customer_id, &plan, now).await?;
        Ok(EnrollmentResponse::new(created, Some(&plan), now))
    }

    pub async fn days_remaining(&self, enrollment_id: i64) -> AppResult<i64> {
        let now = self.clock.now();
        sweep_expired(&self.pool, now).await?;
        let enrollment = self.find(enrollment_id).await?;
        Ok(enrollment.days_remaining(now.date_naive()))
    }

    pub async fn get_enrollment(
        &self,
        actor: &Actor,
        enrollment_id: i64,
    ) -> AppResult<EnrollmentResponse> {
        let now = self.clock.now();
        sweep_expired(&self.pool, now).await?;

        let (enrollment, plan) = enrollments::Entity::find_by_id(enrollment_id)
            .find_also_related(plans::Entity)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;
        ensure_can_view(&self.pool, actor, &enrollment).await?;

        Ok(EnrollmentResponse::new(enrollment, plan.as_ref(), now))
    }

    /// Customers see all of their own enrollments, newest first; owners see
    /// the active enrollments on their menus.
    pub async fn list_enrollments(&self, actor: &Actor) -> AppResult<Vec<EnrollmentResponse>> {
        let now = self.clock.now();
        sweep_expired(&self.pool, now).await?;

        let query = if actor.is_owner() {
            let menu_ids = owner_menu_ids(&self.pool, actor.user_id).await?;
            if menu_ids.is_empty() {
                return Ok(Vec::new());
            }
            enrollments::Entity::find()
                .filter(enrollments::Column::MenuId.is_in(menu_ids))
                .filter(enrollments::Column::Active.eq(true))
        } else {
            enrollments::Entity::find()
                .filter(enrollments::Column::CustomerId.eq(actor.user_id))
        };

        let rows = query
            .order_by_desc(enrollments::Column::CreatedAt)
            .order_by_desc(enrollments::Column::Id)
            .find_also_related(plans::Entity)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(e, p)| EnrollmentResponse::new(e, p.as_ref(), now))
            .collect())
    }

    async fn find(&self, enrollment_id: i64) -> AppResult<enrollments::Model> {
        enrollments::Entity::find_by_id(enrollment_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))
    }
}

/// Customers may read their own enrollments, owners those on their menus.
pub(crate) async fn ensure_can_view<C>(
    db: &C,
    actor: &Actor,
    enrollment: &enrollments::Model,
) -> AppResult<()>
where
    C: ConnectionTrait,
{
    if actor.is_owner() {
        ensure_menu_owner(db, enrollment.menu_id, actor.user_id).await?;
        return Ok(());
    }
    if enrollment.customer_id != actor.user_id {
        return Err(AppError::Unauthorized(
            "Enrollment belongs to another customer".to_string(),
        ));
    }
    Ok(())
}
