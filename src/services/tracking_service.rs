use crate::entities::{MealStatus, enrollment_entity as enrollments, tracking_entity as tracking};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::enrollment_service::{ensure_can_view, extend_by_days};
use crate::services::menu_service::ensure_menu_owner;
use crate::utils::SharedClock;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// What a mark changed: the stored entry, the enrollment after any
/// extension, and whether the extension happened.
#[derive(Debug, Clone)]
pub struct MarkOutcome {
    pub entry: tracking::Model,
    pub enrollment: enrollments::Model,
    pub extended: bool,
}

impl From<MarkOutcome> for MarkDayResponse {
    fn from(o: MarkOutcome) -> Self {
        Self {
            entry: o.entry.into(),
            end_date: o.enrollment.end_date,
            extended: o.extended,
        }
    }
}

async fn find_entry<C>(db: &C, enrollment_id: i64, date: NaiveDate) -> AppResult<Option<tracking::Model>>
where
    C: ConnectionTrait,
{
    Ok(tracking::Entity::find()
        .filter(tracking::Column::EnrollmentId.eq(enrollment_id))
        .filter(tracking::Column::Date.eq(date))
        .one(db)
        .await?)
}

async fn set_status<C>(
    db: &C,
    entry: tracking::Model,
    status: MealStatus,
    now: DateTime<Utc>,
) -> AppResult<tracking::Model>
where
    C: ConnectionTrait,
{
    if entry.status == status {
        return Ok(entry);
    }
    let mut am = entry.into_active_model();
    am.status = Set(status);
    am.updated_at = Set(now);
    Ok(am.update(db).await?)
}

/// Upserts the (enrollment, date) entry. The end date grows by one day only
/// when the entry becomes skipped from a state that was not skipped; going
/// back to taken never shortens it.
///
/// The insert decides whether the entry is new: when it loses to an existing
/// row, the previous status is whatever that row holds, including a row a
/// concurrent mark committed after this call started.
pub async fn mark_day<C>(
    db: &C,
    enrollment: enrollments::Model,
    date: NaiveDate,
    status: MealStatus,
    now: DateTime<Utc>,
) -> AppResult<MarkOutcome>
where
    C: ConnectionTrait,
{
    let inserted = tracking::Entity::insert(tracking::ActiveModel {
        enrollment_id: Set(enrollment.id),
        date: Set(date),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    })
    .on_conflict(
        OnConflict::columns([tracking::Column::EnrollmentId, tracking::Column::Date])
            .do_nothing()
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    let stored = find_entry(db, enrollment.id, date)
        .await?
        .ok_or_else(|| AppError::InternalError("Tracking entry missing after insert".to_string()))?;

    let (entry, previous_status) = if inserted > 0 {
        (stored, None)
    } else {
        let previous = stored.status;
        (set_status(db, stored, status, now).await?, Some(previous))
    };

    let should_extend = status == MealStatus::Skipped && previous_status != Some(MealStatus::Skipped);
    let (enrollment, extended) = if should_extend {
        (extend_by_days(db, enrollment, 1).await?, true)
    } else {
        (enrollment, false)
    };

    log::info!(
        "Enrollment {} marked {} on {date} (was {})",
        enrollment.id,
        entry.status,
        previous_status.map_or("unmarked".to_string(), |s| s.to_string())
    );

    Ok(MarkOutcome {
        entry,
        enrollment,
        extended,
    })
}

/// Flips the entry for `date`; an unmarked day counts as taken, so the
/// first toggle records a skip.
pub async fn toggle_day<C>(
    db: &C,
    enrollment: enrollments::Model,
    date: NaiveDate,
    now: DateTime<Utc>,
) -> AppResult<MarkOutcome>
where
    C: ConnectionTrait,
{
    let current = find_entry(db, enrollment.id, date)
        .await?
        .map_or(MealStatus::Taken, |e| e.status);
    mark_day(db, enrollment, date, current.flipped(), now).await
}

#[derive(Clone)]
pub struct TrackingService {
    pool: DatabaseConnection,
    clock: SharedClock,
}

impl TrackingService {
    pub fn new(pool: DatabaseConnection, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    /// Owner-side marking for an enrollment on one of the owner's menus.
    pub async fn mark_day(
        &self,
        actor: &Actor,
        enrollment_id: i64,
        req: MarkDayRequest,
    ) -> AppResult<MarkDayResponse> {
        let owner_id = actor.require_owner()?;
        let now = self.clock.now();

        let txn = self.pool.begin().await?;
        let enrollment = Self::owned_enrollment(&txn, enrollment_id, owner_id).await?;
        let outcome = mark_day(&txn, enrollment, req.date, req.status, now).await?;
        txn.commit().await?;

        Ok(outcome.into())
    }

    pub async fn toggle_day(
        &self,
        actor: &Actor,
        enrollment_id: i64,
        date: NaiveDate,
    ) -> AppResult<MarkDayResponse> {
        let owner_id = actor.require_owner()?;
        let now = self.clock.now();

        let txn = self.pool.begin().await?;
        let enrollment = Self::owned_enrollment(&txn, enrollment_id, owner_id).await?;
        let outcome = toggle_day(&txn, enrollment, date, now).await?;
        txn.commit().await?;

        Ok(outcome.into())
    }

    /// Entries for an enrollment, oldest day first.
    pub async fn list_days(
        &self,
        actor: &Actor,
        enrollment_id: i64,
    ) -> AppResult<Vec<TrackingEntryResponse>> {
        let enrollment = enrollments::Entity::find_by_id(enrollment_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;
        ensure_can_view(&self.pool, actor, &enrollment).await?;

        let rows = tracking::Entity::find()
            .filter(tracking::Column::EnrollmentId.eq(enrollment.id))
            .order_by_asc(tracking::Column::Date)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(TrackingEntryResponse::from).collect())
    }

    async fn owned_enrollment<C>(
        db: &C,
        enrollment_id: i64,
        owner_id: i64,
    ) -> AppResult<enrollments::Model>
    where
        C: ConnectionTrait,
    {
        let enrollment = enrollments::Entity::find_by_id(enrollment_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;
        ensure_menu_owner(db, enrollment.menu_id, owner_id).await?;
        Ok(enrollment)
    }
}
