mod common;

use apna_dabba::entities::{MealStatus, enrollment_entity as enrollments, tracking_entity as tracking};
use apna_dabba::error::AppError;
use apna_dabba::models::MarkDayRequest;
use apna_dabba::services::enrollment_service::create_enrollment;
use apna_dabba::services::tracking_service::{mark_day, toggle_day};
use apna_dabba::services::{EnrollmentService, TrackingService};
use chrono::{Duration, NaiveDate};
use common::{TestEnv, day0};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
}

async fn end_date_of(env: &TestEnv, id: i64) -> chrono::DateTime<chrono::Utc> {
    enrollments::Entity::find_by_id(id)
        .one(&env.db)
        .await
        .unwrap()
        .unwrap()
        .end_date
}

#[tokio::test]
async fn test_first_skip_extends_once() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let e = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();
    let original_end = e.end_date;

    let first = mark_day(&env.db, e.clone(), may(6), MealStatus::Skipped, day0())
        .await
        .unwrap();
    assert!(first.extended);
    assert_eq!(first.entry.status, MealStatus::Skipped);
    assert_eq!(end_date_of(&env, e.id).await, original_end + Duration::days(1));

    let current = first.enrollment;
    let again = mark_day(&env.db, current, may(6), MealStatus::Skipped, day0())
        .await
        .unwrap();
    assert!(!again.extended);
    assert_eq!(again.entry.id, first.entry.id);
    assert_eq!(end_date_of(&env, e.id).await, original_end + Duration::days(1));
}

async fn store_entry(env: &TestEnv, enrollment_id: i64, date: NaiveDate, status: MealStatus) {
    tracking::ActiveModel {
        enrollment_id: Set(enrollment_id),
        date: Set(date),
        status: Set(status),
        created_at: Set(day0()),
        updated_at: Set(day0()),
        ..Default::default()
    }
    .insert(&env.db)
    .await
    .unwrap();
}

#[tokio::test]
async fn test_skip_over_an_entry_already_skipped_elsewhere_does_not_extend() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let e = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();

    // another mark already stored the skip and its extension
    store_entry(&env, e.id, may(9), MealStatus::Skipped).await;

    let out = mark_day(&env.db, e.clone(), may(9), MealStatus::Skipped, day0())
        .await
        .unwrap();
    assert!(!out.extended);
    assert_eq!(out.entry.status, MealStatus::Skipped);
    assert_eq!(end_date_of(&env, e.id).await, e.end_date);
}

#[tokio::test]
async fn test_skip_over_an_entry_stored_as_taken_extends_once() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let e = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();

    store_entry(&env, e.id, may(9), MealStatus::Taken).await;

    let out = mark_day(&env.db, e.clone(), may(9), MealStatus::Skipped, day0())
        .await
        .unwrap();
    assert!(out.extended);
    assert_eq!(out.entry.status, MealStatus::Skipped);
    assert_eq!(end_date_of(&env, e.id).await, e.end_date + Duration::days(1));

    let rows = tracking::Entity::find().all(&env.db).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_marking_taken_never_extends() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let e = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();

    let out = mark_day(&env.db, e.clone(), may(2), MealStatus::Taken, day0())
        .await
        .unwrap();
    assert!(!out.extended);
    assert_eq!(end_date_of(&env, e.id).await, e.end_date);
}

#[tokio::test]
async fn test_double_toggle_restores_status() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let e = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();

    let taken = mark_day(&env.db, e, may(3), MealStatus::Taken, day0())
        .await
        .unwrap();
    let once = toggle_day(&env.db, taken.enrollment, may(3), day0())
        .await
        .unwrap();
    assert_eq!(once.entry.status, MealStatus::Skipped);
    let twice = toggle_day(&env.db, once.enrollment, may(3), day0())
        .await
        .unwrap();
    assert_eq!(twice.entry.status, MealStatus::Taken);
}

#[tokio::test]
async fn test_toggle_on_unmarked_day_records_a_skip() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let e = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();

    let out = toggle_day(&env.db, e.clone(), may(4), day0()).await.unwrap();
    assert_eq!(out.entry.status, MealStatus::Skipped);
    assert!(out.extended);
    assert_eq!(out.enrollment.end_date, e.end_date + Duration::days(1));
}

#[tokio::test]
async fn test_skip_take_skip_extends_twice() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let e = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();
    let original_end = e.end_date;

    let s1 = mark_day(&env.db, e.clone(), may(8), MealStatus::Skipped, day0())
        .await
        .unwrap();
    let t = mark_day(&env.db, s1.enrollment, may(8), MealStatus::Taken, day0())
        .await
        .unwrap();
    assert!(!t.extended);
    assert_eq!(t.enrollment.end_date, original_end + Duration::days(1));
    let s2 = mark_day(&env.db, t.enrollment, may(8), MealStatus::Skipped, day0())
        .await
        .unwrap();
    assert!(s2.extended);

    assert_eq!(end_date_of(&env, e.id).await, original_end + Duration::days(2));
}

#[tokio::test]
async fn test_thirty_day_plan_gains_a_day_after_a_skip() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let enrollment_svc = EnrollmentService::new(env.db.clone(), env.shared_clock());
    let tracking_svc = TrackingService::new(env.db.clone(), env.shared_clock());

    let e = enrollment_svc
        .create_enrollment(customer.user_id, cat.plan.id)
        .await
        .unwrap();
    assert_eq!(enrollment_svc.days_remaining(e.id).await.unwrap(), 30);

    let out = tracking_svc
        .mark_day(
            &cat.owner,
            e.id,
            MarkDayRequest {
                date: may(6),
                status: MealStatus::Skipped,
            },
        )
        .await
        .unwrap();
    assert!(out.extended);
    assert_eq!(enrollment_svc.days_remaining(e.id).await.unwrap(), 31);

    env.clock.advance(Duration::days(10));
    assert_eq!(enrollment_svc.days_remaining(e.id).await.unwrap(), 21);
}

#[tokio::test]
async fn test_only_the_menu_owner_marks_days() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let stranger = env.owner("stranger").await;
    let tracking_svc = TrackingService::new(env.db.clone(), env.shared_clock());
    let e = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();

    let req = || MarkDayRequest {
        date: may(2),
        status: MealStatus::Skipped,
    };
    assert!(matches!(
        tracking_svc.mark_day(&customer, e.id, req()).await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        tracking_svc.mark_day(&stranger, e.id, req()).await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        tracking_svc.toggle_day(&cat.owner, e.id + 50, may(2)).await,
        Err(AppError::NotFound(_))
    ));

    tracking_svc.mark_day(&cat.owner, e.id, req()).await.unwrap();
    tracking_svc
        .mark_day(
            &cat.owner,
            e.id,
            MarkDayRequest {
                date: may(1),
                status: MealStatus::Taken,
            },
        )
        .await
        .unwrap();

    let days = tracking_svc.list_days(&customer, e.id).await.unwrap();
    let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![may(1), may(2)]);
}
