mod common;

use apna_dabba::entities::enrollment_entity as enrollments;
use apna_dabba::error::AppError;
use apna_dabba::models::{EnrollmentState, SubscribeRequest};
use apna_dabba::services::EnrollmentService;
use apna_dabba::services::enrollment_service::{create_enrollment, sweep_expired};
use apna_dabba::utils::Clock;
use chrono::Duration;
use common::{TestEnv, day0};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};

fn card() -> SubscribeRequest {
    SubscribeRequest {
        card_number: "4111111111111111".into(),
        expiry: "12/30".into(),
        cvv: "123".into(),
    }
}

#[tokio::test]
async fn test_create_enrollment_uses_plan_duration() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;

    let e = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();

    assert!(e.active);
    assert_eq!(e.payment_status, "Paid");
    assert_eq!(e.menu_id, cat.menu.id);
    assert_eq!(e.end_date, day0() + Duration::days(30));
}

#[tokio::test]
async fn test_second_active_enrollment_on_same_menu_rejected() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;

    create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();
    let second = create_enrollment(&env.db, customer.user_id, &cat.plan, day0()).await;
    assert!(matches!(second, Err(AppError::DuplicateActiveEnrollment)));

    // a different plan on the same menu is still the same menu
    let weekly = env.plan(&cat.menu, 7, dec!(150.00)).await;
    let third = create_enrollment(&env.db, customer.user_id, &weekly, day0()).await;
    assert!(matches!(third, Err(AppError::DuplicateActiveEnrollment)));
}

#[tokio::test]
async fn test_racing_creates_leave_one_active_row() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;

    let (a, b) = tokio::join!(
        create_enrollment(&env.db, customer.user_id, &cat.plan, day0()),
        create_enrollment(&env.db, customer.user_id, &cat.plan, day0()),
    );

    let ok = [a.is_ok(), b.is_ok()].iter().filter(|x| **x).count();
    assert_eq!(ok, 1);
    assert!(
        matches!(a, Err(AppError::DuplicateActiveEnrollment))
            || matches!(b, Err(AppError::DuplicateActiveEnrollment))
    );

    let active = enrollments::Entity::find()
        .filter(enrollments::Column::CustomerId.eq(customer.user_id))
        .filter(enrollments::Column::Active.eq(true))
        .all(&env.db)
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn test_reactivating_over_an_active_row_is_rejected() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;

    let old = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();
    let mut am = old.clone().into_active_model();
    am.active = Set(false);
    am.update(&env.db).await.unwrap();

    create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();

    let mut am = old.into_active_model();
    am.active = Set(true);
    let err = am
        .update(&env.db)
        .await
        .map_err(AppError::from_enrollment_write)
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateActiveEnrollment));
}

#[tokio::test]
async fn test_sweep_leaves_no_active_enrollment_in_the_past() {
    let env = TestEnv::new().await;
    let owner = env.owner("owner").await;
    let service = env.service(&owner).await;
    let customer = env.customer("asha").await;

    for (i, days) in [1, 3, 10, 30].into_iter().enumerate() {
        let menu = env.menu(&service, &format!("Menu {i}")).await;
        let plan = env.plan(&menu, days, dec!(100.00)).await;
        create_enrollment(&env.db, customer.user_id, &plan, day0())
            .await
            .unwrap();
    }

    let now = day0() + Duration::days(5);
    let flipped = sweep_expired(&env.db, now).await.unwrap();
    assert_eq!(flipped, 2);

    let active = enrollments::Entity::find()
        .filter(enrollments::Column::Active.eq(true))
        .all(&env.db)
        .await
        .unwrap();
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|e| e.end_date >= now));
}

#[tokio::test]
async fn test_sweep_of_yesterday_ended_enrollment_is_idempotent() {
    let env = TestEnv::new().await;
    let cat = env.catalog(1, dec!(100.00)).await;
    let customer = env.customer("asha").await;

    let e = create_enrollment(&env.db, customer.user_id, &cat.plan, day0())
        .await
        .unwrap();

    let now = e.end_date + Duration::days(1);
    assert_eq!(sweep_expired(&env.db, now).await.unwrap(), 1);
    assert_eq!(sweep_expired(&env.db, now).await.unwrap(), 0);

    let stored = enrollments::Entity::find_by_id(e.id)
        .one(&env.db)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.active);
}

#[tokio::test]
async fn test_days_remaining_counts_down_and_floors_at_zero() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let svc = EnrollmentService::new(env.db.clone(), env.shared_clock());

    let e = svc.create_enrollment(customer.user_id, cat.plan.id).await.unwrap();
    assert_eq!(svc.days_remaining(e.id).await.unwrap(), 30);

    let mut last = i64::MAX;
    for _ in 0..35 {
        let d = svc.days_remaining(e.id).await.unwrap();
        assert!(d >= 0);
        assert!(d <= last);
        last = d;
        env.clock.advance(Duration::days(1));
    }
    assert_eq!(last, 0);
}

#[tokio::test]
async fn test_lapsed_enrollment_does_not_block_create() {
    let env = TestEnv::new().await;
    let cat = env.catalog(7, dec!(150.00)).await;
    let customer = env.customer("asha").await;
    let svc = EnrollmentService::new(env.db.clone(), env.shared_clock());

    let first = svc.create_enrollment(customer.user_id, cat.plan.id).await.unwrap();
    env.clock.advance(Duration::days(8));

    let second = svc.create_enrollment(customer.user_id, cat.plan.id).await.unwrap();
    assert!(second.active);
    assert_eq!(second.end_date, env.clock.now() + Duration::days(7));

    let lapsed = enrollments::Entity::find_by_id(first.id)
        .one(&env.db)
        .await
        .unwrap()
        .unwrap();
    assert!(!lapsed.active);
}

#[tokio::test]
async fn test_subscribe_requires_card_details() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let customer = env.customer("asha").await;
    let svc = EnrollmentService::new(env.db.clone(), env.shared_clock());

    let mut req = card();
    req.cvv = "  ".into();
    let res = svc.subscribe(&customer, cat.plan.id, req).await;
    assert!(matches!(res, Err(AppError::ValidationError(_))));

    let res = svc.subscribe(&cat.owner, cat.plan.id, card()).await;
    assert!(matches!(res, Err(AppError::Unauthorized(_))));

    let res = svc.subscribe(&customer, cat.plan.id + 100, card()).await;
    assert!(matches!(res, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_subscribe_after_expiry_is_allowed() {
    let env = TestEnv::new().await;
    let cat = env.catalog(7, dec!(150.00)).await;
    let customer = env.customer("asha").await;
    let svc = EnrollmentService::new(env.db.clone(), env.shared_clock());

    let first = svc.subscribe(&customer, cat.plan.id, card()).await.unwrap();
    assert_eq!(first.state, EnrollmentState::ExpiringSoon);
    assert!(matches!(
        svc.subscribe(&customer, cat.plan.id, card()).await,
        Err(AppError::DuplicateActiveEnrollment)
    ));

    env.clock.advance(Duration::days(8));
    let second = svc.subscribe(&customer, cat.plan.id, card()).await.unwrap();
    assert!(second.active);
    assert_ne!(second.id, first.id);
    assert_eq!(second.start_date, env.clock.now());
}

#[tokio::test]
async fn test_enrollment_visibility() {
    let env = TestEnv::new().await;
    let cat = env.catalog(30, dec!(500.00)).await;
    let asha = env.customer("asha").await;
    let ravi = env.customer("ravi").await;
    let other_owner = env.owner("other").await;
    let svc = EnrollmentService::new(env.db.clone(), env.shared_clock());

    let e = svc.subscribe(&asha, cat.plan.id, card()).await.unwrap();

    assert!(svc.get_enrollment(&asha, e.id).await.is_ok());
    assert!(svc.get_enrollment(&cat.owner, e.id).await.is_ok());
    assert!(matches!(
        svc.get_enrollment(&ravi, e.id).await,
        Err(AppError::Unauthorized(_))
    ));
    assert!(matches!(
        svc.get_enrollment(&other_owner, e.id).await,
        Err(AppError::Unauthorized(_))
    ));

    let owner_view = svc.list_enrollments(&cat.owner).await.unwrap();
    assert_eq!(owner_view.len(), 1);
    assert_eq!(owner_view[0].plan_title.as_deref(), Some("30 days"));
    assert!(svc.list_enrollments(&ravi).await.unwrap().is_empty());
    assert!(svc.list_enrollments(&other_owner).await.unwrap().is_empty());
}
