mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use apna_dabba::handlers;
use apna_dabba::middlewares::AuthMiddleware;
use apna_dabba::services::*;
use apna_dabba::utils::JwtService;
use common::TestEnv;
use serde_json::{Value, json};

macro_rules! app {
    ($env:expr) => {{
        let db = $env.db.clone();
        let clock = $env.shared_clock();
        let jwt = JwtService::new("test-secret", 3600, 7200);
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt.clone()))
                .app_data(web::Data::new(AuthService::new(db.clone(), jwt, clock.clone())))
                .app_data(web::Data::new(MenuService::new(db.clone(), clock.clone())))
                .app_data(web::Data::new(EnrollmentService::new(db.clone(), clock.clone())))
                .app_data(web::Data::new(TrackingService::new(db.clone(), clock.clone())))
                .app_data(web::Data::new(StatsService::new(db.clone(), clock.clone())))
                .app_data(web::Data::new(OrderService::new(db.clone(), clock.clone())))
                .app_data(web::Data::new(ReviewService::new(db.clone(), clock.clone())))
                .service(web::scope("/api/v1").configure(handlers::api_config)),
        )
        .await
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn test_subscription_flow_over_http() {
    let env = TestEnv::new().await;
    let app = app!(env);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/owner-register")
        .set_json(json!({"username": "meera", "email": "m@example.com", "password": "dabba-pass-1"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let owner_token = body["data"]["access_token"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["role"], "owner");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"username": "asha", "email": "a@example.com", "password": "dabba-pass-2"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let customer_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/menus")
        .insert_header(bearer(&owner_token))
        .set_json(json!({"title": "Veg Thali", "description": "Daily lunch", "monthly_price": "2400.00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let menu_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/menus/{menu_id}/plans"))
        .insert_header(bearer(&customer_token))
        .set_json(json!({"title": "Monthly", "duration_days": 30, "price": "500.00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/menus/{menu_id}/plans"))
        .insert_header(bearer(&owner_token))
        .set_json(json!({"title": "Monthly", "duration_days": 30, "price": "500.00"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let plan_id = body["data"]["id"].as_i64().unwrap();

    let subscribe = || {
        test::TestRequest::post()
            .uri(&format!("/api/v1/plans/{plan_id}/subscribe"))
            .insert_header(bearer(&customer_token))
            .set_json(json!({"card_number": "4111111111111111", "expiry": "12/30", "cvv": "123"}))
            .to_request()
    };
    let resp = test::call_service(&app, subscribe()).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let enrollment_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["days_remaining"], 30);

    let resp = test::call_service(&app, subscribe()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "DUPLICATE_ACTIVE_ENROLLMENT");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/enrollments/{enrollment_id}/tracking/2026-05-06/toggle"))
        .insert_header(bearer(&owner_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["entry"]["status"], "skipped");
    assert_eq!(body["data"]["extended"], true);

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard/customer")
        .insert_header(bearer(&customer_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["days_remaining"], 31);

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard/owner")
        .insert_header(bearer(&owner_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_revenue"], "500.00");
    assert_eq!(body["data"]["active_subscribers"], 1);
}

#[actix_web::test]
async fn test_protected_routes_need_a_token() {
    let env = TestEnv::new().await;
    let app = app!(env);

    let req = test::TestRequest::get().uri("/api/v1/menus").to_request();
    let resp = test::try_call_service(&app, req).await;
    let status = match resp {
        Ok(resp) => resp.status(),
        Err(e) => e.error_response().status(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/menus")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.status(),
        Err(e) => e.error_response().status(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_login_and_refresh() {
    let env = TestEnv::new().await;
    let app = app!(env);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"username": "ravi", "email": "r@example.com", "password": "dabba-pass-3"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({"username": "ravi", "email": "r2@example.com", "password": "dabba-pass-3"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"username": "ravi", "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"username": "ravi", "password": "dabba-pass-3"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let refresh_token = body["data"]["refresh_token"].as_str().unwrap().to_string();
    let access_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({"refresh_token": access_token}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({"refresh_token": refresh_token}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["user"]["role"], "customer");
}
