use crate::models::*;
use crate::services::EnrollmentService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/plans/{id}/subscribe",
    tag = "enrollment",
    params(("id" = i64, Path, description = "Subscription plan id")),
    request_body = SubscribeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Payment accepted, enrollment created", body = EnrollmentResponse),
        (status = 400, description = "Missing card details or inactive plan"),
        (status = 403, description = "Not a customer"),
        (status = 404, description = "No such plan"),
        (status = 409, description = "Already subscribed to this menu")
    )
)]
pub async fn subscribe(
    enrollment_service: web::Data<EnrollmentService>,
    actor: Actor,
    path: web::Path<i64>,
    request: web::Json<SubscribeRequest>,
) -> Result<HttpResponse> {
    match enrollment_service
        .subscribe(&actor, path.into_inner(), request.into_inner())
        .await
    {
        Ok(enrollment) => Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
            enrollment,
            "Payment successful, subscription active",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/enrollments",
    tag = "enrollment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Customers get their own enrollments, owners the active ones on their menus", body = [EnrollmentResponse])
    )
)]
pub async fn list_enrollments(
    enrollment_service: web::Data<EnrollmentService>,
    actor: Actor,
) -> Result<HttpResponse> {
    match enrollment_service.list_enrollments(&actor).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/enrollments/{id}",
    tag = "enrollment",
    params(("id" = i64, Path, description = "Enrollment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Enrollment with derived state", body = EnrollmentResponse),
        (status = 403, description = "Not visible to this user"),
        (status = 404, description = "No such enrollment")
    )
)]
pub async fn get_enrollment(
    enrollment_service: web::Data<EnrollmentService>,
    actor: Actor,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match enrollment_service
        .get_enrollment(&actor, path.into_inner())
        .await
    {
        Ok(enrollment) => Ok(HttpResponse::Ok().json(ApiResponse::success(enrollment))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn enrollment_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/plans/{id}/subscribe", web::post().to(subscribe))
        .route("/enrollments", web::get().to(list_enrollments))
        .route("/enrollments/{id}", web::get().to(get_enrollment));
}
