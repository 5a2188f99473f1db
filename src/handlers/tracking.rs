use crate::models::*;
use crate::services::TrackingService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use chrono::NaiveDate;

#[utoipa::path(
    get,
    path = "/enrollments/{id}/tracking",
    tag = "tracking",
    params(("id" = i64, Path, description = "Enrollment id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tracked days, oldest first", body = [TrackingEntryResponse]),
        (status = 403, description = "Not visible to this user"),
        (status = 404, description = "No such enrollment")
    )
)]
pub async fn list_days(
    tracking_service: web::Data<TrackingService>,
    actor: Actor,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match tracking_service.list_days(&actor, path.into_inner()).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/enrollments/{id}/tracking",
    tag = "tracking",
    params(("id" = i64, Path, description = "Enrollment id")),
    request_body = MarkDayRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Day recorded; a new skip extends the enrollment by one day", body = MarkDayResponse),
        (status = 403, description = "Not the owner of the enrollment's menu"),
        (status = 404, description = "No such enrollment")
    )
)]
pub async fn mark_day(
    tracking_service: web::Data<TrackingService>,
    actor: Actor,
    path: web::Path<i64>,
    request: web::Json<MarkDayRequest>,
) -> Result<HttpResponse> {
    match tracking_service
        .mark_day(&actor, path.into_inner(), request.into_inner())
        .await
    {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(outcome))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/enrollments/{id}/tracking/{date}/toggle",
    tag = "tracking",
    params(
        ("id" = i64, Path, description = "Enrollment id"),
        ("date" = String, Path, description = "Day as YYYY-MM-DD")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Day flipped between taken and skipped", body = MarkDayResponse),
        (status = 403, description = "Not the owner of the enrollment's menu"),
        (status = 404, description = "No such enrollment")
    )
)]
pub async fn toggle_day(
    tracking_service: web::Data<TrackingService>,
    actor: Actor,
    path: web::Path<(i64, NaiveDate)>,
) -> Result<HttpResponse> {
    let (enrollment_id, date) = path.into_inner();
    match tracking_service
        .toggle_day(&actor, enrollment_id, date)
        .await
    {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ApiResponse::success(outcome))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn tracking_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/enrollments/{id}/tracking", web::get().to(list_days))
        .route("/enrollments/{id}/tracking", web::post().to(mark_day))
        .route(
            "/enrollments/{id}/tracking/{date}/toggle",
            web::post().to(toggle_day),
        );
}
