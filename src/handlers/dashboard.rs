use crate::models::*;
use crate::services::StatsService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/dashboard/owner",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Revenue and subscriber counts", body = OwnerRevenue),
        (status = 403, description = "Not an owner")
    )
)]
pub async fn owner_dashboard(
    stats_service: web::Data<StatsService>,
    actor: Actor,
) -> Result<HttpResponse> {
    match stats_service.owner_revenue(&actor).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/dashboard/customer",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active subscriptions and days remaining", body = CustomerStats),
        (status = 403, description = "Not a customer")
    )
)]
pub async fn customer_dashboard(
    stats_service: web::Data<StatsService>,
    actor: Actor,
) -> Result<HttpResponse> {
    match stats_service.customer_stats(&actor).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(stats))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn dashboard_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .route("/owner", web::get().to(owner_dashboard))
            .route("/customer", web::get().to(customer_dashboard)),
    );
}
