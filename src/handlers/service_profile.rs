use crate::models::*;
use crate::services::MenuService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/service-profile",
    tag = "service_profile",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The owner's service profile", body = ServiceProfileResponse),
        (status = 403, description = "Not an owner")
    )
)]
pub async fn get_profile(
    menu_service: web::Data<MenuService>,
    actor: Actor,
) -> Result<HttpResponse> {
    match menu_service.get_profile(&actor).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/service-profile",
    tag = "service_profile",
    request_body = UpdateServiceProfileRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = ServiceProfileResponse),
        (status = 400, description = "Invalid phone number or empty update"),
        (status = 403, description = "Not an owner")
    )
)]
pub async fn update_profile(
    menu_service: web::Data<MenuService>,
    actor: Actor,
    request: web::Json<UpdateServiceProfileRequest>,
) -> Result<HttpResponse> {
    match menu_service
        .update_profile(&actor, request.into_inner())
        .await
    {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            profile,
            "Profile updated",
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn service_profile_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/service-profile")
            .route(web::get().to(get_profile))
            .route(web::put().to(update_profile)),
    );
}
