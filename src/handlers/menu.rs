use crate::models::*;
use crate::services::MenuService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/menus",
    tag = "menu",
    params(MenuQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Owners get their own menus, customers every menu", body = [MenuResponse])
    )
)]
pub async fn list_menus(
    menu_service: web::Data<MenuService>,
    actor: Actor,
    query: web::Query<MenuQuery>,
) -> Result<HttpResponse> {
    match menu_service.list_menus(&actor, query.into_inner()).await {
        Ok(menus) => Ok(HttpResponse::Ok().json(ApiResponse::success(menus))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/menus",
    tag = "menu",
    request_body = CreateMenuRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Menu created", body = MenuResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not an owner")
    )
)]
pub async fn create_menu(
    menu_service: web::Data<MenuService>,
    actor: Actor,
    request: web::Json<CreateMenuRequest>,
) -> Result<HttpResponse> {
    match menu_service.create_menu(&actor, request.into_inner()).await {
        Ok(menu) => Ok(HttpResponse::Created().json(ApiResponse::success(menu))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/menus/{id}",
    tag = "menu",
    params(("id" = i64, Path, description = "Menu id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Menu with its plans", body = MenuResponse),
        (status = 403, description = "Another owner's menu"),
        (status = 404, description = "No such menu")
    )
)]
pub async fn get_menu(
    menu_service: web::Data<MenuService>,
    actor: Actor,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match menu_service.get_menu(&actor, path.into_inner()).await {
        Ok(menu) => Ok(HttpResponse::Ok().json(ApiResponse::success(menu))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/menus/{id}",
    tag = "menu",
    params(("id" = i64, Path, description = "Menu id")),
    request_body = UpdateMenuRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Menu updated", body = MenuResponse),
        (status = 403, description = "Another owner's menu"),
        (status = 404, description = "No such menu")
    )
)]
pub async fn update_menu(
    menu_service: web::Data<MenuService>,
    actor: Actor,
    path: web::Path<i64>,
    request: web::Json<UpdateMenuRequest>,
) -> Result<HttpResponse> {
    match menu_service
        .update_menu(&actor, path.into_inner(), request.into_inner())
        .await
    {
        Ok(menu) => Ok(HttpResponse::Ok().json(ApiResponse::success(menu))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/menus/{id}",
    tag = "menu",
    params(("id" = i64, Path, description = "Menu id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Menu deleted"),
        (status = 403, description = "Another owner's menu"),
        (status = 404, description = "No such menu")
    )
)]
pub async fn delete_menu(
    menu_service: web::Data<MenuService>,
    actor: Actor,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match menu_service.delete_menu(&actor, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/menus/{id}/plans",
    tag = "menu",
    params(("id" = i64, Path, description = "Menu id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Subscription plans of the menu", body = [PlanResponse]),
        (status = 404, description = "No such menu")
    )
)]
pub async fn list_plans(
    menu_service: web::Data<MenuService>,
    actor: Actor,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match menu_service.list_plans(&actor, path.into_inner()).await {
        Ok(plans) => Ok(HttpResponse::Ok().json(ApiResponse::success(plans))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/menus/{id}/plans",
    tag = "menu",
    params(("id" = i64, Path, description = "Menu id")),
    request_body = CreatePlanRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Plan created", body = PlanResponse),
        (status = 400, description = "Invalid duration or price"),
        (status = 403, description = "Another owner's menu")
    )
)]
pub async fn create_plan(
    menu_service: web::Data<MenuService>,
    actor: Actor,
    path: web::Path<i64>,
    request: web::Json<CreatePlanRequest>,
) -> Result<HttpResponse> {
    match menu_service
        .create_plan(&actor, path.into_inner(), request.into_inner())
        .await
    {
        Ok(plan) => Ok(HttpResponse::Created().json(ApiResponse::success(plan))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/menus/{id}/daily-menus",
    tag = "menu",
    params(("id" = i64, Path, description = "Menu id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Daily menu entries", body = [DailyMenuResponse]),
        (status = 404, description = "No such menu")
    )
)]
pub async fn list_daily_menus(
    menu_service: web::Data<MenuService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match menu_service.list_daily_menus(path.into_inner()).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(items))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/menus/{id}/daily-menus",
    tag = "menu",
    params(("id" = i64, Path, description = "Menu id")),
    request_body = CreateDailyMenuRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Daily menu entry created", body = DailyMenuResponse),
        (status = 403, description = "Another owner's menu")
    )
)]
pub async fn create_daily_menu(
    menu_service: web::Data<MenuService>,
    actor: Actor,
    path: web::Path<i64>,
    request: web::Json<CreateDailyMenuRequest>,
) -> Result<HttpResponse> {
    match menu_service
        .create_daily_menu(&actor, path.into_inner(), request.into_inner())
        .await
    {
        Ok(item) => Ok(HttpResponse::Created().json(ApiResponse::success(item))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn menu_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/menus")
            .route("", web::get().to(list_menus))
            .route("", web::post().to(create_menu))
            .route("/{id}", web::get().to(get_menu))
            .route("/{id}", web::put().to(update_menu))
            .route("/{id}", web::delete().to(delete_menu))
            .route("/{id}/plans", web::get().to(list_plans))
            .route("/{id}/plans", web::post().to(create_plan))
            .route("/{id}/daily-menus", web::get().to(list_daily_menus))
            .route("/{id}/daily-menus", web::post().to(create_daily_menu)),
    );
}
