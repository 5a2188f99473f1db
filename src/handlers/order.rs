use crate::models::*;
use crate::services::OrderService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    params(PaginationParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Customers get their own orders, owners the orders on their menus"),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    actor: Actor,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match order_service.list_orders(&actor, &query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    request_body = PlaceOrderRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Missing address"),
        (status = 403, description = "Not a customer"),
        (status = 404, description = "No such menu")
    )
)]
pub async fn place_order(
    order_service: web::Data<OrderService>,
    actor: Actor,
    request: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse> {
    match order_service.place_order(&actor, request.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Created().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/orders/{id}/deliver",
    tag = "order",
    params(("id" = i64, Path, description = "Order id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order marked delivered", body = OrderResponse),
        (status = 403, description = "Order is not on one of the owner's menus"),
        (status = 404, description = "No such order")
    )
)]
pub async fn mark_delivered(
    order_service: web::Data<OrderService>,
    actor: Actor,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match order_service.mark_delivered(&actor, path.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(list_orders))
            .route("", web::post().to(place_order))
            .route("/{id}/deliver", web::put().to(mark_delivered)),
    );
}
