use crate::models::*;
use crate::services::ReviewService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/services/{id}/reviews",
    tag = "review",
    params(
        ("id" = i64, Path, description = "Tiffin service id"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Reviews newest first, with the average rating", body = ReviewListResponse),
        (status = 404, description = "No such service")
    )
)]
pub async fn list_reviews(
    review_service: web::Data<ReviewService>,
    path: web::Path<i64>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    match review_service.list_reviews(path.into_inner(), &query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/services/{id}/reviews",
    tag = "review",
    params(("id" = i64, Path, description = "Tiffin service id")),
    request_body = CreateReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Review saved", body = ReviewResponse),
        (status = 400, description = "Rating out of range"),
        (status = 403, description = "Not a customer"),
        (status = 404, description = "No such service")
    )
)]
pub async fn create_review(
    review_service: web::Data<ReviewService>,
    actor: Actor,
    path: web::Path<i64>,
    request: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse> {
    match review_service
        .create_review(&actor, path.into_inner(), request.into_inner())
        .await
    {
        Ok(review) => Ok(HttpResponse::Created().json(ApiResponse::success(review))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn review_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/services/{id}/reviews")
            .route(web::get().to(list_reviews))
            .route(web::post().to(create_review)),
    );
}
