use crate::entities::{review_entity as reviews, tiffin_service_entity as services};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::SharedClock;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// Mean of the ratings to two decimal places, `None` when there are none.
pub fn average_rating(ratings: &[i32]) -> Option<Decimal> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(*r)).sum();
    let mean = Decimal::from(sum) / Decimal::from(ratings.len() as u64);
    let mut mean = mean.round_dp(2);
    mean.rescale(2);
    Some(mean)
}

#[derive(Clone)]
pub struct ReviewService {
    pool: DatabaseConnection,
    clock: SharedClock,
}

impl ReviewService {
    pub fn new(pool: DatabaseConnection, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    pub async fn create_review(
        &self,
        actor: &Actor,
        service_id: i64,
        req: CreateReviewRequest,
    ) -> AppResult<ReviewResponse> {
        let customer_id = actor.require_customer()?;
        if !(MIN_RATING..=MAX_RATING).contains(&req.rating) {
            return Err(AppError::ValidationError(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        self.ensure_service(service_id).await?;

        let review = reviews::ActiveModel {
            customer_id: Set(customer_id),
            tiffin_service_id: Set(service_id),
            rating: Set(req.rating),
            comment: Set(req.comment.trim().to_string()),
            created_at: Set(self.clock.now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Review {} ({} stars) left on service {service_id}",
            review.id,
            review.rating
        );
        Ok(review.into())
    }

    pub async fn list_reviews(
        &self,
        service_id: i64,
        params: &PaginationParams,
    ) -> AppResult<ReviewListResponse> {
        self.ensure_service(service_id).await?;

        let base_query =
            reviews::Entity::find().filter(reviews::Column::TiffinServiceId.eq(service_id));

        let ratings: Vec<i32> = base_query
            .clone()
            .select_only()
            .column(reviews::Column::Rating)
            .into_tuple()
            .all(&self.pool)
            .await?;
        let total = base_query.clone().count(&self.pool).await?;

        let items = base_query
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .limit(params.page_size())
            .offset(params.offset())
            .all(&self.pool)
            .await?
            .into_iter()
            .map(ReviewResponse::from)
            .collect();

        Ok(ReviewListResponse {
            average_rating: average_rating(&ratings),
            reviews: PaginatedResponse::new(items, params, total),
        })
    }

    async fn ensure_service(&self, service_id: i64) -> AppResult<()> {
        services::Entity::find_by_id(service_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Tiffin service not found".to_string()))?;
        Ok(())
    }
}
