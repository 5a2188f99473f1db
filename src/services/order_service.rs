use crate::entities::{OrderStatus, menu_entity as menus, order_entity as orders};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::menu_service::{ensure_menu_owner, owner_menu_ids};
use crate::utils::SharedClock;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
    clock: SharedClock,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    pub async fn place_order(
        &self,
        actor: &Actor,
        req: PlaceOrderRequest,
    ) -> AppResult<OrderResponse> {
        let customer_id = actor.require_customer()?;
        let address = req.address.trim();
        if address.is_empty() {
            return Err(AppError::ValidationError(
                "Delivery address is required".to_string(),
            ));
        }

        menus::Entity::find_by_id(req.menu_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu not found".to_string()))?;

        let order = orders::ActiveModel {
            customer_id: Set(customer_id),
            menu_id: Set(req.menu_id),
            address: Set(address.to_string()),
            status: Set(OrderStatus::Pending),
            created_at: Set(self.clock.now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Order {} placed by customer {customer_id} on menu {}",
            order.id,
            order.menu_id
        );
        Ok(order.into())
    }

    /// Customers page through their own orders, owners through orders on
    /// their menus. Newest first.
    pub async fn list_orders(
        &self,
        actor: &Actor,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<OrderResponse>> {
        let base_query = if actor.is_owner() {
            let menu_ids = owner_menu_ids(&self.pool, actor.user_id).await?;
            if menu_ids.is_empty() {
                return Ok(PaginatedResponse::new(Vec::new(), params, 0));
            }
            orders::Entity::find().filter(orders::Column::MenuId.is_in(menu_ids))
        } else {
            orders::Entity::find().filter(orders::Column::CustomerId.eq(actor.user_id))
        };

        let total = base_query.clone().count(&self.pool).await?;
        let items = base_query
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .limit(params.page_size())
            .offset(params.offset())
            .all(&self.pool)
            .await?
            .into_iter()
            .map(OrderResponse::from)
            .collect();

        Ok(PaginatedResponse::new(items, params, total))
    }

    pub async fn mark_delivered(&self, actor: &Actor, order_id: i64) -> AppResult<OrderResponse> {
        let owner_id = actor.require_owner()?;
        let order = orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        ensure_menu_owner(&self.pool, order.menu_id, owner_id).await?;

        if order.status == OrderStatus::Delivered {
            return Ok(order.into());
        }
        let mut am = order.into_active_model();
        am.status = Set(OrderStatus::Delivered);
        let order = am.update(&self.pool).await?;

        log::info!("Order {order_id} delivered");
        Ok(order.into())
    }
}
