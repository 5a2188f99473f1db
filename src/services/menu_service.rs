use crate::entities::{
    daily_menu_entity as daily_menus, enrollment_entity as enrollments, menu_entity as menus,
    plan_entity as plans, tiffin_service_entity as services, user_entity as users,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{SharedClock, normalize_phone, validate_service_phone};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::{HashMap, HashSet};

const DEFAULT_ADDRESS: &str = "Not Provided";

/// Loads a menu and checks that its service profile belongs to `owner_id`.
pub(crate) async fn ensure_menu_owner<C>(
    db: &C,
    menu_id: i64,
    owner_id: i64,
) -> AppResult<menus::Model>
where
    C: ConnectionTrait,
{
    let (menu, service) = menus::Entity::find_by_id(menu_id)
        .find_also_related(services::Entity)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Menu not found".to_string()))?;

    match service {
        Some(s) if s.owner_id == owner_id => Ok(menu),
        _ => Err(AppError::Unauthorized(
            "Menu belongs to another owner".to_string(),
        )),
    }
}

/// Ids of every menu published under the owner's service profile.
pub(crate) async fn owner_menu_ids<C>(db: &C, owner_id: i64) -> AppResult<Vec<i64>>
where
    C: ConnectionTrait,
{
    let Some(service) = services::Entity::find()
        .filter(services::Column::OwnerId.eq(owner_id))
        .one(db)
        .await?
    else {
        return Ok(Vec::new());
    };

    Ok(menus::Entity::find()
        .filter(menus::Column::TiffinServiceId.eq(service.id))
        .select_only()
        .column(menus::Column::Id)
        .into_tuple::<i64>()
        .all(db)
        .await?)
}

fn require_text(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::ValidationError(format!("{field} is required")));
    }
    Ok(())
}

fn require_non_negative(value: Decimal, field: &str) -> AppResult<()> {
    if value.is_sign_negative() {
        return Err(AppError::ValidationError(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct MenuService {
    pool: DatabaseConnection,
    clock: SharedClock,
}

impl MenuService {
    pub fn new(pool: DatabaseConnection, clock: SharedClock) -> Self {
        Self { pool, clock }
    }

    /// The owner's service profile, created with defaults on first use.
    pub async fn get_or_create_profile(&self, owner_id: i64) -> AppResult<services::Model> {
        if let Some(existing) = services::Entity::find()
            .filter(services::Column::OwnerId.eq(owner_id))
            .one(&self.pool)
            .await?
        {
            return Ok(existing);
        }

        let owner = users::Entity::find_by_id(owner_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let inserted = services::ActiveModel {
            owner_id: Set(owner_id),
            name: Set(owner.username),
            address: Set(DEFAULT_ADDRESS.to_string()),
            phone: Set(String::new()),
            is_verified: Set(false),
            created_at: Set(self.clock.now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await;

        match inserted {
            Ok(profile) => {
                log::info!("Service profile {} created for owner {owner_id}", profile.id);
                Ok(profile)
            }
            // lost a race with a concurrent first request
            Err(e) if AppError::is_unique_violation(&e) => services::Entity::find()
                .filter(services::Column::OwnerId.eq(owner_id))
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Service profile not found".to_string())),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_profile(&self, actor: &Actor) -> AppResult<ServiceProfileResponse> {
        let owner_id = actor.require_owner()?;
        Ok(self.get_or_create_profile(owner_id).await?.into())
    }

    pub async fn update_profile(
        &self,
        actor: &Actor,
        req: UpdateServiceProfileRequest,
    ) -> AppResult<ServiceProfileResponse> {
        let owner_id = actor.require_owner()?;

        if req.name.is_none() && req.address.is_none() && req.phone.is_none() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }

        let mut am = self.get_or_create_profile(owner_id).await?.into_active_model();
        if let Some(name) = req.name {
            require_text(&name, "Name")?;
            am.name = Set(name.trim().to_string());
        }
        if let Some(address) = req.address {
            require_text(&address, "Address")?;
            am.address = Set(address.trim().to_string());
        }
        if let Some(phone) = req.phone {
            let phone = normalize_phone(&phone);
            validate_service_phone(&phone)?;
            am.phone = Set(phone);
        }
        Ok(am.update(&self.pool).await?.into())
    }

    pub async fn create_menu(
        &self,
        actor: &Actor,
        req: CreateMenuRequest,
    ) -> AppResult<MenuResponse> {
        let owner_id = actor.require_owner()?;
        require_text(&req.title, "Title")?;
        require_non_negative(req.monthly_price, "Monthly price")?;

        let service = self.get_or_create_profile(owner_id).await?;
        let now = self.clock.now();
        let week = req.week;
        let menu = menus::ActiveModel {
            tiffin_service_id: Set(service.id),
            title: Set(req.title.trim().to_string()),
            description: Set(req.description),
            monthly_price: Set(req.monthly_price),
            image_path: Set(req.image_path),
            monday: Set(week.monday),
            tuesday: Set(week.tuesday),
            wednesday: Set(week.wednesday),
            thursday: Set(week.thursday),
            friday: Set(week.friday),
            saturday: Set(week.saturday),
            sunday: Set(week.sunday),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Menu {} created by owner {owner_id}", menu.id);
        Ok(MenuResponse::new(menu, Vec::new()))
    }

    pub async fn update_menu(
        &self,
        actor: &Actor,
        menu_id: i64,
        req: UpdateMenuRequest,
    ) -> AppResult<MenuResponse> {
        let owner_id = actor.require_owner()?;
        let menu = ensure_menu_owner(&self.pool, menu_id, owner_id).await?;

        let mut am = menu.into_active_model();
        if let Some(title) = req.title {
            require_text(&title, "Title")?;
            am.title = Set(title.trim().to_string());
        }
        if let Some(description) = req.description {
            am.description = Set(description);
        }
        if let Some(price) = req.monthly_price {
            require_non_negative(price, "Monthly price")?;
            am.monthly_price = Set(price);
        }
        if let Some(image_path) = req.image_path {
            am.image_path = Set(Some(image_path));
        }
        if let Some(week) = req.week {
            am.monday = Set(week.monday);
            am.tuesday = Set(week.tuesday);
            am.wednesday = Set(week.wednesday);
            am.thursday = Set(week.thursday);
            am.friday = Set(week.friday);
            am.saturday = Set(week.saturday);
            am.sunday = Set(week.sunday);
        }
        am.updated_at = Set(self.clock.now());
        let menu = am.update(&self.pool).await?;

        let plans = self.plans_for(&[menu.id], None).await?.remove(&menu.id);
        Ok(MenuResponse::new(menu, plans.unwrap_or_default()))
    }

    /// Removes the menu; plans, daily menus, enrollments and their tracking
    /// rows go with it through the foreign-key cascade.
    pub async fn delete_menu(&self, actor: &Actor, menu_id: i64) -> AppResult<()> {
        let owner_id = actor.require_owner()?;
        let menu = ensure_menu_owner(&self.pool, menu_id, owner_id).await?;
        menu.delete(&self.pool).await?;
        log::info!("Menu {menu_id} deleted by owner {owner_id}");
        Ok(())
    }

    pub async fn get_menu(&self, actor: &Actor, menu_id: i64) -> AppResult<MenuResponse> {
        let menu = if actor.is_owner() {
            ensure_menu_owner(&self.pool, menu_id, actor.user_id).await?
        } else {
            menus::Entity::find_by_id(menu_id)
                .one(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Menu not found".to_string()))?
        };

        let customer = (!actor.is_owner()).then_some(actor.user_id);
        let plans = self.plans_for(&[menu.id], customer).await?.remove(&menu.id);
        Ok(MenuResponse::new(menu, plans.unwrap_or_default()))
    }

    /// Owners list their own menus, customers every menu. `q` filters on
    /// title, ignoring case.
    pub async fn list_menus(&self, actor: &Actor, query: MenuQuery) -> AppResult<Vec<MenuResponse>> {
        let mut select = menus::Entity::find();
        if actor.is_owner() {
            let ids = owner_menu_ids(&self.pool, actor.user_id).await?;
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            select = select.filter(menus::Column::Id.is_in(ids));
        }
        if let Some(q) = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(menus::Column::Title)))
                    .like(format!("%{}%", q.to_lowercase())),
            );
        }

        let menus = select
            .order_by_desc(menus::Column::CreatedAt)
            .order_by_desc(menus::Column::Id)
            .all(&self.pool)
            .await?;
        let ids: Vec<i64> = menus.iter().map(|m| m.id).collect();
        let customer = (!actor.is_owner()).then_some(actor.user_id);
        let mut plans = self.plans_for(&ids, customer).await?;

        Ok(menus
            .into_iter()
            .map(|m| {
                let p = plans.remove(&m.id).unwrap_or_default();
                MenuResponse::new(m, p)
            })
            .collect())
    }

    pub async fn create_plan(
        &self,
        actor: &Actor,
        menu_id: i64,
        req: CreatePlanRequest,
    ) -> AppResult<PlanResponse> {
        let owner_id = actor.require_owner()?;
        let menu = ensure_menu_owner(&self.pool, menu_id, owner_id).await?;

        require_text(&req.title, "Title")?;
        if req.duration_days < 1 {
            return Err(AppError::ValidationError(
                "Duration must be at least one day".to_string(),
            ));
        }
        require_non_negative(req.price, "Price")?;

        let plan = plans::ActiveModel {
            menu_id: Set(menu.id),
            title: Set(req.title.trim().to_string()),
            duration_days: Set(req.duration_days),
            price: Set(req.price),
            description: Set(req.description),
            active: Set(true),
            created_at: Set(self.clock.now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Plan {} ({} days, {}) added to menu {}",
            plan.id,
            plan.duration_days,
            plan.price,
            menu.id
        );
        Ok(plan.into())
    }

    pub async fn list_plans(&self, actor: &Actor, menu_id: i64) -> AppResult<Vec<PlanResponse>> {
        menus::Entity::find_by_id(menu_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu not found".to_string()))?;

        let customer = (!actor.is_owner()).then_some(actor.user_id);
        Ok(self
            .plans_for(&[menu_id], customer)
            .await?
            .remove(&menu_id)
            .unwrap_or_default())
    }

    pub async fn create_daily_menu(
        &self,
        actor: &Actor,
        menu_id: i64,
        req: CreateDailyMenuRequest,
    ) -> AppResult<DailyMenuResponse> {
        let owner_id = actor.require_owner()?;
        let menu = ensure_menu_owner(&self.pool, menu_id, owner_id).await?;
        require_text(&req.food_description, "Food description")?;

        let daily = daily_menus::ActiveModel {
            menu_id: Set(menu.id),
            day: Set(req.day),
            food_description: Set(req.food_description),
            image_path: Set(req.image_path),
            created_at: Set(self.clock.now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(daily.into())
    }

    pub async fn list_daily_menus(&self, menu_id: i64) -> AppResult<Vec<DailyMenuResponse>> {
        menus::Entity::find_by_id(menu_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu not found".to_string()))?;

        let rows = daily_menus::Entity::find()
            .filter(daily_menus::Column::MenuId.eq(menu_id))
            .order_by_asc(daily_menus::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(DailyMenuResponse::from).collect())
    }

    /// Plans grouped by menu. With a customer id, each plan carries whether
    /// that customer is actively enrolled on it.
    async fn plans_for(
        &self,
        menu_ids: &[i64],
        customer_id: Option<i64>,
    ) -> AppResult<HashMap<i64, Vec<PlanResponse>>> {
        let mut grouped: HashMap<i64, Vec<PlanResponse>> = HashMap::new();
        if menu_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = plans::Entity::find()
            .filter(plans::Column::MenuId.is_in(menu_ids.to_vec()))
            .order_by_asc(plans::Column::Id)
            .all(&self.pool)
            .await?;

        let subscribed: HashSet<i64> = match customer_id {
            Some(customer_id) => enrollments::Entity::find()
                .filter(enrollments::Column::CustomerId.eq(customer_id))
                .filter(enrollments::Column::Active.eq(true))
                .select_only()
                .column(enrollments::Column::PlanId)
                .into_tuple::<i64>()
                .all(&self.pool)
                .await?
                .into_iter()
                .collect(),
            None => HashSet::new(),
        };

        for plan in rows {
            let menu_id = plan.menu_id;
            let mut resp = PlanResponse::from(plan);
            if customer_id.is_some() {
                resp.is_subscribed = Some(subscribed.contains(&resp.id));
            }
            grouped.entry(menu_id).or_default().push(resp);
        }
        Ok(grouped)
    }
}
