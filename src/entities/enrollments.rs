use crate::error::DUPLICATE_ACTIVE_ENROLLMENT;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, QuerySelect, Value};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub customer_id: i64,
    pub plan_id: i64,
    pub menu_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub active: bool,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscription_plans::Entity",
        from = "Column::PlanId",
        to = "super::subscription_plans::Column::Id",
        on_delete = "Cascade"
    )]
    Plan,
    #[sea_orm(has_many = "super::daily_tracking::Entity")]
    DailyTracking,
}

impl Related<super::subscription_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl Related<super::daily_tracking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyTracking.def()
    }
}

fn current<T: Into<Value> + Clone>(v: &ActiveValue<T>) -> Option<T> {
    match v {
        ActiveValue::Set(x) | ActiveValue::Unchanged(x) => Some(x.clone()),
        ActiveValue::NotSet => None,
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Any write that sets `active = true` must not produce a second active
    /// row for the same (customer, menu). The partial unique index enforces
    /// the same rule at commit time.
    async fn before_save<C>(self, db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !matches!(self.active, ActiveValue::Set(true)) {
            return Ok(self);
        }
        let (Some(customer_id), Some(menu_id)) =
            (current(&self.customer_id), current(&self.menu_id))
        else {
            return Ok(self);
        };

        let mut query = Entity::find()
            .filter(Column::CustomerId.eq(customer_id))
            .filter(Column::MenuId.eq(menu_id))
            .filter(Column::Active.eq(true));
        if let Some(id) = current(&self.id) {
            query = query.filter(Column::Id.ne(id));
        }
        let clash = query
            .select_only()
            .column(Column::Id)
            .into_tuple::<i64>()
            .one(db)
            .await?;

        if clash.is_some() {
            return Err(DbErr::Custom(DUPLICATE_ACTIVE_ENROLLMENT.to_string()));
        }
        Ok(self)
    }
}
