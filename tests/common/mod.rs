//! Shared fixtures: an in-memory SQLite database built by the real
//! migrations, a fixed clock, and seed helpers.
#![allow(dead_code)]

use apna_dabba::entities::{
    Role, menu_entity as menus, plan_entity as plans, tiffin_service_entity as services,
    user_entity as users,
};
use apna_dabba::models::Actor;
use apna_dabba::utils::{FixedClock, SharedClock};
use chrono::{DateTime, TimeZone, Utc};
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use std::sync::Arc;

pub fn day0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap()
}

pub struct TestEnv {
    pub db: DatabaseConnection,
    pub clock: FixedClock,
}

impl TestEnv {
    pub async fn new() -> Self {
        Self::starting_at(day0()).await
    }

    pub async fn starting_at(now: DateTime<Utc>) -> Self {
        // one connection: every pooled connection to :memory: is its own database
        let mut opts = ConnectOptions::new("sqlite::memory:".to_string());
        opts.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);
        let db = Database::connect(opts).await.expect("connect sqlite");
        Migrator::up(&db, None).await.expect("run migrations");

        Self {
            db,
            clock: FixedClock::new(now),
        }
    }

    pub fn shared_clock(&self) -> SharedClock {
        Arc::new(self.clock.clone())
    }

    pub async fn user(&self, username: &str, role: Role) -> Actor {
        let user = users::ActiveModel {
            username: Set(username.to_string()),
            email: Set(format!("{username}@example.com")),
            password_hash: Set("not-a-real-hash".to_string()),
            role: Set(role),
            created_at: Set(self.clock_now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("insert user");
        Actor::new(user.id, role)
    }

    pub async fn owner(&self, username: &str) -> Actor {
        self.user(username, Role::Owner).await
    }

    pub async fn customer(&self, username: &str) -> Actor {
        self.user(username, Role::Customer).await
    }

    pub async fn service(&self, owner: &Actor) -> services::Model {
        services::ActiveModel {
            owner_id: Set(owner.user_id),
            name: Set("Annapurna Tiffins".to_string()),
            address: Set("Not Provided".to_string()),
            phone: Set(String::new()),
            is_verified: Set(false),
            created_at: Set(self.clock_now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("insert service")
    }

    pub async fn menu(&self, service: &services::Model, title: &str) -> menus::Model {
        let now = self.clock_now();
        menus::ActiveModel {
            tiffin_service_id: Set(service.id),
            title: Set(title.to_string()),
            description: Set("Home-style meals".to_string()),
            monthly_price: Set(Decimal::new(240000, 2)),
            image_path: Set(None),
            monday: Set("Dal, rice".to_string()),
            tuesday: Set("Rajma".to_string()),
            wednesday: Set("Chole".to_string()),
            thursday: Set("Kadhi".to_string()),
            friday: Set("Paneer".to_string()),
            saturday: Set("Biryani".to_string()),
            sunday: Set("Puri bhaji".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("insert menu")
    }

    pub async fn plan(&self, menu: &menus::Model, duration_days: i32, price: Decimal) -> plans::Model {
        plans::ActiveModel {
            menu_id: Set(menu.id),
            title: Set(format!("{duration_days} days")),
            duration_days: Set(duration_days),
            price: Set(price),
            description: Set(String::new()),
            active: Set(true),
            created_at: Set(self.clock_now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("insert plan")
    }

    /// Owner, service, one menu and a plan on it.
    pub async fn catalog(&self, duration_days: i32, price: Decimal) -> Catalog {
        let owner = self.owner("owner").await;
        let service = self.service(&owner).await;
        let menu = self.menu(&service, "Veg Thali").await;
        let plan = self.plan(&menu, duration_days, price).await;
        Catalog {
            owner,
            service,
            menu,
            plan,
        }
    }

    fn clock_now(&self) -> DateTime<Utc> {
        use apna_dabba::utils::Clock;
        self.clock.now()
    }
}

pub struct Catalog {
    pub owner: Actor,
    pub service: services::Model,
    pub menu: menus::Model,
    pub plan: plans::Model,
}
