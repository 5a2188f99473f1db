pub mod auth;
pub mod dashboard;
pub mod enrollment;
pub mod menu;
pub mod order;
pub mod review;
pub mod service_profile;
pub mod tracking;

pub use auth::auth_config;
pub use dashboard::dashboard_config;
pub use enrollment::enrollment_config;
pub use menu::menu_config;
pub use order::order_config;
pub use review::review_config;
pub use service_profile::service_profile_config;
pub use tracking::tracking_config;

use actix_web::web;

/// Every route under `/api/v1`.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth_config)
        .configure(service_profile_config)
        .configure(menu_config)
        .configure(enrollment_config)
        .configure(tracking_config)
        .configure(dashboard_config)
        .configure(order_config)
        .configure(review_config);
}
