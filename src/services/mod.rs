pub mod auth_service;
pub mod enrollment_service;
pub mod menu_service;
pub mod order_service;
pub mod review_service;
pub mod stats_service;
pub mod tracking_service;

pub use auth_service::AuthService;
pub use enrollment_service::EnrollmentService;
pub use menu_service::MenuService;
pub use order_service::OrderService;
pub use review_service::ReviewService;
pub use stats_service::StatsService;
pub use tracking_service::TrackingService;
