pub mod daily_menus;
pub mod daily_tracking;
pub mod enrollments;
pub mod menus;
pub mod orders;
pub mod reviews;
pub mod subscription_plans;
pub mod tiffin_services;
pub mod users;

pub use daily_menus::Weekday;
pub use daily_tracking::MealStatus;
pub use orders::OrderStatus;
pub use users::Role;

pub use daily_menus as daily_menu_entity;
pub use daily_tracking as tracking_entity;
pub use enrollments as enrollment_entity;
pub use menus as menu_entity;
pub use orders as order_entity;
pub use reviews as review_entity;
pub use subscription_plans as plan_entity;
pub use tiffin_services as tiffin_service_entity;
pub use users as user_entity;
