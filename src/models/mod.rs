pub mod common;
pub mod enrollment;
pub mod menu;
pub mod order;
pub mod pagination;
pub mod review;
pub mod service_profile;
pub mod stats;
pub mod tracking;
pub mod user;

pub use common::*;
pub use enrollment::*;
pub use menu::*;
pub use order::*;
pub use pagination::*;
pub use review::*;
pub use service_profile::*;
pub use stats::*;
pub use tracking::*;
pub use user::*;
