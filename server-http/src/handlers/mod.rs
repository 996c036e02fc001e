pub mod health;
pub mod memberships;
pub mod pages;

pub use health::health_check;
pub use memberships::list_memberships;
pub use pages::{dashboard_page, experience_page};
