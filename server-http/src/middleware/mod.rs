pub mod authentication;
pub mod authorization;

pub use authentication::{extract_viewer, viewer_middleware};
pub use authorization::check_admin;
