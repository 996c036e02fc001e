pub mod responses;

pub use responses::{ErrorResponse, HealthResponse, MembershipsResponse};
