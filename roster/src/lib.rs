// Public API
pub mod access;
pub mod collector;
pub mod domain;
pub mod ports;
pub mod rest_source;

// Re-export commonly used types
pub use access::{AccessLevel, AccessPolicy, Viewer};
pub use collector::{Collection, CollectionOutcome, MembershipCollector};
pub use domain::{CustomerProfile, MembershipPage, MembershipRecord};
pub use ports::{DEFAULT_PAGE_SIZE, MembershipSource, PageRequest};
pub use rest_source::RestMembershipSource;
pub use shared::config::SourceConfig;
