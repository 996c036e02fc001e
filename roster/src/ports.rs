#![deny(clippy::all)]

use crate::domain::MembershipPage;
use async_trait::async_trait;
use shared::Result;

/// Fixed number of memberships requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Coordinates of one page in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub product_id: String,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn first(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn next(&self) -> Self {
        Self {
            product_id: self.product_id.clone(),
            page: self.page + 1,
            per_page: self.per_page,
        }
    }
}

// Ports are the pluggable extension points for membership listing backends

/// Port for fetching a single page of active memberships
#[async_trait]
pub trait MembershipSource: Send + Sync + 'static {
    async fn fetch_page(&self, request: &PageRequest) -> Result<MembershipPage>;
}
