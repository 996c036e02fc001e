use roster::{Collection, MembershipRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    /// Whether a product id is set, so the dashboards can list members
    pub product_configured: bool,
}

/// Response body for the membership listing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct MembershipsResponse {
    pub product_id: String,
    pub count: usize,
    /// False when a page request failed and the list may be missing members
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub failed_page: Option<u32>,
    pub memberships: Vec<MembershipRecord>,
}

impl MembershipsResponse {
    pub fn from_collection(product_id: impl Into<String>, collection: Collection) -> Self {
        let complete = collection.is_complete();
        let failed_page = collection.failed_page();
        let memberships = collection.into_memberships();
        Self {
            product_id: product_id.into(),
            count: memberships.len(),
            complete,
            failed_page,
            memberships,
        }
    }
}

// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
