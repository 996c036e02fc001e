use crate::domain::MembershipRecord;
use crate::ports::{MembershipSource, PageRequest};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How a collection run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionOutcome {
    /// An empty page was reached.
    Complete { pages_fetched: u32 },
    /// A page request failed; earlier pages are kept.
    Truncated { failed_page: u32, reason: String },
}

/// Flat, page-ordered result of one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    memberships: Vec<MembershipRecord>,
    outcome: CollectionOutcome,
}

impl Collection {
    pub fn new(memberships: Vec<MembershipRecord>, outcome: CollectionOutcome) -> Self {
        Self {
            memberships,
            outcome,
        }
    }

    pub fn memberships(&self) -> &[MembershipRecord] {
        &self.memberships
    }

    pub fn into_memberships(self) -> Vec<MembershipRecord> {
        self.memberships
    }

    pub fn outcome(&self) -> &CollectionOutcome {
        &self.outcome
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, CollectionOutcome::Complete { .. })
    }

    /// Page whose request failed, if the run was cut short.
    pub fn failed_page(&self) -> Option<u32> {
        match self.outcome {
            CollectionOutcome::Truncated { failed_page, .. } => Some(failed_page),
            CollectionOutcome::Complete { .. } => None,
        }
    }

    pub fn len(&self) -> usize {
        self.memberships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memberships.is_empty()
    }
}

/// Walks the paginated listing and concatenates every page.
#[derive(Clone)]
pub struct MembershipCollector {
    source: Arc<dyn MembershipSource>,
}

impl MembershipCollector {
    pub fn new(source: Arc<dyn MembershipSource>) -> Self {
        Self { source }
    }

    /// Fetch all active memberships for `product_id`.
    ///
    /// Pages are requested one at a time until an empty page comes back.
    /// A failed request ends the walk early and is reported through
    /// [`CollectionOutcome::Truncated`] rather than as an error.
    pub async fn collect_active_memberships(&self, product_id: &str) -> Collection {
        let mut memberships = Vec::new();
        let mut request = PageRequest::first(product_id);

        loop {
            let page = match self.source.fetch_page(&request).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        "Membership listing for product {} stopped at page {}: {}",
                        product_id, request.page, e
                    );
                    return Collection::new(
                        memberships,
                        CollectionOutcome::Truncated {
                            failed_page: request.page,
                            reason: e.to_string(),
                        },
                    );
                }
            };

            if page.is_empty() {
                info!(
                    "Collected {} active memberships for product {} across {} pages",
                    memberships.len(),
                    product_id,
                    request.page
                );
                return Collection::new(
                    memberships,
                    CollectionOutcome::Complete {
                        pages_fetched: request.page,
                    },
                );
            }

            debug!(
                "Page {} for product {} returned {} memberships",
                request.page,
                product_id,
                page.data.len()
            );
            memberships.extend(page.data);
            request = request.next();
        }
    }
}
