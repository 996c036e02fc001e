use roster::{AccessPolicy, MembershipCollector, MembershipSource, RestMembershipSource};
use shared::config::Config;
use std::sync::Arc;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub collector: MembershipCollector,
    pub access_policy: Arc<AccessPolicy>,
    /// `None` when the deployment has no product configured.
    pub product_id: Option<String>,
    pub development: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let source = Arc::new(RestMembershipSource::new(config.source_config()));
        Self::with_source(source, config)
    }

    /// Build state around any membership source.
    pub fn with_source(source: Arc<dyn MembershipSource>, config: &Config) -> Self {
        Self {
            collector: MembershipCollector::new(source),
            access_policy: Arc::new(AccessPolicy::new(config.admin_user_ids.iter().cloned())),
            product_id: config.product_id.clone(),
            development: config.development,
        }
    }
}
