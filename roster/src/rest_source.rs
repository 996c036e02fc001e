use crate::domain::MembershipPage;
use crate::ports::{MembershipSource, PageRequest};
use async_trait::async_trait;
use reqwest::{Client, header};
use shared::config::SourceConfig;
use shared::{Error, Result};
use tracing::debug;

/// Membership listing backed by the platform's REST API.
#[derive(Clone)]
pub struct RestMembershipSource {
    client: Client,
    config: SourceConfig,
}

impl RestMembershipSource {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn listing_url(&self) -> String {
        format!("{}/memberships", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl MembershipSource for RestMembershipSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<MembershipPage> {
        let url = self.listing_url();
        debug!(
            "Requesting memberships page {} for product {} from {}",
            request.page, request.product_id, url
        );

        let page = request.page.to_string();
        let per_page = request.per_page.to_string();
        let mut builder = self
            .client
            .get(&url)
            .query(&[
                ("product_id", request.product_id.as_str()),
                ("status", "active"),
                ("page", page.as_str()),
                ("per", per_page.as_str()),
                ("include", "customer"),
            ])
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(api_key) = &self.config.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| Error::Decode(e.to_string()))
    }
}
