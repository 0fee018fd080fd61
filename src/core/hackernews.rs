use crate::core::client::{RequestOptions, RestClient, RetryPolicy};
use crate::core::response::ApiResponse;
use crate::domain::model::ItemId;
use crate::domain::ports::{ConfigProvider, HackerNews};
use crate::utils::error::Result;
use async_trait::async_trait;

pub struct HackerNewsClient {
    rest: RestClient,
    base_url: String,
}

impl HackerNewsClient {
    pub fn new(config: &impl ConfigProvider) -> Self {
        Self {
            rest: RestClient::from_config(config),
            base_url: config.base_url().trim_end_matches('/').to_string(),
        }
    }

    /// Client with default retry settings, mostly for tests pointing at a
    /// mock server.
    pub fn from_url(base_url: &str) -> Self {
        Self {
            rest: RestClient::new(RetryPolicy::default(), false),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_item(&self, id: ItemId, expect_status: Option<u16>) -> Result<ApiResponse> {
        self.rest
            .get(
                &format!("{}/v0/item/{}.json", self.base_url, id),
                RequestOptions {
                    expect_status,
                    message: Some("get item".to_string()),
                    ..Default::default()
                },
            )
            .await
    }
}

#[async_trait]
impl HackerNews for HackerNewsClient {
    async fn top_stories(&self) -> Result<ApiResponse> {
        self.rest
            .get(
                &format!("{}/v0/topstories.json", self.base_url),
                RequestOptions {
                    expect_status: Some(200),
                    message: Some("get top stories".to_string()),
                    ..Default::default()
                },
            )
            .await
    }

    async fn item(&self, id: ItemId) -> Result<ApiResponse> {
        self.get_item(id, Some(200)).await
    }

    async fn item_unchecked(&self, id: ItemId) -> Result<ApiResponse> {
        self.get_item(id, None).await
    }
}
