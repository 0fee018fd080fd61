use crate::core::response::ApiResponse;
use crate::domain::model::ItemId;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn retry_attempts(&self) -> u32;
    fn retry_delay_seconds(&self) -> u64;
    fn retry_codes(&self) -> &[u16];
    fn detailed_logs(&self) -> bool;
}

/// Read-only view of the Hacker News API. Scenario helpers and the check
/// runner depend on this trait so tests can substitute canned responses.
#[async_trait]
pub trait HackerNews: Send + Sync {
    /// `GET /v0/topstories.json`, expecting 200.
    async fn top_stories(&self) -> Result<ApiResponse>;

    /// `GET /v0/item/{id}.json`, expecting 200.
    async fn item(&self, id: ItemId) -> Result<ApiResponse>;

    /// Same endpoint as `item` but without status validation, for probing
    /// ids that may not exist.
    async fn item_unchecked(&self, id: ItemId) -> Result<ApiResponse>;
}
