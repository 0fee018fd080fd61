use crate::core::{scenarios, schema};
use crate::domain::model::ItemId;
use crate::domain::ports::HackerNews;
use crate::utils::error::{HnError, Result};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::time::{Duration, Instant};

/// An id far beyond the current item range; the API answers 200/null for it.
pub const INVALID_ITEM_ID: ItemId = 999_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
    Skipped,
}

#[derive(Debug)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub status: CheckStatus,
    pub detail: Option<String>,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub outcomes: Vec<CheckOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.count(CheckStatus::Passed)
    }

    pub fn failed(&self) -> usize {
        self.count(CheckStatus::Failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(CheckStatus::Skipped)
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, status: CheckStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

enum Verdict {
    Pass,
    Skip(String),
}

/// Runs the Hacker News API checks sequentially. A failing check is recorded
/// and the suite moves on; only transport-level setup errors abort a check
/// early, never the whole run.
pub struct CheckRunner<H: HackerNews> {
    client: H,
}

impl<H: HackerNews> CheckRunner<H> {
    pub fn new(client: H) -> Self {
        Self { client }
    }

    pub async fn run(&self) -> SuiteReport {
        let started_at = Utc::now();
        tracing::info!("Running Hacker News API checks");

        let mut outcomes = Vec::new();
        outcomes.push(
            self.execute("top_stories_schema", self.check_top_stories_schema())
                .await,
        );
        outcomes.push(
            self.execute("current_top_story", self.check_current_top_story())
                .await,
        );
        outcomes.push(
            self.execute("first_comment_schema", self.check_first_comment_schema())
                .await,
        );
        outcomes.push(
            self.execute("deleted_comment", self.check_deleted_comment())
                .await,
        );
        outcomes.push(
            self.execute(
                "story_without_comments",
                self.check_story_without_comments(),
            )
            .await,
        );
        outcomes.push(self.execute("invalid_item", self.check_invalid_item()).await);

        let report = SuiteReport {
            started_at,
            outcomes,
        };
        tracing::info!(
            "Checks finished: {} passed, {} failed, {} skipped",
            report.passed(),
            report.failed(),
            report.skipped()
        );
        report
    }

    async fn execute<F>(&self, name: &'static str, check: F) -> CheckOutcome
    where
        F: Future<Output = Result<Verdict>>,
    {
        let started = Instant::now();
        let (status, detail) = match check.await {
            Ok(Verdict::Pass) => {
                tracing::info!("Check passed: {}", name);
                (CheckStatus::Passed, None)
            }
            Ok(Verdict::Skip(reason)) => {
                tracing::warn!("Check skipped: {} ({})", name, reason);
                (CheckStatus::Skipped, Some(reason))
            }
            Err(e) => {
                tracing::error!("Check failed: {}: {}", name, e);
                (CheckStatus::Failed, Some(e.to_string()))
            }
        };
        CheckOutcome {
            name,
            status,
            detail,
            elapsed: started.elapsed(),
        }
    }

    async fn check_top_stories_schema(&self) -> Result<Verdict> {
        let listing = self.client.top_stories().await?.json()?;
        schema::check_top_stories(&listing)?;
        Ok(Verdict::Pass)
    }

    async fn check_current_top_story(&self) -> Result<Verdict> {
        let ids = scenarios::top_story_ids(&self.client).await?;
        let first = *ids.first().ok_or_else(|| HnError::ScenarioError {
            message: "top stories list is empty".to_string(),
        })?;

        let story = self.client.item(first).await?.json()?;
        let kind = story.get("type").and_then(|v| v.as_str()).unwrap_or("missing");
        if kind != "story" {
            return Err(HnError::SchemaError {
                field: "type".to_string(),
                reason: format!("expected 'story', got '{}'", kind),
            });
        }
        schema::check_story(&story)?;
        Ok(Verdict::Pass)
    }

    async fn check_first_comment_schema(&self) -> Result<Verdict> {
        let ids = scenarios::top_story_ids(&self.client).await?;
        let story = scenarios::first_story_with_comments(&self.client, &ids, true).await?;
        let first_kid = story
            .kids()
            .first()
            .copied()
            .ok_or_else(|| HnError::ScenarioError {
                message: "story reported comments but has no kids".to_string(),
            })?;

        let comment = self.client.item(first_kid).await?.json()?;
        schema::check_comment(&comment)?;
        Ok(Verdict::Pass)
    }

    async fn check_deleted_comment(&self) -> Result<Verdict> {
        let ids = scenarios::top_story_ids(&self.client).await?;
        let story = scenarios::first_story_with_comments(&self.client, &ids, true).await?;

        match scenarios::first_deleted_comment(&self.client, &story.kids()).await? {
            Some(comment) => {
                schema::check_comment(&serde_json::Value::Object(comment.data.clone()))?;
                Ok(Verdict::Pass)
            }
            // deleted comments are rare under current top stories
            None => Ok(Verdict::Skip(
                "no deleted comment under the first commented story".to_string(),
            )),
        }
    }

    async fn check_story_without_comments(&self) -> Result<Verdict> {
        let ids = scenarios::top_story_ids(&self.client).await?;
        let story = scenarios::first_story_with_comments(&self.client, &ids, false).await?;

        if story.get("kids").is_some() {
            return Err(HnError::SchemaError {
                field: "kids".to_string(),
                reason: "story selected as comment-free still has a kids field".to_string(),
            });
        }
        Ok(Verdict::Pass)
    }

    async fn check_invalid_item(&self) -> Result<Verdict> {
        let response = self.client.item_unchecked(INVALID_ITEM_ID).await?;

        // the API answers 200 with a null body for ids that do not exist
        if response.status().as_u16() != 200 {
            return Err(HnError::ScenarioError {
                message: format!(
                    "expected 200 for nonexistent item, got {}",
                    response.status()
                ),
            });
        }
        if !response.json()?.is_null() {
            return Err(HnError::ScenarioError {
                message: "expected null body for nonexistent item".to_string(),
            });
        }
        Ok(Verdict::Pass)
    }
}
