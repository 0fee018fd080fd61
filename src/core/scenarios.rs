//! Multi-step scenario helpers that chain requests: fetch the top-stories
//! listing, then scan item-by-item for the first one matching a criterion.
//! Scans are sequential and skip nonexistent (`null`) items.

use crate::domain::model::{Item, ItemId};
use crate::domain::ports::HackerNews;
use crate::utils::error::{HnError, Result};

/// Fetches the top-stories listing and decodes it into ids.
pub async fn top_story_ids(client: &impl HackerNews) -> Result<Vec<ItemId>> {
    let value = client.top_stories().await?.json()?;
    let entries = value.as_array().ok_or_else(|| HnError::SchemaError {
        field: "topstories".to_string(),
        reason: "expected an array of ids".to_string(),
    })?;

    entries
        .iter()
        .map(|entry| {
            entry.as_i64().ok_or_else(|| HnError::SchemaError {
                field: "topstories".to_string(),
                reason: format!("entry is not an integer: {}", entry),
            })
        })
        .collect()
}

/// Scans `item_ids` in order and returns the first story whose comment state
/// matches `with_comments`.
pub async fn first_story_with_comments(
    client: &impl HackerNews,
    item_ids: &[ItemId],
    with_comments: bool,
) -> Result<Item> {
    for &item_id in item_ids {
        let story = match Item::from_value(client.item(item_id).await?.json()?) {
            Some(story) => story,
            // nonexistent item
            None => continue,
        };

        if story.has_comments() == with_comments {
            if with_comments {
                tracing::info!("Found story with comments id: {}", item_id);
            } else {
                tracing::info!("Found story without comments id: {}", item_id);
            }
            return Ok(story);
        }
    }

    let message = if with_comments {
        "no story with comments found in the provided list of top stories"
    } else {
        "no story without comments found in the provided list of top stories"
    };
    Err(HnError::ScenarioError {
        message: message.to_string(),
    })
}

/// Scans `comment_ids` in order for the first deleted comment. Deleted
/// comments are rare, so "not found" is `Ok(None)` rather than an error.
pub async fn first_deleted_comment(
    client: &impl HackerNews,
    comment_ids: &[ItemId],
) -> Result<Option<Item>> {
    for &comment_id in comment_ids {
        let comment = match Item::from_value(client.item(comment_id).await?.json()?) {
            Some(comment) => comment,
            None => continue,
        };

        if comment.is_deleted() {
            tracing::info!("Found deleted comment id: {}", comment_id);
            return Ok(Some(comment));
        }
    }
    Ok(None)
}
