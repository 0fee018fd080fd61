pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;
pub use crate::config::settings::Settings;

pub use crate::core::client::{RequestOptions, RestClient, RetryPolicy};
pub use crate::core::hackernews::HackerNewsClient;
pub use crate::core::response::ApiResponse;
pub use crate::core::suite::{CheckRunner, CheckStatus, SuiteReport};
pub use crate::domain::model::{Item, ItemId};
pub use crate::domain::ports::{ConfigProvider, HackerNews};
pub use crate::utils::error::{HnError, Result};
