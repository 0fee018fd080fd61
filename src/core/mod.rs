pub mod client;
pub mod hackernews;
pub mod response;
pub mod scenarios;
pub mod schema;
pub mod suite;

pub use crate::domain::model::{Item, ItemId};
pub use crate::domain::ports::{ConfigProvider, HackerNews};
pub use crate::utils::error::Result;
