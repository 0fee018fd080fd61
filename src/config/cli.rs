use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_status_codes, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "hn-checks")]
#[command(about = "Check suite for the Hacker News API")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = "4")]
    pub retry_attempts: u32,

    #[arg(long, default_value = "1")]
    pub retry_delay_seconds: u64,

    #[arg(long, value_delimiter = ',', default_value = "429")]
    pub retry_codes: Vec<u16>,

    #[arg(long, help = "Load settings from a TOML file instead of CLI flags")]
    pub settings_file: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log full request and response text")]
    pub detailed_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.retry_delay_seconds
    }

    fn retry_codes(&self) -> &[u16] {
        &self.retry_codes
    }

    fn detailed_logs(&self) -> bool {
        self.detailed_logs
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_status_codes("retry_codes", &self.retry_codes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["hn-checks"]);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.retry_attempts, 4);
        assert_eq!(config.retry_codes, vec![429]);
        assert!(!config.detailed_logs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_retry_codes_list() {
        let config = CliConfig::parse_from(["hn-checks", "--retry-codes", "429,503"]);
        assert_eq!(config.retry_codes, vec![429, 503]);
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = CliConfig::parse_from(["hn-checks", "--base-url", "not-a-url"]);
        assert!(config.validate().is_err());
    }
}
