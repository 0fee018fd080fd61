use crate::domain::ports::ConfigProvider;
use crate::utils::error::{HnError, Result};
use crate::utils::validation::{validate_status_codes, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File-based settings for running the checks against alternate deployments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_retry_attempts")]
    pub attempts: u32,
    #[serde(default = "default_retry_delay_seconds")]
    pub delay_seconds: u64,
    #[serde(default = "default_retry_codes")]
    pub status_codes: Vec<u16>,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            attempts: default_retry_attempts(),
            delay_seconds: default_retry_delay_seconds(),
            status_codes: default_retry_codes(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default)]
    pub detailed_logs: bool,
}

fn default_retry_attempts() -> u32 {
    4
}

fn default_retry_delay_seconds() -> u64 {
    1
}

fn default_retry_codes() -> Vec<u16> {
    vec![429]
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(HnError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        toml::from_str(&processed_content).map_err(|e| HnError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` references with environment variables. Unset
    /// variables are left as-is so the parse error names them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.api.base_url
    }

    fn retry_attempts(&self) -> u32 {
        self.retry.attempts
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.retry.delay_seconds
    }

    fn retry_codes(&self) -> &[u16] {
        &self.retry.status_codes
    }

    fn detailed_logs(&self) -> bool {
        self.logging.detailed_logs
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api.base_url)?;
        validate_status_codes("retry.status_codes", &self.retry.status_codes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_settings() {
        let toml_content = r#"
[api]
base_url = "https://hacker-news.firebaseio.com"

[retry]
attempts = 2
delay_seconds = 1
status_codes = [429, 503]

[logging]
detailed_logs = true
"#;

        let settings = Settings::from_toml_str(toml_content).unwrap();
        assert_eq!(settings.base_url(), "https://hacker-news.firebaseio.com");
        assert_eq!(settings.retry_attempts(), 2);
        assert_eq!(settings.retry_codes(), &[429, 503]);
        assert!(settings.detailed_logs());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_sections_omitted() {
        let settings = Settings::from_toml_str(
            r#"
[api]
base_url = "http://localhost:8080"
"#,
        )
        .unwrap();
        assert_eq!(settings.retry_attempts(), 4);
        assert_eq!(settings.retry_delay_seconds(), 1);
        assert_eq!(settings.retry_codes(), &[429]);
        assert!(!settings.detailed_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HN_TEST_BASE_URL", "https://staging.example.com");

        let settings = Settings::from_toml_str(
            r#"
[api]
base_url = "${HN_TEST_BASE_URL}"
"#,
        )
        .unwrap();
        assert_eq!(settings.base_url(), "https://staging.example.com");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://hacker-news.firebaseio.com\"").unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.base_url(), "https://hacker-news.firebaseio.com");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Settings::from_toml_str("not toml at all [").unwrap_err();
        match err {
            HnError::ConfigError { message } => assert!(message.contains("TOML")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let settings = Settings::from_toml_str(
            r#"
[api]
base_url = "ftp://example.com"
"#,
        )
        .unwrap();
        assert!(settings.validate().is_err());
    }
}
