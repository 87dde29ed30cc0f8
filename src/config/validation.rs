use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if config.home_page.is_empty() {
        return Err(ConfigError::Validation(
            "home-page cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.max_pages_per_category < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages-per-category must be >= 1, got {}",
            config.max_pages_per_category
        )));
    }

    // Both delays at zero turns pacing off entirely
    let pacing_disabled = config.backoff_delay_ms == 0 && config.request_delay_ms == 0;
    if !pacing_disabled && config.backoff_delay_ms <= config.request_delay_ms {
        return Err(ConfigError::Validation(format!(
            "backoff-delay-ms ({}) must be longer than request-delay-ms ({})",
            config.backoff_delay_ms, config.request_delay_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.dataset_path.is_empty() {
        return Err(ConfigError::Validation(
            "dataset-path cannot be empty".to_string(),
        ));
    }

    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    if matches!(config.timing_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "timing-path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}
