//! Configuration validation rules.

use super::schema::Config;

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push("api.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push("api.base_url must start with http:// or https://".to_string());
    }
    if config.api.timeout_secs == 0 {
        errors.push("api.timeout_secs must be > 0".to_string());
    }

    if config.chat.preview_chars == 0 {
        errors.push("chat.preview_chars must be > 0".to_string());
    }

    if !config.auth.access_token.trim().is_empty() && config.auth.email.trim().is_empty() {
        errors.push("auth.email is required when auth.access_token is set".to_string());
    }

    match config.logging.format.to_lowercase().as_str() {
        "text" | "json" => {}
        other => errors.push(format!("logging.format must be text or json, got {}", other)),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}
