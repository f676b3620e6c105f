//! Configuration validation for the LimeSurvey client

use anyhow::Result;
use reqwest::Url;
use tracing::{error, info, warn};

use crate::config::settings::ClientSettings;

/// Collects configuration problems before any call is made
pub struct ConfigurationValidator {
    /// Whether to perform strict validation (fails on warnings)
    strict_mode: bool,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl ConfigurationValidator {
    pub fn new(strict_mode: bool) -> Self {
        Self {
            strict_mode,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn validate_settings(&mut self, settings: &ClientSettings) -> Result<()> {
        self.validate_endpoint(&settings.endpoint);
        self.validate_credentials(settings);
        self.validate_timeout(settings.timeout_secs);
        self.validate_log_level(&settings.log_level);

        self.print_validation_summary();

        if !self.errors.is_empty() {
            return Err(anyhow::anyhow!(
                "Configuration validation failed with {} errors",
                self.errors.len()
            ));
        }

        if self.strict_mode && !self.warnings.is_empty() {
            return Err(anyhow::anyhow!(
                "Configuration validation failed in strict mode with {} warnings",
                self.warnings.len()
            ));
        }

        Ok(())
    }

    fn validate_endpoint(&mut self, endpoint: &str) {
        if endpoint.trim().is_empty() {
            self.errors.push("endpoint must not be empty".to_string());
            return;
        }

        match Url::parse(endpoint) {
            Ok(url) => match url.scheme() {
                "https" => {}
                "http" => {
                    self.warnings.push(format!(
                        "endpoint {} uses plain HTTP; credentials are sent unencrypted",
                        endpoint
                    ));
                }
                other => {
                    self.errors.push(format!(
                        "endpoint scheme must be http or https, got '{}'",
                        other
                    ));
                }
            },
            Err(e) => {
                self.errors.push(format!("endpoint is not a valid URL: {}", e));
            }
        }
    }

    fn validate_credentials(&mut self, settings: &ClientSettings) {
        match (&settings.username, &settings.password) {
            (Some(user), _) if user.is_empty() => {
                self.errors.push("username is set but empty".to_string());
            }
            (Some(_), Some(_)) => {}
            (None, None) => {
                self.warnings.push(
                    "No credentials configured; authenticated commands will fail".to_string(),
                );
            }
            (Some(_), None) => {
                self.warnings.push("username is set without a password".to_string());
            }
            (None, Some(_)) => {
                self.warnings.push("password is set without a username".to_string());
            }
        }
    }

    fn validate_timeout(&mut self, timeout_secs: u64) {
        if timeout_secs == 0 {
            self.errors.push("timeout_secs must be greater than 0".to_string());
        } else if timeout_secs > 600 {
            self.warnings.push(format!(
                "timeout_secs is very long ({}s). Calls to an unreachable server will hang",
                timeout_secs
            ));
        }
    }

    fn validate_log_level(&mut self, log_level: &str) {
        match log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                self.errors.push(format!(
                    "Unknown log level: {}. Expected one of: trace, debug, info, warn, error",
                    other
                ));
            }
        }
    }

    fn print_validation_summary(&self) {
        for warning in &self.warnings {
            warn!("Configuration warning: {}", warning);
        }

        for error in &self.errors {
            error!("Configuration error: {}", error);
        }

        info!(
            "Configuration validation completed with {} warnings and {} errors",
            self.warnings.len(),
            self.errors.len()
        );
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// Quick validation function for use in main application
pub fn validate_configuration(settings: &ClientSettings, strict: bool) -> Result<()> {
    let mut validator = ConfigurationValidator::new(strict);
    validator.validate_settings(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_settings() -> ClientSettings {
        ClientSettings {
            endpoint: "https://survey.example.org/index.php/admin/remotecontrol".to_string(),
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_valid_configuration() {
        let mut validator = ConfigurationValidator::new(true);
        assert!(validator.validate_settings(&create_test_settings()).is_ok());
        assert!(validator.warnings().is_empty());
    }

    #[test]
    fn test_invalid_endpoint() {
        for endpoint in ["", "not a url", "ftp://survey.example.org/remotecontrol"] {
            let mut settings = create_test_settings();
            settings.endpoint = endpoint.to_string();

            let mut validator = ConfigurationValidator::new(false);
            assert!(validator.validate_settings(&settings).is_err(), "endpoint {:?}", endpoint);
            assert_eq!(validator.errors().len(), 1);
        }
    }

    #[test]
    fn test_zero_timeout() {
        let mut settings = create_test_settings();
        settings.timeout_secs = 0;

        let mut validator = ConfigurationValidator::new(false);
        assert!(validator.validate_settings(&settings).is_err());
    }

    #[test]
    fn test_strict_mode_warnings() {
        let mut settings = create_test_settings();
        settings.endpoint = "http://localhost/index.php/admin/remotecontrol".to_string();

        let mut validator = ConfigurationValidator::new(true);
        assert!(validator.validate_settings(&settings).is_err());
        assert_eq!(validator.warnings().len(), 1);
    }

    #[test]
    fn test_lenient_mode_warnings() {
        let mut settings = create_test_settings();
        settings.password = None;

        let mut validator = ConfigurationValidator::new(false);
        assert!(validator.validate_settings(&settings).is_ok());
        assert_eq!(validator.warnings().len(), 1);
        assert!(validator.errors().is_empty());
    }

    #[test]
    fn test_unknown_log_level() {
        let mut settings = create_test_settings();
        settings.log_level = "loud".to_string();

        let mut validator = ConfigurationValidator::new(false);
        assert!(validator.validate_settings(&settings).is_err());
        assert_eq!(validator.errors().len(), 1);
        assert!(validator.errors()[0].contains("loud"));

        settings.log_level = "DEBUG".to_string();
        let mut validator = ConfigurationValidator::new(false);
        assert!(validator.validate_settings(&settings).is_ok());
    }
}
