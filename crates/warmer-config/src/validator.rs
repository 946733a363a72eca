//! Configuration validation.

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_provider(config, &mut result);
        Self::validate_generation(config, &mut result);
        Self::validate_relay(config, &mut result);
        Self::validate_storage(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_provider(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.provider.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "provider.endpoint",
                "endpoint must start with http:// or https://",
            ));
        } else if endpoint.starts_with("http://")
            && !endpoint.contains("localhost")
            && !endpoint.contains("127.0.0.1")
        {
            result.add_warning(ValidationWarning::new(
                "provider.endpoint",
                "endpoint is not HTTPS; the API key would be sent in clear text",
            ));
        }

        if config.provider.model.trim().is_empty() {
            result.add_error(ValidationError::new(
                "provider.model",
                "model cannot be empty",
            ));
        }

        if config.provider.request_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "provider.request_timeout_seconds",
                "request_timeout_seconds must be greater than 0",
            ));
        }
    }

    fn validate_generation(config: &Config, result: &mut ValidationResult) {
        let generation = &config.generation;
        if !(0.0..=2.0).contains(&generation.temperature) {
            result.add_error(ValidationError::new(
                "generation.temperature",
                "temperature must be between 0.0 and 2.0",
            ));
        }

        if generation.max_tokens == 0 {
            result.add_error(ValidationError::new(
                "generation.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }

        if generation.max_tokens > 1000 {
            result.add_warning(ValidationWarning::new(
                "generation.max_tokens",
                "max_tokens is very high (>1000) for a social media reply",
            ));
        }

        if generation.analysis_max_tokens == 0 {
            result.add_error(ValidationError::new(
                "generation.analysis_max_tokens",
                "analysis_max_tokens must be greater than 0",
            ));
        }
    }

    fn validate_relay(config: &Config, result: &mut ValidationResult) {
        if config.relay.reply_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "relay.reply_timeout_seconds",
                "reply_timeout_seconds must be greater than 0",
            ));
        }

        if config.relay.reply_timeout_seconds < config.provider.request_timeout_seconds {
            result.add_warning(ValidationWarning::new(
                "relay.reply_timeout_seconds",
                "reply timeout is shorter than the request timeout; slow replies will be dropped",
            ));
        }
    }

    fn validate_storage(config: &Config, result: &mut ValidationResult) {
        if config.storage.path.trim().is_empty() {
            result.add_error(ValidationError::new(
                "storage.path",
                "storage path cannot be empty",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new(
                "logging.level",
                "log level cannot be empty",
            ));
        }

        if config.logging.directory.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "logging.directory",
                "log directory is empty; file logging will be disabled",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
