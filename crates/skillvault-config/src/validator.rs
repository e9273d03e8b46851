//! Configuration validation.

use std::path::Path;

use crate::error::ConfigError;
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

    /// First error as a [`ConfigError`], if any.
    pub fn into_error(self) -> Option<ConfigError> {
        self.errors.into_iter().next().map(|e| ConfigError::InvalidValue {
            field: e.path,
            message: e.message,
        })
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
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_database(config, &mut result);
        Self::validate_agent(config, &mut result);
        Self::validate_model(config, &mut result);
        Self::validate_import(config, &mut result);

        Ok(result)
    }

    fn validate_database(config: &Config, result: &mut ValidationResult) {
        if config.database.path.trim().is_empty() {
            result.add_error(ValidationError::new(
                "database.path",
                "Database path cannot be empty",
            ));
        }
    }

    fn validate_agent(config: &Config, result: &mut ValidationResult) {
        if config.agent.persona.trim().is_empty() {
            result.add_error(ValidationError::new(
                "agent.persona",
                "Persona name cannot be empty",
            ));
        }

        if let Some(prompt) = &config.agent.system_prompt {
            if prompt.trim().is_empty() {
                result.add_warning(ValidationWarning::new(
                    "agent.system_prompt",
                    "system_prompt is empty, the built-in default will be used",
                ));
            }
        }
    }

    fn validate_model(config: &Config, result: &mut ValidationResult) {
        let temperature = config.model.temperature;
        if !(0.0..=2.0).contains(&temperature) {
            result.add_error(ValidationError::new(
                "model.temperature",
                format!("temperature {} must be between 0.0 and 2.0", temperature),
            ));
        }

        if config.model.name.trim().is_empty() {
            result.add_error(ValidationError::new("model.name", "Model name cannot be empty"));
        }

        if config.model.max_tokens == Some(0) {
            result.add_error(ValidationError::new(
                "model.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }
    }

    fn validate_import(config: &Config, result: &mut ValidationResult) {
        let dir = config.import.resolved_dir();
        if !Path::new(&dir).is_dir() {
            result.add_warning(ValidationWarning::new(
                "import.bundle_dir",
                format!("Bundle directory does not exist: {:?}", dir),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
