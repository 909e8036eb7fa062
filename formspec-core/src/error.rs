// Validation results and errors

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validation error for a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field name that failed validation
    pub field: String,

    /// Resolved error message, already carrying the field prefix when one applies
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of one `Formspec::validate` call.
///
/// `ok` is true exactly when `errors` is empty. Errors keep the order in
/// which their rules were attached.
///
/// Deserializing recomputes `ok` from `errors`, so the invariant holds for
/// results read back from JSON too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ResultRepr")]
pub struct ValidationResult {
    pub ok: bool,
    pub errors: Vec<ValidationError>,
}

#[derive(Deserialize)]
struct ResultRepr {
    #[serde(default)]
    errors: Vec<ValidationError>,
}

impl From<ResultRepr> for ValidationResult {
    fn from(repr: ResultRepr) -> Self {
        Self::from_errors(repr.errors)
    }
}

impl ValidationResult {
    /// A passing result
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from collected errors
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Errors reported for one field
    pub fn field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Resolved messages in reporting order
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// JSON shape `{"ok": bool, "errors": [{"field", "message"}]}`
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ok": self.ok,
            "errors": self.errors.iter().map(|e| {
                serde_json::json!({
                    "field": e.field,
                    "message": e.message,
                })
            }).collect::<Vec<_>>()
        })
    }

    /// Convert into a `Result`, for callers that want `?`
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.ok {
            Ok(())
        } else {
            Err(ValidationErrors::new(self.errors))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Collection of validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for ValidationResult {
    fn from(errors: ValidationErrors) -> Self {
        Self::from_errors(errors.errors)
    }
}

/// Configuration-time failures. `validate` never produces these.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to read message file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse message file: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message_only() {
        let error = ValidationError::new("name", "name is required.");
        assert_eq!(error.to_string(), "name is required.");
    }

    #[test]
    fn test_ok_tracks_errors() {
        assert!(ValidationResult::from_errors(vec![]).ok);
        assert!(!ValidationResult::from_errors(vec![ValidationError::new("a", "a x")]).ok);
    }

    #[test]
    fn test_json_shape() {
        let result = ValidationResult::from_errors(vec![ValidationError::new(
            "nick",
            "Please enter your cool nick.",
        )]);

        assert_eq!(
            result.to_json(),
            serde_json::json!({
                "ok": false,
                "errors": [{"field": "nick", "message": "Please enter your cool nick."}]
            })
        );
        assert_eq!(serde_json::to_value(&result).unwrap(), result.to_json());
    }

    #[test]
    fn test_deserialize_recomputes_ok() {
        let result: ValidationResult = serde_json::from_str(
            r#"{"ok": true, "errors": [{"field": "a", "message": "a is required."}]}"#,
        )
        .unwrap();
        assert!(!result.ok);
        assert_eq!(result.errors.len(), 1);

        let result: ValidationResult =
            serde_json::from_str(r#"{"ok": false, "errors": []}"#).unwrap();
        assert!(result.ok);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationResult::success().into_result().is_ok());

        let errors = ValidationResult::from_errors(vec![
            ValidationError::new("a", "a is required."),
            ValidationError::new("b", "b is required."),
        ])
        .into_result()
        .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.to_string(), "a is required.\nb is required.\n");
    }

    #[test]
    fn test_field_errors() {
        let result = ValidationResult::from_errors(vec![
            ValidationError::new("a", "a is required."),
            ValidationError::new("b", "b is required."),
            ValidationError::new("a", "a must be integer."),
        ]);
        assert_eq!(result.field_errors("a").len(), 2);
        assert!(result.field_errors("c").is_empty());
    }

    #[test]
    fn test_config_error_from_regex() {
        let err: ConfigError = regex::Regex::new("(").unwrap_err().into();
        assert!(err.to_string().starts_with("Invalid pattern"));
    }
}
