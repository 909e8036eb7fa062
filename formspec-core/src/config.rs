// Message catalog configuration

use crate::ConfigResult;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Environment prefix used by [`MessageCatalog::from_env`].
pub const ENV_PREFIX: &str = "FORMSPEC";

/// Failure reasons used by the built-in rules.
///
/// Placeholders in braces (`{max}`, `{min}`, `{bound}`, `{field}`) are
/// replaced when a rule fails. Every entry has a default, so a message file
/// only needs the entries it changes:
///
/// ```
/// use formspec_core::MessageCatalog;
///
/// let messages = MessageCatalog::from_json(r#"{"required": "can't be blank"}"#).unwrap();
/// assert_eq!(messages.required, "can't be blank");
/// assert_eq!(messages.int, "must be integer.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub required: String,
    pub max_len: String,
    pub min_len: String,
    pub invalid: String,
    pub number: String,
    pub int: String,
    pub less_than: String,
    pub greater_than: String,
    pub same_as: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            required: "is required.".to_string(),
            max_len: "is too long. Max is {max} character.".to_string(),
            min_len: "is too short. Min is {min} character.".to_string(),
            invalid: "is invalid.".to_string(),
            number: "must be number.".to_string(),
            int: "must be integer.".to_string(),
            less_than: "must be less than {bound}".to_string(),
            greater_than: "must be greater than {bound}".to_string(),
            same_as: "must be same as {field}".to_string(),
        }
    }
}

impl MessageCatalog {
    /// Parse a JSON message file's contents.
    pub fn from_json(content: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a JSON message file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Defaults, then `FORMSPEC_MESSAGES_FILE` if set, then any
    /// `FORMSPEC_MESSAGE_<NAME>` variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_env_prefixed(ENV_PREFIX)
    }

    /// [`MessageCatalog::from_env`] under a different prefix.
    pub fn from_env_prefixed(prefix: &str) -> ConfigResult<Self> {
        let base = match env::var(format!("{}_MESSAGES_FILE", prefix)) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides(prefix))
    }

    /// Replace entries whose `<PREFIX>_MESSAGE_<NAME>` variable is set.
    pub fn with_env_overrides(self, prefix: &str) -> Self {
        self.with_overrides(|key| env::var(format!("{}_MESSAGE_{}", prefix, key)).ok())
    }

    /// Replace entries for which `lookup` returns a value. Keys are the
    /// upper-case entry names (`REQUIRED`, `MAX_LEN`, ...).
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for (key, slot) in self.entries_mut() {
            if let Some(value) = lookup(key) {
                *slot = value;
            }
        }
        self
    }

    fn entries_mut(&mut self) -> [(&'static str, &mut String); 9] {
        [
            ("REQUIRED", &mut self.required),
            ("MAX_LEN", &mut self.max_len),
            ("MIN_LEN", &mut self.min_len),
            ("INVALID", &mut self.invalid),
            ("NUMBER", &mut self.number),
            ("INT", &mut self.int),
            ("LESS_THAN", &mut self.less_than),
            ("GREATER_THAN", &mut self.greater_than),
            ("SAME_AS", &mut self.same_as),
        ]
    }
}

/// Substitute `{key}` in a message template.
pub(crate) fn render(template: &str, key: &str, value: impl Display) -> String {
    template.replace(&format!("{{{}}}", key), &value.to_string())
}
