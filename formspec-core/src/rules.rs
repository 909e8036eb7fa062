// Built-in rules

use crate::config::render;
use crate::{ConfigResult, Form, MessageCatalog, RuleFn, rule_fn};
use formspec_log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::sync::Arc;

/// Signed decimal: optional sign, digits, optional `.` and more digits.
pub const NUMBER_PATTERN: &str = r"^[+-]?[0-9]+(\.[0-9]*)?$";

/// Signed integer: optional sign and digits. Leading zeros are fine.
pub const INT_PATTERN: &str = r"^[+-]?[0-9]+$";

static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(NUMBER_PATTERN).unwrap());

static INT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(INT_PATTERN).unwrap());

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(RuleSet::from_env);

/// Factory for the built-in rules.
///
/// Carries the message catalog and the number/integer grammars. The free
/// functions in this module use a process-wide set read once from the
/// environment; build your own when a form needs different wording.
///
/// Comparison bounds are `impl Into<f64>`, which covers `i32`, `u32`, `f32`
/// and narrower types. `i64`, `u64` and `usize` have no lossless `f64`
/// conversion, so pass them with an explicit `as f64`. Values are compared
/// exactly against the bound whenever they fit in an `i128`.
///
/// ```
/// use formspec_core::{Formspec, FormData, MessageCatalog, RuleSet};
///
/// let messages = MessageCatalog {
///     required: "can't be blank".to_string(),
///     ..MessageCatalog::default()
/// };
/// let rules = RuleSet::new(messages);
///
/// let mut spec = Formspec::new();
/// spec.rule("name", rules.required());
///
/// let result = spec.validate(&FormData::new());
/// assert_eq!(result.errors[0].message, "name can't be blank");
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    messages: Arc<MessageCatalog>,
    number_format: Regex,
    int_format: Regex,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(MessageCatalog::default())
    }
}

impl RuleSet {
    pub fn new(messages: MessageCatalog) -> Self {
        Self {
            messages: Arc::new(messages),
            number_format: NUMBER_REGEX.clone(),
            int_format: INT_REGEX.clone(),
        }
    }

    /// Rule set using [`MessageCatalog::from_env`]. Falls back to the
    /// default messages when the configured message file is unusable.
    pub fn from_env() -> Self {
        Self::from_env_prefixed(crate::config::ENV_PREFIX)
    }

    /// Like [`RuleSet::from_env`], reading `<PREFIX>_MESSAGES_FILE` and
    /// `<PREFIX>_MESSAGE_<NAME>` instead.
    pub fn from_env_prefixed(prefix: &str) -> Self {
        match MessageCatalog::from_env_prefixed(prefix) {
            Ok(messages) => Self::new(messages),
            Err(e) => {
                warn!(target: "formspec::rules", "using default messages: {}", e);
                Self::default()
            }
        }
    }

    /// Replace the grammar used by `number` and the float comparisons.
    pub fn with_number_format(mut self, format: Regex) -> Self {
        self.number_format = format;
        self
    }

    /// Replace the grammar used by `int` and the integer comparisons.
    pub fn with_int_format(mut self, format: Regex) -> Self {
        self.int_format = format;
        self
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Fails when the value is blank.
    pub fn required(&self) -> RuleFn {
        let messages = self.messages.clone();
        rule_fn(move |value, _| {
            if value.is_empty() {
                Err(messages.required.clone())
            } else {
                Ok(())
            }
        })
    }

    /// Fails when the value has more than `max` characters.
    pub fn max_len(&self, max: usize) -> RuleFn {
        let messages = self.messages.clone();
        rule_fn(move |value, _| {
            if value.chars().count() > max {
                Err(render(&messages.max_len, "max", max))
            } else {
                Ok(())
            }
        })
    }

    /// Fails when the value has fewer than `min` characters.
    pub fn min_len(&self, min: usize) -> RuleFn {
        let messages = self.messages.clone();
        rule_fn(move |value, _| {
            if value.chars().count() < min {
                Err(render(&messages.min_len, "min", min))
            } else {
                Ok(())
            }
        })
    }

    /// Fails when the value does not match `pattern`.
    pub fn format(&self, pattern: Regex) -> RuleFn {
        let messages = self.messages.clone();
        rule_fn(move |value, _| {
            if pattern.is_match(value) {
                Ok(())
            } else {
                Err(messages.invalid.clone())
            }
        })
    }

    /// `format` from a pattern string; an invalid pattern is reported here,
    /// while the form is being built.
    pub fn format_str(&self, pattern: &str) -> ConfigResult<RuleFn> {
        Ok(self.format(Regex::new(pattern)?))
    }

    /// Fails unless the value is one of `allowed`.
    pub fn one_of<I, S>(&self, allowed: I) -> RuleFn
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        let messages = self.messages.clone();
        rule_fn(move |value, _| {
            if allowed.iter().any(|a| a == value) {
                Ok(())
            } else {
                Err(messages.invalid.clone())
            }
        })
    }

    /// Fails unless the value equals the value of field `other`.
    pub fn equal_to_field(&self, other: impl Into<String>) -> RuleFn {
        let other = other.into();
        let messages = self.messages.clone();
        rule_fn(move |value, form: &dyn Form| {
            if value == form.form_value(&other) {
                Ok(())
            } else {
                Err(render(&messages.same_as, "field", &other))
            }
        })
    }

    /// Fails unless the value matches the number grammar.
    pub fn number(&self) -> RuleFn {
        let check = self.number_check();
        rule_fn(move |value, _| check.matches(value))
    }

    /// Fails unless the value matches the integer grammar.
    pub fn int(&self) -> RuleFn {
        let check = self.int_check();
        rule_fn(move |value, _| check.matches(value))
    }

    /// Integer strictly below `bound`.
    pub fn int_less_than(&self, bound: impl Into<f64>) -> RuleFn {
        self.compare(self.int_check(), Ordering::Less, bound.into())
    }

    /// Integer strictly above `bound`.
    pub fn int_greater_than(&self, bound: impl Into<f64>) -> RuleFn {
        self.compare(self.int_check(), Ordering::Greater, bound.into())
    }

    /// Number strictly below `bound`.
    pub fn float_less_than(&self, bound: impl Into<f64>) -> RuleFn {
        self.compare(self.number_check(), Ordering::Less, bound.into())
    }

    /// Number strictly above `bound`.
    pub fn float_greater_than(&self, bound: impl Into<f64>) -> RuleFn {
        self.compare(self.number_check(), Ordering::Greater, bound.into())
    }

    fn number_check(&self) -> NumericCheck {
        NumericCheck {
            format: self.number_format.clone(),
            message: self.messages.number.clone(),
        }
    }

    fn int_check(&self) -> NumericCheck {
        NumericCheck {
            format: self.int_format.clone(),
            message: self.messages.int.clone(),
        }
    }

    fn compare(&self, check: NumericCheck, expected: Ordering, bound: f64) -> RuleFn {
        let template = match expected {
            Ordering::Less => self.messages.less_than.clone(),
            _ => self.messages.greater_than.clone(),
        };
        rule_fn(move |value, _| {
            if check.compare(value, bound)? == Some(expected) {
                Ok(())
            } else {
                Err(render(&template, "bound", bound))
            }
        })
    }
}

/// Grammar check followed by a numeric parse; both failures report the
/// grammar's message.
struct NumericCheck {
    format: Regex,
    message: String,
}

impl NumericCheck {
    fn matches(&self, value: &str) -> Result<(), String> {
        if self.format.is_match(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }

    /// Order of `value` relative to `bound`. Integral values that fit in an
    /// `i128` compare exactly; everything else goes through `f64`.
    fn compare(&self, value: &str, bound: f64) -> Result<Option<Ordering>, String> {
        self.matches(value)?;
        if let Ok(n) = value.parse::<i128>() {
            return Ok(compare_int(n, bound));
        }
        let parsed = value.parse::<f64>().map_err(|_| self.message.clone())?;
        Ok(parsed.partial_cmp(&bound))
    }
}

// 2^127, the first power of two past `i128::MAX`.
const I128_LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

/// Exact ordering of an integer against a float. `None` only for NaN.
fn compare_int(n: i128, bound: f64) -> Option<Ordering> {
    if bound.is_nan() {
        return None;
    }
    if bound >= I128_LIMIT {
        return Some(Ordering::Less);
    }
    if bound < -I128_LIMIT {
        return Some(Ordering::Greater);
    }
    let floor = bound.floor();
    // In range, so the cast is exact.
    match n.cmp(&(floor as i128)) {
        Ordering::Equal if bound > floor => Some(Ordering::Less),
        ordering => Some(ordering),
    }
}

/// The process-wide rule set behind the free functions.
pub fn defaults() -> &'static RuleSet {
    &DEFAULT_RULES
}

pub fn required() -> RuleFn {
    defaults().required()
}

pub fn max_len(max: usize) -> RuleFn {
    defaults().max_len(max)
}

pub fn min_len(min: usize) -> RuleFn {
    defaults().min_len(min)
}

pub fn format(pattern: Regex) -> RuleFn {
    defaults().format(pattern)
}

pub fn format_str(pattern: &str) -> ConfigResult<RuleFn> {
    defaults().format_str(pattern)
}

pub fn one_of<I, S>(allowed: I) -> RuleFn
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    defaults().one_of(allowed)
}

pub fn equal_to_field(other: impl Into<String>) -> RuleFn {
    defaults().equal_to_field(other)
}

pub fn number() -> RuleFn {
    defaults().number()
}

pub fn int() -> RuleFn {
    defaults().int()
}

pub fn int_less_than(bound: impl Into<f64>) -> RuleFn {
    defaults().int_less_than(bound)
}

pub fn int_greater_than(bound: impl Into<f64>) -> RuleFn {
    defaults().int_greater_than(bound)
}

pub fn float_less_than(bound: impl Into<f64>) -> RuleFn {
    defaults().float_less_than(bound)
}

pub fn float_greater_than(bound: impl Into<f64>) -> RuleFn {
    defaults().float_greater_than(bound)
}
