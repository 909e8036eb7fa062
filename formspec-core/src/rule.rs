// Field rules

use crate::{Form, ValidationError};
use formspec_log::trace;
use std::fmt;
use std::sync::Arc;

/// Core check of a rule: receives the filtered value and the whole form,
/// returns the failure reason on failure.
pub type RuleFn = Arc<dyn Fn(&str, &dyn Form) -> Result<(), String> + Send + Sync>;

/// Value transform applied before the rule runs.
pub type FilterFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Wrap a closure as a [`RuleFn`].
///
/// ```
/// use formspec_core::{rule_fn, Form, Formspec, FormData};
///
/// let mut spec = Formspec::new();
/// spec.rule("password_confirmation", rule_fn(|value, form: &dyn Form| {
///     if value == form.form_value("password") {
///         Ok(())
///     } else {
///         Err("must be same as password".to_string())
///     }
/// }));
///
/// let form = FormData::new()
///     .with("password", "hoge")
///     .with("password_confirmation", "fuga");
/// assert!(!spec.validate(&form).ok);
/// ```
pub fn rule_fn<F>(f: F) -> RuleFn
where
    F: Fn(&str, &dyn Form) -> Result<(), String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a [`FilterFn`].
pub fn filter_fn<F>(f: F) -> FilterFn
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Validation rule for one field.
///
/// Cloning a rule copies the field name, blank flag and message overrides,
/// and shares the rule function and filters. Rule and filter functions are
/// never mutated once built, so sharing them is safe.
#[derive(Clone)]
pub struct Rule {
    field: String,
    rule_fn: RuleFn,
    filters: Vec<FilterFn>,
    allow_blank: bool,
    // Takes precedence over `message`.
    full_message: Option<String>,
    // Takes precedence over the rule function's own reason.
    message: Option<String>,
}

impl Rule {
    /// Create a rule with no filters, blank values checked and no message
    /// overrides.
    pub fn new(field: impl Into<String>, rule_fn: RuleFn) -> Self {
        Self {
            field: field.into(),
            rule_fn,
            filters: Vec::new(),
            allow_blank: false,
            full_message: None,
            message: None,
        }
    }

    /// Skip this rule when the filtered value is blank.
    pub fn allow_blank(&mut self) -> &mut Self {
        self.allow_blank = true;
        self
    }

    /// Report exactly `message` on failure, with no field prefix.
    pub fn full_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.full_message = Some(message.into());
        self
    }

    /// Report `"<field> <message>"` on failure.
    pub fn message(&mut self, message: impl Into<String>) -> &mut Self {
        self.message = Some(message.into());
        self
    }

    /// Append a filter. Filters run in the order they were added.
    pub fn filter<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Append an already shared filter.
    pub fn filter_shared(&mut self, filter: FilterFn) -> &mut Self {
        self.filters.push(filter);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_blank_allowed(&self) -> bool {
        self.allow_blank
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Run the filters over `value` in order.
    pub fn apply_filters(&self, value: &str) -> String {
        self.filters
            .iter()
            .fold(value.to_string(), |value, filter| filter(&value))
    }

    /// Evaluate the rule against a form.
    ///
    /// Filters always run before the blank check, so a whitespace-only value
    /// behind a trim filter counts as blank.
    pub fn call(&self, form: &dyn Form) -> Result<(), ValidationError> {
        let value = self.apply_filters(&form.form_value(&self.field));

        if value.is_empty() && self.allow_blank {
            trace!(target: "formspec::rule", "{}: blank, skipped", self.field);
            return Ok(());
        }

        match (self.rule_fn)(&value, form) {
            Ok(()) => {
                trace!(target: "formspec::rule", "{}: passed", self.field);
                Ok(())
            }
            Err(reason) => {
                let message = self.resolve_message(&reason);
                trace!(target: "formspec::rule", "{}: failed: {}", self.field, message);
                Err(ValidationError::new(self.field.clone(), message))
            }
        }
    }

    fn resolve_message(&self, reason: &str) -> String {
        if let Some(full) = &self.full_message {
            return full.clone();
        }

        match &self.message {
            Some(message) => format!("{} {}", self.field, message),
            None => format!("{} {}", self.field, reason),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("filters", &self.filters.len())
            .field("allow_blank", &self.allow_blank)
            .field("full_message", &self.full_message)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
