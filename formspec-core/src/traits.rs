// Validation traits

use crate::ValidationResult;

/// A model that owns its validation contract.
///
/// Models usually keep a `Formspec` around and run it against themselves
/// through a [`Form`](crate::Form) impl or [`FnForm`](crate::FnForm), so
/// request data and models are validated by the same rules.
///
/// ```
/// use formspec_core::{rules, Form, Formspec, Validate, ValidationResult};
/// use once_cell::sync::Lazy;
///
/// static USER_SPEC: Lazy<Formspec> = Lazy::new(|| {
///     let mut spec = Formspec::new();
///     spec.rule("name", rules::required());
///     spec.rule("age", rules::int()).allow_blank();
///     spec
/// });
///
/// struct User {
///     name: String,
///     age: Option<u32>,
/// }
///
/// impl Form for User {
///     fn form_value(&self, field: &str) -> String {
///         match field {
///             "name" => self.name.clone(),
///             "age" => self.age.map(|a| a.to_string()).unwrap_or_default(),
///             _ => String::new(),
///         }
///     }
/// }
///
/// impl Validate for User {
///     fn validate(&self) -> ValidationResult {
///         USER_SPEC.validate(self)
///     }
/// }
///
/// assert!(User { name: "toqoz".into(), age: None }.validate().ok);
/// assert!(!User { name: String::new(), age: Some(22) }.validate().ok);
/// ```
pub trait Validate {
    fn validate(&self) -> ValidationResult;

    /// `validate` as a `Result`
    fn check(&self) -> Result<(), crate::ValidationErrors> {
        self.validate().into_result()
    }
}
