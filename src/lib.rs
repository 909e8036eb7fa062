// Formspec - declarative form validation for Rust
//
// Attach per-field rules to a specification, then validate any key/value
// source (request forms, query strings, JSON bodies, models) against it.

// Re-export core functionality
pub use formspec_core::*;

// Re-export the logging crate
#[cfg(feature = "log")]
pub use formspec_log as log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        FnForm, Form, FormData, Formspec, MessageCatalog, Rule, RuleFn, RuleSet, Validate,
        ValidationError, ValidationErrors, ValidationResult, filters, rule_fn, rules,
    };
}
