//! Declarative form validation
//!
//! A [`Formspec`] is an ordered list of per-field [`Rule`]s. Each rule reads
//! one field from a [`Form`], runs its filters, optionally skips blank
//! values, and calls its rule function. `validate` runs every rule and
//! collects one [`ValidationError`] per failure, in attachment order.
//!
//! # Examples
//!
//! ## Basic Validation
//!
//! ```
//! use formspec_core::{rules, Formspec, FormData};
//!
//! let mut spec = Formspec::new();
//! spec.rule("name", rules::required());
//! spec.rule("age", rules::int()).message("must be integer. ok?").allow_blank();
//! spec.rule("nick", rules::required()).full_message("Please enter your cool nick.");
//!
//! let form = FormData::new().with("age", "invalid int");
//! let result = spec.validate(&form);
//!
//! assert!(!result.ok);
//! assert_eq!(
//!     result.messages(),
//!     vec!["name is required.", "age must be integer. ok?", "Please enter your cool nick."]
//! );
//! ```
//!
//! ## Filters
//!
//! ```
//! use formspec_core::{filters, rules, Formspec, FormData};
//!
//! let mut spec = Formspec::new();
//! spec.rule("name", rules::required()).filter(filters::trim());
//!
//! assert!(!spec.validate(&FormData::new().with("name", "  \n")).ok);
//! ```
//!
//! ## JSON Output
//!
//! ```
//! use formspec_core::{rules, Formspec};
//!
//! let mut spec = Formspec::new();
//! spec.rule("email", rules::required());
//!
//! let body = serde_json::json!({ "email": "" });
//! let result = spec.validate(&body);
//! assert_eq!(
//!     result.to_json(),
//!     serde_json::json!({
//!         "ok": false,
//!         "errors": [{ "field": "email", "message": "email is required." }]
//!     })
//! );
//! ```

mod config;
mod error;
pub mod filters;
mod form;
mod rule;
pub mod rules;
mod spec;
mod traits;

pub use config::*;
pub use error::*;
pub use form::*;
pub use rule::*;
pub use rules::RuleSet;
pub use spec::*;
pub use traits::*;
