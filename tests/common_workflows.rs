//! Integration tests for common formspec workflows.
//!
//! These tests drive the crate the way request handlers and models use it.

use formspec::prelude::*;
use serde::Deserialize;

// =============================================================================
// Handler-style glue
// =============================================================================

/// Minimal stand-in for a handler response.
struct Response {
    status: u16,
    body: String,
}

fn sign_up_spec() -> Formspec {
    let mut spec = Formspec::new();
    spec.rule("name", rules::required());
    spec.rule("age", rules::int())
        .message("must be integer. ok?")
        .allow_blank();
    spec.rule("nick", rules::required())
        .full_message("Please enter your cool nickname.");
    spec
}

fn text_handler(spec: &Formspec, query: &str) -> Response {
    let form = match FormData::from_query(query) {
        Ok(form) => form,
        Err(_) => {
            return Response {
                status: 400,
                body: "bad request".to_string(),
            };
        }
    };

    let result = spec.validate(&form);
    if !result.ok {
        let body = result
            .errors
            .iter()
            .map(|e| format!("Validation error in {}. {}\n", e.field, e.message))
            .collect();
        return Response { status: 403, body };
    }

    Response {
        status: 200,
        body: "ok".to_string(),
    }
}

fn json_handler(spec: &Formspec, query: &str) -> Response {
    let form = FormData::from_query(query).unwrap_or_default();
    let result = spec.validate(&form);

    if result.ok {
        Response {
            status: 200,
            body: serde_json::json!({ "message": "ok" }).to_string(),
        }
    } else {
        Response {
            status: 403,
            body: serde_json::json!({ "errors": result.errors }).to_string(),
        }
    }
}

#[test]
fn test_text_handler_reports_every_field() {
    let response = text_handler(&sign_up_spec(), "age=x");

    assert_eq!(response.status, 403);
    assert_eq!(
        response.body,
        "Validation error in name. name is required.\n\
         Validation error in age. age must be integer. ok?\n\
         Validation error in nick. Please enter your cool nickname.\n"
    );
}

#[test]
fn test_text_handler_accepts_valid_form() {
    let response = text_handler(&sign_up_spec(), "name=ToQoz&nick=toqoz&age=");
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "ok");
}

#[test]
fn test_json_handler_envelope() {
    let response = json_handler(&sign_up_spec(), "name=ToQoz");
    assert_eq!(response.status, 403);

    let body: serde_json::Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "errors": [
                { "field": "nick", "message": "Please enter your cool nickname." }
            ]
        })
    );

    let response = json_handler(&sign_up_spec(), "name=ToQoz&nick=t&age=22");
    assert_eq!(response.status, 200);
}

// =============================================================================
// Models
// =============================================================================

#[derive(Debug, Deserialize)]
struct Product {
    title: String,
    price: f64,
    stock: Option<i64>,
}

impl Form for Product {
    fn form_value(&self, field: &str) -> String {
        match field {
            "title" => self.title.clone(),
            "price" => self.price.to_string(),
            "stock" => self.stock.map(|s| s.to_string()).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

impl Validate for Product {
    fn validate(&self) -> ValidationResult {
        let mut spec = Formspec::new();
        spec.rule("title", rules::required()).filter(filters::trim());
        spec.rule("title", rules::max_len(20));
        spec.rule("price", rules::float_greater_than(0));
        spec.rule("stock", rules::int_greater_than(-1)).allow_blank();
        spec.validate(self)
    }
}

#[test]
fn test_model_from_json_body() {
    let product: Product =
        serde_json::from_str(r#"{"title": "Widget", "price": 9.5, "stock": null}"#).unwrap();
    assert!(product.validate().ok);
    assert!(product.check().is_ok());

    let product: Product =
        serde_json::from_str(r#"{"title": "   ", "price": 0, "stock": -3}"#).unwrap();
    let errors = product.check().unwrap_err();
    let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "title is required.",
            "price must be greater than 0",
            "stock must be greater than -1",
        ]
    );
}

#[test]
fn test_same_spec_for_request_and_raw_json() {
    let spec = sign_up_spec();
    let body = serde_json::json!({ "name": "ToQoz", "age": 22, "nick": "toqoz" });
    assert!(spec.validate(&body).ok);

    let body = serde_json::json!({ "name": "ToQoz", "age": "twenty", "nick": "toqoz" });
    assert_eq!(spec.validate(&body).messages(), vec!["age must be integer. ok?"]);
}

// =============================================================================
// Derived specifications
// =============================================================================

#[test]
fn test_sign_in_and_sign_up_share_rules() {
    let mut sign_in = Formspec::new();
    sign_in.rule("email", rules::format_str(r"^[^@\s]+@[^@\s]+$").unwrap());
    sign_in.rule("password", rules::min_len(8));

    let mut sign_up = sign_in.clone();
    sign_up.rule("password_confirmation", rules::equal_to_field("password"));

    let form = FormData::from_pairs([
        ("email", "toqoz@example.com"),
        ("password", "correct horse"),
        ("password_confirmation", "correct hose"),
    ]);

    assert!(sign_in.validate(&form).ok);
    assert_eq!(
        sign_up.validate(&form).messages(),
        vec!["password_confirmation must be same as password"]
    );
}

#[cfg(feature = "log")]
#[test]
fn test_log_reexport() {
    formspec::log::init();
    assert!(formspec::log::current_level() >= formspec::log::Level::Trace);
}
