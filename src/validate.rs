//! # Request Validation
//!
//! Checks incoming JSON before it reaches the composers or the settings
//! store. Every check runs; all problems are reported together in one
//! [`ValidationError`].
//!
//! Composition itself is lenient (malformed items are skipped), so these
//! rules are the strict gate for HTTP clients.

use serde_json::Value;

use crate::error::ValidationError;
use crate::printer::PaperSize;
use crate::receipt::{amount_value, text_value};

pub const MAX_ITEM_NAME: usize = 50;
pub const MAX_STORE_NAME: usize = 100;
pub const MAX_STORE_ADDRESS: usize = 200;
pub const MAX_STORE_PHONE: usize = 20;
pub const MAX_STORE_FOOTER: usize = 200;

/// Collects messages and turns them into a result.
#[derive(Debug, Default)]
struct Report {
    errors: Vec<String>,
}

impl Report {
    fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Validate a receipt print request.
///
/// ## Example
///
/// ```
/// use serde_json::json;
/// use struk::validate::validate_receipt;
///
/// assert!(validate_receipt(&json!({"items": [{"name": "KOPI", "qty": 2, "price": 10000}]})).is_ok());
/// assert!(validate_receipt(&json!({"items": []})).is_err());
/// ```
pub fn validate_receipt(data: &Value) -> Result<(), ValidationError> {
    let mut report = Report::default();

    let Some(object) = data.as_object() else {
        report.push("Request body must be a JSON object");
        return report.finish();
    };

    match object.get("items") {
        None | Some(Value::Null) => report.push("Field \"items\" is required"),
        Some(Value::Array(items)) if items.is_empty() => {
            report.push("Items must not be empty")
        }
        Some(Value::Array(items)) => {
            for (index, item) in items.iter().enumerate() {
                check_item(&mut report, index + 1, item);
            }
        }
        Some(_) => report.push("Field \"items\" must be an array"),
    }

    for field in ["trx_id", "cashier", "notes"] {
        match object.get(field) {
            None | Some(Value::Null) => {}
            Some(value) if text_value(value).is_some() => {}
            Some(_) => report.push(format!("{} must be a string or number", field)),
        }
    }
    match object.get("payment_amount") {
        None | Some(Value::Null) => {}
        Some(value) if amount_value(value).is_some() => {}
        Some(_) => report.push("payment_amount must be a number"),
    }

    report.finish()
}

fn check_item(report: &mut Report, n: usize, item: &Value) {
    match item.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => {
            if char_len(name) > MAX_ITEM_NAME {
                report.push(format!(
                    "Item {}: name is too long (max {} characters)",
                    n, MAX_ITEM_NAME
                ));
            }
        }
        _ => report.push(format!("Item {}: name is required (string)", n)),
    }

    match item.get("qty").and_then(Value::as_f64) {
        Some(qty) if qty > 0.0 => {}
        _ => report.push(format!("Item {}: qty must be a positive number", n)),
    }

    match item.get("price").and_then(Value::as_f64) {
        Some(price) if price >= 0.0 => {}
        _ => report.push(format!("Item {}: price must be a non-negative number", n)),
    }
}

/// Validate a (partial) store settings object.
///
/// Absent fields are fine; present ones must have the right type and length.
pub fn validate_store_settings(data: &Value) -> Result<(), ValidationError> {
    let mut report = Report::default();

    let Some(object) = data.as_object() else {
        report.push("Request body must be a JSON object");
        return report.finish();
    };

    let text_rules = [
        ("store_name", true, MAX_STORE_NAME),
        ("store_address", true, MAX_STORE_ADDRESS),
        ("store_phone", false, MAX_STORE_PHONE),
        ("store_footer", false, MAX_STORE_FOOTER),
    ];

    for (field, required_text, max) in text_rules {
        match object.get(field) {
            None => {}
            Some(Value::String(s)) => {
                if required_text && s.trim().is_empty() {
                    report.push(format!("{} must not be empty", field));
                } else if char_len(s) > max {
                    report.push(format!("{} is too long (max {} characters)", field, max));
                }
            }
            Some(_) => report.push(format!("{} must be a string", field)),
        }
    }

    if let Some(paper) = object.get("paper_size") {
        let known = paper
            .as_str()
            .is_some_and(|p| PaperSize::SELECTORS.contains(&p));
        if !known {
            report.push(format!(
                "paper_size must be one of {}",
                PaperSize::SELECTORS.join(", ")
            ));
        }
    }

    report.finish()
}

/// Validate a printer selection.
pub fn validate_printer_name(value: Option<&Value>) -> Result<(), ValidationError> {
    let mut report = Report::default();

    match value {
        None | Some(Value::Null) => report.push("printer_name is required"),
        Some(Value::String(name)) if name.trim().is_empty() => {
            report.push("printer_name must not be empty")
        }
        Some(Value::String(_)) => {}
        Some(_) => report.push("printer_name must be a string"),
    }

    report.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn errors(result: Result<(), ValidationError>) -> Vec<String> {
        result.unwrap_err().errors
    }

    #[test]
    fn test_valid_receipt() {
        let data = json!({
            "items": [
                {"name": "KOPI", "qty": 2, "price": 10000},
                {"name": "AIR", "qty": 0.5, "price": 0}
            ],
            "cashier": "Budi"
        });
        assert!(validate_receipt(&data).is_ok());
    }

    #[test]
    fn test_receipt_must_be_object() {
        assert_eq!(
            errors(validate_receipt(&json!([1, 2]))),
            vec!["Request body must be a JSON object"]
        );
    }

    #[test]
    fn test_receipt_items_shape() {
        assert_eq!(
            errors(validate_receipt(&json!({}))),
            vec!["Field \"items\" is required"]
        );
        assert_eq!(
            errors(validate_receipt(&json!({"items": "KOPI"}))),
            vec!["Field \"items\" must be an array"]
        );
        assert_eq!(
            errors(validate_receipt(&json!({"items": []}))),
            vec!["Items must not be empty"]
        );
    }

    #[test]
    fn test_receipt_optional_fields() {
        let items = json!([{"name": "KOPI", "qty": 1, "price": 1000}]);
        let ok = json!({"items": items, "trx_id": 1001, "cashier": null, "payment_amount": "5000"});
        assert!(validate_receipt(&ok).is_ok());

        let bad = json!({
            "items": items,
            "trx_id": {"id": 1},
            "notes": ["a"],
            "payment_amount": "lima ribu"
        });
        assert_eq!(
            errors(validate_receipt(&bad)),
            vec![
                "trx_id must be a string or number",
                "notes must be a string or number",
                "payment_amount must be a number",
            ]
        );
    }

    #[test]
    fn test_every_item_problem_is_reported() {
        let data = json!({
            "items": [
                {"name": "  ", "qty": 0, "price": -1},
                {"name": "X".repeat(51), "qty": "2", "price": 100}
            ]
        });
        assert_eq!(
            errors(validate_receipt(&data)),
            vec![
                "Item 1: name is required (string)",
                "Item 1: qty must be a positive number",
                "Item 1: price must be a non-negative number",
                "Item 2: name is too long (max 50 characters)",
                "Item 2: qty must be a positive number",
            ]
        );
    }

    #[test]
    fn test_store_settings_partial_ok() {
        assert!(validate_store_settings(&json!({"store_footer": "Sampai jumpa"})).is_ok());
        assert!(validate_store_settings(&json!({"store_phone": ""})).is_ok());
        assert!(validate_store_settings(&json!({"paper_size": "58mm"})).is_ok());
    }

    #[test]
    fn test_store_settings_rules() {
        let data = json!({
            "store_name": " ",
            "store_address": 12,
            "store_phone": "0".repeat(21),
            "store_footer": "F".repeat(201),
            "paper_size": "76mm"
        });
        assert_eq!(
            errors(validate_store_settings(&data)),
            vec![
                "store_name must not be empty",
                "store_address must be a string",
                "store_phone is too long (max 20 characters)",
                "store_footer is too long (max 200 characters)",
                "paper_size must be one of 80mm, 58mm",
            ]
        );
    }

    #[test]
    fn test_printer_name() {
        assert!(validate_printer_name(Some(&json!("POS-80"))).is_ok());
        assert_eq!(
            errors(validate_printer_name(None)),
            vec!["printer_name is required"]
        );
        assert_eq!(
            errors(validate_printer_name(Some(&json!("   ")))),
            vec!["printer_name must not be empty"]
        );
        assert_eq!(
            errors(validate_printer_name(Some(&json!(7)))),
            vec!["printer_name must be a string"]
        );
    }
}
