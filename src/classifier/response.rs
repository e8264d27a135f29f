use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    document::{DocumentRecord, DATE_FORMAT},
    errors::ClassificationError,
};

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").unwrap());

/// Parses the classifier's reply into a record.
///
/// Accepts a bare JSON object or one wrapped in a Markdown code fence.
/// Blank or `null` fields and dates not in `YYYY-MM-DD` form are treated as
/// absent.
pub fn parse_classification(raw: &str) -> Result<DocumentRecord, ClassificationError> {
    let body = strip_code_fence(raw.trim());
    let value: Value = serde_json::from_str(body)?;
    let fields = value.as_object().ok_or(ClassificationError::NotAnObject)?;

    let kind = string_field(fields, "document_type")
        .map(|kind| kind.to_ascii_lowercase())
        .unwrap_or_else(|| "unknown".to_string());

    let record = match kind.as_str() {
        "bank_statement" => DocumentRecord::BankStatement {
            bank_name: string_field(fields, "bank_name"),
            start_date: date_field(fields, "start_date"),
            end_date: date_field(fields, "end_date"),
        },
        "expense" => DocumentRecord::Expense {
            vendor: string_field(fields, "vendor"),
            date: date_field(fields, "date"),
        },
        // "sprintpoint_invoice" is the kind name older prompts asked for
        "outgoing_invoice" | "sprintpoint_invoice" => DocumentRecord::OutgoingInvoice,
        _ => DocumentRecord::Unknown { kind },
    };
    Ok(record)
}

fn strip_code_fence(text: &str) -> &str {
    if !text.contains("```") {
        return text;
    }
    CODE_FENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn date_field(fields: &Map<String, Value>, key: &str) -> Option<NaiveDate> {
    let raw = string_field(fields, key)?;
    match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            debug!(field = key, value = %raw, error = %err, "ignoring unparseable date");
            None
        }
    }
}
