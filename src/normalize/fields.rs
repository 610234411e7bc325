//! Total coercion functions for individual raw fields.
//!
//! Every function here accepts whatever the provider sent (including a missing
//! key, passed as `None`) and always produces a value of the target type. The
//! returned [`FieldOutcome`] says whether the value was read from the input,
//! whether the input was simply absent, or whether it was present but unusable
//! and a default was substituted.

use chrono::NaiveDate;
use serde_json::Value;

use crate::stats::round2;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome<T> {
    /// The input was usable and converted
    Parsed(T),
    /// The input was missing, null or empty
    Absent(T),
    /// The input was present but could not be converted
    Defaulted(T),
}

impl<T> FieldOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            FieldOutcome::Parsed(v) | FieldOutcome::Absent(v) | FieldOutcome::Defaulted(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            FieldOutcome::Parsed(v) | FieldOutcome::Absent(v) | FieldOutcome::Defaulted(v) => v,
        }
    }

    pub fn was_defaulted(&self) -> bool {
        matches!(self, FieldOutcome::Defaulted(_))
    }
}

/// Upper-cases a character that follows an uncased one and lower-cases every
/// other, so `"o'neil & co. ltd"` becomes `"O'Neil & Co. Ltd"`. Uncased
/// scripts such as CJK count as boundaries.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_is_cased = false;
    for c in input.chars() {
        if prev_is_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_cased = c.is_uppercase() || c.is_lowercase();
    }
    out
}

/// Scalar values rendered as text; containers have no text form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Falsy in the loose sense the provider uses: null, false, zero, or empty.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Trimmed, title-cased text; blank input becomes an empty string.
pub fn clean_string(value: Option<&Value>) -> FieldOutcome<String> {
    let value = match value {
        Some(v) if !is_blank(v) => v,
        _ => return FieldOutcome::Absent(String::new()),
    };
    match scalar_text(value) {
        Some(text) => FieldOutcome::Parsed(title_case(text.trim())),
        None => FieldOutcome::Defaulted(String::new()),
    }
}

fn truncate_float(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    let truncated = f.trunc();
    if truncated < i64::MIN as f64 || truncated > i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_float)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate_float))
        }
        _ => None,
    }
}

/// Integer count or delta. Null becomes 0, anything unconvertible becomes 0,
/// and fractional input is truncated toward zero (`"12.7"` → 12).
pub fn coerce_int(value: Option<&Value>) -> FieldOutcome<i64> {
    match value {
        None | Some(Value::Null) => FieldOutcome::Absent(0),
        Some(v) => match int_from_value(v) {
            Some(n) => FieldOutcome::Parsed(n),
            None => FieldOutcome::Defaulted(0),
        },
    }
}

/// Like [`coerce_int`] but null stays null, for optional integers such as rank.
pub fn coerce_optional_int(value: Option<&Value>) -> FieldOutcome<Option<i64>> {
    match value {
        None | Some(Value::Null) => FieldOutcome::Absent(None),
        Some(v) => match int_from_value(v) {
            Some(n) => FieldOutcome::Parsed(Some(n)),
            None => FieldOutcome::Defaulted(None),
        },
    }
}

/// Percentage rounded to two decimals; null or unconvertible input is null.
pub fn coerce_percentage(value: Option<&Value>) -> FieldOutcome<Option<f64>> {
    let parsed = match value {
        None | Some(Value::Null) => return FieldOutcome::Absent(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed.filter(|f| f.is_finite()) {
        Some(f) => FieldOutcome::Parsed(Some(round2(f))),
        None => FieldOutcome::Defaulted(None),
    }
}

/// Calendar date in `YYYY-MM-DD` form. Never fails: anything else is null.
pub fn parse_date(value: Option<&Value>) -> FieldOutcome<Option<NaiveDate>> {
    let value = match value {
        Some(v) if !is_blank(v) => v,
        _ => return FieldOutcome::Absent(None),
    };
    let parsed = scalar_text(value)
        .and_then(|text| NaiveDate::parse_from_str(&text, DATE_FORMAT).ok());
    match parsed {
        Some(date) => FieldOutcome::Parsed(Some(date)),
        None => FieldOutcome::Defaulted(None),
    }
}

/// Ordered activity names, trimmed and title-cased. Falsy entries are dropped
/// before trimming, so a whitespace-only entry survives as `""`.
/// A bare string is taken as a single activity.
pub fn clean_activities(value: Option<&Value>) -> FieldOutcome<Vec<String>> {
    let items: Vec<&Value> = match value {
        Some(v) if !is_blank(v) => match v {
            Value::Array(items) => items.iter().collect(),
            Value::String(_) => vec![v],
            _ => return FieldOutcome::Defaulted(Vec::new()),
        },
        _ => return FieldOutcome::Absent(Vec::new()),
    };

    let mut skipped_container = false;
    let mut cleaned = Vec::with_capacity(items.len());
    for item in items.into_iter().filter(|item| !is_blank(item)) {
        match scalar_text(item) {
            Some(text) => cleaned.push(title_case(text.trim())),
            None => skipped_container = true,
        }
    }

    if skipped_container {
        FieldOutcome::Defaulted(cleaned)
    } else {
        FieldOutcome::Parsed(cleaned)
    }
}

/// Optional identifier kept as text. Numbers are rendered, other types dropped.
pub fn optional_text(value: Option<&Value>) -> FieldOutcome<Option<String>> {
    match value {
        None | Some(Value::Null) => FieldOutcome::Absent(None),
        Some(Value::String(s)) if s.trim().is_empty() => FieldOutcome::Absent(None),
        Some(Value::String(s)) => FieldOutcome::Parsed(Some(s.trim().to_string())),
        Some(Value::Number(n)) => FieldOutcome::Parsed(Some(n.to_string())),
        Some(_) => FieldOutcome::Defaulted(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn title_case_follows_cased_boundaries() {
        assert_eq!(title_case("HSBC BROKING (ASIA) LTD"), "Hsbc Broking (Asia) Ltd");
        assert_eq!(title_case("o'neil & co. ltd"), "O'Neil & Co. Ltd");
        assert_eq!(title_case("j.p. morgan"), "J.P. Morgan");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("滙豐securities"), "滙豐Securities");
        assert_eq!(title_case("中銀國際 asia ltd"), "中銀國際 Asia Ltd");
    }

    #[test]
    fn clean_string_trims_and_title_cases() {
        assert_eq!(
            clean_string(Some(&json!("  goldman sachs (asia) l.l.c. "))),
            FieldOutcome::Parsed("Goldman Sachs (Asia) L.L.C.".to_string())
        );
        assert_eq!(clean_string(None), FieldOutcome::Absent(String::new()));
        assert_eq!(clean_string(Some(&json!(null))), FieldOutcome::Absent(String::new()));
        assert_eq!(clean_string(Some(&json!(""))), FieldOutcome::Absent(String::new()));
        assert_eq!(clean_string(Some(&json!({"a": 1}))), FieldOutcome::Defaulted(String::new()));
    }

    #[test]
    fn coerce_int_truncates_and_defaults() {
        assert_eq!(coerce_int(Some(&json!("12.7"))).into_value(), 12);
        assert_eq!(coerce_int(Some(&json!(12.7))).into_value(), 12);
        assert_eq!(coerce_int(Some(&json!(-3.9))).into_value(), -3);
        assert_eq!(coerce_int(Some(&json!(" 42 "))).into_value(), 42);
        assert_eq!(coerce_int(Some(&json!("-7"))).into_value(), -7);
        assert_eq!(coerce_int(Some(&json!(true))).into_value(), 1);
        assert_eq!(coerce_int(Some(&json!(null))), FieldOutcome::Absent(0));
        assert_eq!(coerce_int(None), FieldOutcome::Absent(0));
        assert_eq!(coerce_int(Some(&json!("abc"))), FieldOutcome::Defaulted(0));
        assert_eq!(coerce_int(Some(&json!("NaN"))), FieldOutcome::Defaulted(0));
        assert_eq!(coerce_int(Some(&json!([1]))), FieldOutcome::Defaulted(0));
    }

    #[test]
    fn coerce_optional_int_keeps_null() {
        assert_eq!(coerce_optional_int(None).into_value(), None);
        assert_eq!(coerce_optional_int(Some(&json!("3"))).into_value(), Some(3));
        assert!(coerce_optional_int(Some(&json!("first"))).was_defaulted());
    }

    #[test]
    fn coerce_percentage_rounds_to_two_places() {
        assert_eq!(coerce_percentage(Some(&json!(33.3333))).into_value(), Some(33.33));
        assert_eq!(coerce_percentage(Some(&json!("66.666"))).into_value(), Some(66.67));
        assert_eq!(coerce_percentage(Some(&json!(50))).into_value(), Some(50.0));
        assert_eq!(coerce_percentage(Some(&json!(null))), FieldOutcome::Absent(None));
        assert_eq!(coerce_percentage(Some(&json!("n/a"))), FieldOutcome::Defaulted(None));
        assert_eq!(coerce_percentage(Some(&json!("inf"))), FieldOutcome::Defaulted(None));
    }

    #[test]
    fn parse_date_degrades_to_null() {
        assert_eq!(
            parse_date(Some(&json!("2024-01-15"))).into_value(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(parse_date(Some(&json!("2024-13-40"))), FieldOutcome::Defaulted(None));
        assert_eq!(parse_date(Some(&json!("15/01/2024"))), FieldOutcome::Defaulted(None));
        assert_eq!(parse_date(Some(&json!(20240115))), FieldOutcome::Defaulted(None));
        assert_eq!(parse_date(Some(&json!(""))), FieldOutcome::Absent(None));
        assert_eq!(parse_date(None), FieldOutcome::Absent(None));
    }

    #[test]
    fn clean_activities_drops_falsy_entries_and_keeps_order() {
        assert_eq!(
            clean_activities(Some(&json!(["  broker ", "", "Dealer"]))).into_value(),
            vec!["Broker".to_string(), "Dealer".to_string()]
        );
        assert_eq!(
            clean_activities(Some(&json!(["asset management", null, "   ", "advising on securities"])))
                .into_value(),
            vec![
                "Asset Management".to_string(),
                String::new(),
                "Advising On Securities".to_string()
            ]
        );
        assert_eq!(clean_activities(Some(&json!([]))), FieldOutcome::Absent(vec![]));
        assert_eq!(clean_activities(None), FieldOutcome::Absent(vec![]));
        assert_eq!(
            clean_activities(Some(&json!("dealing in futures"))).into_value(),
            vec!["Dealing In Futures".to_string()]
        );
        assert_eq!(clean_activities(Some(&json!(7))), FieldOutcome::Defaulted(vec![]));
    }

    #[test]
    fn optional_text_accepts_strings_and_numbers() {
        assert_eq!(optional_text(Some(&json!(" AAB123 "))).into_value(), Some("AAB123".to_string()));
        assert_eq!(optional_text(Some(&json!(1234))).into_value(), Some("1234".to_string()));
        assert_eq!(optional_text(Some(&json!(""))).into_value(), None);
        assert!(optional_text(Some(&json!(["x"]))).was_defaulted());
    }
}
