pub mod fields;

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::{LicenseRecord, RawRecord};
use fields::FieldOutcome;

/// Keys a raw company must carry. Their values may still be null or malformed
/// and get coerced; only a missing key rejects the record.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "company_name",
    "company_url",
    "responsible_officers",
    "other_licensed_individuals",
    "total_licensed_individuals",
    "ro_change",
    "oli_change",
    "total_change",
    "ro_percentage",
];

/// A cleaned company plus notes about fields that had to be defaulted
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCompany {
    pub record: LicenseRecord,
    /// Names of fields whose raw value was present but unusable
    pub warnings: Vec<String>,
}

/// Turns one raw record into a `LicenseRecord`, or says why it can't
pub trait Normalizer {
    fn normalize(&self, raw: &RawRecord) -> Result<NormalizedCompany, ValidationError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LicenseNormalizer;

/// Field reader that remembers which fields fell back to a default
struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
    warnings: Vec<String>,
}

impl<'a> FieldReader<'a> {
    fn new(obj: &'a Map<String, Value>) -> Self {
        Self {
            obj,
            warnings: Vec::new(),
        }
    }

    fn read<T>(&mut self, key: &str, coerce: fn(Option<&Value>) -> FieldOutcome<T>) -> T {
        let outcome = coerce(self.obj.get(key));
        if outcome.was_defaulted() {
            self.warnings.push(key.to_string());
        }
        outcome.into_value()
    }
}

/// Lower-case JSON type name for diagnostics
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Normalizer for LicenseNormalizer {
    fn normalize(&self, raw: &RawRecord) -> Result<NormalizedCompany, ValidationError> {
        let obj = raw
            .as_object()
            .ok_or_else(|| ValidationError::NotAnObject(json_type_name(raw)))?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|key| !obj.contains_key(**key)) {
            return Err(ValidationError::MissingField(*missing));
        }

        // The URL has no sensible default, so it must already be text
        let company_url = match obj.get("company_url") {
            Some(Value::String(url)) => url.trim().to_string(),
            _ => {
                return Err(ValidationError::InvalidField {
                    field: "company_url",
                    expected: "string",
                })
            }
        };

        let mut f = FieldReader::new(obj);
        let record = LicenseRecord {
            rank: f.read("rank", fields::coerce_optional_int),
            company_name: f.read("company_name", fields::clean_string),
            company_url,
            responsible_officers: f.read("responsible_officers", fields::coerce_int),
            other_licensed_individuals: f.read("other_licensed_individuals", fields::coerce_int),
            total_licensed_individuals: f.read("total_licensed_individuals", fields::coerce_int),
            ro_change: f.read("ro_change", fields::coerce_int),
            oli_change: f.read("oli_change", fields::coerce_int),
            total_change: f.read("total_change", fields::coerce_int),
            historical_ro_change: Some(f.read("historical_ro_change", fields::coerce_int)),
            historical_oli_change: Some(f.read("historical_oli_change", fields::coerce_int)),
            historical_total_change: Some(f.read("historical_total_change", fields::coerce_int)),
            ro_percentage: f.read("ro_percentage", fields::coerce_percentage),
            oli_percentage: f.read("oli_percentage", fields::coerce_percentage),
            first_licensed_date: f.read("first_licensed_date", fields::parse_date),
            latest_licensed_date: f.read("latest_licensed_date", fields::parse_date),
            sfc_id: f.read("sfc_id", fields::optional_text),
            activities: f.read("activities", fields::clean_activities),
        };

        Ok(NormalizedCompany {
            record,
            warnings: f.warnings,
        })
    }
}
