use serde_json::{json, Value};

/// JSON Schema sent with the scrape request so the provider extracts rows in
/// the shape `LicenseNormalizer` expects.
pub fn license_report_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "companies": {
                "type": "array",
                "items": license_record_schema()
            },
            "average_ro_count": { "type": "number" },
            "average_oli_count": { "type": "number" },
            "average_total_count": { "type": "number" },
            "average_ro_percentage": { "type": "number" },
            "total_companies": { "type": "integer" }
        },
        "required": ["companies"]
    })
}

fn license_record_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "rank": { "type": ["integer", "null"], "description": "Ranking position of the firm" },
            "company_name": { "type": "string", "description": "Name of the licensed firm" },
            "company_url": { "type": "string", "description": "URL to company details page" },
            "responsible_officers": { "type": "integer", "description": "Number of responsible officers" },
            "other_licensed_individuals": { "type": "integer", "description": "Number of other licensed individuals" },
            "total_licensed_individuals": { "type": "integer", "description": "Total licensed individuals" },
            "ro_change": { "type": "integer", "description": "Change in responsible officers" },
            "oli_change": { "type": "integer", "description": "Change in other licensed individuals" },
            "total_change": { "type": "integer", "description": "Total change in licensed individuals" },
            "historical_ro_change": { "type": ["integer", "null"] },
            "historical_oli_change": { "type": ["integer", "null"] },
            "historical_total_change": { "type": ["integer", "null"] },
            "ro_percentage": { "type": "number", "description": "Percentage of responsible officers" },
            "oli_percentage": { "type": ["number", "null"] },
            "first_licensed_date": { "type": ["string", "null"], "format": "date" },
            "latest_licensed_date": { "type": ["string", "null"], "format": "date" },
            "sfc_id": { "type": ["string", "null"], "description": "SFC unique identifier" },
            "activities": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Types of licensed activities"
            }
        },
        "required": crate::normalize::REQUIRED_FIELDS
    })
}
