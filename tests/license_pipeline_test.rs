use anyhow::Result;
use chrono::NaiveDate;
use sfc_license_scraper::config::OutputConfig;
use sfc_license_scraper::error::ValidationError;
use sfc_license_scraper::pipeline::{PersistOutcome, Pipeline};
use sfc_license_scraper::storage;
use std::path::Path;
use tempfile::tempdir;

fn fixture_envelope() -> Result<serde_json::Value> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/envelope.json");
    Ok(storage::read_envelope(&path)?)
}

#[test]
fn test_fixture_envelope_end_to_end() -> Result<()> {
    let envelope = fixture_envelope()?;
    let result = Pipeline::default().run(&envelope);

    assert_eq!(result.extracted, 4);
    assert_eq!(result.rejected.len(), 1);
    assert_eq!(result.rejected[0].index, 2);
    assert_eq!(result.rejected[0].reason, ValidationError::MissingField("company_name"));

    let report = &result.report;
    assert_eq!(report.total_companies, 3);
    assert_eq!(report.average_ro_count, 14.0);
    assert_eq!(report.average_oli_count, 30.0);
    assert_eq!(report.average_total_count, 44.0);
    // (10 * 100 + 100 * 30) / 132, the firm with no percentage still weighs in
    assert_eq!(report.average_ro_percentage, 30.3);

    let hsbc = &report.companies[0];
    assert_eq!(hsbc.company_name, "Hsbc Broking Securities (Asia) Ltd");
    assert_eq!(hsbc.oli_change, -2);
    assert_eq!(hsbc.historical_ro_change, Some(3));
    assert_eq!(hsbc.historical_oli_change, Some(0));
    assert_eq!(hsbc.oli_percentage, Some(90.0));
    assert_eq!(hsbc.first_licensed_date, NaiveDate::from_ymd_opt(2003, 4, 1));
    assert_eq!(hsbc.latest_licensed_date, None);
    assert_eq!(
        hsbc.activities,
        vec!["Dealing In Securities", "Advising On Corporate Finance"]
    );

    let morgan = &report.companies[1];
    assert_eq!(morgan.rank, Some(2));
    assert_eq!(morgan.company_name, "Morgan Stanley Asia Ltd");
    assert_eq!(morgan.responsible_officers, 30);
    assert_eq!(morgan.other_licensed_individuals, 0);
    assert_eq!(morgan.ro_change, 0);
    assert_eq!(morgan.ro_percentage, Some(100.0));
    assert!(morgan.activities.is_empty());

    let tiny = &report.companies[2];
    assert_eq!(tiny.company_name, "Tiny Advisers Ltd");
    assert_eq!(tiny.ro_percentage, None);

    Ok(())
}

#[test]
fn test_report_artifact_round_trip() -> Result<()> {
    let dir = tempdir()?;
    let output = OutputConfig {
        report_path: dir.path().join("sfc_license_data_cleaned.json"),
        debug_path: dir.path().join("debug_response.json"),
    };

    let envelope = fixture_envelope()?;
    let pipeline = Pipeline::default();
    let result = pipeline.run(&envelope);
    let persisted = pipeline.persist(&envelope, &result, &output)?;

    assert_eq!(persisted, PersistOutcome::Report(output.report_path.clone()));
    let reloaded = storage::read_report(&output.report_path)?;
    assert_eq!(reloaded, result.report);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output.report_path)?)?;
    assert_eq!(raw["companies"][0]["first_licensed_date"], "2003-04-01");
    assert!(raw["companies"][0]["latest_licensed_date"].is_null());
    assert_eq!(raw["total_companies"], 3);

    Ok(())
}
