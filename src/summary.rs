use std::fmt::Write;
use std::path::Path;

use crate::constants::SAMPLE_SIZE;
use crate::pipeline::{PersistOutcome, PipelineResult};
use crate::types::LicenseReport;

/// Console summary of a finished run.
pub fn render_summary(result: &PipelineResult, persisted: &PersistOutcome) -> String {
    let mut out = String::new();
    match persisted {
        PersistOutcome::Report(path) => render_report(&mut out, &result.report, path),
        PersistOutcome::Debug(path) => {
            let _ = writeln!(out, "No companies data found in the response");
            if let Some(failure) = &result.extraction_failure {
                let _ = writeln!(out, "Reason: {}", failure);
            }
            match path {
                Some(path) => {
                    let _ = writeln!(out, "Debug information saved to '{}'", path.display());
                }
                None => {
                    let _ = writeln!(out, "Could not save debug info");
                }
            }
        }
    }
    if !result.rejected.is_empty() {
        let _ = writeln!(out, "\n{} companies could not be processed:", result.rejected.len());
        for rejected in &result.rejected {
            let _ = writeln!(out, "   - company {}: {}", rejected.index, rejected.reason);
        }
    }
    out
}

fn render_report(out: &mut String, report: &LicenseReport, path: &Path) {
    let _ = writeln!(out, "\nSuccessfully processed {} companies", report.total_companies);
    let _ = writeln!(out, "Data saved to '{}'", path.display());

    let _ = writeln!(out, "\nSample of first {} companies:", SAMPLE_SIZE);
    for (i, company) in report.companies.iter().take(SAMPLE_SIZE).enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {} licensed individuals",
            i + 1,
            company.company_name,
            company.total_licensed_individuals
        );
    }

    let _ = writeln!(out, "\nStatistics:");
    let _ = writeln!(out, "Average ROs: {}", report.average_ro_count);
    let _ = writeln!(out, "Average OLIs: {}", report.average_oli_count);
    let _ = writeln!(out, "Average Total: {}", report.average_total_count);
    let _ = writeln!(out, "Average RO Percentage: {}%", report.average_ro_percentage);
}
