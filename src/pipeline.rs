use metrics::{counter, histogram};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::apis::{Envelope, EnvelopeProvider};
use crate::config::OutputConfig;
use crate::constants::COMPANIES_KEY;
use crate::error::{ExtractionFailure, Result, ValidationError};
use crate::normalize::{json_type_name, LicenseNormalizer, Normalizer};
use crate::stats::calculate_statistics;
use crate::storage::{self, DebugArtifact};
use crate::types::{LicenseRecord, LicenseReport, RawRecord};

/// The raw company list located in an envelope, or why it wasn't there
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Found(Vec<RawRecord>),
    Failed(ExtractionFailure),
}

impl Extraction {
    /// The extracted companies; a failed extraction is an empty list.
    pub fn into_companies(self) -> Vec<RawRecord> {
        match self {
            Extraction::Found(companies) => companies,
            Extraction::Failed(_) => Vec::new(),
        }
    }

    pub fn failure(&self) -> Option<&ExtractionFailure> {
        match self {
            Extraction::Found(_) => None,
            Extraction::Failed(failure) => Some(failure),
        }
    }
}

/// A raw record the normalizer refused, kept with its position and payload
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    pub index: usize,
    pub reason: ValidationError,
    pub raw: RawRecord,
}

/// Accepted and rejected records from one pass over the raw list, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOutcome {
    pub accepted: Vec<LicenseRecord>,
    pub rejected: Vec<RejectedRecord>,
    /// Number of individual fields that fell back to a default
    pub defaulted_fields: usize,
}

/// Result of a complete pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub report: LicenseReport,
    pub extracted: usize,
    pub rejected: Vec<RejectedRecord>,
    pub extraction_failure: Option<ExtractionFailure>,
}

/// Which artifact a run left on disk
#[derive(Debug, Clone, PartialEq)]
pub enum PersistOutcome {
    Report(PathBuf),
    /// Nothing was extracted; the debug artifact path if it could be written
    Debug(Option<PathBuf>),
}

/// Locate the company list under the `companies` key of the envelope.
pub fn extract_companies(envelope: &Envelope) -> Extraction {
    let obj = match envelope.as_object() {
        Some(obj) => obj,
        None => {
            return Extraction::Failed(ExtractionFailure::NotAnObject(json_type_name(envelope)))
        }
    };
    match obj.get(COMPANIES_KEY) {
        Some(serde_json::Value::Array(companies)) => Extraction::Found(companies.clone()),
        Some(other) => Extraction::Failed(ExtractionFailure::NotAList {
            key: COMPANIES_KEY,
            found: json_type_name(other),
        }),
        None => Extraction::Failed(ExtractionFailure::MissingKey(COMPANIES_KEY)),
    }
}

pub struct Pipeline {
    normalizer: Box<dyn Normalizer + Send + Sync>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Box::new(LicenseNormalizer))
    }
}

impl Pipeline {
    pub fn new(normalizer: Box<dyn Normalizer + Send + Sync>) -> Self {
        Self { normalizer }
    }

    /// Normalize every raw record in order. A bad record is set aside with its
    /// index and never stops the rest.
    pub fn process_companies(&self, raw_companies: &[RawRecord]) -> ProcessOutcome {
        let mut outcome = ProcessOutcome::default();

        for (i, raw) in raw_companies.iter().enumerate() {
            match self.normalizer.normalize(raw) {
                Ok(normalized) => {
                    if !normalized.warnings.is_empty() {
                        debug!(
                            "Company {} had defaulted fields: {}",
                            i,
                            normalized.warnings.join(", ")
                        );
                    }
                    outcome.defaulted_fields += normalized.warnings.len();
                    outcome.accepted.push(normalized.record);
                }
                Err(reason) => {
                    warn!("Error processing company {}: {}", i, reason);
                    warn!("Problematic data: {}", raw);
                    outcome.rejected.push(RejectedRecord {
                        index: i,
                        reason,
                        raw: raw.clone(),
                    });
                }
            }
        }

        counter!("sfc_records_normalized_total").increment(outcome.accepted.len() as u64);
        counter!("sfc_records_rejected_total").increment(outcome.rejected.len() as u64);
        outcome
    }

    /// Extract, normalize and aggregate one envelope into a report.
    #[instrument(skip(self, envelope))]
    pub fn run(&self, envelope: &Envelope) -> PipelineResult {
        let t_pipeline = Instant::now();

        let extraction = extract_companies(envelope);
        let extraction_failure = extraction.failure().cloned();
        if let Some(failure) = &extraction_failure {
            warn!("Could not find companies data in the expected location: {}", failure);
            counter!("sfc_extraction_failures_total").increment(1);
        }
        let raw_companies = extraction.into_companies();
        info!("Extracted {} companies", raw_companies.len());
        counter!("sfc_records_extracted_total").increment(raw_companies.len() as u64);

        let outcome = self.process_companies(&raw_companies);
        let stats = calculate_statistics(&outcome.accepted);
        info!(
            "Processed {} companies ({} rejected, {} defaulted fields)",
            stats.total_companies,
            outcome.rejected.len(),
            outcome.defaulted_fields
        );

        histogram!("sfc_pipeline_duration_seconds").record(t_pipeline.elapsed().as_secs_f64());

        PipelineResult {
            report: LicenseReport::new(outcome.accepted, stats),
            extracted: raw_companies.len(),
            rejected: outcome.rejected,
            extraction_failure,
        }
    }

    /// Fetch the page through a provider, then run the pipeline on its envelope.
    #[instrument(skip(self, provider), fields(provider = provider.provider_name()))]
    pub async fn scrape(
        &self,
        provider: &dyn EnvelopeProvider,
        url: &str,
    ) -> Result<(Envelope, PipelineResult)> {
        info!("Starting scrape...");
        let envelope = provider.fetch_envelope(url).await?;
        info!("Scrape completed successfully");

        let result = self.run(&envelope);
        Ok((envelope, result))
    }

    /// Write the report when anything was extracted; otherwise save what the
    /// envelope looked like. A failed debug write is logged, not returned.
    pub fn persist(
        &self,
        envelope: &Envelope,
        result: &PipelineResult,
        output: &OutputConfig,
    ) -> Result<PersistOutcome> {
        if result.extracted > 0 {
            storage::write_report(&output.report_path, &result.report)?;
            info!("Saved report to {}", output.report_path.display());
            return Ok(PersistOutcome::Report(output.report_path.clone()));
        }

        let artifact = DebugArtifact::from_envelope(envelope);
        match storage::write_debug_artifact(&output.debug_path, &artifact) {
            Ok(()) => {
                info!("Debug information saved to {}", output.debug_path.display());
                Ok(PersistOutcome::Debug(Some(output.debug_path.clone())))
            }
            Err(e) => {
                error!("Could not save debug info: {}", e);
                Ok(PersistOutcome::Debug(None))
            }
        }
    }
}
