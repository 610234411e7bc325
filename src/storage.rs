use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::apis::Envelope;
use crate::error::Result;
use crate::normalize::json_type_name;
use crate::types::LicenseReport;

/// What gets saved when an envelope yields no companies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugArtifact {
    pub result_type: String,
    /// Top-level keys, when the envelope is an object
    pub result_keys: Option<Vec<String>>,
    pub json_data: Value,
}

impl DebugArtifact {
    pub fn from_envelope(envelope: &Envelope) -> Self {
        Self {
            result_type: json_type_name(envelope).to_string(),
            result_keys: envelope
                .as_object()
                .map(|obj| obj.keys().cloned().collect()),
            json_data: envelope.clone(),
        }
    }
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json_content = serde_json::to_string_pretty(value)?;
    fs::write(path, json_content)?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Write the report as pretty-printed JSON (two-space indent).
pub fn write_report(path: &Path, report: &LicenseReport) -> Result<()> {
    write_pretty(path, report)
}

pub fn read_report(path: &Path) -> Result<LicenseReport> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn write_debug_artifact(path: &Path, artifact: &DebugArtifact) -> Result<()> {
    write_pretty(path, artifact)
}

/// Load a previously saved provider envelope for offline reprocessing.
pub fn read_envelope(path: &Path) -> Result<Envelope> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
