use serde::{Deserialize, Serialize};

use crate::evidence::{Finding, ValidationStatus};
use crate::report::EvidenceSummary;

/// On-disk record of one validation run. Written once and never rewritten;
/// repeated runs over the same document produce new manifests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRunManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub document_id: String,
    pub source_path: String,
    pub source_sha256: String,
    pub rules_version: String,
    pub test_date: String,
    pub status: ValidationStatus,
    pub findings: Vec<Finding>,
    pub evidence: EvidenceSummary,
}
