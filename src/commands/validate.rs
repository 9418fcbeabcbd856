use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::evidence::Severity;
use crate::extraction::ExtractionResult;
use crate::model::ValidationRunManifest;
use crate::report::{build_record, RULES_VERSION};
use crate::util::{now_utc_string, sha256_file, utc_compact_string, write_json_pretty};

pub fn run(args: ValidateArgs) -> Result<()> {
    let raw = fs::read(&args.extraction_path)
        .with_context(|| format!("failed to read {}", args.extraction_path.display()))?;
    let extraction: ExtractionResult = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", args.extraction_path.display()))?;

    if extraction.status == "failed" {
        bail!(
            "extraction for document {} failed upstream: {}",
            extraction.document_id,
            extraction
                .error_message
                .as_deref()
                .unwrap_or("unknown error")
        );
    }

    let test_date = args
        .test_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let record = build_record(&extraction, test_date);

    let error_count = count_severity(&record.findings, Severity::Error);
    let warning_count = count_severity(&record.findings, Severity::Warning);
    let info_count = count_severity(&record.findings, Severity::Info);

    let manifest = ValidationRunManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        document_id: extraction.document_id.clone(),
        source_path: args.extraction_path.display().to_string(),
        source_sha256: sha256_file(&args.extraction_path)?,
        rules_version: RULES_VERSION.to_string(),
        test_date: test_date.to_string(),
        status: record.status,
        findings: record.findings,
        evidence: record.evidence,
    };

    let report_path = args
        .report_path
        .unwrap_or_else(|| default_report_path(&args.extraction_path));
    write_json_pretty(&report_path, &manifest)?;

    info!(
        document_id = %manifest.document_id,
        test_date = %manifest.test_date,
        status = ?manifest.status,
        errors = error_count,
        warnings = warning_count,
        infos = info_count,
        report_path = %report_path.display(),
        "validation run recorded"
    );

    Ok(())
}

// Records are append-only; the default name embeds a timestamp so a rerun
// never overwrites an earlier record.
fn default_report_path(extraction_path: &Path) -> PathBuf {
    let stem = extraction_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "extraction".to_string());
    let filename = format!("{stem}.validation.{}.json", utc_compact_string(Utc::now()));
    extraction_path.with_file_name(filename)
}

fn count_severity(findings: &[crate::evidence::Finding], severity: Severity) -> usize {
    findings
        .iter()
        .filter(|finding| finding.severity == severity)
        .count()
}
