//! Split pipeline
//!
//! Orchestrates the complete processing flow by coordinating between the
//! session loader (for input), the split engine (for business logic), and
//! the report writers (for output).
//!
//! # Design
//!
//! The pipeline focuses on orchestration, delegating:
//! - Session parsing and validation to `io::session`
//! - Split computation to `core::compute_split`
//! - Report rendering to `io::report`
//!
//! This separation of concerns keeps the engine pure and the I/O layers
//! independently testable.
//!
//! # Error Handling
//!
//! Fatal errors (file not found, schema violations, unknown payer) are
//! returned as [`SplitError`] and surfaced by the CLI entry point. A
//! session with no participants is not an error: the pipeline writes a
//! short notice instead of a report.

use crate::cli::ReportFormat;
use crate::io::report::write_report;
use crate::io::session::load_session;
use crate::types::SplitError;
use std::io::Write;
use std::path::Path;

/// Run the complete split pipeline for one session file
///
/// 1. Loads and validates the session JSON
/// 2. Applies the `--payer` override, if given
/// 3. Computes the split
/// 4. Renders the report in the requested format
///
/// # Arguments
///
/// * `session_path` - Path to the session JSON file
/// * `format` - Output format for the report
/// * `payer_override` - Optional participant id or name replacing the
///   session's `payerId`
/// * `output` - Destination writer (stdout in the CLI)
///
/// # Returns
///
/// The session's participant names on success, so the caller can feed
/// them into the contact book.
///
/// # Errors
///
/// * [`SplitError::FileNotFound`] if the session file does not exist
/// * [`SplitError::Schema`] / [`SplitError::Validation`] if the session
///   is malformed
/// * [`SplitError::UnknownPayer`] if `payer_override` matches no
///   participant
pub fn process_session(
    session_path: &Path,
    format: &ReportFormat,
    payer_override: Option<&str>,
    output: &mut dyn Write,
) -> Result<Vec<String>, SplitError> {
    let mut session = load_session(session_path)?;

    if let Some(wanted) = payer_override {
        let resolved = session
            .participants
            .iter()
            .find(|p| p.id == wanted || p.name == wanted)
            .map(|p| p.id.clone())
            .ok_or_else(|| SplitError::unknown_payer(wanted))?;
        session.payer_id = Some(resolved);
    }

    let names: Vec<String> = session.participants.iter().map(|p| p.name.clone()).collect();

    match session.compute() {
        Some(summary) => write_report(&summary, format, output)?,
        None => writeln!(output, "Nothing to split: the session has no participants.")?,
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    const SESSION_JSON: &str = r#"{
        "participants": [
            {"id": "p-0", "name": "Budi"},
            {"id": "p-1", "name": "Sari"}
        ],
        "items": [
            {
                "id": "i-0",
                "description": "Nasi goreng",
                "price": 30000,
                "quantity": 2,
                "sharedBy": ["p-0", "p-1"]
            }
        ],
        "ppn": 0,
        "deliveryFee": 0,
        "serviceTax": {"type": "amount", "value": 0},
        "globalDiscount": {"type": "amount", "value": 0},
        "rounding": 0,
        "payerId": "p-0"
    }"#;

    fn write_session(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_process_session_renders_text_report() {
        let file = write_session(SESSION_JSON);
        let mut output = Vec::new();

        let names =
            process_session(file.path(), &ReportFormat::Text, None, &mut output).unwrap();

        assert_eq!(names, vec!["Budi", "Sari"]);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Budi bayar Rp30.000"));
        assert!(text.contains("- Sari -> Budi: Rp30.000"));
    }

    #[rstest]
    #[case::by_id("p-1")]
    #[case::by_name("Sari")]
    fn test_payer_override_resolves(#[case] wanted: &str) {
        let file = write_session(SESSION_JSON);
        let mut output = Vec::new();

        process_session(file.path(), &ReportFormat::Text, Some(wanted), &mut output)
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("- Budi -> Sari: Rp30.000"));
    }

    #[test]
    fn test_unknown_payer_override_is_fatal() {
        let file = write_session(SESSION_JSON);
        let mut output = Vec::new();

        let result =
            process_session(file.path(), &ReportFormat::Text, Some("Joko"), &mut output);

        assert!(matches!(result, Err(SplitError::UnknownPayer { .. })));
        assert!(output.is_empty());
    }

    #[test]
    fn test_missing_session_file() {
        let mut output = Vec::new();
        let result = process_session(
            Path::new("definitely-not-here.json"),
            &ReportFormat::Text,
            None,
            &mut output,
        );
        assert!(matches!(result, Err(SplitError::FileNotFound { .. })));
    }

    #[test]
    fn test_empty_session_writes_notice() {
        let json = r#"{
            "participants": [],
            "items": [],
            "ppn": 0,
            "deliveryFee": 0,
            "serviceTax": {"type": "amount", "value": 0},
            "globalDiscount": {"type": "amount", "value": 0},
            "rounding": 0
        }"#;
        let file = write_session(json);
        let mut output = Vec::new();

        let names =
            process_session(file.path(), &ReportFormat::Text, None, &mut output).unwrap();

        assert!(names.is_empty());
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("no participants"));
    }
}
