use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Split a shared bill among participants
#[derive(Parser, Debug)]
#[command(name = "patungan")]
#[command(about = "Split a shared bill among participants", long_about = None)]
pub struct CliArgs {
    /// Session file describing participants, items, and fees
    #[arg(value_name = "SESSION", help = "Path to the session JSON file")]
    pub session_file: PathBuf,

    /// Output format for the computed split
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "text",
        help = "Report format: 'text', 'csv', or 'json'"
    )]
    pub format: ReportFormat,

    /// Designated payer override
    #[arg(
        long = "payer",
        value_name = "ID-OR-NAME",
        help = "Participant who fronted the bill (overrides the session's payerId)"
    )]
    pub payer: Option<String>,

    /// Contact book to update with this session's participants
    #[arg(
        long = "contacts",
        value_name = "PATH",
        help = "Contact book JSON file; participant names are saved into it after a successful run"
    )]
    pub contacts: Option<PathBuf>,
}

/// Available report formats for the computed split
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Csv,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_format(&["program", "session.json"], ReportFormat::Text)]
    #[case::explicit_text(&["program", "--format", "text", "session.json"], ReportFormat::Text)]
    #[case::explicit_csv(&["program", "--format", "csv", "session.json"], ReportFormat::Csv)]
    #[case::explicit_json(&["program", "--format", "json", "session.json"], ReportFormat::Json)]
    fn test_format_parsing(#[case] args: &[&str], #[case] expected: ReportFormat) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (parsed.format, expected) {
            (ReportFormat::Text, ReportFormat::Text) => (),
            (ReportFormat::Csv, ReportFormat::Csv) => (),
            (ReportFormat::Json, ReportFormat::Json) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.format),
        }
    }

    #[rstest]
    #[case::no_options(&["program", "session.json"], None, None)]
    #[case::payer_by_name(&["program", "--payer", "Budi", "session.json"], Some("Budi"), None)]
    #[case::contacts_path(
        &["program", "--contacts", "contacts.json", "session.json"],
        None,
        Some("contacts.json")
    )]
    #[case::all_options(
        &["program", "--format", "json", "--payer", "p-0", "--contacts", "contacts.json", "session.json"],
        Some("p-0"),
        Some("contacts.json")
    )]
    fn test_optional_args(
        #[case] args: &[&str],
        #[case] payer: Option<&str>,
        #[case] contacts: Option<&str>,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.payer.as_deref(), payer);
        assert_eq!(parsed.contacts, contacts.map(PathBuf::from));
    }

    #[rstest]
    #[case::missing_session(&["program"])]
    #[case::invalid_format(&["program", "--format", "xml", "session.json"])]
    #[case::payer_without_value(&["program", "--payer"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
