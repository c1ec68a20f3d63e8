use std::path::PathBuf;
use std::time::Duration;

use crate::roster::tools::io::fetch::Source;

/// Export URL of the first participant spreadsheet.
pub const DEFAULT_SOURCE_1: &str =
    "https://docs.google.com/spreadsheets/d/1PIjSBRUy8rNJoChCVUa7ElYaac5lPFWF/export?format=xlsx";
/// Export URL of the second participant spreadsheet.
pub const DEFAULT_SOURCE_2: &str =
    "https://docs.google.com/spreadsheets/d/1_eZoQk462qtDs6jas9nTx6b7kkJiU_zv/export?format=xlsx";
/// Relative path the combined workbook is written to.
pub const DEFAULT_OUTPUT: &str = "combined_data.xlsx";

pub const PARTICIPANT_NAME: &str = "Participant Name";
pub const TEAM_NAME: &str = "Team Name";
pub const PARTICIPANT_TYPE: &str = "Participant Type";
pub const PARTICIPANT_PHONE: &str = "Participant Phone Number";
pub const PARTICIPANT_EMAIL: &str = "Participant Email";

/// Columns every input table must carry after reconciliation, in the order
/// they are appended when absent.
pub const EXPECTED_COLUMNS: [&str; 5] = [
    PARTICIPANT_NAME,
    TEAM_NAME,
    PARTICIPANT_TYPE,
    PARTICIPANT_PHONE,
    PARTICIPANT_EMAIL,
];

/// Fill value for missing phone numbers.
pub const PHONE_PLACEHOLDER: &str = "N/A";
/// Fill value for missing names and emails.
pub const CRITICAL_PLACEHOLDER: &str = "Unknown";

/// Everything a single run needs to know.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub sources: [Source; 2],
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    /// HTTP request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sources: [
                Source::parse(DEFAULT_SOURCE_1),
                Source::parse(DEFAULT_SOURCE_2),
            ],
            output: PathBuf::from(DEFAULT_OUTPUT),
            report: None,
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_remote_exports() {
        let config = RunConfig::default();
        assert!(matches!(config.sources[0], Source::Url(_)));
        assert!(matches!(config.sources[1], Source::Url(_)));
        assert_eq!(config.output, PathBuf::from("combined_data.xlsx"));
        assert!(config.report.is_none());
        assert_eq!(config.timeout, None);
    }
}
