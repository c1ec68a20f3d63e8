use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::roster::tools::config::{
    CRITICAL_PLACEHOLDER, PARTICIPANT_EMAIL, PARTICIPANT_NAME, PARTICIPANT_PHONE,
    PARTICIPANT_TYPE, PHONE_PLACEHOLDER,
};
use crate::roster::tools::error::Result;
use crate::roster::tools::model::Cell;
use crate::roster::tools::reconcile::ReconciledTable;

/// Counts of the cells touched by [`clean_fields`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub phones_filled: usize,
    pub types_normalized: usize,
    pub types_cleared: usize,
    pub names_filled: usize,
    pub emails_filled: usize,
}

/// Fills and normalises the participant fields of a merged table.
///
/// Steps run in a fixed order: missing phone numbers become `"N/A"`,
/// participant types are lowercased and trimmed, and missing names and
/// emails become `"Unknown"`. Other columns are left alone.
#[instrument(level = "info", skip_all, fields(rows = table.table().row_count()))]
pub fn clean_fields(table: &mut ReconciledTable) -> Result<CleaningReport> {
    let mut report = CleaningReport::default();

    let phone = table.required_index(PARTICIPANT_PHONE)?;
    report.phones_filled = fill_missing(table, phone, PHONE_PLACEHOLDER);

    if let Some(kind) = table.table().column_index(PARTICIPANT_TYPE) {
        for cell in table.table_mut().column_cells_mut(kind) {
            match cell {
                Cell::Missing => {}
                Cell::Text(value) => {
                    *value = value.to_lowercase().trim().to_string();
                    report.types_normalized += 1;
                }
                // Only string values have a lowercase form.
                _ => {
                    *cell = Cell::Missing;
                    report.types_cleared += 1;
                }
            }
        }
    }

    let name = table.required_index(PARTICIPANT_NAME)?;
    report.names_filled = fill_missing(table, name, CRITICAL_PLACEHOLDER);
    let email = table.required_index(PARTICIPANT_EMAIL)?;
    report.emails_filled = fill_missing(table, email, CRITICAL_PLACEHOLDER);

    debug!(?report, "fields cleaned");
    Ok(report)
}

fn fill_missing(table: &mut ReconciledTable, column: usize, placeholder: &str) -> usize {
    let mut filled = 0;
    for cell in table.table_mut().column_cells_mut(column) {
        if cell.is_missing() {
            *cell = Cell::text(placeholder);
            filled += 1;
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::tools::model::Table;
    use crate::roster::tools::reconcile::add_expected_columns;

    fn reconciled(records: Vec<Vec<(&str, Cell)>>) -> ReconciledTable {
        add_expected_columns(Table::from_records(records)).0
    }

    #[test]
    fn missing_phones_become_na_and_others_are_kept() {
        let mut table = reconciled(vec![
            vec![(PARTICIPANT_PHONE, Cell::Missing)],
            vec![(PARTICIPANT_PHONE, Cell::from("+44 20 7946 0000"))],
            vec![(PARTICIPANT_PHONE, Cell::Number(5551234.0))],
            vec![(PARTICIPANT_PHONE, Cell::from(""))],
        ]);

        let report = clean_fields(&mut table).unwrap();
        let table = table.table();

        assert_eq!(report.phones_filled, 1);
        assert_eq!(table.cell(0, PARTICIPANT_PHONE), Some(&Cell::from("N/A")));
        assert_eq!(
            table.cell(1, PARTICIPANT_PHONE),
            Some(&Cell::from("+44 20 7946 0000"))
        );
        assert_eq!(table.cell(2, PARTICIPANT_PHONE), Some(&Cell::Number(5551234.0)));
        assert_eq!(table.cell(3, PARTICIPANT_PHONE), Some(&Cell::from("")));
    }

    #[test]
    fn participant_types_are_lowercased_and_trimmed() {
        let mut table = reconciled(vec![
            vec![(PARTICIPANT_TYPE, Cell::from("  Mentor\t"))],
            vec![(PARTICIPANT_TYPE, Cell::Missing)],
            vec![(PARTICIPANT_TYPE, Cell::from("STUDENT"))],
        ]);

        let report = clean_fields(&mut table).unwrap();
        let table = table.table();

        assert_eq!(report.types_normalized, 2);
        assert_eq!(table.cell(0, PARTICIPANT_TYPE), Some(&Cell::from("mentor")));
        assert_eq!(table.cell(1, PARTICIPANT_TYPE), Some(&Cell::Missing));
        assert_eq!(table.cell(2, PARTICIPANT_TYPE), Some(&Cell::from("student")));
    }

    #[test]
    fn non_text_participant_types_are_cleared() {
        let mut table = reconciled(vec![vec![(PARTICIPANT_TYPE, Cell::Number(3.0))]]);

        let report = clean_fields(&mut table).unwrap();

        assert_eq!(report.types_cleared, 1);
        assert_eq!(table.table().cell(0, PARTICIPANT_TYPE), Some(&Cell::Missing));
    }

    #[test]
    fn names_and_emails_get_placeholders_independently() {
        let mut table = reconciled(vec![
            vec![
                (PARTICIPANT_NAME, Cell::from("Grace")),
                (PARTICIPANT_EMAIL, Cell::Missing),
            ],
            vec![
                (PARTICIPANT_NAME, Cell::Missing),
                (PARTICIPANT_EMAIL, Cell::from("g@example.com")),
            ],
        ]);

        let report = clean_fields(&mut table).unwrap();
        let table = table.table();

        assert_eq!(report.names_filled, 1);
        assert_eq!(report.emails_filled, 1);
        assert_eq!(table.cell(0, PARTICIPANT_NAME), Some(&Cell::from("Grace")));
        assert_eq!(table.cell(0, PARTICIPANT_EMAIL), Some(&Cell::from("Unknown")));
        assert_eq!(table.cell(1, PARTICIPANT_NAME), Some(&Cell::from("Unknown")));
        assert_eq!(
            table.cell(1, PARTICIPANT_EMAIL),
            Some(&Cell::from("g@example.com"))
        );
    }

    #[test]
    fn unrelated_columns_are_not_touched() {
        let mut table = reconciled(vec![vec![
            ("Notes", Cell::Missing),
            ("Team Name", Cell::Missing),
        ]]);

        clean_fields(&mut table).unwrap();

        assert_eq!(table.table().cell(0, "Notes"), Some(&Cell::Missing));
        assert_eq!(table.table().cell(0, "Team Name"), Some(&Cell::Missing));
    }

    #[test]
    fn placeholder_text_is_not_mistaken_for_missing() {
        let mut table = reconciled(vec![vec![(PARTICIPANT_PHONE, Cell::from("N/A"))]]);

        let report = clean_fields(&mut table).unwrap();

        assert_eq!(report.phones_filled, 0);
    }
}
