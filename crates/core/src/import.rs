//! Row → record import.
//!
//! Import is best-effort: every row either contributes one field or is
//! reported as skipped. No row can fail the whole import.

use thiserror::Error;

use crate::decode::decode_text;
use crate::partial::PartialRecord;
use crate::rows::AnswerRow;
use crate::schema::{canonical_id, lookup};
use crate::types::CompanyRecord;

/// Why a row did not contribute a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No identifier could be read from the row.
    #[error("missing question identifier")]
    MissingId,

    /// The canonical identifier has no field mapping.
    #[error("no field mapping for '{0}'")]
    UnknownId(String),

    /// The answer was blank or decoded to nothing.
    #[error("empty answer")]
    EmptyValue,
}

/// A row that was left out of the import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// Zero-based position in the input.
    pub index: usize,
    pub question_id: String,
    pub reason: SkipReason,
}

/// Outcome of importing a set of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Fields that received a value.
    pub record: PartialRecord,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    /// Number of distinct fields filled.
    pub fn imported(&self) -> usize {
        self.record.len()
    }

    /// Overwrite the imported fields of `record`, leaving the rest intact.
    pub fn apply_to(&self, record: &mut CompanyRecord) {
        self.record.apply_to(record);
    }
}

/// Import rows into a partial record. Later rows for the same field win.
pub fn import_rows(rows: &[AnswerRow]) -> ImportReport {
    let mut report = ImportReport::default();

    for (index, row) in rows.iter().enumerate() {
        let raw_id = row.question_id.trim();
        let skip = |reason: SkipReason| SkippedRow {
            index,
            question_id: raw_id.to_string(),
            reason,
        };

        if raw_id.is_empty() {
            log::debug!("Row {}: no identifier, skipped", index);
            report.skipped.push(skip(SkipReason::MissingId));
            continue;
        }

        let id = canonical_id(raw_id);
        let Some(mapping) = lookup(&id) else {
            log::warn!("Row {}: no mapping found for question ID {}", index, id);
            report.skipped.push(skip(SkipReason::UnknownId(id)));
            continue;
        };

        let value = decode_text(mapping.shape(), &row.answer);
        if value.is_empty() {
            log::debug!("Row {}: empty answer for {}, skipped", index, id);
            report.skipped.push(skip(SkipReason::EmptyValue));
            continue;
        }

        log::debug!("Row {}: {} -> {}", index, id, mapping.path.as_str());
        if let Err(e) = report.record.set(mapping.path, value) {
            log::warn!("Row {}: {}", index, e);
        }
    }

    log::info!(
        "Imported {} fields from {} rows ({} skipped)",
        report.imported(),
        rows.len(),
        report.skipped.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldPath;
    use crate::template::template_rows;

    fn row(id: &str, answer: &str) -> AnswerRow {
        AnswerRow::new(id, "", answer)
    }

    #[test]
    fn test_import_canonicalizes_ids() {
        let rows = vec![row("1", "Acme"), row(" q002 ", "May 2025"), row("Q4", "1999")];
        let record = import_rows(&rows).record.to_record();

        assert_eq!(record.company_name, "Acme");
        assert_eq!(record.date, "May 2025");
        assert_eq!(record.overview.founded, "1999");
    }

    #[test]
    fn test_import_decodes_each_shape() {
        let rows = vec![
            row("Q013", "Ann|CEO|Ops|Bob|CFO"),
            row("Q023", "Lean | | Procurement"),
            row("Q033", "Board|Audit Committee"),
        ];
        let record = import_rows(&rows).record.to_record();

        assert_eq!(record.leadership.len(), 2);
        assert_eq!(record.leadership[1].name, "Bob");
        assert_eq!(record.leadership[1].background, "");
        assert_eq!(record.improvements.cost_reduction, vec!["Lean", "Procurement"]);
        assert_eq!(record.governance.bodies, vec!["Board", "Audit Committee"]);
    }

    #[test]
    fn test_unknown_id_is_skipped() {
        let mut record = CompanyRecord::example();
        let before = record.clone();

        let report = import_rows(&[row("Q999", "anything")]);
        report.apply_to(&mut record);

        assert_eq!(record, before);
        assert_eq!(
            report.skipped,
            vec![SkippedRow {
                index: 0,
                question_id: "Q999".to_string(),
                reason: SkipReason::UnknownId("Q999".to_string()),
            }]
        );
    }

    #[test]
    fn test_empty_values_never_overwrite() {
        let mut record = CompanyRecord::example();
        let name = record.company_name.clone();
        let bodies = record.governance.bodies.clone();

        let report = import_rows(&[row("Q001", "   "), row("Q033", " | "), row("", "orphan")]);
        report.apply_to(&mut record);

        assert_eq!(record.company_name, name);
        assert_eq!(record.governance.bodies, bodies);
        assert_eq!(report.imported(), 0);
        assert_eq!(report.skipped[0].reason, SkipReason::EmptyValue);
        assert_eq!(report.skipped[1].reason, SkipReason::EmptyValue);
        assert_eq!(report.skipped[2].reason, SkipReason::MissingId);
    }

    #[test]
    fn test_last_write_wins() {
        let report = import_rows(&[row("Q001", "First"), row("Q1", "Second")]);
        assert_eq!(report.record.len(), 1);
        assert_eq!(report.record.to_record().company_name, "Second");
    }

    #[test]
    fn test_import_is_idempotent() {
        let rows = template_rows();
        let once = import_rows(&rows);

        let mut twice_rows = rows.clone();
        twice_rows.extend(rows);
        let twice = import_rows(&twice_rows);

        assert_eq!(once.record, twice.record);

        let mut a = CompanyRecord::default();
        once.apply_to(&mut a);
        once.apply_to(&mut a);
        assert_eq!(a, once.record.to_record());
    }

    #[test]
    fn test_template_imports_every_field() {
        let report = import_rows(&template_rows());
        assert!(report.skipped.is_empty());
        for path in FieldPath::ALL {
            assert!(report.record.contains(path), "missing {}", path.as_str());
        }
        assert_eq!(report.record.to_record().company_name, "Valeo Foods");
    }
}
