//! Canonical question/answer rows and their CSV form.
//!
//! Spreadsheets name their columns in many ways (`questionId`, `Question ID`,
//! `Response`, ...). Headers are resolved to a [`Column`] once, so the
//! importer only ever sees [`AnswerRow`] values.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::normalize::normalize_header;

/// One question/answer pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRow {
    /// Raw identifier as supplied, not yet canonicalised.
    pub question_id: String,
    pub question: String,
    pub answer: String,
}

impl AnswerRow {
    pub fn new(
        question_id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Build a row from (header, value) pairs, resolving header aliases.
    ///
    /// When several columns map to the same role, the first non-empty value
    /// wins.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut row = AnswerRow::default();
        for (header, value) in pairs {
            let Some(column) = Column::from_header(header) else {
                continue;
            };
            let slot = match column {
                Column::Id => &mut row.question_id,
                Column::Question => &mut row.question,
                Column::Answer => &mut row.answer,
            };
            if slot.trim().is_empty() {
                *slot = value.to_string();
            }
        }
        row
    }
}

/// Role of an input column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Id,
    Question,
    Answer,
}

impl Column {
    /// Resolve a header, ignoring case, spaces and underscores.
    pub fn from_header(header: &str) -> Option<Self> {
        match normalize_header(header).as_str() {
            "questionid" | "id" | "qid" => Some(Column::Id),
            "question" | "questiontext" => Some(Column::Question),
            "answer" | "response" | "value" => Some(Column::Answer),
            _ => None,
        }
    }
}

/// Read answer rows from CSV with a header row.
///
/// Records that cannot be decoded are logged and skipped.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<AnswerRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers.iter().map(Column::from_header).collect();
    if !columns.contains(&Some(Column::Id)) {
        log::warn!("No identifier column among headers {:?}", headers);
    }

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        match record {
            Ok(record) => {
                rows.push(AnswerRow::from_pairs(headers.iter().zip(record.iter())));
            }
            Err(e) => log::warn!("Skipping unreadable CSV record {}: {}", index + 1, e),
        }
    }

    log::debug!("Read {} CSV rows", rows.len());
    Ok(rows)
}

/// Write answer rows as CSV with `questionId,question,answer` headers.
pub fn write_csv<W: Write>(rows: &[AnswerRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_aliases() {
        for header in ["questionId", "Question ID", "QuestionID", "question_id", "ID"] {
            assert_eq!(Column::from_header(header), Some(Column::Id), "{}", header);
        }
        for header in ["answer", "Answer", "Response", "value"] {
            assert_eq!(Column::from_header(header), Some(Column::Answer), "{}", header);
        }
        assert_eq!(Column::from_header("Question"), Some(Column::Question));
        assert_eq!(Column::from_header("Notes"), None);
    }

    #[test]
    fn test_from_pairs_first_non_empty_wins() {
        let row = AnswerRow::from_pairs([
            ("questionId", ""),
            ("Question ID", "Q3"),
            ("answer", "A maker"),
            ("Response", "ignored"),
        ]);
        assert_eq!(row.question_id, "Q3");
        assert_eq!(row.answer, "A maker");
    }

    #[test]
    fn test_read_csv_with_aliases() {
        let data = "Question ID,Question,Response,Notes\n1,Name?,Valeo Foods,x\nQ13,Leaders,\"Ann|CEO|Ops, finance\",\n";
        let rows = read_csv(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], AnswerRow::new("1", "Name?", "Valeo Foods"));
        assert_eq!(rows[1].answer, "Ann|CEO|Ops, finance");
    }

    #[test]
    fn test_read_csv_short_records() {
        let data = "id,answer\nQ001\nQ002,August 2025\n";
        let rows = read_csv(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].answer, "");
        assert_eq!(rows[1].answer, "August 2025");
    }

    #[test]
    fn test_write_then_read_csv() {
        let rows = vec![
            AnswerRow::new("Q001", "What is the company name?", "Acme, Inc."),
            AnswerRow::new("Q013", "Leaders", "Ann|CEO|\"Ops\" lead"),
        ];
        let mut buffer = Vec::new();
        write_csv(&rows, &mut buffer).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("questionId,question,answer\n"));
        assert!(text.contains("\"Acme, Inc.\""));

        assert_eq!(read_csv(buffer.as_slice()).unwrap(), rows);
    }
}
