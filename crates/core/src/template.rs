//! Blank import template with example answers.

use std::io::Write;

use crate::error::Result;
use crate::rows::{write_csv, AnswerRow};
use crate::schema::{mappings, FieldMapping};

/// Example answer shown for a mapping in the template.
pub fn example_answer(mapping: &FieldMapping) -> String {
    let answer = match mapping.id {
        "Q001" => "Valeo Foods",
        "Q002" => "September 2024",
        "Q003" => "Leading European food manufacturer specializing in ambient grocery products",
        "Q013" => "John Smith|CEO|Former P&G executive with 15 years experience|Jane Doe|CFO|Ex-Unilever finance director",
        "Q014" => "Ambient Foods|Biscuits, crackers, snacks|Dairy Products|Milk, cheese, yogurt",
        "Q016" => "2023|€2.1B|€180M|€120M|8.6%|€95M|€450M|2022|€1.9B|€160M|€100M|8.4%|€80M|€500M",
        _ => return format!("Example answer for {}", mapping.question),
    };
    answer.to_string()
}

/// One row per mapping, in canonical order.
pub fn template_rows() -> Vec<AnswerRow> {
    mappings()
        .iter()
        .map(|m| AnswerRow::new(m.id, m.question, example_answer(m)))
        .collect()
}

/// Write the template as CSV.
pub fn write_template_csv<W: Write>(writer: W) -> Result<()> {
    write_csv(&template_rows(), writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::lookup;

    #[test]
    fn test_one_row_per_mapping_in_order() {
        let rows = template_rows();
        assert_eq!(rows.len(), mappings().len());
        assert_eq!(rows[0].question_id, "Q001");
        assert_eq!(rows[0].question, "What is the company name?");
        assert_eq!(rows.last().unwrap().question_id, mappings().last().unwrap().id);
    }

    #[test]
    fn test_example_answers() {
        assert_eq!(example_answer(lookup("Q001").unwrap()), "Valeo Foods");
        assert_eq!(
            example_answer(lookup("Q004").unwrap()),
            "Example answer for When was the company founded?"
        );
    }

    #[test]
    fn test_template_is_deterministic() {
        assert_eq!(template_rows(), template_rows());
    }

    #[test]
    fn test_template_csv_quotes_delimiters() {
        let mut buffer = Vec::new();
        write_template_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("questionId,question,answer\n"));
        assert!(text.contains("\"Ambient Foods|Biscuits, crackers, snacks|Dairy Products|Milk, cheese, yogurt\""));
        assert_eq!(text.lines().count(), mappings().len() + 1);
    }
}
