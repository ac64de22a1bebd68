//! One decode step per field shape.
//!
//! Flat answers (delimited text) and structured responses (JSON) both end
//! up here, so a field decodes the same way whichever path it came from.
//! A JSON string where a list is expected falls back to the delimited rules.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::normalize::{join_delimited, split_cells, split_delimited};
use crate::partial::{FieldValue, PartialRecord};
use crate::schema::{FieldPath, Section, Shape, SubField};

/// Decode a flat text answer.
///
/// List-of-object values are split into cells, empty ones included, and
/// grouped into tuples in sub-field order. Tuples with no non-empty cell
/// are dropped. A short final tuple leaves its trailing sub-fields empty.
pub fn decode_text(shape: Shape, raw: &str) -> FieldValue {
    match shape {
        Shape::Scalar => FieldValue::Text(raw.trim().to_string()),
        Shape::ListOfScalar => FieldValue::List(split_delimited(raw)),
        Shape::ListOfObject(fields) => {
            let cells = split_cells(raw);
            let items = cells
                .chunks(fields.len().max(1))
                .map(|chunk| chunk.to_vec())
                .filter(|cells| cells.iter().any(|c| !c.is_empty()))
                .collect();
            FieldValue::Items(items)
        }
    }
}

/// Encode a value back into the flat text form accepted by [`decode_text`].
pub fn encode_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) => text.trim().to_string(),
        FieldValue::List(items) => join_delimited(items),
        FieldValue::Items(rows) => {
            let cells: Vec<&String> = rows.iter().flatten().collect();
            join_delimited(&cells)
        }
    }
}

fn json_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn json_item(fields: &[SubField], value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => fields
            .iter()
            .map(|f| map.get(f.key).map(json_text).unwrap_or_default())
            .collect(),
        // A bare string entry fills the first sub-field.
        other => {
            let mut cells = vec![String::new(); fields.len()];
            if let Some(first) = cells.first_mut() {
                *first = json_text(other);
            }
            cells
        }
    }
}

fn mismatch(path: &'static str, expected: &'static str) -> Error {
    Error::ShapeMismatch { path, expected }
}

/// Decode a structured JSON value for the field at `path`.
///
/// Null decodes as empty. A value of the wrong JSON type for the shape is
/// an error, so a malformed answer never replaces existing data.
pub fn decode_json(path: FieldPath, value: &Value) -> Result<FieldValue> {
    let shape = path.shape();
    match (shape, value) {
        (_, Value::Null) => Ok(FieldValue::empty(shape)),
        (_, Value::String(raw)) => Ok(decode_text(shape, raw)),
        (Shape::Scalar, Value::Bool(_) | Value::Number(_)) => {
            Ok(FieldValue::Text(json_text(value)))
        }
        (Shape::ListOfScalar, Value::Array(entries)) => Ok(FieldValue::List(
            entries
                .iter()
                .map(json_text)
                .filter(|s| !s.is_empty())
                .collect(),
        )),
        (Shape::ListOfObject(fields), Value::Array(entries)) => Ok(FieldValue::Items(
            entries
                .iter()
                .map(|entry| json_item(fields, entry))
                .filter(|cells| cells.iter().any(|c| !c.is_empty()))
                .collect(),
        )),
        _ => Err(mismatch(path.as_str(), shape.describe())),
    }
}

/// Decode the JSON value of a whole section into every leaf it holds.
///
/// Every leaf of the section is set, including those absent from `value`,
/// so applying the result replaces the section as a whole.
pub fn decode_section_json(section: Section, value: &Value) -> Result<PartialRecord> {
    let mut partial = PartialRecord::new();
    for path in section.paths() {
        let mut current = Some(value);
        for segment in path.segments().skip(1) {
            current = match current {
                Some(Value::Object(map)) => map.get(segment),
                Some(Value::Null) | None => None,
                Some(_) => return Err(mismatch(section.key(), "an object")),
            };
        }
        let decoded = match current {
            Some(v) => decode_json(path, v)?,
            None => FieldValue::empty(path.shape()),
        };
        partial.set(path, decoded)?;
    }
    Ok(partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::mappings;
    use crate::types::{FinancialYear, Item, Leader};
    use serde_json::json;

    #[test]
    fn test_decode_scalar_trims() {
        assert_eq!(
            decode_text(Shape::Scalar, "  Valeo Foods \n"),
            FieldValue::Text("Valeo Foods".to_string())
        );
    }

    #[test]
    fn test_decode_list_of_scalar() {
        assert_eq!(
            decode_text(Shape::ListOfScalar, "Lean ops | | Procurement |"),
            FieldValue::List(vec!["Lean ops".to_string(), "Procurement".to_string()])
        );
    }

    #[test]
    fn test_decode_list_of_object_groups_tuples() {
        let value = decode_text(
            Shape::ListOfObject(Leader::FIELDS),
            "John Smith|CEO|Former P&G|Jane Doe|CFO",
        );
        assert_eq!(
            value,
            FieldValue::Items(vec![
                vec!["John Smith".into(), "CEO".into(), "Former P&G".into()],
                vec!["Jane Doe".into(), "CFO".into()],
            ])
        );
    }

    #[test]
    fn test_decode_list_of_object_all_empty_is_empty() {
        let value = decode_text(Shape::ListOfObject(Leader::FIELDS), " | | ");
        assert!(value.is_empty());
    }

    #[test]
    fn test_list_of_object_round_trip() {
        for mapping in mappings() {
            let Shape::ListOfObject(fields) = mapping.shape() else {
                continue;
            };
            let items: Vec<Vec<String>> = (0..3)
                .map(|row| {
                    fields
                        .iter()
                        .map(|f| format!(" {} {} ", f.label, row))
                        .collect()
                })
                .collect();

            let encoded = encode_text(&FieldValue::Items(items.clone()));
            let decoded = decode_text(mapping.shape(), &encoded);

            let trimmed: Vec<Vec<String>> = items
                .iter()
                .map(|cells| cells.iter().map(|c| c.trim().to_string()).collect())
                .collect();
            assert_eq!(decoded, FieldValue::Items(trimmed), "mapping {}", mapping.id);
        }
    }

    #[test]
    fn test_decode_json_objects_by_key() {
        let value = json!([
            {"year": "2023", "revenue": "€2.1B", "debt": "€450M"},
            {"year": "2022", "unknown": "x"}
        ]);
        let decoded = decode_json(FieldPath::Financials, &value).unwrap();
        let FieldValue::Items(rows) = decoded else {
            panic!("expected items");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "2023");
        assert_eq!(rows[0][1], "€2.1B");
        assert_eq!(rows[0][6], "€450M");
        assert_eq!(FinancialYear::from_cells(&rows[1]).year, "2022");
    }

    #[test]
    fn test_decode_json_string_falls_back_to_delimited() {
        let decoded = decode_json(FieldPath::GovernanceBodies, &json!("Board | Audit Committee")).unwrap();
        assert_eq!(
            decoded,
            FieldValue::List(vec!["Board".to_string(), "Audit Committee".to_string()])
        );

        let same = decode_text(Shape::ListOfScalar, "Board | Audit Committee");
        assert_eq!(decoded, same);
    }

    #[test]
    fn test_decode_json_scalar_variants() {
        let founded = FieldPath::OverviewFounded;
        assert_eq!(decode_json(founded, &json!(1999)).unwrap(), FieldValue::Text("1999".into()));
        assert_eq!(decode_json(founded, &Value::Null).unwrap(), FieldValue::Text(String::new()));
        assert!(decode_json(FieldPath::GovernanceBodies, &Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_decode_json_rejects_wrong_type() {
        let result = decode_json(FieldPath::GovernanceBodies, &json!({"a": 1}));
        assert!(matches!(
            result,
            Err(Error::ShapeMismatch { path: "governance.bodies", .. })
        ));
        assert!(decode_json(FieldPath::OverviewFounded, &json!(["1999"])).is_err());
        assert!(decode_json(FieldPath::Financials, &json!({"note": "Not available"})).is_err());
    }

    #[test]
    fn test_decode_section_rejects_wrong_container() {
        let result = decode_section_json(Section::Overview, &json!(["Maker"]));
        assert!(matches!(
            result,
            Err(Error::ShapeMismatch { path: "overview", .. })
        ));
        assert!(decode_section_json(Section::Financials, &json!({"note": "Not available"})).is_err());
        assert!(decode_section_json(Section::Analysis, &json!({"preMeeting": "n/a"})).is_err());
    }

    #[test]
    fn test_decode_list_of_object_keeps_empty_cells_aligned() {
        let value = decode_text(
            FieldPath::FollowUp.shape(),
            "Call CFO|Ann|May||Send deck|Bob|June|Z-12",
        );
        assert_eq!(
            value,
            FieldValue::Items(vec![
                vec!["Call CFO".into(), "Ann".into(), "May".into(), "".into()],
                vec!["Send deck".into(), "Bob".into(), "June".into(), "Z-12".into()],
            ])
        );
    }

    #[test]
    fn test_decode_list_of_object_drops_all_empty_tuples() {
        let value = decode_text(FieldPath::Leadership.shape(), "||||| |Ann|CEO|");
        assert_eq!(
            value,
            FieldValue::Items(vec![vec!["Ann".into(), "CEO".into(), "".into()]])
        );
    }

    #[test]
    fn test_list_of_object_round_trip_with_empty_cells() {
        for mapping in mappings() {
            let Shape::ListOfObject(fields) = mapping.shape() else {
                continue;
            };
            let last = fields.len() - 1;
            let items: Vec<Vec<String>> = (0..3)
                .map(|row| {
                    fields
                        .iter()
                        .enumerate()
                        .map(|(i, f)| {
                            // Row 1 leaves its middle and trailing cells empty.
                            if row == 1 && i > 0 && (i == last || i == fields.len() / 2) {
                                String::new()
                            } else {
                                format!("{} {}", f.label, row)
                            }
                        })
                        .collect()
                })
                .collect();

            let encoded = encode_text(&FieldValue::Items(items.clone()));
            assert_eq!(decode_text(mapping.shape(), &encoded), FieldValue::Items(items), "mapping {}", mapping.id);
        }
    }

    #[test]
    fn test_decode_section_object() {
        let value = json!({"description": "Maker", "founded": 2010});
        let partial = decode_section_json(Section::Overview, &value).unwrap();

        assert_eq!(partial.len(), 6);
        let record = partial.to_record();
        assert_eq!(record.overview.description, "Maker");
        assert_eq!(record.overview.founded, "2010");
        assert_eq!(record.overview.reach, "");
    }

    #[test]
    fn test_decode_section_list_and_nested() {
        let leaders = json!([{"name": "Ann", "title": "CEO", "background": "Ops"}]);
        let partial = decode_section_json(Section::Leadership, &leaders).unwrap();
        assert_eq!(partial.to_record().leadership[0].title, "CEO");

        let governance = json!({"bodies": ["Board", "Audit"]});
        let partial = decode_section_json(Section::Governance, &governance).unwrap();
        assert_eq!(partial.to_record().governance.bodies, vec!["Board", "Audit"]);

        let analysis = json!({"duringMeeting": {"levers": ["Pricing"]}});
        let partial = decode_section_json(Section::Analysis, &analysis).unwrap();
        assert!(partial.contains(FieldPath::AnalysisPreMeetingLevers));
        assert_eq!(partial.to_record().analysis.during_meeting.levers, vec!["Pricing"]);
    }
}
