//! The editing session: single owner of the record being worked on.

use std::io::{Read, Write};

use crate::error::Result;
use crate::partial::PartialRecord;
use crate::types::CompanyRecord;

/// Holds the current record. Import, enrichment and edits all go through
/// here; sequencing and rendering borrow the record read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    record: CompanyRecord,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            record: CompanyRecord::example(),
        }
    }
}

impl Session {
    /// Start from the example record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record.
    pub fn with_record(record: CompanyRecord) -> Self {
        Self { record }
    }

    /// Load a record from JSON. Missing fields load as empty.
    pub fn from_json<R: Read>(reader: R) -> Result<Self> {
        let record = serde_json::from_reader(reader)?;
        Ok(Self::with_record(record))
    }

    pub fn get(&self) -> &CompanyRecord {
        &self.record
    }

    /// Mutable access for direct edits.
    pub fn get_mut(&mut self) -> &mut CompanyRecord {
        &mut self.record
    }

    /// Replace the whole record.
    pub fn set(&mut self, record: CompanyRecord) {
        self.record = record;
    }

    /// Restore the example record.
    pub fn reset(&mut self) {
        log::debug!("Session reset to example record");
        self.record = CompanyRecord::example();
    }

    /// Overwrite the fields carried by `partial`, leaving the rest intact.
    pub fn apply(&mut self, partial: &PartialRecord) {
        log::debug!("Applying {} fields to session", partial.len());
        partial.apply_to(&mut self.record);
    }

    /// Write the record as pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.record)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partial::FieldValue;
    use crate::schema::FieldPath;

    #[test]
    fn test_new_session_holds_example() {
        let session = Session::new();
        assert_eq!(session.get(), &CompanyRecord::example());
    }

    #[test]
    fn test_set_and_reset() {
        let mut session = Session::new();
        session.set(CompanyRecord::default());
        assert_eq!(session.get().company_name, "");

        session.reset();
        assert_eq!(session.get().company_name, "Valeo Foods");
    }

    #[test]
    fn test_direct_edit() {
        let mut session = Session::new();
        session.get_mut().overview.founded = "1990".to_string();
        assert_eq!(session.get().overview.founded, "1990");
        assert_eq!(session.get().company_name, "Valeo Foods");
    }

    #[test]
    fn test_apply_partial() {
        let mut session = Session::new();
        let mut partial = PartialRecord::new();
        partial
            .set(FieldPath::CompanyName, FieldValue::Text("Acme".to_string()))
            .unwrap();

        session.apply(&partial);
        assert_eq!(session.get().company_name, "Acme");
        assert_eq!(session.get().operations.len(), 7);
    }

    #[test]
    fn test_json_round_trip() {
        let session = Session::new();
        let mut buffer = Vec::new();
        session.write_json(&mut buffer).unwrap();

        let loaded = Session::from_json(buffer.as_slice()).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_from_partial_json() {
        let session = Session::from_json(r#"{"companyName": "Acme"}"#.as_bytes()).unwrap();
        assert_eq!(session.get().company_name, "Acme");
        assert!(session.get().operations.is_empty());
    }
}
