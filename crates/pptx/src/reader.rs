//! PPTX deck reader.
//!
//! Reads back the text and tables of a deck so a produced file can be
//! inspected or verified without opening it in a presentation program.

use std::io::{Read, Seek};

use bid_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use zip::ZipArchive;

use crate::package::{PRESENTATION_PATH, PRESENTATION_RELS_PATH};

/// Text content of one slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlideSummary {
    /// 1-based position in the deck.
    pub number: usize,
    /// Paragraph text of every text shape, in document order.
    pub texts: Vec<String>,
    /// Tables as rows of cell text; the first row is the header.
    pub tables: Vec<Vec<Vec<String>>>,
}

impl SlideSummary {
    fn new(number: usize) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    /// Whether any paragraph contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

/// Text content of a whole deck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeckSummary {
    pub slides: Vec<SlideSummary>,
}

impl DeckSummary {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Reader for PPTX decks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckReader;

impl DeckReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every slide of the deck in presentation order.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<DeckSummary> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::CorruptedDeck(format!("Failed to open ZIP: {}", e)))?;

        let order = self.slide_order(&mut archive)?;
        let mut summary = DeckSummary::default();
        for (index, path) in order.iter().enumerate() {
            let content = read_file_from_archive(&mut archive, path)?;
            summary.slides.push(parse_slide(&content, index + 1)?);
        }

        log::debug!("Read {} slides", summary.len());
        Ok(summary)
    }

    /// Slide part paths, ordered by `p:sldIdLst` when present and by slide
    /// number otherwise.
    fn slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels = read_file_from_archive(archive, PRESENTATION_RELS_PATH)?;
        let targets = slide_relationships(&rels)?;

        let listed = match read_file_from_archive(archive, PRESENTATION_PATH) {
            Ok(presentation) => listed_rel_ids(&presentation)?,
            Err(e) => {
                log::warn!("Falling back to slide numbering: {}", e);
                Vec::new()
            }
        };

        if !listed.is_empty() {
            return listed
                .iter()
                .map(|rel_id| {
                    targets
                        .iter()
                        .find(|(id, _)| id == rel_id)
                        .map(|(_, path)| path.clone())
                        .ok_or_else(|| {
                            Error::CorruptedDeck(format!("Slide relationship '{}' not found", rel_id))
                        })
                })
                .collect();
        }

        let mut slides: Vec<(String, Option<usize>)> = targets
            .into_iter()
            .map(|(_, path)| {
                let number = extract_slide_number(&path);
                (path, number)
            })
            .collect();
        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });
        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// `(rId, part path)` of every slide relationship.
fn slide_relationships(rels: &str) -> Result<Vec<(String, String)>> {
    let mut slides = Vec::new();
    let mut reader = Reader::from_str(rels);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let rel_type = attribute(e, b"Type").unwrap_or_default();
                if !rel_type.ends_with("/slide") {
                    continue;
                }
                let id = attribute(e, b"Id").unwrap_or_default();
                let target = attribute(e, b"Target").unwrap_or_default();
                let path = match target.strip_prefix('/') {
                    Some(absolute) => absolute.to_string(),
                    None => format!("ppt/{}", target),
                };
                slides.push((id, path));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(slides)
}

/// Relationship ids of `p:sldId` entries, in presentation order.
fn listed_rel_ids(presentation: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(presentation);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                if let Some(id) = attribute_r_id(e) {
                    ids.push(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// The `r:id` attribute; plain `id` is the numeric slide id.
fn attribute_r_id(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref().ends_with(b":id"))
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

#[derive(Default)]
struct TableState {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
    in_cell: bool,
}

/// Collect paragraph text and table cells from slide XML.
fn parse_slide(xml_content: &str, number: usize) -> Result<SlideSummary> {
    let mut slide = SlideSummary::new(number);
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(false);

    let mut table: Option<TableState> = None;
    let mut in_text = false;
    let mut paragraph = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"tbl" => table = Some(TableState::default()),
                b"tc" => {
                    if let Some(state) = table.as_mut() {
                        state.in_cell = true;
                        state.cell.clear();
                    }
                }
                b"p" => paragraph.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e.unescape().map_err(|err| {
                    Error::XmlError(format!("Bad text in slide {}: {}", number, err))
                })?;
                paragraph.push_str(&text);
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_text = false,
                b"p" => match table.as_mut() {
                    Some(state) if state.in_cell => {
                        if !state.cell.is_empty() && !paragraph.is_empty() {
                            state.cell.push('\n');
                        }
                        state.cell.push_str(&paragraph);
                    }
                    _ => {
                        let text = paragraph.trim();
                        if !text.is_empty() {
                            slide.texts.push(text.to_string());
                        }
                    }
                },
                b"tc" => {
                    if let Some(state) = table.as_mut() {
                        let cell = std::mem::take(&mut state.cell);
                        state.row.push(cell.trim().to_string());
                        state.in_cell = false;
                    }
                }
                b"tr" => {
                    if let Some(state) = table.as_mut() {
                        let row = std::mem::take(&mut state.row);
                        state.rows.push(row);
                    }
                }
                b"tbl" => {
                    if let Some(state) = table.take() {
                        slide.tables.push(state.rows);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing slide {}: {}",
                    number, e
                )));
            }
            _ => {}
        }
    }

    Ok(slide)
}

fn read_file_from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::CorruptedDeck(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Extract a slide number from a path like "ppt/slides/slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml");
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    s[start..].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::DeckWriter;
    use bid_core::{CompanyRecord, DeckConfig};
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn read_example() -> DeckSummary {
        let bytes = DeckWriter::new().to_bytes(&CompanyRecord::example()).unwrap();
        DeckReader::new().read(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_extract_slide_number() {
        assert_eq!(extract_slide_number("ppt/slides/slide1.xml"), Some(1));
        assert_eq!(extract_slide_number("ppt/slides/slide123.xml"), Some(123));
        assert_eq!(extract_slide_number("nodigits"), None);
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_reads_written_deck_in_order() {
        let deck = read_example();

        assert_eq!(deck.len(), 14);
        assert!(deck.slides[0].contains_text("Valeo Foods"));
        assert!(deck.slides[0].contains_text("Business Intelligence Deck (BID)"));
        assert!(deck.slides[13].contains_text("Thank You"));
        assert_eq!(deck.slides[6].number, 7);
    }

    #[test]
    fn test_reads_tables_and_footer() {
        let deck = read_example();
        let operations = &deck.slides[5];

        assert_eq!(operations.tables.len(), 1);
        let table = &operations.tables[0];
        assert_eq!(table.len(), 8);
        assert_eq!(table[1][0], "Ireland");
        assert!(operations.contains_text("Valeo Foods © EFESO | 6"));
        assert!(operations.contains_text("EFESO UK BID"));
    }

    #[test]
    fn test_reads_escaped_text() {
        let mut record = CompanyRecord::example();
        record.company_name = "Marks & Spencer <UK>".to_string();
        let bytes = DeckWriter::new()
            .with_config(DeckConfig::new())
            .to_bytes(&record)
            .unwrap();
        let deck = DeckReader::new().read(Cursor::new(bytes)).unwrap();

        assert!(deck.slides[0].contains_text("Marks & Spencer <UK>"));
    }

    #[test]
    fn test_falls_back_to_slide_numbers() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        zip.start_file(PRESENTATION_RELS_PATH, options).unwrap();
        zip.write_all(
            br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml"/></Relationships>"#,
        )
        .unwrap();
        for (name, text) in [("ppt/slides/slide1.xml", "first"), ("ppt/slides/slide2.xml", "second")] {
            zip.start_file(name, options).unwrap();
            write!(zip, "<p:sld xmlns:p=\"p\" xmlns:a=\"a\"><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:sld>", text)
                .unwrap();
        }
        let bytes = zip.finish().unwrap().into_inner();

        let deck = DeckReader::new().read(Cursor::new(bytes)).unwrap();
        assert_eq!(deck.slides[0].texts, vec!["first".to_string()]);
        assert_eq!(deck.slides[1].texts, vec!["second".to_string()]);
    }

    #[test]
    fn test_rejects_non_zip() {
        let result = DeckReader::new().read(Cursor::new(b"not a deck".to_vec()));
        assert!(matches!(result, Err(Error::CorruptedDeck(_))));
    }
}
