//! PPTX deck writer.

use std::io::{Cursor, Seek, Write};

use bid_core::{sequence, CompanyRecord, DeckConfig, Error, Result, SlideDescriptor};
use unicode_normalization::UnicodeNormalization;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::layout::paginate;
use crate::package;
use crate::render::render_page;

/// Characters that are not allowed in file names on common platforms.
const FORBIDDEN_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

const FALLBACK_FILENAME: &str = "Company";

/// Writes Business Intelligence Decks as PPTX packages.
#[derive(Debug, Clone, Default)]
pub struct DeckWriter {
    config: DeckConfig,
}

impl DeckWriter {
    /// Create a writer with the default deck configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom deck configuration.
    pub fn with_config(mut self, config: DeckConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// Sequence `record` and write the deck to `writer`.
    ///
    /// Returns the number of physical slides written.
    pub fn write<W: Write + Seek>(&self, record: &CompanyRecord, writer: W) -> Result<usize> {
        let slides = sequence(record, &self.config);
        self.write_slides(&record.company_name, &slides, writer)
    }

    /// Write already-sequenced slides to `writer`.
    pub fn write_slides<W: Write + Seek>(
        &self,
        title: &str,
        slides: &[SlideDescriptor],
        writer: W,
    ) -> Result<usize> {
        let pages = paginate(slides, self.config.rows_per_page());
        let count = pages.len();
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut put = |path: &str, content: &str| -> Result<()> {
            zip.start_file(path, options)
                .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", path, e)))?;
            zip.write_all(content.as_bytes())?;
            Ok(())
        };

        put("[Content_Types].xml", &package::content_types(count)?)?;
        put("_rels/.rels", &package::root_rels())?;
        put("docProps/core.xml", &package::core_props(title))?;
        put("docProps/app.xml", &package::app_props(count))?;
        put(package::PRESENTATION_PATH, &package::presentation(count)?)?;
        put(package::PRESENTATION_RELS_PATH, &package::presentation_rels(count)?)?;
        put("ppt/slideMasters/slideMaster1.xml", &package::slide_master())?;
        put(
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &package::slide_master_rels(),
        )?;
        put("ppt/slideLayouts/slideLayout1.xml", &package::slide_layout())?;
        put(
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &package::slide_layout_rels(),
        )?;
        put("ppt/theme/theme1.xml", &package::theme())?;

        let slide_rels = package::slide_rels();
        for (index, page) in pages.iter().enumerate() {
            let number = index + 1;
            put(&package::slide_path(number), &render_page(page, &self.config)?)?;
            put(&package::slide_rels_path(number), &slide_rels)?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;

        log::info!("Wrote deck '{}' with {} slides", title, count);
        Ok(count)
    }

    /// Render the deck into an in-memory buffer.
    pub fn to_bytes(&self, record: &CompanyRecord) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write(record, &mut cursor)?;
        Ok(cursor.into_inner())
    }
}

/// File name for a company's deck: `<company>_BID.pptx`.
///
/// The name is NFC-normalized and stripped of characters that are not valid
/// in file names.
pub fn output_filename(company: &str) -> String {
    let cleaned: String = company
        .nfc()
        .filter(|c| !FORBIDDEN_FILENAME_CHARS.contains(c) && !c.is_control())
        .collect();
    let cleaned = cleaned.trim();
    let stem = if cleaned.is_empty() {
        FALLBACK_FILENAME
    } else {
        cleaned
    };
    format!("{}_BID.pptx", stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_output_filename() {
        assert_eq!(output_filename("Valeo Foods"), "Valeo Foods_BID.pptx");
        assert_eq!(output_filename("A/B: C?"), "AB C_BID.pptx");
        assert_eq!(output_filename("  "), "Company_BID.pptx");
    }

    #[test]
    fn test_output_filename_is_nfc() {
        // "e" followed by a combining acute accent.
        let decomposed = "Cafe\u{301}";
        assert_eq!(output_filename(decomposed), "Caf\u{e9}_BID.pptx");
    }

    #[test]
    fn test_package_contains_every_part() {
        let bytes = DeckWriter::new().to_bytes(&CompanyRecord::example()).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        for name in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide14.xml",
            "ppt/slides/_rels/slide14.xml.rels",
        ] {
            assert!(archive.by_name(name).is_ok(), "missing {}", name);
        }
        assert!(archive.by_name("ppt/slides/slide15.xml").is_err());

        let mut app = String::new();
        archive
            .by_name("docProps/app.xml")
            .unwrap()
            .read_to_string(&mut app)
            .unwrap();
        assert!(app.contains("<Slides>14</Slides>"));
    }

    #[test]
    fn test_write_counts_continuation_pages() {
        let mut record = CompanyRecord::example();
        record.competitors = record
            .competitors
            .iter()
            .cloned()
            .cycle()
            .take(record.competitors.len() * 3)
            .collect();
        let writer = DeckWriter::new().with_config(DeckConfig::new().with_rows_per_page(10));

        let count = writer.write(&record, Cursor::new(Vec::new())).unwrap();
        assert_eq!(count, 15);
    }

    #[test]
    fn test_empty_record_still_writes_full_deck() {
        let count = DeckWriter::new()
            .write(&CompanyRecord::default(), Cursor::new(Vec::new()))
            .unwrap();
        assert_eq!(count, 14);
    }
}
