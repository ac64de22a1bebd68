//! PPTX (Office Open XML) backend for Business Intelligence Decks.
//!
//! Renders sequenced slides into a .pptx package (a ZIP archive of XML
//! parts) and reads produced decks back for inspection.

pub mod layout;
pub mod package;
pub mod reader;
pub mod render;
pub mod writer;
pub mod xml;

pub use layout::{paginate, Page};
pub use reader::{DeckReader, DeckSummary, SlideSummary};
pub use writer::{output_filename, DeckWriter};
