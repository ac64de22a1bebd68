//! Core types for Business Intelligence Decks: the company record, the
//! question schema, row import, template export and slide sequencing.

pub mod config;
pub mod decode;
pub mod error;
pub mod import;
pub mod normalize;
pub mod partial;
pub mod rows;
pub mod sample;
pub mod schema;
pub mod session;
pub mod slides;
pub mod template;
pub mod types;

pub use config::DeckConfig;
pub use decode::{decode_json, decode_section_json, decode_text, encode_text};
pub use error::{Error, Result};
pub use import::{import_rows, ImportReport, SkipReason, SkippedRow};
pub use normalize::clean_financials;
pub use partial::{FieldValue, PartialRecord};
pub use rows::{read_csv, write_csv, AnswerRow};
pub use schema::{canonical_id, lookup, mappings, FieldMapping, FieldPath, Section, Shape, SubField};
pub use session::Session;
pub use slides::{sequence, SlideContent, SlideDescriptor, SlideKind, SlideViewer, TOTAL_SLIDES};
pub use template::{template_rows, write_template_csv};
pub use types::{
    CompanyRecord, Competitor, FinancialYear, FollowUpAction, Item, Leader, Operation, ProductLine,
};
