//! External enrichment of company records.
//!
//! One request per enrichable section is sent to a chat-completion service.
//! Requests run concurrently; each section succeeds or fails on its own and
//! the successful ones are merged into a partial record.

pub mod client;
pub mod config;
pub mod enricher;
pub mod error;
pub mod prompts;

pub use client::{CompletionClient, FieldRequest, PerplexityClient};
pub use config::EnrichConfig;
pub use enricher::{Enricher, EnrichmentReport};
pub use error::{FieldFailure, Result};
