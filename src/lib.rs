//! PDF Worksheets Library
//!
//! Assembles a language-learning worksheet PDF out of three sections:
//! - a preparation (matching) task with a shuffled answer column and key
//! - a reading extract with true/false statements and a scored answers page
//! - a discussion prompt
//!
//! Each section is rendered into its own PDF fragment; the fragments are
//! merged, in fixed order, into one output document. Section content can be
//! supplied directly or generated on demand through a [`source::ContentSource`].
//!
//! # Example
//!
//! ```no_run
//! use pdf_worksheets::document::DocumentAssembler;
//! use pdf_worksheets::source::OllamaSource;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use std::path::Path;
//!
//! let mut assembler = DocumentAssembler::new("Reading", "A1", "A restaurant menu");
//! let source = OllamaSource::default();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let ok = assembler.generate(&source, &mut rng, Path::new("final_document.pdf"));
//! assert!(ok);
//! ```

pub mod content;
pub mod document;
pub mod error;
pub mod layout;
pub mod matching;
pub mod pdf;
pub mod render;
pub mod source;

// Re-export commonly used items
pub use error::{Error, Result};
