//! Office Open XML (OOXML) format implementation.
//!
//! This module provides a mutable model of WordprocessingML documents.
//!
//! # Architecture
//!
//! The module is organized into several layers:
//!
//! 1. **XML Layer** (`oxml`): An element tree that round-trips untouched markup
//! 2. **Shared Utilities** (`error`): Error types used across the layers
//! 3. **Word Documents** (`docx`): Paragraphs, styles, numbering, bookmarks
//!    and content controls
//!
//! # Example: Working with Word Documents
//!
//! ```rust
//! use wordml::ooxml::docx::Document;
//!
//! let mut doc = Document::new();
//! let p = doc.add_paragraph("Hello", None);
//! doc.paragraph_mut(p).unwrap().add_run(", world", None);
//! assert_eq!(doc.text(), "Hello, world");
//! ```
pub mod docx;
pub mod error;
pub mod oxml;

// Re-export error types
pub use error::{OoxmlError, Result};
