//! Wordml - a mutable model of WordprocessingML documents
//!
//! This library parses the body of a Word document (`word/document.xml`)
//! together with its styles and numbering parts into an element tree that
//! can be inspected, edited and written back. Markup the library does not
//! touch is reproduced byte for byte.
//!
//! # Features
//!
//! - **List numbering**: Compute the displayed number of any paragraph
//!   ("1.", "a)", "iii.", "2.1.3") from direct and style numbering,
//!   list instances, abstract definitions and level overrides
//! - **List assignment**: Continue a list or start a new list instance
//! - **Paragraphs and runs**: Read and write text, styles and alignment
//! - **Bookmarks and content controls**: Create, list and navigate them
//!
//! # Example - Numbered paragraphs
//!
//! ```
//! use wordml::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = Document::new();
//! let abstract_id = doc
//!     .numbering_mut()
//!     .add_abstract_num(&[(0, "decimal", "%1."), (1, "lowerLetter", "%1.%2.")]);
//! let num_id = doc.numbering_mut().add_num(abstract_id);
//!
//! let intro = doc.add_paragraph("Introduction", None);
//! doc.paragraph_mut(intro).unwrap().set_num_pr(num_id, 0);
//! let scope = doc.add_list_paragraph("Scope", None, Some(intro), Some(1))?;
//! let terms = doc.add_list_paragraph("Terms", None, Some(scope), Some(0))?;
//!
//! let numbers: Vec<_> = [intro, scope, terms]
//!     .iter()
//!     .map(|&p| doc.paragraph(p).unwrap().resolved_number().unwrap().text)
//!     .collect();
//! assert_eq!(numbers, ["1.", "1.a.", "2."]);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Loading parts
//!
//! ```
//! use std::collections::HashMap;
//! use wordml::Document;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut parts: HashMap<String, Vec<u8>> = HashMap::new();
//! parts.insert(
//!     "word/document.xml".into(),
//!     br#"<w:document xmlns:w="urn:w"><w:body><w:p/></w:body></w:document>"#.to_vec(),
//! );
//! let doc = Document::load(&parts)?;
//! assert_eq!(doc.paragraphs().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod ooxml;

pub use ooxml::docx::{Document, DocumentOptions, Paragraph, ParagraphMut, ResolvedNumber};
pub use ooxml::error::{OoxmlError, Result};
