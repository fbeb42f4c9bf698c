//! List numbering: definitions, numeral formatting and number resolution.
//!
//! Numbering state in a WordprocessingML document lives in three places that
//! have to be joined for every paragraph:
//!
//! - the paragraph's own `w:pPr/w:numPr`,
//! - the `w:numPr` of its paragraph style (through the `basedOn` chain),
//! - the numbering part (`numbering.xml`) with its `w:num` list instances and
//!   `w:abstractNum` definitions.
//!
//! [`Numbering`] wraps the numbering part, [`format_number`] turns counters
//! into text, and [`NumberResolver`] computes the display number of a
//! paragraph by scanning its preceding siblings.
//!
//! # Example
//!
//! ```rust
//! use wordml::ooxml::docx::numbering::{Numbering, format_number};
//! use wordml::ooxml::docx::enums::NumberFormat;
//!
//! let numbering = Numbering::from_xml(br#"<w:numbering xmlns:w="urn:w">
//!   <w:abstractNum w:abstractNumId="0">
//!     <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/></w:lvl>
//!   </w:abstractNum>
//!   <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
//! </w:numbering>"#)?;
//!
//! let level = numbering.abstract_definition(1)?.level(0).unwrap();
//! assert_eq!(level.text(), "%1.");
//! assert_eq!(format_number(27, NumberFormat::LowerLetter)?, "aa");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod assign;
mod definitions;
mod format;
mod resolver;
mod template;

pub use definitions::{AbstractNum, Indentation, Level, LevelOverride, Num, Numbering};
pub use format::format_number;
pub use resolver::{ListMember, NumberCache, NumberResolver, ResolvedNumber};
pub(crate) use assign::set_list_level;

use thiserror::Error;

/// Errors raised while looking up or formatting list numbers.
///
/// The resolver absorbs all of these into "not numbered"; they reach callers
/// only from the definitions store and the list assignment mutator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberingError {
    /// No `w:num` with this id
    #[error("list instance {0} not found")]
    ListNotFound(u32),

    /// The `w:num` points at a missing `w:abstractNum`
    #[error("list instance {num_id} references missing abstract definition {abstract_num_id}")]
    AbstractNotFound { num_id: u32, abstract_num_id: u32 },

    /// The abstract definition has no `w:lvl` at this index
    #[error("abstract definition {abstract_num_id} has no level {ilvl}")]
    LevelNotFound { abstract_num_id: u32, ilvl: u32 },

    /// `w:numFmt` value outside the supported set
    #[error("unsupported number format: {0}")]
    UnsupportedFormat(String),

    /// The value cannot be represented in the format (e.g. roman zero)
    #[error("value {value} cannot be formatted as {format}")]
    InvalidValue { value: u32, format: &'static str },

    /// A new list was requested for a paragraph with no list to copy from
    #[error("paragraph has no list definition to start a new list from")]
    NoListDefinition,
}
