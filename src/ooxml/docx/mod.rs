/// Word (.docx) document support.
///
/// This module provides a mutable model of the body of a Word document
/// (`word/document.xml`) together with its styles and numbering parts.
///
/// # Architecture
///
/// The module is organized around these key types:
/// - `Document`: The document body, styles, numbering and number cache
/// - `Paragraph` / `ParagraphMut`: A paragraph with runs and list membership
/// - `Run`: A text run
/// - `Numbering`: The numbering definitions part
/// - `Styles`: The style definitions part
/// - `Bookmark` / `ContentControl`: Bookmarks and structured document tags
/// - `Footnote`: A note in the footnotes part
///
/// # Example
///
/// ```rust
/// use wordml::ooxml::docx::Document;
///
/// let numbering = br#"<w:numbering xmlns:w="urn:w">
///   <w:abstractNum w:abstractNumId="0">
///     <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="upperLetter"/><w:lvlText w:val="%1)"/></w:lvl>
///   </w:abstractNum>
///   <w:num w:numId="3"><w:abstractNumId w:val="0"/></w:num>
/// </w:numbering>"#;
/// let document = br#"<w:document xmlns:w="urn:w"><w:body>
///   <w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="3"/></w:numPr></w:pPr><w:r><w:t>Apples</w:t></w:r></w:p>
///   <w:p><w:pPr><w:numPr><w:ilvl w:val="0"/><w:numId w:val="3"/></w:numPr></w:pPr><w:r><w:t>Pears</w:t></w:r></w:p>
/// </w:body></w:document>"#;
///
/// let doc = Document::from_parts(document, None, Some(numbering))?;
/// for para in doc.paragraphs() {
///     println!("{}{}", para.number().unwrap_or_default(), para.text());
/// }
/// assert_eq!(doc.paragraphs()[1].number().as_deref(), Some("B)\t"));
/// # Ok::<(), wordml::ooxml::error::OoxmlError>(())
/// ```
pub mod bookmark;
pub mod content_control;
pub mod document;
pub mod enums;
pub mod footnote;
pub mod format;
pub mod hyperlink;
pub mod numbering;
pub mod options;
pub mod package;
pub mod paragraph;
pub mod styles;

pub use bookmark::{Bookmark, OpenBookmark};
pub use content_control::ContentControl;
pub use document::Document;
pub use footnote::{Footnote, NoteType};
pub use format::NumberingProperties;
pub use hyperlink::Hyperlink;
pub use numbering::{Level, NumberingError, Numbering, ResolvedNumber};
pub use options::{DocumentOptions, DocumentOptionsBuilder};
pub use package::PartSource;
pub use paragraph::{Paragraph, ParagraphMut, Run};
pub use styles::{Style, StyleCascade, Styles};
