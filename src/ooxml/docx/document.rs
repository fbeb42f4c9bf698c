/// Document - the main API for working with Word document content.
use crate::ooxml::docx::footnote::{check_footnotes_part, default_footnotes_part};
use crate::ooxml::docx::format::get_or_add_ppr;
use crate::ooxml::docx::numbering::{self, Level, NumberCache, NumberResolver, Numbering, ResolvedNumber};
use crate::ooxml::docx::options::DocumentOptions;
use crate::ooxml::docx::package::{DOCUMENT_PART, FOOTNOTES_PART, NUMBERING_PART, PartSource, STYLES_PART};
use crate::ooxml::docx::paragraph::{Paragraph, ParagraphMut};
use crate::ooxml::docx::styles::Styles;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::ns::{self, BODY_TAIL, PPR_SEQUENCE, R_NS, W_NS};
use crate::ooxml::oxml::{NodeId, XmlTree};

/// Elements that hold block content (paragraphs, tables, content controls).
const BLOCK_CONTAINERS: &[&str] = &["w:body", "w:sdtContent", "w:tc", "w:txbxContent", "w:hdr", "w:ftr"];

/// A Word document body together with its styles and numbering parts.
///
/// This is the main API for reading and manipulating document content.
/// Elements are addressed by [`NodeId`]; views such as [`Paragraph`] borrow
/// the document, while changes go through `&mut self` methods or
/// [`ParagraphMut`].
///
/// Resolved list numbers are cached until the next change to the document
/// or its numbering part.
///
/// # Examples
///
/// ```rust
/// use wordml::ooxml::docx::Document;
///
/// let mut doc = Document::new();
/// doc.add_paragraph("Hello", None);
/// doc.add_paragraph("World", Some("Heading1"));
///
/// assert_eq!(doc.text(), "Hello\nWorld");
/// assert_eq!(doc.paragraphs().len(), 2);
///
/// let xml = doc.document_xml();
/// assert!(xml.contains("<w:pStyle w:val=\"Heading1\"/>"));
/// ```
#[derive(Debug)]
pub struct Document {
    tree: XmlTree,
    body: NodeId,
    styles: Styles,
    numbering: Numbering,
    footnotes: Option<XmlTree>,
    options: DocumentOptions,
    numbers: NumberCache,
}

impl Document {
    /// Create an empty document with empty styles and numbering parts.
    pub fn new() -> Self {
        let mut tree = XmlTree::with_root("w:document", &[("xmlns:w", W_NS), ("xmlns:r", R_NS)]);
        let root = tree.root();
        let body = tree.create_element("w:body");
        tree.append_child(root, body);
        Self {
            tree,
            body,
            styles: Styles::new(),
            numbering: Numbering::new(),
            footnotes: None,
            options: DocumentOptions::default(),
            numbers: NumberCache::new(),
        }
    }

    /// Build a document from the raw bytes of its parts.
    ///
    /// Missing styles or numbering parts are treated as empty.
    pub fn from_parts(document_xml: &[u8], styles_xml: Option<&[u8]>, numbering_xml: Option<&[u8]>) -> Result<Self> {
        let tree = XmlTree::parse(document_xml)?;
        let root = tree.root();
        if !tree.is(root, "w:document") {
            return Err(OoxmlError::InvalidStructure(
                "document part root is not w:document".into(),
            ));
        }
        let body = tree
            .first_child(root, "w:body")
            .ok_or_else(|| OoxmlError::InvalidStructure("document has no w:body".into()))?;

        let styles = match styles_xml {
            Some(xml) => Styles::from_xml(xml.to_vec())?,
            None => Styles::new(),
        };
        let numbering = match numbering_xml {
            Some(xml) => Numbering::from_xml(xml)?,
            None => Numbering::new(),
        };

        Ok(Self {
            tree,
            body,
            styles,
            numbering,
            footnotes: None,
            options: DocumentOptions::default(),
            numbers: NumberCache::new(),
        })
    }

    /// Build a document from the parts of a package.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use wordml::ooxml::docx::Document;
    ///
    /// let mut parts: HashMap<String, Vec<u8>> = HashMap::new();
    /// parts.insert(
    ///     "word/document.xml".into(),
    ///     br#"<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:t>Hi</w:t></w:r></w:p></w:body></w:document>"#.to_vec(),
    /// );
    /// let doc = Document::load(&parts)?;
    /// assert_eq!(doc.text(), "Hi");
    /// # Ok::<(), wordml::ooxml::error::OoxmlError>(())
    /// ```
    pub fn load<P: PartSource + ?Sized>(source: &P) -> Result<Self> {
        let document = source
            .get_part(DOCUMENT_PART)
            .ok_or_else(|| OoxmlError::PartNotFound(DOCUMENT_PART.to_string()))?;
        let styles = source.get_part(STYLES_PART);
        let numbering = source.get_part(NUMBERING_PART);
        let doc = Self::from_parts(&document, styles.as_deref(), numbering.as_deref())?;
        match source.get_part(FOOTNOTES_PART) {
            Some(footnotes) => doc.with_footnotes(&footnotes),
            None => Ok(doc),
        }
    }

    /// Attach a footnotes part.
    pub fn with_footnotes(mut self, footnotes_xml: &[u8]) -> Result<Self> {
        let tree = XmlTree::parse(footnotes_xml)?;
        check_footnotes_part(&tree)?;
        self.footnotes = Some(tree);
        Ok(self)
    }

    /// Replace the document's options.
    pub fn with_options(mut self, options: DocumentOptions) -> Self {
        self.options = options;
        self.numbers.clear();
        self
    }

    #[inline]
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Serialize the main document part.
    pub fn document_xml(&self) -> String {
        self.tree.to_xml()
    }

    /// The styles part, byte for byte as loaded.
    #[inline]
    pub fn styles_xml(&self) -> &[u8] {
        self.styles.as_bytes()
    }

    /// Serialize the numbering part.
    pub fn numbering_xml(&self) -> String {
        self.numbering.to_xml()
    }

    /// Serialize the footnotes part, if the document has one.
    pub fn footnotes_xml(&self) -> Option<String> {
        self.footnotes.as_ref().map(XmlTree::to_xml)
    }

    /// The element tree of the main document part.
    #[inline]
    pub fn tree(&self) -> &XmlTree {
        &self.tree
    }

    /// Mutable tree access; drops cached numbers.
    pub(crate) fn tree_mut(&mut self) -> &mut XmlTree {
        self.numbers.clear();
        &mut self.tree
    }

    pub(crate) fn footnotes_tree(&self) -> Option<&XmlTree> {
        self.footnotes.as_ref()
    }

    /// The footnotes part, created with its separator notes when absent.
    pub(crate) fn footnotes_tree_mut(&mut self) -> Result<&mut XmlTree> {
        if self.footnotes.is_none() {
            self.footnotes = Some(default_footnotes_part()?);
        }
        self.footnotes
            .as_mut()
            .ok_or_else(|| OoxmlError::PartNotFound(FOOTNOTES_PART.to_string()))
    }

    #[inline]
    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    #[inline]
    pub fn numbering(&self) -> &Numbering {
        &self.numbering
    }

    /// Mutable access to the numbering part; drops cached numbers.
    pub fn numbering_mut(&mut self) -> &mut Numbering {
        self.numbers.clear();
        &mut self.numbering
    }

    /// The `w:body` element.
    #[inline]
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Whether `id` is part of the document (not removed or detached).
    pub fn is_live(&self, id: NodeId) -> bool {
        if !self.tree.contains(id) {
            return false;
        }
        let root = self.tree.root();
        let mut node = Some(id);
        while let Some(current) = node {
            if current == root {
                return true;
            }
            node = self.tree.parent(current);
        }
        false
    }

    /// Get all text content from the body, one line per paragraph.
    pub fn text(&self) -> String {
        self.all_paragraphs()
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Get the paragraphs directly in the body.
    pub fn paragraphs(&self) -> Vec<Paragraph<'_>> {
        self.tree
            .children_named(self.body, "w:p")
            .map(|p| Paragraph::new(self, p))
            .collect()
    }

    /// Get every paragraph in the body, including those inside content
    /// controls and tables, in document order.
    pub fn all_paragraphs(&self) -> Vec<Paragraph<'_>> {
        self.tree
            .descendants_named(self.body, "w:p")
            .into_iter()
            .map(|p| Paragraph::new(self, p))
            .collect()
    }

    /// View of paragraph `id`, if it is a paragraph still in the document.
    pub fn paragraph(&self, id: NodeId) -> Option<Paragraph<'_>> {
        self.is_paragraph(id).then(|| Paragraph::new(self, id))
    }

    /// Write access to paragraph `id`.
    pub fn paragraph_mut(&mut self, id: NodeId) -> Option<ParagraphMut<'_>> {
        if self.is_paragraph(id) {
            Some(ParagraphMut::new(self, id))
        } else {
            None
        }
    }

    fn is_paragraph(&self, id: NodeId) -> bool {
        self.is_live(id) && self.tree.is(id, "w:p")
    }

    /// Append a paragraph to the body, before the final section properties.
    ///
    /// `text`, if not empty, becomes a single run; `style` is a paragraph
    /// style id or name.
    pub fn add_paragraph(&mut self, text: &str, style: Option<&str>) -> NodeId {
        let p = self.tree_mut().create_element("w:p");
        self.append_block(self.body, p);
        self.fill_paragraph(p, text, style);
        p
    }

    /// Append a paragraph to `container`: the body, a content control or
    /// another block container.
    pub fn add_paragraph_to(&mut self, container: NodeId, text: &str, style: Option<&str>) -> Result<NodeId> {
        let container = self.block_container(container)?;
        let p = self.tree_mut().create_element("w:p");
        self.append_block(container, p);
        self.fill_paragraph(p, text, style);
        Ok(p)
    }

    /// Append a paragraph to the body and put it into a list.
    ///
    /// When neither `prev` nor `ilvl` is given this is [`Document::add_paragraph`].
    /// Otherwise the list is assigned as by [`ParagraphMut::set_list_level`];
    /// if that fails the paragraph is removed again.
    pub fn add_list_paragraph(
        &mut self,
        text: &str,
        style: Option<&str>,
        prev: Option<NodeId>,
        ilvl: Option<u32>,
    ) -> Result<NodeId> {
        let p = self.add_paragraph(text, style);
        if prev.is_some() || ilvl.is_some() {
            if let Err(e) = self.assign_list_level(p, prev, ilvl) {
                self.tree_mut().detach(p);
                return Err(e);
            }
        }
        Ok(p)
    }

    /// Insert a new paragraph directly before `id`.
    pub fn insert_paragraph_before(&mut self, id: NodeId, text: &str, style: Option<&str>) -> Result<NodeId> {
        if !self.is_live(id) || id == self.body || self.tree.parent(id).is_none() {
            return Err(OoxmlError::NodeNotFound);
        }
        let tree = self.tree_mut();
        let p = tree.create_element("w:p");
        tree.insert_before(id, p).ok_or(OoxmlError::NodeNotFound)?;
        self.fill_paragraph(p, text, style);
        Ok(p)
    }

    /// Remove paragraph `id` from the document.
    pub fn remove_paragraph(&mut self, id: NodeId) -> Result<()> {
        if !self.is_paragraph(id) {
            return Err(OoxmlError::NodeNotFound);
        }
        self.tree_mut().detach(id);
        Ok(())
    }

    /// Remove all body content except the final section properties.
    pub fn clear_body(&mut self) {
        let body = self.body;
        let tree = self.tree_mut();
        let content: Vec<NodeId> = tree
            .children(body)
            .iter()
            .copied()
            .filter(|&c| !tree.is(c, "w:sectPr"))
            .collect();
        for child in content {
            tree.detach(child);
        }
    }

    /// Start a new section at the end of the body.
    ///
    /// A copy of the body's section properties goes into a new empty
    /// paragraph, which ends the current section. Returns the body's
    /// `w:sectPr`, which now describes the new last section.
    pub fn add_section_break(&mut self) -> NodeId {
        let body = self.body;
        let tree = self.tree_mut();
        let sentinel = tree.get_or_add_child(body, "w:sectPr", &[]);
        let copy = tree.deep_clone(sentinel);
        let p = tree.create_element("w:p");
        tree.insert_ordered(body, p, BODY_TAIL);
        let ppr = get_or_add_ppr(tree, p);
        tree.insert_ordered(ppr, copy, ns::successors(PPR_SEQUENCE, "w:sectPr"));
        log::debug!("section break added in paragraph {p:?}");
        sentinel
    }

    fn fill_paragraph(&mut self, p: NodeId, text: &str, style: Option<&str>) {
        let mut para = ParagraphMut::new(self, p);
        if !text.is_empty() {
            para.add_run(text, None);
        }
        if style.is_some() {
            para.set_style(style);
        }
    }

    /// Put paragraph `p` into a list; see [`ParagraphMut::set_list_level`].
    pub(crate) fn assign_list_level(
        &mut self,
        p: NodeId,
        predecessor: Option<NodeId>,
        ilvl: Option<u32>,
    ) -> Result<(u32, u32)> {
        if !self.is_paragraph(p) {
            return Err(OoxmlError::NodeNotFound);
        }
        self.numbers.clear();
        let written = numbering::set_list_level(
            &mut self.tree,
            &mut self.numbering,
            &self.styles,
            p,
            predecessor,
            ilvl,
        )?;
        log::debug!("paragraph {p:?} assigned to list {} level {}", written.0, written.1);
        Ok(written)
    }

    /// Resolve the list number of paragraph `p`.
    pub(crate) fn resolve_number(&self, p: NodeId) -> Option<ResolvedNumber> {
        if self.options.cache_numbers {
            NumberResolver::new(&self.tree, &self.numbering, &self.styles, &self.numbers).resolve(p)
        } else {
            let scratch = NumberCache::new();
            NumberResolver::new(&self.tree, &self.numbering, &self.styles, &scratch).resolve(p)
        }
    }

    /// The numbering level formatting paragraph `p`.
    pub(crate) fn level_format(&self, p: NodeId) -> Option<Level<'_>> {
        NumberResolver::new(&self.tree, &self.numbering, &self.styles, &self.numbers).level(p)
    }

    /// Cached list numbers, for inspection.
    #[inline]
    pub fn number_cache(&self) -> &NumberCache {
        &self.numbers
    }

    pub(crate) fn invalidate_numbers(&self) {
        self.numbers.clear();
    }

    /// The element that receives block content for `id`.
    ///
    /// Content controls resolve to their `w:sdtContent`.
    pub(crate) fn block_container(&self, id: NodeId) -> Result<NodeId> {
        if !self.is_live(id) {
            return Err(OoxmlError::NodeNotFound);
        }
        match self.tree.name(id) {
            Some("w:sdt") => self.tree.first_child(id, "w:sdtContent").ok_or_else(|| {
                OoxmlError::InvalidStructure("content control has no w:sdtContent".into())
            }),
            Some(name) if BLOCK_CONTAINERS.contains(&name) => Ok(id),
            Some(name) => Err(OoxmlError::InvalidStructure(format!(
                "{name} cannot hold block content"
            ))),
            None => Err(OoxmlError::NodeNotFound),
        }
    }

    /// Append `node` to `container`, keeping the body's section properties
    /// last.
    pub(crate) fn append_block(&mut self, container: NodeId, node: NodeId) {
        if container == self.body {
            self.tree_mut().insert_ordered(container, node, BODY_TAIL);
        } else {
            self.tree_mut().append_child(container, node);
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::enums::WdParagraphAlignment;

    const NUMBERING: &str = r#"<w:numbering xmlns:w="urn:w"><w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/><w:suff w:val="space"/></w:lvl><w:lvl w:ilvl="1"><w:start w:val="1"/><w:numFmt w:val="lowerLetter"/><w:lvlText w:val="%1.%2"/><w:suff w:val="nothing"/></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;

    const STYLES: &str = r#"<w:styles xmlns:w="urn:w"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="ListNumber"><w:name w:val="List Number"/><w:basedOn w:val="Normal"/><w:pPr><w:numPr><w:numId w:val="1"/></w:numPr></w:pPr></w:style></w:styles>"#;

    fn doc(body: &str) -> Document {
        let _ = env_logger::builder().is_test(true).try_init();
        let xml = format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="urn:w"><w:body>{body}<w:sectPr/></w:body></w:document>"#);
        Document::from_parts(xml.as_bytes(), Some(STYLES.as_bytes()), Some(NUMBERING.as_bytes())).unwrap()
    }

    fn numbers(doc: &Document) -> Vec<Option<String>> {
        doc.paragraphs().iter().map(Paragraph::number).collect()
    }

    fn some(items: &[&str]) -> Vec<Option<String>> {
        items.iter().map(|s| Some(s.to_string())).collect()
    }

    #[test]
    fn test_untouched_round_trip() {
        let body = r#"<w:p><w:pPr><w:pStyle w:val="ListNumber"/></w:pPr><w:r><w:t xml:space="preserve">a &amp; b </w:t></w:r></w:p><!-- note --><w:p/>"#;
        let original = format!(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="urn:w"><w:body>{body}<w:sectPr/></w:body></w:document>"#);
        let doc = doc(body);
        assert_eq!(doc.document_xml(), original);
        assert_eq!(doc.numbering_xml(), NUMBERING);
        assert_eq!(doc.styles_xml(), STYLES.as_bytes());
    }

    #[test]
    fn test_missing_parts() {
        let doc = Document::from_parts(br#"<w:document xmlns:w="urn:w"><w:body/></w:document>"#, None, None).unwrap();
        assert!(doc.styles().is_empty());
        assert_eq!(doc.numbering().nums().count(), 0);
        assert!(matches!(
            Document::from_parts(br#"<w:document xmlns:w="urn:w"/>"#, None, None),
            Err(OoxmlError::InvalidStructure(_))
        ));
        let empty: std::collections::HashMap<String, Vec<u8>> = std::collections::HashMap::new();
        assert!(matches!(Document::load(&empty), Err(OoxmlError::PartNotFound(_))));
    }

    #[test]
    fn test_style_numbered_list() {
        let mut doc = doc("");
        for text in ["one", "two", "three"] {
            doc.add_paragraph(text, Some("List Number"));
        }
        assert_eq!(numbers(&doc), some(&["1. ", "2. ", "3. "]));
        assert_eq!(doc.paragraphs()[0].style().as_deref(), Some("ListNumber"));
    }

    #[test]
    fn test_cache_invalidated_by_earlier_insert() {
        let mut doc = doc("");
        let first = doc.add_paragraph("one", Some("ListNumber"));
        let second = doc.add_paragraph("two", Some("ListNumber"));
        assert_eq!(doc.paragraph(second).unwrap().number().as_deref(), Some("2. "));
        assert!(!doc.number_cache().is_empty());

        doc.insert_paragraph_before(first, "zero", Some("ListNumber")).unwrap();
        assert!(doc.number_cache().is_empty());
        assert_eq!(doc.paragraph(second).unwrap().number().as_deref(), Some("3. "));

        doc.remove_paragraph(first).unwrap();
        assert_eq!(doc.paragraph(second).unwrap().number().as_deref(), Some("2. "));
        assert!(doc.paragraph(first).is_none());
    }

    #[test]
    fn test_cache_invalidated_by_numbering_change() {
        let mut doc = doc("");
        let p = doc.add_paragraph("one", Some("ListNumber"));
        assert_eq!(doc.paragraph(p).unwrap().number().as_deref(), Some("1. "));
        doc.numbering_mut().add_level_override(1, 0, Some(5)).unwrap();
        assert_eq!(doc.paragraph(p).unwrap().number().as_deref(), Some("5. "));
    }

    #[test]
    fn test_uncached_resolution() {
        let mut doc = doc("").with_options(DocumentOptions::builder().cache_numbers(false).build());
        doc.add_paragraph("one", Some("ListNumber"));
        doc.add_paragraph("two", Some("ListNumber"));
        assert_eq!(numbers(&doc), some(&["1. ", "2. "]));
        assert!(doc.number_cache().is_empty());
    }

    #[test]
    fn test_multi_level_list() {
        let mut doc = doc("");
        let top = doc.add_paragraph("top", Some("ListNumber"));
        let a = doc.add_list_paragraph("a", None, Some(top), Some(1)).unwrap();
        doc.add_list_paragraph("b", None, Some(a), None).unwrap();
        doc.add_list_paragraph("next", None, Some(a), Some(0)).unwrap();
        assert_eq!(numbers(&doc), some(&["1. ", "1.a", "1.b", "2. "]));

        let level = doc.paragraph(a).unwrap().level_format().unwrap();
        assert_eq!(level.ilvl(), Some(1));
        assert_eq!(level.text(), "%1.%2");
    }

    #[test]
    fn test_new_list_restarts() {
        let mut doc = doc("");
        for text in ["one", "two", "again"] {
            let p = doc.add_paragraph(text, None);
            doc.paragraph_mut(p).unwrap().set_num_pr(1, 0);
        }
        assert_eq!(numbers(&doc), some(&["1. ", "2. ", "3. "]));

        let again = doc.paragraphs()[2].id();
        let written = doc.paragraph_mut(again).unwrap().set_list_level(None, Some(0)).unwrap();
        assert_eq!(written, (2, 0));
        let props = doc.paragraph(again).unwrap().numbering_properties().unwrap();
        assert_eq!((props.num_id, props.ilvl), (Some(2), Some(0)));
        assert_eq!(doc.numbering().effective_start_value(2, 0), 1);
        assert_eq!(numbers(&doc), some(&["1. ", "2. ", "1. "]));
    }

    #[test]
    fn test_style_paragraph_anchors_on_restarted_list() {
        let mut doc = doc("");
        doc.add_paragraph("one", Some("ListNumber"));
        let restarted = doc.add_paragraph("restarted", Some("ListNumber"));
        let written = doc.paragraph_mut(restarted).unwrap().set_list_level(None, Some(0)).unwrap();
        assert_eq!(written, (2, 0));
        doc.numbering_mut().add_level_override(2, 0, Some(4)).unwrap();
        doc.add_paragraph("follows", Some("ListNumber"));

        // The restarted paragraph counts the earlier same-style paragraph on
        // top of its override; the last one continues from the override.
        assert_eq!(numbers(&doc), some(&["1. ", "5. ", "5. "]));
        assert_eq!(doc.paragraphs()[2].resolved_number().unwrap().value, 5);
    }

    #[test]
    fn test_failed_list_paragraph_rolled_back() {
        let mut doc = doc("");
        assert!(matches!(
            doc.add_list_paragraph("plain", None, None, Some(0)),
            Err(OoxmlError::Numbering(numbering::NumberingError::NoListDefinition))
        ));
        assert!(doc.paragraphs().is_empty());
    }

    #[test]
    fn test_paragraph_editing() {
        let mut doc = doc(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>old</w:t></w:r></w:p>"#);
        let p = doc.paragraphs()[0].id();
        {
            let mut para = doc.paragraph_mut(p).unwrap();
            para.set_text("new\ttext").set_alignment(Some(WdParagraphAlignment::Right));
            para.add_run(" more", Some("Emphasis"));
            para.add_hyperlink("rId9", "link");
        }
        let para = doc.paragraph(p).unwrap();
        assert_eq!(para.text(), "new\ttext morelink");
        assert_eq!(para.alignment(), Some(WdParagraphAlignment::Right));
        assert_eq!(para.runs().len(), 3);
        assert_eq!(para.runs()[1].style().as_deref(), Some("Emphasis"));
        assert_eq!(para.hyperlinks()[0].relationship_id().as_deref(), Some("rId9"));
        assert_eq!(doc.tree().attr(doc.tree().root(), "xmlns:r").as_deref(), Some(R_NS));

        doc.paragraph_mut(p).unwrap().clear().set_alignment(None);
        assert_eq!(doc.tree().node_to_xml(p), "<w:p><w:pPr></w:pPr></w:p>");
    }

    #[test]
    fn test_clear_body_keeps_sect_pr() {
        let mut doc = doc("<w:p/><w:tbl/>");
        doc.clear_body();
        let body = doc.body();
        assert_eq!(doc.tree().node_to_xml(body), "<w:body><w:sectPr/></w:body>");
        let p = doc.add_paragraph("x", None);
        assert_eq!(doc.tree().position(p), Some(0));
    }

    #[test]
    fn test_section_break() {
        let mut doc = doc(r#"<w:p><w:r><w:t>first</w:t></w:r></w:p>"#);
        let body = doc.body();
        let sentinel = doc.tree().first_child(body, "w:sectPr").unwrap();
        doc.tree_mut().set_attr(sentinel, "w:rsidR", "00A1");

        assert_eq!(doc.add_section_break(), sentinel);
        doc.add_paragraph("second", None);
        assert_eq!(
            doc.tree().node_to_xml(body),
            r#"<w:body><w:p><w:r><w:t>first</w:t></w:r></w:p><w:p><w:pPr><w:sectPr w:rsidR="00A1"/></w:pPr></w:p><w:p><w:r><w:t>second</w:t></w:r></w:p><w:sectPr w:rsidR="00A1"/></w:body>"#
        );
        assert_eq!(doc.text(), "first\n\nsecond");
    }

    #[test]
    fn test_section_break_without_sect_pr() {
        let mut doc = Document::new();
        let sentinel = doc.add_section_break();
        let body = doc.body();
        assert_eq!(doc.tree().position(sentinel), Some(1));
        assert_eq!(
            doc.tree().node_to_xml(body),
            "<w:body><w:p><w:pPr><w:sectPr/></w:pPr></w:p><w:sectPr/></w:body>"
        );
    }

    #[test]
    fn test_load_footnotes_part() {
        let mut parts: std::collections::HashMap<String, Vec<u8>> = std::collections::HashMap::new();
        parts.insert(
            DOCUMENT_PART.into(),
            br#"<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:footnoteReference w:id="1"/></w:r></w:p></w:body></w:document>"#.to_vec(),
        );
        parts.insert(
            format!("/{FOOTNOTES_PART}"),
            br#"<w:footnotes xmlns:w="urn:w"><w:footnote w:id="1"><w:p><w:r><w:t>note</w:t></w:r></w:p></w:footnote></w:footnotes>"#.to_vec(),
        );
        let doc = Document::load(&parts).unwrap();
        assert_eq!(doc.paragraphs()[0].footnotes()[0].text(), "note");
        assert!(Document::load(&parts).unwrap().footnotes_xml().is_some());

        parts.remove(&format!("/{FOOTNOTES_PART}"));
        assert!(Document::load(&parts).unwrap().footnotes().is_empty());
    }

    #[test]
    fn test_insert_before_rejects_removed() {
        let mut doc = doc("<w:p/>");
        let p = doc.paragraphs()[0].id();
        doc.remove_paragraph(p).unwrap();
        assert!(matches!(doc.insert_paragraph_before(p, "x", None), Err(OoxmlError::NodeNotFound)));
        assert!(matches!(doc.remove_paragraph(p), Err(OoxmlError::NodeNotFound)));
    }
}
