/// Footnote support for Word documents.
///
/// Footnote bodies live in their own part (`word/footnotes.xml`) as
/// `<w:footnote>` elements. The document points at them from runs holding a
/// `<w:footnoteReference w:id="..">`. Reference ids follow document order, so
/// adding a footnote renumbers every footnote after it.
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::paragraph::{Paragraph, new_run, run_nodes, run_text};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::ns::W_NS;
use crate::ooxml::oxml::simpletypes::parse_signed_decimal;
use crate::ooxml::oxml::{NodeId, XmlTree};

/// Character style of the reference mark in the body and in the note.
pub const FOOTNOTE_REFERENCE_STYLE: &str = "FootnoteReference";
/// Paragraph style of footnote text.
pub const FOOTNOTE_TEXT_STYLE: &str = "FootnoteText";

/// The type of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteType {
    /// Normal note with content
    Normal,
    /// Separator note (visual separator)
    Separator,
    /// Continuation separator
    ContinuationSeparator,
    /// Continuation notice
    ContinuationNotice,
}

impl NoteType {
    /// Parse note type from XML attribute value.
    fn from_xml(s: &str) -> Self {
        match s {
            "separator" => Self::Separator,
            "continuationSeparator" => Self::ContinuationSeparator,
            "continuationNotice" => Self::ContinuationNotice,
            _ => Self::Normal,
        }
    }

    /// Check if this is a normal content note (not a separator).
    #[inline]
    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// A footnote in the footnotes part.
///
/// # Examples
///
/// ```rust
/// use wordml::ooxml::docx::Document;
///
/// let mut doc = Document::new();
/// let p = doc.add_paragraph("Claim", None);
/// let id = doc.add_footnote(p, "Source")?;
///
/// let note = doc.footnote(id).unwrap();
/// assert_eq!(note.text(), "Source");
/// assert_eq!(doc.paragraph(p).unwrap().footnote_reference_ids(), [id]);
/// # Ok::<(), wordml::ooxml::error::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Footnote<'a> {
    tree: &'a XmlTree,
    node: NodeId,
}

impl<'a> Footnote<'a> {
    /// The `w:footnote` element in the footnotes part.
    #[inline]
    pub fn element(&self) -> NodeId {
        self.node
    }

    /// Note id (`w:id`). Separators use -1 and 0.
    pub fn id(&self) -> Option<i32> {
        parse_signed_decimal(&self.tree.attr(self.node, "w:id")?)
    }

    pub fn note_type(&self) -> NoteType {
        self.tree
            .attr(self.node, "w:type")
            .map_or(NoteType::Normal, |t| NoteType::from_xml(&t))
    }

    /// Paragraph elements of the note.
    pub fn paragraphs(&self) -> Vec<NodeId> {
        self.tree.children_named(self.node, "w:p").collect()
    }

    /// Text of each paragraph of the note.
    pub fn paragraph_texts(&self) -> Vec<String> {
        self.paragraphs()
            .into_iter()
            .map(|p| run_nodes(self.tree, p).into_iter().map(|r| run_text(self.tree, r)).collect())
            .collect()
    }

    /// Text of the note, one line per paragraph.
    pub fn text(&self) -> String {
        self.paragraph_texts().join("\n")
    }
}

/// Footnote reference ids of run `r`, in order.
pub(crate) fn reference_ids(tree: &XmlTree, r: NodeId) -> Vec<i32> {
    tree.children_named(r, "w:footnoteReference")
        .filter_map(|f| parse_signed_decimal(&tree.attr(f, "w:id")?))
        .collect()
}

/// Footnotes part holding only the separator notes.
pub(crate) fn default_footnotes_part() -> Result<XmlTree> {
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:footnotes xmlns:w="{W_NS}"><w:footnote w:type="separator" w:id="-1"><w:p><w:r><w:separator/></w:r></w:p></w:footnote><w:footnote w:type="continuationSeparator" w:id="0"><w:p><w:r><w:continuationSeparator/></w:r></w:p></w:footnote></w:footnotes>"#
    );
    XmlTree::parse(xml.as_bytes())
}

/// Check that `tree` is a footnotes part.
pub(crate) fn check_footnotes_part(tree: &XmlTree) -> Result<()> {
    if tree.is(tree.root(), "w:footnotes") {
        Ok(())
    } else {
        Err(OoxmlError::InvalidStructure(
            "footnotes part root is not w:footnotes".into(),
        ))
    }
}

impl Document {
    /// All notes of the footnotes part, separators included, in part order.
    pub fn footnotes(&self) -> Vec<Footnote<'_>> {
        let Some(tree) = self.footnotes_tree() else {
            return Vec::new();
        };
        tree.children_named(tree.root(), "w:footnote")
            .map(|node| Footnote { tree, node })
            .collect()
    }

    /// The note with id `id`.
    pub fn footnote(&self, id: i32) -> Option<Footnote<'_>> {
        self.footnotes().into_iter().find(|f| f.id() == Some(id))
    }

    /// Append a footnote reference to paragraph `p` and add its note.
    ///
    /// The new id follows the last reference before the new one in document
    /// order. References and notes after it are shifted up by one. The
    /// footnotes part is created when the document has none. Returns the id.
    pub fn add_footnote(&mut self, p: NodeId, text: &str) -> Result<i32> {
        if self.paragraph(p).is_none() {
            return Err(OoxmlError::NodeNotFound);
        }

        let tree = self.tree();
        let order = tree.descendants(tree.root());
        let end = order
            .iter()
            .position(|&n| n == p)
            .map_or(order.len(), |pos| pos + 1 + tree.descendants(p).len());
        let (before, after) = order.split_at(end);
        let id = before
            .iter()
            .filter(|&&n| tree.is(n, "w:footnoteReference"))
            .filter_map(|&n| parse_signed_decimal(&tree.attr(n, "w:id")?))
            .max()
            .map_or(1, |max| max.max(0) + 1);
        let shifted: Vec<(NodeId, i32)> = after
            .iter()
            .filter(|&&n| tree.is(n, "w:footnoteReference"))
            .filter_map(|&n| Some((n, parse_signed_decimal(&tree.attr(n, "w:id")?)?)))
            .filter(|&(_, ref_id)| ref_id >= id)
            .collect();

        let mut buf = itoa::Buffer::new();
        let tree = self.tree_mut();
        for (node, ref_id) in shifted {
            tree.set_attr(node, "w:id", buf.format(ref_id + 1));
        }
        let r = new_run(tree, "", Some(FOOTNOTE_REFERENCE_STYLE));
        let reference = tree.create_element_with("w:footnoteReference", &[("w:id", buf.format(id))]);
        tree.append_child(r, reference);
        tree.append_child(p, r);

        let part = self.footnotes_tree_mut()?;
        let root = part.root();
        let notes: Vec<NodeId> = part.children_named(root, "w:footnote").collect();
        let mut next_note = None;
        for note in notes {
            let Some(note_id) = part.attr(note, "w:id").and_then(|v| parse_signed_decimal(&v)) else {
                continue;
            };
            if note_id >= id {
                part.set_attr(note, "w:id", buf.format(note_id + 1));
                next_note.get_or_insert(note);
            }
        }

        let note = part.create_element_with("w:footnote", &[("w:id", buf.format(id))]);
        let para = part.create_element("w:p");
        let ppr = part.create_element("w:pPr");
        let pstyle = part.create_element_with("w:pStyle", &[("w:val", FOOTNOTE_TEXT_STYLE)]);
        part.append_child(ppr, pstyle);
        part.append_child(para, ppr);
        let mark = new_run(part, "", Some(FOOTNOTE_REFERENCE_STYLE));
        let footnote_ref = part.create_element("w:footnoteRef");
        part.append_child(mark, footnote_ref);
        part.append_child(para, mark);
        if !text.is_empty() {
            let content = new_run(part, text, None);
            part.append_child(para, content);
        }
        part.append_child(note, para);
        match next_note {
            Some(next) => {
                part.insert_before(next, note);
            },
            None => {
                part.append_child(root, note);
            },
        }

        log::debug!("added footnote {id} to paragraph {p:?}");
        Ok(id)
    }
}

impl<'a> Paragraph<'a> {
    /// Footnote reference ids in this paragraph's runs, in order.
    pub fn footnote_reference_ids(&self) -> Vec<i32> {
        self.runs()
            .iter()
            .flat_map(|run| run.footnote_reference_ids())
            .collect()
    }

    /// Notes referenced from this paragraph. References to missing notes
    /// are skipped.
    pub fn footnotes(&self) -> Vec<Footnote<'a>> {
        let doc = self.document();
        self.footnote_reference_ids()
            .into_iter()
            .filter_map(|id| doc.footnote(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOOTNOTES: &str = r#"<w:footnotes xmlns:w="urn:w"><w:footnote w:type="separator" w:id="-1"><w:p><w:r><w:separator/></w:r></w:p></w:footnote><w:footnote w:type="continuationSeparator" w:id="0"><w:p/></w:footnote><w:footnote w:id="1"><w:p><w:r><w:t>first</w:t></w:r></w:p></w:footnote><w:footnote w:id="2"><w:p><w:r><w:t>second</w:t></w:r></w:p><w:p><w:r><w:t>more</w:t></w:r></w:p></w:footnote></w:footnotes>"#;

    fn doc() -> Document {
        let body = r#"<w:document xmlns:w="urn:w"><w:body><w:p><w:r><w:t>a</w:t></w:r><w:r><w:footnoteReference w:id="1"/></w:r></w:p><w:p><w:r><w:t>b</w:t></w:r></w:p><w:p><w:r><w:footnoteReference w:id="2"/></w:r></w:p></w:body></w:document>"#;
        Document::from_parts(body.as_bytes(), None, None)
            .unwrap()
            .with_footnotes(FOOTNOTES.as_bytes())
            .unwrap()
    }

    #[test]
    fn test_read_footnotes() {
        let doc = doc();
        let notes = doc.footnotes();
        assert_eq!(notes.len(), 4);
        assert_eq!(notes[0].note_type(), NoteType::Separator);
        assert!(!notes[1].note_type().is_normal());
        assert_eq!(doc.footnote(2).unwrap().paragraph_texts(), ["second", "more"]);

        let paragraphs = doc.paragraphs();
        assert_eq!(paragraphs[0].footnote_reference_ids(), [1]);
        assert_eq!(paragraphs[0].footnotes()[0].text(), "first");
        assert!(paragraphs[1].footnotes().is_empty());
        assert_eq!(paragraphs[0].text(), "a");
    }

    #[test]
    fn test_add_footnote_renumbers_later_notes() {
        let mut doc = doc();
        let middle = doc.paragraphs()[1].id();
        let id = doc.add_footnote(middle, "inserted").unwrap();
        assert_eq!(id, 2);

        let ids: Vec<Vec<i32>> = doc.paragraphs().iter().map(Paragraph::footnote_reference_ids).collect();
        assert_eq!(ids, [vec![1], vec![2], vec![3]]);
        let texts: Vec<(Option<i32>, String)> = doc.footnotes().iter().map(|f| (f.id(), f.text())).collect();
        assert_eq!(
            texts,
            [
                (Some(-1), String::new()),
                (Some(0), String::new()),
                (Some(1), "first".to_string()),
                (Some(2), "inserted".to_string()),
                (Some(3), "second\nmore".to_string()),
            ]
        );
        assert_eq!(doc.paragraphs()[2].footnotes()[0].text(), "second\nmore");
    }

    #[test]
    fn test_add_footnote_after_own_reference() {
        let mut doc = doc();
        let first = doc.paragraphs()[0].id();
        assert_eq!(doc.add_footnote(first, "").unwrap(), 2);
        assert_eq!(doc.paragraphs()[0].footnote_reference_ids(), [1, 2]);
        assert_eq!(doc.paragraphs()[2].footnote_reference_ids(), [3]);
    }

    #[test]
    fn test_first_footnote_creates_part() {
        let mut doc = Document::new();
        assert!(doc.footnotes_xml().is_none());
        let p = doc.add_paragraph("text", None);
        assert_eq!(doc.add_footnote(p, "note").unwrap(), 1);

        let note = doc.footnote(1).unwrap();
        assert_eq!(
            doc.footnotes_tree().unwrap().node_to_xml(note.element()),
            r#"<w:footnote w:id="1"><w:p><w:pPr><w:pStyle w:val="FootnoteText"/></w:pPr><w:r><w:rPr><w:rStyle w:val="FootnoteReference"/></w:rPr><w:footnoteRef/></w:r><w:r><w:t>note</w:t></w:r></w:p></w:footnote>"#
        );
        assert_eq!(doc.footnotes().len(), 3);
        assert!(doc.footnotes_xml().unwrap().starts_with("<?xml"));
        assert_eq!(
            doc.tree().node_to_xml(p),
            r#"<w:p><w:r><w:t>text</w:t></w:r><w:r><w:rPr><w:rStyle w:val="FootnoteReference"/></w:rPr><w:footnoteReference w:id="1"/></w:r></w:p>"#
        );
    }

    #[test]
    fn test_rejects_bad_part_and_target() {
        let doc = Document::new();
        assert!(matches!(
            doc.with_footnotes(br#"<w:document xmlns:w="urn:w"/>"#),
            Err(OoxmlError::InvalidStructure(_))
        ));
        let mut doc = Document::new();
        let body = doc.body();
        assert!(matches!(doc.add_footnote(body, "x"), Err(OoxmlError::NodeNotFound)));
    }
}
