/// Content control (structured document tag) support for Word documents.
///
/// Content controls are `<w:sdt>` elements: a property block (`w:sdtPr`)
/// carrying the tag and display alias, and a content block
/// (`w:sdtContent`) holding paragraphs, runs or further controls.
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::paragraph::{Paragraph, run_nodes, run_text};
use crate::ooxml::error::Result;
use crate::ooxml::oxml::ns::{self, SDT_SEQUENCE, SDTPR_SEQUENCE};
use crate::ooxml::oxml::{NodeId, XmlTree};
use std::borrow::Cow;

/// A content control in a Word document.
///
/// # Examples
///
/// ```rust
/// use wordml::ooxml::docx::Document;
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// let sdt = doc.add_sdt(body, "customer", None)?;
/// assert!(doc.content_control(sdt).unwrap().is_empty());
///
/// doc.add_paragraph_to(sdt, "ACME Corp", None)?;
/// for control in doc.sdts(body)? {
///     println!("{:?} ({:?}): {}", control.tag(), control.alias(), control.text());
/// }
/// assert_eq!(doc.content_control(sdt).unwrap().text(), "ACME Corp");
/// # Ok::<(), wordml::ooxml::error::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ContentControl<'a> {
    doc: &'a Document,
    node: NodeId,
}

impl<'a> ContentControl<'a> {
    pub(crate) fn new(doc: &'a Document, node: NodeId) -> Self {
        Self { doc, node }
    }

    fn tree(&self) -> &'a XmlTree {
        self.doc.tree()
    }

    /// The `w:sdt` element.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.node
    }

    /// The `w:sdtContent` element, if present.
    pub fn content(&self) -> Option<NodeId> {
        self.tree().first_child(self.node, "w:sdtContent")
    }

    /// Tag (`w:tag`), the control's programmatic name.
    pub fn tag(&self) -> Option<Cow<'a, str>> {
        self.property("w:tag")
    }

    /// Same as [`ContentControl::tag`].
    #[inline]
    pub fn name(&self) -> Option<Cow<'a, str>> {
        self.tag()
    }

    /// Display name (`w:alias`).
    pub fn alias(&self) -> Option<Cow<'a, str>> {
        self.property("w:alias")
    }

    fn property(&self, name: &str) -> Option<Cow<'a, str>> {
        let tree = self.tree();
        tree.child_val(tree.first_child(self.node, "w:sdtPr")?, name)
    }

    /// Whether the control shows its placeholder text.
    pub fn is_showing_placeholder(&self) -> bool {
        self.tree()
            .find_path(self.node, &["w:sdtPr", "w:showingPlcHdr"])
            .is_some()
    }

    /// Whether the control shows its placeholder or holds no text.
    pub fn is_empty(&self) -> bool {
        self.is_showing_placeholder() || self.text().is_empty()
    }

    /// Text of every run in the content, in document order.
    pub fn text(&self) -> String {
        let tree = self.tree();
        self.content()
            .map(|content| run_nodes(tree, content).into_iter().map(|r| run_text(tree, r)).collect())
            .unwrap_or_default()
    }

    /// Paragraphs directly inside the content.
    pub fn paragraphs(&self) -> Vec<Paragraph<'a>> {
        let Some(content) = self.content() else {
            return Vec::new();
        };
        self.tree()
            .children_named(content, "w:p")
            .map(|p| Paragraph::new(self.doc, p))
            .collect()
    }

    /// Content controls directly inside the content.
    pub fn sdts(&self) -> Vec<ContentControl<'a>> {
        let Some(content) = self.content() else {
            return Vec::new();
        };
        self.tree()
            .children_named(content, "w:sdt")
            .map(|sdt| ContentControl::new(self.doc, sdt))
            .collect()
    }
}

impl Document {
    /// Append a rich text content control to `container`.
    ///
    /// `alias` defaults to `tag`. Returns the new `w:sdt`.
    pub fn add_sdt(&mut self, container: NodeId, tag: &str, alias: Option<&str>) -> Result<NodeId> {
        let container = self.block_container(container)?;
        let alias = alias.filter(|a| !a.is_empty()).unwrap_or(tag);

        let tree = self.tree_mut();
        let sdt = tree.create_element("w:sdt");
        let sdt_pr = tree.get_or_add_child(sdt, "w:sdtPr", ns::successors(SDT_SEQUENCE, "w:sdtPr"));
        for (name, value) in [("w:alias", alias), ("w:tag", tag)] {
            let child = tree.get_or_add_child(sdt_pr, name, ns::successors(SDTPR_SEQUENCE, name));
            tree.set_attr(child, "w:val", value);
        }
        let content = tree.get_or_add_child(sdt, "w:sdtContent", ns::successors(SDT_SEQUENCE, "w:sdtContent"));
        tree.mark_open(content);

        self.append_block(container, sdt);
        self.invalidate_numbers();
        Ok(sdt)
    }

    /// View of the `w:sdt` element `id`.
    pub fn content_control(&self, id: NodeId) -> Option<ContentControl<'_>> {
        (self.is_live(id) && self.tree().is(id, "w:sdt")).then(|| ContentControl::new(self, id))
    }

    /// Content controls that are direct children of `container`.
    pub fn sdts(&self, container: NodeId) -> Result<Vec<ContentControl<'_>>> {
        let container = self.block_container(container)?;
        Ok(self
            .tree()
            .children_named(container, "w:sdt")
            .map(|sdt| ContentControl::new(self, sdt))
            .collect())
    }

    /// Content controls anywhere below `container`, in document order.
    pub fn sdts_all(&self, container: NodeId) -> Result<Vec<ContentControl<'_>>> {
        let container = self.block_container(container)?;
        Ok(self
            .tree()
            .descendants_named(container, "w:sdt")
            .into_iter()
            .map(|sdt| ContentControl::new(self, sdt))
            .collect())
    }

    /// Content control with tag `tag` anywhere in the body.
    pub fn sdt_by_tag(&self, tag: &str) -> Option<ContentControl<'_>> {
        let tree = self.tree();
        tree.descendants_named(self.body(), "w:sdt")
            .into_iter()
            .map(|sdt| ContentControl::new(self, sdt))
            .find(|control| control.tag().as_deref() == Some(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Document {
        let xml = format!(r#"<w:document xmlns:w="urn:w"><w:body>{body}</w:body></w:document>"#);
        Document::from_parts(xml.as_bytes(), None, None).unwrap()
    }

    #[test]
    fn test_add_sdt_shape() {
        let mut doc = doc("<w:p/><w:sectPr/>");
        let body = doc.body();
        let sdt = doc.add_sdt(body, "client", None).unwrap();
        assert_eq!(
            doc.tree().node_to_xml(sdt),
            r#"<w:sdt><w:sdtPr><w:alias w:val="client"/><w:tag w:val="client"/></w:sdtPr><w:sdtContent></w:sdtContent></w:sdt>"#
        );
        assert!(doc.tree().is(doc.tree().child_elements(body).last().unwrap(), "w:sectPr"));

        let named = doc.add_sdt(body, "addr", Some("Address")).unwrap();
        let control = doc.content_control(named).unwrap();
        assert_eq!(control.tag().as_deref(), Some("addr"));
        assert_eq!(control.name().as_deref(), Some("addr"));
        assert_eq!(control.alias().as_deref(), Some("Address"));
    }

    #[test]
    fn test_nested_and_text() {
        let mut doc = doc("");
        let body = doc.body();
        let outer = doc.add_sdt(body, "outer", None).unwrap();
        let inner = doc.add_sdt(outer, "inner", None).unwrap();
        doc.add_paragraph_to(outer, "first", None).unwrap();
        doc.add_paragraph_to(inner, "second", None).unwrap();

        assert_eq!(doc.sdts(body).unwrap().len(), 1);
        assert_eq!(doc.sdts_all(body).unwrap().len(), 2);

        let outer_view = doc.content_control(outer).unwrap();
        assert_eq!(outer_view.sdts().len(), 1);
        assert_eq!(outer_view.paragraphs().len(), 1);
        assert_eq!(outer_view.text(), "secondfirst");
        assert_eq!(doc.sdt_by_tag("inner").unwrap().text(), "second");
    }

    #[test]
    fn test_is_empty() {
        let doc = doc(concat!(
            r#"<w:sdt><w:sdtPr><w:tag w:val="ph"/><w:showingPlcHdr/></w:sdtPr><w:sdtContent><w:p><w:r><w:t>Click here</w:t></w:r></w:p></w:sdtContent></w:sdt>"#,
            r#"<w:sdt><w:sdtPr><w:tag w:val="blank"/></w:sdtPr><w:sdtContent><w:p/></w:sdtContent></w:sdt>"#,
            r#"<w:sdt><w:sdtPr><w:tag w:val="full"/></w:sdtPr><w:sdtContent><w:r><w:t>x</w:t></w:r></w:sdtContent></w:sdt>"#,
        ));
        let empties: Vec<bool> = doc
            .sdts(doc.body())
            .unwrap()
            .iter()
            .map(ContentControl::is_empty)
            .collect();
        assert_eq!(empties, [true, true, false]);
    }
}
