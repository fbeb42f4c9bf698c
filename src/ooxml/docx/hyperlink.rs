/// Hyperlinks inside paragraphs.
///
/// A `<w:hyperlink>` either points at an external target through a
/// relationship id (`r:id`) or at a bookmark in the same document
/// (`w:anchor`). Resolving relationship ids to URLs belongs to the package
/// layer and is not done here.
use crate::ooxml::docx::paragraph::{Run, run_nodes};
use crate::ooxml::oxml::{NodeId, XmlTree};
use std::borrow::Cow;

/// A hyperlink in a paragraph.
///
/// # Examples
///
/// ```rust
/// use wordml::ooxml::docx::Document;
///
/// let mut doc = Document::new();
/// let p = doc.add_paragraph("See ", None);
/// doc.paragraph_mut(p).unwrap().add_hyperlink("Summary", "the summary");
///
/// let para = doc.paragraph(p).unwrap();
/// let link = &para.hyperlinks()[0];
/// assert_eq!(link.anchor().as_deref(), Some("Summary"));
/// assert_eq!(link.text(), "the summary");
/// assert_eq!(para.text(), "See the summary");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Hyperlink<'a> {
    tree: &'a XmlTree,
    node: NodeId,
}

impl<'a> Hyperlink<'a> {
    pub(crate) fn new(tree: &'a XmlTree, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// The `w:hyperlink` element.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.node
    }

    /// Relationship id of an external target.
    pub fn relationship_id(&self) -> Option<Cow<'a, str>> {
        self.tree.attr(self.node, "r:id")
    }

    /// Bookmark name of an internal target.
    pub fn anchor(&self) -> Option<Cow<'a, str>> {
        self.tree.attr(self.node, "w:anchor")
    }

    /// Whether the link targets a bookmark rather than an external resource.
    pub fn is_internal(&self) -> bool {
        self.relationship_id().is_none() && self.anchor().is_some()
    }

    /// Runs displayed for the link.
    pub fn runs(&self) -> Vec<Run<'a>> {
        run_nodes(self.tree, self.node)
            .into_iter()
            .map(|r| Run::new(self.tree, r))
            .collect()
    }

    /// Display text of the link.
    pub fn text(&self) -> String {
        self.runs().iter().map(Run::text).collect()
    }
}

/// Attribute that carries `reference` on a new hyperlink.
///
/// Relationship ids look like `rId7`; anything else is taken as a bookmark
/// name.
pub(crate) fn reference_attribute(reference: &str) -> &'static str {
    if reference.starts_with("rId") {
        "r:id"
    } else {
        "w:anchor"
    }
}
