/// Bookmark support for Word documents.
///
/// Bookmarks mark locations or regions in a document. A bookmark is a
/// `<w:bookmarkStart>` and a `<w:bookmarkEnd>` sharing a `w:id`; the two
/// may sit in different paragraphs or at body level.
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::{NodeId, XmlTree};
use crate::ooxml::oxml::simpletypes::parse_decimal;
use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};

/// A bookmark that has been started but not yet ended.
///
/// Returned by [`Document::start_bookmark`] and handed back to
/// [`Document::end_bookmark`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBookmark {
    /// Bookmark ID
    pub id: u32,
    /// Bookmark name
    pub name: String,
}

/// A well-formed bookmark in a Word document.
///
/// # Examples
///
/// ```rust
/// use wordml::ooxml::docx::Document;
///
/// let mut doc = Document::new();
/// let body = doc.body();
/// let open = doc.start_bookmark(body, "Intro")?;
/// doc.add_paragraph("Hello", None);
/// doc.end_bookmark(body, &open)?;
///
/// for bookmark in doc.bookmarks() {
///     println!("Bookmark: {} (ID: {:?})", bookmark.name(), bookmark.id());
/// }
/// let intro = doc.bookmark("Intro").unwrap();
/// assert_eq!(intro.next_paragraph().unwrap().text(), "Hello");
/// # Ok::<(), wordml::ooxml::error::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bookmark<'a> {
    doc: &'a Document,
    start: NodeId,
    end: NodeId,
}

impl<'a> Bookmark<'a> {
    fn tree(&self) -> &'a XmlTree {
        self.doc.tree()
    }

    /// Get the bookmark ID.
    pub fn id(&self) -> Option<u32> {
        self.tree().attr_u32(self.start, "w:id")
    }

    /// Get the bookmark name.
    pub fn name(&self) -> Cow<'a, str> {
        self.tree().attr(self.start, "w:name").unwrap_or_default()
    }

    /// The `w:bookmarkStart` element.
    #[inline]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// The matching `w:bookmarkEnd` element.
    #[inline]
    pub fn end(&self) -> NodeId {
        self.end
    }

    /// Nearest paragraph before the bookmark start among its siblings.
    pub fn previous_paragraph(&self) -> Option<Paragraph<'a>> {
        let tree = self.tree();
        tree.preceding_siblings(self.start)
            .find(|&node| tree.is(node, "w:p"))
            .map(|p| Paragraph::new(self.doc, p))
    }

    /// Nearest paragraph after the bookmark start among its siblings.
    pub fn next_paragraph(&self) -> Option<Paragraph<'a>> {
        let tree = self.tree();
        tree.following_siblings(self.start)
            .find(|&node| tree.is(node, "w:p"))
            .map(|p| Paragraph::new(self.doc, p))
    }
}

impl Document {
    /// Get all well-formed bookmarks in document order.
    ///
    /// Starts without a later matching end and repeats of an already listed
    /// name are ignored. Hidden bookmarks are left out when the document's
    /// options say so.
    pub fn bookmarks(&self) -> Vec<Bookmark<'_>> {
        let tree = self.tree();
        let marks: Vec<NodeId> = tree
            .descendants(tree.root())
            .into_iter()
            .filter(|&n| tree.is(n, "w:bookmarkStart") || tree.is(n, "w:bookmarkEnd"))
            .collect();

        let mut seen = HashSet::new();
        let mut bookmarks = Vec::new();
        for (idx, &start) in marks.iter().enumerate() {
            if !tree.is(start, "w:bookmarkStart") {
                continue;
            }
            let Some(id) = tree.attr(start, "w:id") else {
                continue;
            };
            let Some(end) = marks[idx + 1..].iter().copied().find(|&m| {
                tree.is(m, "w:bookmarkEnd") && tree.attr(m, "w:id").as_deref() == Some(&*id)
            }) else {
                log::trace!("skipping open bookmark {id}");
                continue;
            };
            let name = tree.attr(start, "w:name").unwrap_or_default();
            if !seen.insert(name.clone()) {
                log::trace!("skipping duplicate bookmark {name}");
                continue;
            }
            if self.options().skip_hidden_bookmarks && name.starts_with('_') {
                continue;
            }
            bookmarks.push(Bookmark {
                doc: self,
                start,
                end,
            });
        }
        bookmarks
    }

    /// Get the bookmark named `name`.
    pub fn bookmark(&self, name: &str) -> Option<Bookmark<'_>> {
        self.bookmarks().into_iter().find(|b| b.name() == name)
    }

    /// Lowest bookmark id not used by any `w:bookmarkStart`.
    pub fn next_bookmark_id(&self) -> u32 {
        let tree = self.tree();
        let used: BTreeSet<u32> = tree
            .descendants_named(tree.root(), "w:bookmarkStart")
            .into_iter()
            .filter_map(|start| parse_decimal(&tree.attr(start, "w:id")?))
            .collect();
        (0..).find(|id| !used.contains(id)).unwrap_or_default()
    }

    /// Start a bookmark named `name` at the end of `container`.
    ///
    /// `container` is a paragraph, the body or a content control. Fails
    /// when any bookmark start in the document already uses `name`.
    pub fn start_bookmark(&mut self, container: NodeId, name: &str) -> Result<OpenBookmark> {
        let container = self.inline_container(container)?;
        let tree = self.tree();
        let taken = tree
            .descendants_named(tree.root(), "w:bookmarkStart")
            .into_iter()
            .any(|start| tree.attr(start, "w:name").as_deref() == Some(name));
        if taken {
            return Err(OoxmlError::DuplicateBookmark(name.to_string()));
        }

        let id = self.next_bookmark_id();
        let mut buf = itoa::Buffer::new();
        let tree = self.tree_mut();
        let start = tree.create_element_with("w:bookmarkStart", &[("w:id", buf.format(id)), ("w:name", name)]);
        self.append_block(container, start);
        Ok(OpenBookmark {
            id,
            name: name.to_string(),
        })
    }

    /// End `bookmark` at the end of `container`.
    pub fn end_bookmark(&mut self, container: NodeId, bookmark: &OpenBookmark) -> Result<()> {
        let container = self.inline_container(container)?;
        let mut buf = itoa::Buffer::new();
        let end = self
            .tree_mut()
            .create_element_with("w:bookmarkEnd", &[("w:id", buf.format(bookmark.id))]);
        self.append_block(container, end);
        Ok(())
    }

    /// Paragraphs are valid bookmark containers in addition to block
    /// containers.
    fn inline_container(&self, id: NodeId) -> Result<NodeId> {
        if self.is_live(id) && self.tree().is(id, "w:p") {
            return Ok(id);
        }
        self.block_container(id)
    }
}
