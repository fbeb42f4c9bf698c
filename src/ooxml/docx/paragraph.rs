/// Paragraph and Run structures for Word documents.
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::enums::WdParagraphAlignment;
use crate::ooxml::docx::footnote::reference_ids;
use crate::ooxml::docx::format::{NumberingProperties, get_or_add_ppr, set_num_pr};
use crate::ooxml::docx::hyperlink::{Hyperlink, reference_attribute};
use crate::ooxml::docx::numbering::{Level, ResolvedNumber};
use crate::ooxml::error::Result;
use crate::ooxml::oxml::ns::{self, PPR_SEQUENCE, R_NS};
use crate::ooxml::oxml::{NodeId, XmlTree};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Elements never searched for runs: property blocks and deleted content.
const RUN_WALK_SKIP: &[&str] = &["w:pPr", "w:rPr", "w:sdtPr", "w:sdtEndPr", "w:del", "w:moveFrom"];

/// Symbol fonts whose private code points map to ordinary characters.
const SYMBOL_FONTS: &[(&str, &[(&str, char)])] = &[(
    "WP TypographicSymbols",
    &[
        ("0027", '§'),
        ("0040", '”'),
        ("0038", '©'),
        ("003D", '’'),
        ("0041", '“'),
        ("0042", '–'),
        ("0043", '—'),
    ],
)];

/// Character of a `w:sym` element.
///
/// Codes of a known symbol font use its map; anything else is read as a
/// hexadecimal code point.
fn symbol_char(tree: &XmlTree, sym: NodeId) -> Option<char> {
    let code = tree.attr(sym, "w:char")?;
    let font = tree.attr(sym, "w:font");
    let mapped = font.as_deref().and_then(|font| {
        SYMBOL_FONTS
            .iter()
            .find(|(name, _)| *name == font)
            .and_then(|(_, map)| map.iter().find(|(c, _)| c.eq_ignore_ascii_case(&code)))
            .map(|&(_, ch)| ch)
    });
    if mapped.is_some() {
        return mapped;
    }
    log::debug!("no symbol map for {code} in font {font:?}, using the code point");
    u32::from_str_radix(&code, 16).ok().and_then(char::from_u32)
}

/// Runs under `node` in document order.
///
/// Runs wrapped in hyperlinks, content controls, smart tags, custom XML and
/// insertions are included. Runs are not searched for nested runs.
pub(crate) fn run_nodes(tree: &XmlTree, node: NodeId) -> SmallVec<[NodeId; 8]> {
    let mut runs = SmallVec::new();
    let mut stack: Vec<NodeId> = tree.child_elements(node).rev().collect();
    while let Some(child) = stack.pop() {
        match tree.name(child) {
            Some("w:r") => runs.push(child),
            Some(name) if RUN_WALK_SKIP.contains(&name) => {},
            _ => stack.extend(tree.child_elements(child).rev()),
        }
    }
    runs
}

/// Text of run `r` with its content elements translated.
pub(crate) fn run_text(tree: &XmlTree, r: NodeId) -> String {
    let mut text = String::new();
    for child in tree.child_elements(r) {
        match tree.name(child) {
            Some("w:t") => text.push_str(&tree.text(child)),
            Some("w:tab") => text.push('\t'),
            Some("w:br") => text.push('\n'),
            Some("w:cr") => text.push('\r'),
            // Inside a field instruction the hyphen is part of hidden field code
            Some("w:noBreakHyphen") if tree.first_child(r, "w:instrText").is_none() => text.push('-'),
            Some("w:sym") => text.extend(symbol_char(tree, child)),
            _ => {},
        }
    }
    text
}

/// Append `text` to run `r`, writing tabs and line breaks as their own
/// elements.
pub(crate) fn append_run_text(tree: &mut XmlTree, r: NodeId, text: &str) {
    let mut pending = String::new();
    for ch in text.chars() {
        let element = match ch {
            '\t' => "w:tab",
            '\n' => "w:br",
            '\r' => "w:cr",
            _ => {
                pending.push(ch);
                continue;
            },
        };
        flush_text(tree, r, &mut pending);
        let node = tree.create_element(element);
        tree.append_child(r, node);
    }
    flush_text(tree, r, &mut pending);
}

fn flush_text(tree: &mut XmlTree, r: NodeId, pending: &mut String) {
    if pending.is_empty() {
        return;
    }
    let t = tree.create_element("w:t");
    if pending.trim().len() < pending.len() {
        tree.set_attr(t, "xml:space", "preserve");
    }
    tree.set_text(t, pending);
    tree.append_child(r, t);
    pending.clear();
}

/// Create a detached `w:r` holding `text`.
pub(crate) fn new_run(tree: &mut XmlTree, text: &str, style: Option<&str>) -> NodeId {
    let r = tree.create_element("w:r");
    if let Some(style) = style {
        let rpr = tree.create_element("w:rPr");
        let rstyle = tree.create_element_with("w:rStyle", &[("w:val", style)]);
        tree.append_child(rpr, rstyle);
        tree.append_child(r, rpr);
    }
    append_run_text(tree, r, text);
    r
}

/// A paragraph in a Word document.
///
/// Represents a `<w:p>` element. Paragraphs contain runs which in turn
/// contain the actual text, and may belong to a numbered list either
/// directly or through their style.
///
/// # Example
///
/// ```rust
/// use wordml::ooxml::docx::Document;
///
/// let mut doc = Document::new();
/// doc.add_paragraph("First\tline", Some("Heading1"));
/// for para in doc.paragraphs() {
///     println!("{:?}: {}", para.style(), para.text());
///     for run in para.runs() {
///         println!("  Run: {}", run.text());
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    doc: &'a Document,
    node: NodeId,
}

impl<'a> Paragraph<'a> {
    pub(crate) fn new(doc: &'a Document, node: NodeId) -> Self {
        Self { doc, node }
    }

    /// The `w:p` element.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.node
    }

    fn tree(&self) -> &'a XmlTree {
        self.doc.tree()
    }

    pub(crate) fn document(&self) -> &'a Document {
        self.doc
    }

    /// Get the text content of this paragraph.
    ///
    /// Concatenates the text of all runs, including runs inside hyperlinks
    /// and content controls. The list number is not part of the text.
    pub fn text(&self) -> String {
        self.runs().iter().map(Run::text).collect()
    }

    /// Get the runs in this paragraph.
    pub fn runs(&self) -> SmallVec<[Run<'a>; 8]> {
        let tree = self.tree();
        run_nodes(tree, self.node)
            .into_iter()
            .map(|r| Run::new(tree, r))
            .collect()
    }

    /// Get the hyperlinks in this paragraph.
    pub fn hyperlinks(&self) -> Vec<Hyperlink<'a>> {
        let tree = self.tree();
        tree.descendants_named(self.node, "w:hyperlink")
            .into_iter()
            .map(|h| Hyperlink::new(tree, h))
            .collect()
    }

    /// Id of the paragraph's own style (`w:pStyle`), if set.
    pub fn style(&self) -> Option<Cow<'a, str>> {
        let tree = self.tree();
        tree.attr(tree.find_path(self.node, &["w:pPr", "w:pStyle"])?, "w:val")
    }

    /// Directly applied alignment (`w:jc`).
    pub fn alignment(&self) -> Option<WdParagraphAlignment> {
        let tree = self.tree();
        let jc = tree.find_path(self.node, &["w:pPr", "w:jc"])?;
        WdParagraphAlignment::from_xml(&tree.attr(jc, "w:val")?)
    }

    /// Directly applied `w:numPr`, without style inheritance.
    pub fn numbering_properties(&self) -> Option<NumberingProperties> {
        NumberingProperties::of(self.tree(), self.node)
    }

    /// The full resolved list number, or `None` when not numbered.
    pub fn resolved_number(&self) -> Option<ResolvedNumber> {
        self.doc.resolve_number(self.node)
    }

    /// The list number as displayed, including the level's suffix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wordml::ooxml::docx::Document;
    ///
    /// let mut doc = Document::new();
    /// let abstract_id = doc.numbering_mut().add_abstract_num(&[(0, "lowerRoman", "(%1)")]);
    /// let num_id = doc.numbering_mut().add_num(abstract_id);
    ///
    /// let first = doc.add_paragraph("one", None);
    /// doc.paragraph_mut(first).unwrap().set_num_pr(num_id, 0);
    /// let second = doc.add_list_paragraph("two", None, Some(first), None)?;
    ///
    /// assert_eq!(doc.paragraph(second).unwrap().number().as_deref(), Some("(ii)\t"));
    /// # Ok::<(), wordml::ooxml::error::OoxmlError>(())
    /// ```
    pub fn number(&self) -> Option<String> {
        self.resolved_number().map(|number| number.to_string())
    }

    /// The numbering level formatting this paragraph.
    pub fn level_format(&self) -> Option<Level<'a>> {
        self.doc.level_format(self.node)
    }
}

/// Write access to a paragraph.
///
/// Obtained from [`Document::paragraph_mut`]. Every change that can move a
/// paragraph in or out of a list drops the document's cached numbers.
#[derive(Debug)]
pub struct ParagraphMut<'a> {
    doc: &'a mut Document,
    node: NodeId,
}

impl<'a> ParagraphMut<'a> {
    pub(crate) fn new(doc: &'a mut Document, node: NodeId) -> Self {
        Self { doc, node }
    }

    /// The `w:p` element.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.node
    }

    /// Read view of the same paragraph.
    pub fn as_paragraph(&self) -> Paragraph<'_> {
        Paragraph::new(self.doc, self.node)
    }

    /// Replace all content with a single run holding `text`.
    ///
    /// Paragraph properties are kept.
    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.clear();
        if !text.is_empty() {
            self.add_run(text, None);
        }
        self
    }

    /// Append a run holding `text`, optionally with character style `style`.
    pub fn add_run(&mut self, text: &str, style: Option<&str>) -> NodeId {
        let tree = self.doc.tree_mut();
        let r = new_run(tree, text, style);
        tree.append_child(self.node, r)
    }

    /// Remove all content except the paragraph properties.
    pub fn clear(&mut self) -> &mut Self {
        let tree = self.doc.tree_mut();
        let content: Vec<NodeId> = tree
            .children(self.node)
            .iter()
            .copied()
            .filter(|&c| !tree.is(c, "w:pPr"))
            .collect();
        for child in content {
            tree.detach(child);
        }
        self
    }

    /// Set the paragraph style by id or by display name; `None` removes it.
    ///
    /// Names unknown to the style part are written as given.
    pub fn set_style(&mut self, style: Option<&str>) -> &mut Self {
        let style_id = style.map(|s| {
            let styles = self.doc.styles();
            styles
                .get_by_id(s)
                .or_else(|| styles.get_by_name(s))
                .map_or_else(|| s.to_string(), |found| found.style_id().to_string())
        });
        self.set_ppr_val("w:pStyle", style_id.as_deref());
        self.doc.invalidate_numbers();
        self
    }

    /// Set or remove the direct alignment.
    pub fn set_alignment(&mut self, alignment: Option<WdParagraphAlignment>) -> &mut Self {
        self.set_ppr_val("w:jc", alignment.map(WdParagraphAlignment::to_xml));
        self
    }

    fn set_ppr_val(&mut self, name: &str, value: Option<&str>) {
        let tree = self.doc.tree_mut();
        match value {
            Some(value) => {
                let ppr = get_or_add_ppr(tree, self.node);
                let child = tree.get_or_add_child(ppr, name, ns::successors(PPR_SEQUENCE, name));
                tree.set_attr(child, "w:val", value);
            },
            None => {
                if let Some(ppr) = tree.first_child(self.node, "w:pPr") {
                    tree.remove_children_named(ppr, name);
                }
            },
        }
    }

    /// Append a hyperlink displaying `text`.
    ///
    /// A `reference` of the form `rId…` is stored as the relationship id,
    /// anything else as a bookmark anchor.
    pub fn add_hyperlink(&mut self, reference: &str, text: &str) -> NodeId {
        let tree = self.doc.tree_mut();
        let attribute = reference_attribute(reference);
        if attribute == "r:id" {
            let root = tree.root();
            if tree.attr(root, "xmlns:r").is_none() {
                tree.set_attr(root, "xmlns:r", R_NS);
            }
        }
        let link = tree.create_element_with("w:hyperlink", &[(attribute, reference)]);
        let r = new_run(tree, text, None);
        tree.append_child(link, r);
        tree.append_child(self.node, link)
    }

    /// Write direct numbering `(num_id, ilvl)` onto the paragraph.
    pub fn set_num_pr(&mut self, num_id: u32, ilvl: u32) -> &mut Self {
        set_num_pr(self.doc.tree_mut(), self.node, num_id, ilvl);
        self.doc.invalidate_numbers();
        self
    }

    /// Put the paragraph into a list.
    ///
    /// With a numbered `predecessor` its list is continued, at `ilvl` or at
    /// the predecessor's level. Otherwise a new list instance restarting at 1
    /// is created from the definition the paragraph would use through its
    /// style or direct numbering.
    ///
    /// Returns the `(numId, ilvl)` written.
    pub fn set_list_level(&mut self, predecessor: Option<NodeId>, ilvl: Option<u32>) -> Result<(u32, u32)> {
        self.doc.assign_list_level(self.node, predecessor, ilvl)
    }

    /// Insert a new paragraph directly before this one.
    pub fn insert_paragraph_before(&mut self, text: &str, style: Option<&str>) -> Result<NodeId> {
        self.doc.insert_paragraph_before(self.node, text, style)
    }

    /// Append a footnote reference and its note; see [`Document::add_footnote`].
    pub fn add_footnote(&mut self, text: &str) -> Result<i32> {
        self.doc.add_footnote(self.node, text)
    }
}

/// A run of text within a paragraph.
///
/// Represents a `<w:r>` element.
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    tree: &'a XmlTree,
    node: NodeId,
}

impl<'a> Run<'a> {
    pub(crate) fn new(tree: &'a XmlTree, node: NodeId) -> Self {
        Self { tree, node }
    }

    /// The `w:r` element.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.node
    }

    /// Text of the run; tabs, breaks and carriage returns become `\t`,
    /// `\n` and `\r`, a non-breaking hyphen becomes `-`.
    pub fn text(&self) -> String {
        run_text(self.tree, self.node)
    }

    /// Character style id (`w:rStyle`), if set.
    pub fn style(&self) -> Option<Cow<'a, str>> {
        self.tree
            .attr(self.tree.find_path(self.node, &["w:rPr", "w:rStyle"])?, "w:val")
    }

    /// Ids of the footnotes this run references.
    pub fn footnote_reference_ids(&self) -> Vec<i32> {
        reference_ids(self.tree, self.node)
    }
}
