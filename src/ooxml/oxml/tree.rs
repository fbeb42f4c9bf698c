/// Arena-backed mutable XML element tree.
///
/// Nodes live in a single `Vec` and are addressed by [`NodeId`]. Detaching a
/// node only unlinks it from its parent, so ids stay valid for the lifetime of
/// the tree and can be used as stable identities (e.g. cache keys).
use super::simpletypes::parse_decimal;
use crate::common::xml::{escape_text, escape_xml};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Identity of a node inside an [`XmlTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single attribute, holding its value in escaped (source) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub(crate) name: String,
    pub(crate) raw_value: String,
}

impl Attribute {
    /// Qualified attribute name, e.g. `w:val`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unescaped attribute value.
    pub fn value(&self) -> Cow<'_, str> {
        unescape_or_raw(&self.raw_value)
    }
}

/// Element payload: qualified name plus attributes in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) attributes: SmallVec<[Attribute; 4]>,
    /// Written as `<a/>` when it has no children.
    pub(crate) self_closing: bool,
}

impl Element {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: SmallVec::new(),
            self_closing: true,
        }
    }

    /// Qualified element name, e.g. `w:p`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local part of the element name (after the prefix).
    pub fn local_name(&self) -> &str {
        self.name
            .split_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Attributes in document order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

/// Kind of a tree node. Non-element payloads keep their raw source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    DocType(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A mutable XML document.
#[derive(Debug, Clone)]
pub struct XmlTree {
    nodes: Vec<Node>,
    /// Content of the `<?xml ...?>` declaration, if any.
    pub(crate) declaration: Option<String>,
    /// Top-level nodes in order (prolog, root element, epilog).
    pub(crate) top: Vec<NodeId>,
}

impl XmlTree {
    /// Create a tree holding a single, empty root element.
    ///
    /// `namespaces` are written as attributes of the root, e.g.
    /// `("xmlns:w", W_NS)`.
    pub fn with_root(root_name: &str, namespaces: &[(&str, &str)]) -> Self {
        let mut tree = Self::empty();
        tree.declaration = Some(r#"xml version="1.0" encoding="UTF-8" standalone="yes""#.into());
        let root = tree.create_element(root_name);
        for (name, value) in namespaces {
            tree.set_attr(root, name, value);
        }
        tree.top.push(root);
        tree
    }

    pub(crate) fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            declaration: None,
            top: Vec::new(),
        }
    }

    pub(crate) fn push_node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.index()].children.push(id),
            None => self.top.push(id),
        }
        id
    }

    /// The document element.
    ///
    /// Every tree built by [`XmlTree::parse`] or [`XmlTree::with_root`] has one.
    pub fn root(&self) -> NodeId {
        self.top
            .iter()
            .copied()
            .find(|&id| self.is_element(id))
            .unwrap_or(NodeId(0))
    }

    /// Whether `id` refers to a node of this tree.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    /// Element payload of `id`, or `None` for text and other nodes.
    #[inline]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.index()].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.index()].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    #[inline]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.index()].kind, NodeKind::Element(_))
    }

    /// Qualified name of an element node.
    #[inline]
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::name)
    }

    /// Whether `id` is an element with qualified name `name`.
    #[inline]
    pub fn is(&self, id: NodeId, name: &str) -> bool {
        self.name(id) == Some(name)
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// All child nodes, including text.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Child elements in document order.
    pub fn child_elements(&self, id: NodeId) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.is_element(c))
    }

    /// Child elements named `name`.
    pub fn children_named<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl DoubleEndedIterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&c| self.is(c, name))
    }

    /// First child element named `name`.
    pub fn first_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children_named(id, name).next()
    }

    /// Follow a path of child element names, e.g. `["w:pPr", "w:numPr"]`.
    pub fn find_path(&self, id: NodeId, path: &[&str]) -> Option<NodeId> {
        path.iter()
            .try_fold(id, |node, name| self.first_child(node, name))
    }

    /// All descendant elements (excluding `id` itself) in document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if !self.is_element(node) {
                continue;
            }
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Descendant elements named `name` in document order.
    pub fn descendants_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&d| self.is(d, name))
            .collect()
    }

    /// Index of `id` among its parent's children.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Element siblings before `id`, nearest first.
    pub fn preceding_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let before: &[NodeId] = match (self.parent(id), self.position(id)) {
            (Some(parent), Some(pos)) => &self.children(parent)[..pos],
            _ => &[],
        };
        before
            .iter()
            .rev()
            .copied()
            .filter(|&c| self.is_element(c))
    }

    /// Element siblings after `id`, nearest first.
    pub fn following_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let after: &[NodeId] = match (self.parent(id), self.position(id)) {
            (Some(parent), Some(pos)) => &self.children(parent)[pos + 1..],
            _ => &[],
        };
        after.iter().copied().filter(|&c| self.is_element(c))
    }

    /// Nearest preceding sibling element.
    #[inline]
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.preceding_siblings(id).next()
    }

    /// Nearest following sibling element.
    #[inline]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.following_siblings(id).next()
    }

    /// Unescaped value of attribute `name`.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<Cow<'_, str>> {
        self.element(id)?
            .attributes
            .iter()
            .find(|a| a.name == name)
            .map(Attribute::value)
    }

    /// Attribute parsed as a non-negative decimal number.
    pub fn attr_u32(&self, id: NodeId, name: &str) -> Option<u32> {
        parse_decimal(&self.attr(id, name)?)
    }

    /// `w:val` of the first child element named `child`.
    pub fn child_val(&self, id: NodeId, child: &str) -> Option<Cow<'_, str>> {
        self.attr(self.first_child(id, child)?, "w:val")
    }

    /// `w:val` of the first child named `child`, as a non-negative decimal.
    pub fn child_val_u32(&self, id: NodeId, child: &str) -> Option<u32> {
        parse_decimal(&self.child_val(id, child)?)
    }

    /// Set (or replace) attribute `name`; `value` is escaped on write.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        let raw_value = escape_xml(value);
        if let Some(el) = self.element_mut(id) {
            match el.attributes.iter_mut().find(|a| a.name == name) {
                Some(attr) => attr.raw_value = raw_value,
                None => el.attributes.push(Attribute {
                    name: name.to_string(),
                    raw_value,
                }),
            }
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(el) = self.element_mut(id) {
            el.attributes.retain(|a| a.name != name);
        }
    }

    /// Concatenated, unescaped text of the direct text and CDATA children.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            match self.kind(child) {
                NodeKind::Text(raw) => out.push_str(&unescape_or_raw(raw)),
                NodeKind::CData(raw) => out.push_str(raw),
                _ => {},
            }
        }
        out
    }

    /// Replace all children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        for child in self.children(id).to_vec() {
            self.detach(child);
        }
        if !text.is_empty() {
            let node = self.push_detached(NodeKind::Text(escape_text(text)));
            self.append_child(id, node);
        }
    }

    fn push_detached(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push_detached(NodeKind::Element(Element::new(name)))
    }

    /// Create a detached element with `w:val`-style attributes already set.
    pub fn create_element_with(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(name);
        for (attr, value) in attrs {
            self.set_attr(id, attr, value);
        }
        id
    }

    /// Unlink `id` from its parent. The node and its subtree stay addressable.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|&c| c != id);
        } else {
            self.top.retain(|&c| c != id);
        }
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> NodeId {
        let len = self.children(parent).len();
        self.insert_child(parent, len, child)
    }

    /// Insert `child` at `index` among `parent`'s children, detaching it first.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> NodeId {
        self.detach(child);
        let children = &mut self.nodes[parent.index()].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.index()].parent = Some(parent);
        child
    }

    /// Insert `child` directly before `reference` (which must have a parent).
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) -> Option<NodeId> {
        let parent = self.parent(reference)?;
        let pos = self.position(reference)?;
        Some(self.insert_child(parent, pos, child))
    }

    /// Insert `child` before the first existing child whose name is in
    /// `successors`, or append it when there is none.
    pub fn insert_ordered(&mut self, parent: NodeId, child: NodeId, successors: &[&str]) -> NodeId {
        let successor = self
            .children(parent)
            .iter()
            .copied()
            .find(|&c| self.name(c).is_some_and(|n| successors.contains(&n)));
        match successor.and_then(|s| self.position(s)) {
            Some(pos) => self.insert_child(parent, pos, child),
            None => self.append_child(parent, child),
        }
    }

    /// Return the first child named `name`, creating it in schema order when
    /// absent.
    pub fn get_or_add_child(&mut self, parent: NodeId, name: &str, successors: &[&str]) -> NodeId {
        if let Some(existing) = self.first_child(parent, name) {
            return existing;
        }
        let child = self.create_element(name);
        self.insert_ordered(parent, child, successors)
    }

    /// Remove every child named `name`.
    pub fn remove_children_named(&mut self, parent: NodeId, name: &str) {
        let doomed: Vec<NodeId> = self.children_named(parent, name).collect();
        for child in doomed {
            self.detach(child);
        }
    }

    /// Copy the subtree rooted at `id`; the copy is detached.
    pub fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let kind = self.nodes[id.index()].kind.clone();
        let copy = self.push_detached(kind);
        for child in self.children(id).to_vec() {
            let child_copy = self.deep_clone(child);
            self.nodes[child_copy.index()].parent = Some(copy);
            self.nodes[copy.index()].children.push(child_copy);
        }
        copy
    }

    pub(crate) fn mark_open(&mut self, id: NodeId) {
        if let Some(el) = self.element_mut(id) {
            el.self_closing = false;
        }
    }
}

fn unescape_or_raw(raw: &str) -> Cow<'_, str> {
    match quick_xml::escape::unescape(raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("keeping undecodable XML text verbatim: {e}");
            Cow::Borrowed(raw)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (XmlTree, NodeId) {
        let mut tree = XmlTree::with_root("w:body", &[("xmlns:w", "urn:w")]);
        let root = tree.root();
        for name in ["w:p", "w:tbl", "w:p", "w:sectPr"] {
            let el = tree.create_element(name);
            tree.append_child(root, el);
        }
        (tree, root)
    }

    #[test]
    fn test_sibling_navigation() {
        let (tree, root) = sample();
        let kids: Vec<_> = tree.child_elements(root).collect();
        let before: Vec<_> = tree.preceding_siblings(kids[2]).collect();
        assert_eq!(before, vec![kids[1], kids[0]]);
        assert_eq!(tree.next_sibling(kids[2]), Some(kids[3]));
        assert_eq!(tree.previous_sibling(kids[0]), None);
    }

    #[test]
    fn test_insert_ordered_before_successor() {
        let (mut tree, root) = sample();
        let p = tree.create_element("w:p");
        tree.insert_ordered(root, p, &["w:sectPr"]);
        let names: Vec<_> = tree
            .child_elements(root)
            .map(|c| tree.name(c).unwrap().to_string())
            .collect();
        assert_eq!(names, ["w:p", "w:tbl", "w:p", "w:p", "w:sectPr"]);
    }

    #[test]
    fn test_get_or_add_child_is_idempotent() {
        let (mut tree, root) = sample();
        let first = tree.children(root)[0];
        let ppr = tree.get_or_add_child(first, "w:pPr", &["w:r"]);
        let again = tree.get_or_add_child(first, "w:pPr", &["w:r"]);
        assert_eq!(ppr, again);
        assert_eq!(tree.children(first).len(), 1);
    }

    #[test]
    fn test_attributes_are_escaped_and_unescaped() {
        let (mut tree, root) = sample();
        tree.set_attr(root, "w:name", "a & <b>");
        assert_eq!(tree.attr(root, "w:name").as_deref(), Some("a & <b>"));
        tree.set_attr(root, "w:name", "plain");
        assert_eq!(tree.attr(root, "w:name").as_deref(), Some("plain"));
        tree.remove_attr(root, "w:name");
        assert!(tree.attr(root, "w:name").is_none());
    }

    #[test]
    fn test_deep_clone_is_detached_copy() {
        let (mut tree, root) = sample();
        let p = tree.children(root)[0];
        let r = tree.create_element("w:r");
        tree.append_child(p, r);
        tree.set_text(r, "hi");

        let copy = tree.deep_clone(p);
        assert_eq!(tree.parent(copy), None);
        let copy_r = tree.children(copy)[0];
        assert_ne!(copy_r, r);
        assert_eq!(tree.text(copy_r), "hi");
    }

    #[test]
    fn test_detach_keeps_ids_valid() {
        let (mut tree, root) = sample();
        let tbl = tree.children(root)[1];
        tree.detach(tbl);
        assert_eq!(tree.child_elements(root).count(), 3);
        assert!(tree.contains(tbl));
        assert_eq!(tree.parent(tbl), None);
    }

    #[test]
    fn test_find_path_and_descendants() {
        let (mut tree, root) = sample();
        let p = tree.children(root)[0];
        let ppr = tree.get_or_add_child(p, "w:pPr", &[]);
        let num_pr = tree.get_or_add_child(ppr, "w:numPr", &[]);
        assert_eq!(tree.find_path(p, &["w:pPr", "w:numPr"]), Some(num_pr));
        assert_eq!(tree.descendants_named(root, "w:numPr"), vec![num_pr]);
    }
}
