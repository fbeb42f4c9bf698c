/// Parsing XML bytes into an [`XmlTree`].
use super::tree::{Attribute, Element, NodeId, NodeKind, XmlTree};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

impl XmlTree {
    /// Parse a complete XML document.
    ///
    /// Text, attribute values, comments and CDATA are stored in their escaped
    /// source form so untouched content serializes back unchanged.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut tree = XmlTree::empty();
        let mut stack: Vec<NodeId> = Vec::with_capacity(32);
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let el = element_from(&e);
                    let id = tree.push_node(NodeKind::Element(el), stack.last().copied());
                    tree.mark_open(id);
                    stack.push(id);
                },
                Ok(Event::Empty(e)) => {
                    let el = element_from(&e);
                    tree.push_node(NodeKind::Element(el), stack.last().copied());
                },
                Ok(Event::End(_)) => {
                    if stack.pop().is_none() {
                        return Err(OoxmlError::Xml("unbalanced end tag".into()));
                    }
                },
                Ok(Event::Text(e)) => {
                    push_text(&mut tree, stack.last().copied(), &String::from_utf8_lossy(&e));
                },
                Ok(Event::GeneralRef(e)) => {
                    let entity = format!("&{};", String::from_utf8_lossy(&e));
                    push_text(&mut tree, stack.last().copied(), &entity);
                },
                Ok(Event::CData(e)) => {
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    tree.push_node(NodeKind::CData(raw), stack.last().copied());
                },
                Ok(Event::Comment(e)) => {
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    tree.push_node(NodeKind::Comment(raw), stack.last().copied());
                },
                Ok(Event::PI(e)) => {
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    tree.push_node(NodeKind::ProcessingInstruction(raw), stack.last().copied());
                },
                Ok(Event::DocType(e)) => {
                    let raw = String::from_utf8_lossy(&e).into_owned();
                    tree.push_node(NodeKind::DocType(raw), stack.last().copied());
                },
                Ok(Event::Decl(e)) => {
                    tree.declaration = Some(String::from_utf8_lossy(&e).into_owned());
                },
                Ok(Event::Eof) => break,
                #[allow(unreachable_patterns)]
                Ok(_) => {},
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(OoxmlError::Xml("unexpected end of document".into()));
        }
        if !tree.top.iter().any(|&id| tree.is_element(id)) {
            return Err(OoxmlError::InvalidStructure("document has no root element".into()));
        }
        Ok(tree)
    }
}

fn element_from(e: &BytesStart<'_>) -> Element {
    let mut attributes: SmallVec<[Attribute; 4]> = SmallVec::new();
    for attr in e.attributes().with_checks(false).flatten() {
        attributes.push(Attribute {
            name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
            raw_value: String::from_utf8_lossy(&attr.value).into_owned(),
        });
    }
    Element {
        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        attributes,
        self_closing: true,
    }
}

/// Entity references arrive as separate events; merge them into the
/// preceding text node.
fn push_text(tree: &mut XmlTree, parent: Option<NodeId>, raw: &str) {
    let last = match parent {
        Some(p) => tree.children(p).last().copied(),
        None => tree.top.last().copied(),
    };
    if let Some(last) = last
        && let NodeKind::Text(existing) = tree.kind_mut(last)
    {
        existing.push_str(raw);
        return;
    }
    tree.push_node(NodeKind::Text(raw.to_string()), parent);
}
