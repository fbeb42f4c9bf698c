/// Serializing an [`XmlTree`] back to XML text.
use super::tree::{NodeId, NodeKind, XmlTree};

impl XmlTree {
    /// Serialize the whole document, including the declaration.
    pub fn to_xml(&self) -> String {
        let mut out = String::with_capacity(self.len_hint());
        if let Some(decl) = &self.declaration {
            out.push_str("<?");
            out.push_str(decl);
            out.push_str("?>");
        }
        for &id in &self.top {
            self.write_node(id, &mut out);
        }
        out
    }

    /// Serialize one subtree (no declaration).
    pub fn node_to_xml(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Element(el) => {
                out.push('<');
                out.push_str(el.name());
                for attr in el.attributes() {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&attr.raw_value);
                    out.push('"');
                }
                let children = self.children(id);
                if children.is_empty() && el.self_closing {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for &child in children {
                    self.write_node(child, out);
                }
                out.push_str("</");
                out.push_str(el.name());
                out.push('>');
            },
            NodeKind::Text(raw) => out.push_str(raw),
            NodeKind::CData(raw) => {
                out.push_str("<![CDATA[");
                out.push_str(raw);
                out.push_str("]]>");
            },
            NodeKind::Comment(raw) => {
                out.push_str("<!--");
                out.push_str(raw);
                out.push_str("-->");
            },
            NodeKind::ProcessingInstruction(raw) => {
                out.push_str("<?");
                out.push_str(raw);
                out.push_str("?>");
            },
            NodeKind::DocType(raw) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(raw);
                out.push('>');
            },
        }
    }

    fn len_hint(&self) -> usize {
        // Roughly 48 bytes per node keeps reallocations rare for Word parts.
        self.top.len().max(1) * 48
    }
}
