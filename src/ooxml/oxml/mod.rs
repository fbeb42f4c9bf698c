//! A small mutable XML element tree for WordprocessingML parts.
//!
//! Parts are parsed once into an [`XmlTree`]; proxies such as paragraphs and
//! numbering levels are thin `(tree, NodeId)` views over it. Everything that is
//! never touched is written back exactly as it was read.
pub mod ns;
mod parser;
pub mod simpletypes;
mod tree;
mod writer;

pub use tree::{Attribute, Element, NodeId, NodeKind, XmlTree};
