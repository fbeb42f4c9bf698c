/// The numbering definitions part (`numbering.xml`).
///
/// [`Numbering`] owns the parsed part; [`AbstractNum`], [`Level`], [`Num`] and
/// [`LevelOverride`] are borrowed views of its elements. Values are read from
/// the tree on every access, so the views always reflect the current part.
use super::NumberingError;
use super::resolver::StartOverrides;
use crate::ooxml::docx::enums::{LevelSuffix, NumberFormat};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::ns::{self, W_NS};
use crate::ooxml::oxml::simpletypes::parse_twips;
use crate::ooxml::oxml::{NodeId, XmlTree};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// Numbering definitions of a Word document.
///
/// Contains abstract numbering definitions (`w:abstractNum`) and the list
/// instances (`w:num`) paragraphs refer to by `numId`.
///
/// # Examples
///
/// ```rust
/// use wordml::ooxml::docx::numbering::Numbering;
///
/// let mut numbering = Numbering::new();
/// let abstract_id = numbering.add_abstract_num(&[(0, "decimal", "%1.")]);
/// let num_id = numbering.add_num(abstract_id);
/// assert_eq!(num_id, 1);
/// assert_eq!(numbering.abstract_definition(num_id)?.id(), Some(abstract_id));
/// # Ok::<(), wordml::ooxml::docx::numbering::NumberingError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Numbering {
    tree: XmlTree,
}

impl Numbering {
    /// Create an empty numbering part.
    pub fn new() -> Self {
        Self {
            tree: XmlTree::with_root("w:numbering", &[("xmlns:w", W_NS)]),
        }
    }

    /// Parse a `numbering.xml` part.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let tree = XmlTree::parse(xml)?;
        if !tree.is(tree.root(), "w:numbering") {
            return Err(OoxmlError::InvalidStructure(
                "numbering part root is not w:numbering".into(),
            ));
        }
        Ok(Self { tree })
    }

    /// Serialize the part.
    #[inline]
    pub fn to_xml(&self) -> String {
        self.tree.to_xml()
    }

    /// The underlying element tree.
    #[inline]
    pub fn tree(&self) -> &XmlTree {
        &self.tree
    }

    /// All abstract numbering definitions in document order.
    pub fn abstract_nums(&self) -> impl Iterator<Item = AbstractNum<'_>> + '_ {
        let tree = &self.tree;
        tree.children_named(tree.root(), "w:abstractNum")
            .map(move |node| AbstractNum { tree, node })
    }

    /// All list instances in document order.
    pub fn nums(&self) -> impl Iterator<Item = Num<'_>> + '_ {
        let tree = &self.tree;
        tree.children_named(tree.root(), "w:num")
            .map(move |node| Num { tree, node })
    }

    /// Abstract numbering definition with `w:abstractNumId` equal to `id`.
    pub fn abstract_num(&self, id: u32) -> Option<AbstractNum<'_>> {
        self.abstract_nums().find(|a| a.id() == Some(id))
    }

    /// List instance with `w:numId` equal to `id`.
    pub fn num(&self, id: u32) -> Option<Num<'_>> {
        self.nums().find(|n| n.id() == Some(id))
    }

    /// Resolve a list instance to the abstract definition it references.
    pub fn abstract_definition(
        &self,
        num_id: u32,
    ) -> std::result::Result<AbstractNum<'_>, NumberingError> {
        let num = self.num(num_id).ok_or(NumberingError::ListNotFound(num_id))?;
        let abstract_num_id = num
            .abstract_num_id()
            .ok_or(NumberingError::ListNotFound(num_id))?;
        self.abstract_num(abstract_num_id)
            .ok_or(NumberingError::AbstractNotFound {
                num_id,
                abstract_num_id,
            })
    }

    /// Override of level `ilvl` in list instance `num_id`, if present.
    pub fn level_override(&self, num_id: u32, ilvl: u32) -> Option<LevelOverride<'_>> {
        self.num(num_id)?.level_override(ilvl)
    }

    /// Start value of level `ilvl` in list `num_id`.
    ///
    /// The list's `w:startOverride` wins over the abstract level's `w:start`;
    /// with neither present the start is 0.
    pub fn effective_start_value(&self, num_id: u32, ilvl: u32) -> u32 {
        if let Some(start) = self.start_override(num_id, ilvl) {
            return start;
        }
        self.abstract_definition(num_id)
            .ok()
            .and_then(|a| a.level(ilvl))
            .and_then(|lvl| lvl.start())
            .unwrap_or(0)
    }

    /// The lowest `numId` not used by any `w:num`, starting at 1.
    pub fn next_num_id(&self) -> u32 {
        let mut used: SmallVec<[u32; 32]> = self.nums().filter_map(|n| n.id()).collect();
        used.sort_unstable();
        used.dedup();
        let mut candidate = 1;
        for id in used {
            if id == candidate {
                candidate += 1;
            } else if id > candidate {
                break;
            }
        }
        candidate
    }

    /// Add a list instance referencing `abstract_num_id` and return its id.
    ///
    /// The id fills the lowest gap. The new `w:num` goes after the existing
    /// ones and before `w:numIdMacAtCleanup`.
    pub fn add_num(&mut self, abstract_num_id: u32) -> u32 {
        let num_id = self.next_num_id();
        let mut id_buf = itoa::Buffer::new();
        let mut abs_buf = itoa::Buffer::new();
        let num = self
            .tree
            .create_element_with("w:num", &[("w:numId", id_buf.format(num_id))]);
        let abstract_ref = self
            .tree
            .create_element_with("w:abstractNumId", &[("w:val", abs_buf.format(abstract_num_id))]);
        self.tree.append_child(num, abstract_ref);
        let root = self.tree.root();
        self.tree
            .insert_ordered(root, num, ns::successors(ns::NUMBERING_SEQUENCE, "w:num"));
        log::debug!("added list instance {num_id} for abstract definition {abstract_num_id}");
        num_id
    }

    /// Create or replace the override of level `ilvl` in list `num_id`.
    ///
    /// `start_override` of `None` leaves an override without a start value,
    /// which does not change numbering.
    pub fn add_level_override(
        &mut self,
        num_id: u32,
        ilvl: u32,
        start_override: Option<u32>,
    ) -> std::result::Result<LevelOverride<'_>, NumberingError> {
        let num = self.num(num_id).ok_or(NumberingError::ListNotFound(num_id))?.node;
        let existing = self
            .tree
            .children_named(num, "w:lvlOverride")
            .find(|&o| self.tree.attr_u32(o, "w:ilvl") == Some(ilvl));
        let node = match existing {
            Some(node) => node,
            None => {
                let mut buf = itoa::Buffer::new();
                let node = self
                    .tree
                    .create_element_with("w:lvlOverride", &[("w:ilvl", buf.format(ilvl))]);
                self.tree
                    .insert_ordered(num, node, ns::successors(ns::NUM_SEQUENCE, "w:lvlOverride"))
            },
        };

        self.tree.remove_children_named(node, "w:startOverride");
        if let Some(start) = start_override {
            let mut buf = itoa::Buffer::new();
            let start_el = self
                .tree
                .create_element_with("w:startOverride", &[("w:val", buf.format(start))]);
            self.tree.insert_ordered(
                node,
                start_el,
                ns::successors(ns::LVL_OVERRIDE_SEQUENCE, "w:startOverride"),
            );
        }
        Ok(LevelOverride {
            tree: &self.tree,
            node,
        })
    }

    /// Add an abstract definition with the given `(ilvl, numFmt, lvlText)`
    /// levels, each starting at 1. Returns the new `w:abstractNumId`.
    pub fn add_abstract_num(&mut self, levels: &[(u32, &str, &str)]) -> u32 {
        let id = self
            .abstract_nums()
            .filter_map(|a| a.id())
            .max()
            .map_or(0, |max| max + 1);
        let mut buf = itoa::Buffer::new();
        let abstract_num = self
            .tree
            .create_element_with("w:abstractNum", &[("w:abstractNumId", buf.format(id))]);
        for &(ilvl, format, text) in levels {
            let lvl = self
                .tree
                .create_element_with("w:lvl", &[("w:ilvl", buf.format(ilvl))]);
            for (name, value) in [("w:start", "1"), ("w:numFmt", format), ("w:lvlText", text)] {
                let child = self.tree.create_element_with(name, &[("w:val", value)]);
                self.tree.append_child(lvl, child);
            }
            self.tree.append_child(abstract_num, lvl);
        }
        let root = self.tree.root();
        self.tree.insert_ordered(
            root,
            abstract_num,
            ns::successors(ns::NUMBERING_SEQUENCE, "w:abstractNum"),
        );
        id
    }
}

impl Default for Numbering {
    fn default() -> Self {
        Self::new()
    }
}

impl StartOverrides for Numbering {
    fn start_override(&self, num_id: u32, ilvl: u32) -> Option<u32> {
        self.level_override(num_id, ilvl)?.start_override()
    }
}

/// An abstract numbering definition (`w:abstractNum`).
#[derive(Clone, Copy)]
pub struct AbstractNum<'a> {
    tree: &'a XmlTree,
    node: NodeId,
}

impl<'a> AbstractNum<'a> {
    /// Get the abstract numbering ID.
    #[inline]
    pub fn id(&self) -> Option<u32> {
        self.tree.attr_u32(self.node, "w:abstractNumId")
    }

    /// Levels in document order.
    pub fn levels(&self) -> impl Iterator<Item = Level<'a>> + 'a {
        let tree = self.tree;
        tree.children_named(self.node, "w:lvl")
            .map(move |node| Level { tree, node })
    }

    /// Level with `w:ilvl` equal to `ilvl`.
    pub fn level(&self, ilvl: u32) -> Option<Level<'a>> {
        self.levels().find(|lvl| lvl.ilvl() == Some(ilvl))
    }

    /// Styles linked to levels shallower than `ilvl`.
    pub fn linked_styles_above(&self, ilvl: u32) -> SmallVec<[Cow<'a, str>; 4]> {
        self.levels()
            .filter(|lvl| lvl.ilvl().is_some_and(|i| i < ilvl))
            .filter_map(|lvl| lvl.style_link())
            .collect()
    }
}

impl fmt::Debug for AbstractNum<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbstractNum").field("id", &self.id()).finish()
    }
}

/// Indentation of a numbering level (`w:lvl/w:pPr/w:ind`), in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indentation {
    /// Leading edge indent (`w:left` or `w:start`).
    pub left: Option<i32>,
    /// Hanging indent of the first line.
    pub hanging: Option<i32>,
    /// Additional first-line indent.
    pub first_line: Option<i32>,
}

/// One level of an abstract numbering definition (`w:lvl`).
#[derive(Clone, Copy)]
pub struct Level<'a> {
    tree: &'a XmlTree,
    node: NodeId,
}

impl<'a> Level<'a> {
    /// Zero-based level index (`w:ilvl`).
    #[inline]
    pub fn ilvl(&self) -> Option<u32> {
        self.tree.attr_u32(self.node, "w:ilvl")
    }

    /// Start value (`w:start`), if present.
    #[inline]
    pub fn start(&self) -> Option<u32> {
        self.tree.child_val_u32(self.node, "w:start")
    }

    /// Counter format; decimal when `w:numFmt` is absent.
    pub fn number_format(&self) -> std::result::Result<NumberFormat, NumberingError> {
        match self.tree.child_val(self.node, "w:numFmt") {
            Some(code) => NumberFormat::from_xml(&code),
            None => Ok(NumberFormat::Decimal),
        }
    }

    /// Level text template such as `%1.%2.`; empty when absent.
    pub fn text(&self) -> Cow<'a, str> {
        self.tree
            .child_val(self.node, "w:lvlText")
            .unwrap_or(Cow::Borrowed(""))
    }

    /// Separator after the number; tab when `w:suff` is absent.
    pub fn suffix(&self) -> LevelSuffix {
        self.tree
            .child_val(self.node, "w:suff")
            .and_then(|v| LevelSuffix::from_xml(&v))
            .unwrap_or_default()
    }

    /// Paragraph style linked to this level (`w:pStyle`).
    pub fn style_link(&self) -> Option<Cow<'a, str>> {
        self.tree.child_val(self.node, "w:pStyle")
    }

    /// Indentation paragraphs at this level inherit.
    pub fn indentation(&self) -> Indentation {
        let Some(ind) = self.tree.find_path(self.node, &["w:pPr", "w:ind"]) else {
            return Indentation::default();
        };
        let twips = |name: &str| self.tree.attr(ind, name).and_then(|v| parse_twips(&v));
        Indentation {
            left: twips("w:left").or_else(|| twips("w:start")),
            hanging: twips("w:hanging"),
            first_line: twips("w:firstLine"),
        }
    }
}

impl fmt::Debug for Level<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("ilvl", &self.ilvl())
            .field("start", &self.start())
            .field("text", &self.text())
            .finish()
    }
}

/// A list instance (`w:num`).
#[derive(Clone, Copy)]
pub struct Num<'a> {
    tree: &'a XmlTree,
    node: NodeId,
}

impl<'a> Num<'a> {
    /// Get the numbering ID.
    #[inline]
    pub fn id(&self) -> Option<u32> {
        self.tree.attr_u32(self.node, "w:numId")
    }

    /// Get the abstract numbering ID this references.
    #[inline]
    pub fn abstract_num_id(&self) -> Option<u32> {
        self.tree.child_val_u32(self.node, "w:abstractNumId")
    }

    /// All level overrides in document order.
    pub fn level_overrides(&self) -> impl Iterator<Item = LevelOverride<'a>> + 'a {
        let tree = self.tree;
        tree.children_named(self.node, "w:lvlOverride")
            .map(move |node| LevelOverride { tree, node })
    }

    /// Override for level `ilvl`.
    pub fn level_override(&self, ilvl: u32) -> Option<LevelOverride<'a>> {
        self.level_overrides().find(|o| o.ilvl() == Some(ilvl))
    }
}

impl fmt::Debug for Num<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Num")
            .field("id", &self.id())
            .field("abstract_num_id", &self.abstract_num_id())
            .finish()
    }
}

/// A per-list level override (`w:lvlOverride`).
#[derive(Clone, Copy)]
pub struct LevelOverride<'a> {
    tree: &'a XmlTree,
    node: NodeId,
}

impl LevelOverride<'_> {
    #[inline]
    pub fn ilvl(&self) -> Option<u32> {
        self.tree.attr_u32(self.node, "w:ilvl")
    }

    /// `w:startOverride`, if set.
    #[inline]
    pub fn start_override(&self) -> Option<u32> {
        self.tree.child_val_u32(self.node, "w:startOverride")
    }
}

impl fmt::Debug for LevelOverride<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelOverride")
            .field("ilvl", &self.ilvl())
            .field("start_override", &self.start_override())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NUMBERING: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:pStyle w:val="Heading1"/><w:lvlText w:val="%1."/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl>
    <w:lvl w:ilvl="1"><w:start w:val="3"/><w:numFmt w:val="lowerLetter"/><w:lvlText w:val="%1.%2"/><w:suff w:val="space"/></w:lvl>
    <w:lvl w:ilvl="2"><w:numFmt w:val="ordinalText"/><w:lvlText w:val="%3"/></w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
  <w:num w:numId="3"><w:abstractNumId w:val="0"/><w:lvlOverride w:ilvl="1"><w:startOverride w:val="5"/></w:lvlOverride></w:num>
  <w:num w:numId="4"><w:abstractNumId w:val="9"/></w:num>
  <w:numIdMacAtCleanup w:val="2"/>
</w:numbering>"#;

    fn numbering() -> Numbering {
        Numbering::from_xml(NUMBERING.as_bytes()).unwrap()
    }

    #[test]
    fn test_level_values() {
        let numbering = numbering();
        let abs = numbering.abstract_definition(1).unwrap();
        assert_eq!(abs.levels().count(), 3);

        let lvl0 = abs.level(0).unwrap();
        assert_eq!(lvl0.start(), Some(1));
        assert_eq!(lvl0.number_format().unwrap(), NumberFormat::Decimal);
        assert_eq!(lvl0.text(), "%1.");
        assert_eq!(lvl0.suffix(), LevelSuffix::Tab);
        assert_eq!(lvl0.style_link().as_deref(), Some("Heading1"));
        assert_eq!(
            lvl0.indentation(),
            Indentation {
                left: Some(720),
                hanging: Some(360),
                first_line: None
            }
        );

        let lvl1 = abs.level(1).unwrap();
        assert_eq!(lvl1.suffix(), LevelSuffix::Space);
        assert_eq!(lvl1.number_format().unwrap(), NumberFormat::LowerLetter);

        let lvl2 = abs.level(2).unwrap();
        assert_eq!(lvl2.start(), None);
        assert!(matches!(
            lvl2.number_format(),
            Err(NumberingError::UnsupportedFormat(_))
        ));
        assert!(abs.level(7).is_none());
    }

    #[test]
    fn test_lookup_failures() {
        let numbering = numbering();
        assert_eq!(
            numbering.abstract_definition(2).unwrap_err(),
            NumberingError::ListNotFound(2)
        );
        assert_eq!(
            numbering.abstract_definition(4).unwrap_err(),
            NumberingError::AbstractNotFound {
                num_id: 4,
                abstract_num_id: 9
            }
        );
    }

    #[test]
    fn test_effective_start_value() {
        let numbering = numbering();
        assert_eq!(numbering.effective_start_value(1, 1), 3);
        assert_eq!(numbering.effective_start_value(3, 1), 5);
        assert_eq!(numbering.effective_start_value(3, 0), 1);
        // Level without w:start, and a dangling list.
        assert_eq!(numbering.effective_start_value(1, 2), 0);
        assert_eq!(numbering.effective_start_value(4, 0), 0);
    }

    #[test]
    fn test_add_num_fills_gap() {
        let mut numbering = numbering();
        assert_eq!(numbering.next_num_id(), 2);
        let id = numbering.add_num(0);
        assert_eq!(id, 2);
        assert_eq!(numbering.abstract_definition(id).unwrap().id(), Some(0));
        assert_eq!(numbering.add_num(0), 5);

        // New instances stay before w:numIdMacAtCleanup.
        let tree = numbering.tree();
        let last = tree.child_elements(tree.root()).last().unwrap();
        assert!(tree.is(last, "w:numIdMacAtCleanup"));
    }

    #[test]
    fn test_add_num_on_empty_part() {
        let mut numbering = Numbering::new();
        assert_eq!(numbering.next_num_id(), 1);
        let abs = numbering.add_abstract_num(&[(0, "upperRoman", "%1)")]);
        assert_eq!(abs, 0);
        let id = numbering.add_num(abs);
        assert_eq!(id, 1);
        let lvl = numbering.abstract_definition(id).unwrap().level(0).unwrap();
        assert_eq!(lvl.number_format().unwrap(), NumberFormat::UpperRoman);
        assert_eq!(lvl.start(), Some(1));
    }

    #[test]
    fn test_add_level_override_replaces() {
        let mut numbering = numbering();
        let over = numbering.add_level_override(3, 1, Some(1)).unwrap();
        assert_eq!(over.start_override(), Some(1));
        assert_eq!(numbering.num(3).unwrap().level_overrides().count(), 1);
        assert_eq!(numbering.effective_start_value(3, 1), 1);

        numbering.add_level_override(3, 0, Some(4)).unwrap();
        assert_eq!(numbering.effective_start_value(3, 0), 4);
        assert_eq!(numbering.num(3).unwrap().level_overrides().count(), 2);

        assert_eq!(
            numbering.add_level_override(42, 0, Some(1)).unwrap_err(),
            NumberingError::ListNotFound(42)
        );
    }

    #[test]
    fn test_untouched_part_round_trips() {
        assert_eq!(numbering().to_xml(), NUMBERING);
    }

    #[test]
    fn test_linked_styles_above() {
        let numbering = numbering();
        let abs = numbering.abstract_num(0).unwrap();
        assert!(abs.linked_styles_above(0).is_empty());
        assert_eq!(abs.linked_styles_above(2).as_slice(), &[Cow::Borrowed("Heading1")]);
    }
}
