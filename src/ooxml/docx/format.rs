//! Shared paragraph formatting types (used by paragraphs, styles and numbering).
use crate::ooxml::oxml::ns::{self, NUMPR_SEQUENCE, PPR_SEQUENCE};
use crate::ooxml::oxml::{NodeId, XmlTree};
use serde::{Deserialize, Serialize};

/// Contents of a `w:numPr` element, either on a paragraph or in a style.
///
/// A `num_id` of 0 explicitly removes numbering inherited from the style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberingProperties {
    /// List instance id (`w:numId/@w:val`)
    pub num_id: Option<u32>,
    /// Level index (`w:ilvl/@w:val`)
    pub ilvl: Option<u32>,
}

impl NumberingProperties {
    /// Read the `w:numPr` element `num_pr`.
    pub(crate) fn from_element(tree: &XmlTree, num_pr: NodeId) -> Self {
        Self {
            num_id: tree.child_val_u32(num_pr, "w:numId"),
            ilvl: tree.child_val_u32(num_pr, "w:ilvl"),
        }
    }

    /// Read `w:pPr/w:numPr` of a paragraph (or of a style's `w:pPr` parent).
    pub(crate) fn of(tree: &XmlTree, owner: NodeId) -> Option<Self> {
        tree.find_path(owner, &["w:pPr", "w:numPr"])
            .map(|num_pr| Self::from_element(tree, num_pr))
    }

    /// Whether numbering is explicitly switched off (`numId` 0).
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.num_id == Some(0)
    }
}

/// The `w:pPr` of paragraph `p`, created as its first child when absent.
pub(crate) fn get_or_add_ppr(tree: &mut XmlTree, p: NodeId) -> NodeId {
    if let Some(ppr) = tree.first_child(p, "w:pPr") {
        return ppr;
    }
    let ppr = tree.create_element("w:pPr");
    tree.insert_child(p, 0, ppr)
}

/// Write `w:numPr` with `ilvl` and `numId` onto paragraph `p`.
pub(crate) fn set_num_pr(tree: &mut XmlTree, p: NodeId, num_id: u32, ilvl: u32) {
    let ppr = get_or_add_ppr(tree, p);
    let num_pr = tree.get_or_add_child(ppr, "w:numPr", ns::successors(PPR_SEQUENCE, "w:numPr"));
    let mut buf = itoa::Buffer::new();
    for (name, value) in [("w:ilvl", ilvl), ("w:numId", num_id)] {
        let child = tree.get_or_add_child(num_pr, name, ns::successors(NUMPR_SEQUENCE, name));
        tree.set_attr(child, "w:val", buf.format(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_num_pr() {
        let tree = XmlTree::parse(
            br#"<w:p xmlns:w="urn:w"><w:pPr><w:numPr><w:ilvl w:val="2"/><w:numId w:val="0"/></w:numPr></w:pPr></w:p>"#,
        )
        .unwrap();
        let props = NumberingProperties::of(&tree, tree.root()).unwrap();
        assert_eq!(props.ilvl, Some(2));
        assert!(props.is_removed());
    }

    #[test]
    fn test_set_num_pr_order() {
        let mut tree =
            XmlTree::parse(br#"<w:p xmlns:w="urn:w"><w:r/><w:pPr><w:jc w:val="center"/><w:pStyle w:val="A"/></w:pPr></w:p>"#)
                .unwrap();
        let p = tree.root();
        set_num_pr(&mut tree, p, 4, 1);
        set_num_pr(&mut tree, p, 5, 2);
        assert_eq!(
            tree.node_to_xml(p),
            r#"<w:p xmlns:w="urn:w"><w:r/><w:pPr><w:numPr><w:ilvl w:val="2"/><w:numId w:val="5"/></w:numPr><w:jc w:val="center"/><w:pStyle w:val="A"/></w:pPr></w:p>"#
        );

        let mut bare = XmlTree::parse(br#"<w:p xmlns:w="urn:w"><w:r/></w:p>"#).unwrap();
        let p = bare.root();
        set_num_pr(&mut bare, p, 1, 0);
        assert!(bare.is(bare.child_elements(p).next().unwrap(), "w:pPr"));
        assert_eq!(
            NumberingProperties::of(&bare, p),
            Some(NumberingProperties {
                num_id: Some(1),
                ilvl: Some(0)
            })
        );
    }

    #[test]
    fn test_missing_num_pr() {
        let tree = XmlTree::parse(br#"<w:p xmlns:w="urn:w"><w:pPr/></w:p>"#).unwrap();
        assert_eq!(NumberingProperties::of(&tree, tree.root()), None);
    }
}
