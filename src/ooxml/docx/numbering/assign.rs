/// Assigning paragraphs to lists.
use super::NumberingError;
use super::definitions::Numbering;
use super::resolver::ListMember;
use crate::ooxml::docx::format::set_num_pr;
use crate::ooxml::docx::styles::StyleCascade;
use crate::ooxml::oxml::{NodeId, XmlTree};

/// Put `paragraph` into a list at `ilvl`.
///
/// When `predecessor` is a numbered paragraph its list is continued, at
/// `ilvl` or else at the predecessor's level. Otherwise a new list instance
/// is started from the abstract definition `paragraph` would naturally use,
/// restarting at 1 on the target level. Either way the result is written as
/// direct `w:numPr` on the paragraph.
///
/// Returns the `(numId, ilvl)` written.
pub(crate) fn set_list_level<S: StyleCascade + ?Sized>(
    tree: &mut XmlTree,
    numbering: &mut Numbering,
    styles: &S,
    paragraph: NodeId,
    predecessor: Option<NodeId>,
    ilvl: Option<u32>,
) -> Result<(u32, u32), NumberingError> {
    let view: &XmlTree = tree;
    let continued = predecessor
        .filter(|&prev| view.is(prev, "w:p"))
        .and_then(|prev| ListMember::of(view, prev, styles))
        .filter(|member| !member.is_removed());

    let (num_id, level) = match continued {
        Some(member) => (member.num_id, ilvl.unwrap_or(member.ilvl)),
        None => {
            let natural = ListMember::of(tree, paragraph, styles)
                .filter(|member| !member.is_removed())
                .ok_or(NumberingError::NoListDefinition)?;
            let abstract_num_id = numbering
                .abstract_definition(natural.num_id)?
                .id()
                .ok_or(NumberingError::NoListDefinition)?;
            let level = ilvl.unwrap_or(0);
            let num_id = numbering.add_num(abstract_num_id);
            numbering.add_level_override(num_id, level, Some(1))?;
            (num_id, level)
        },
    };

    set_num_pr(tree, paragraph, num_id, level);
    Ok((num_id, level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::styles::Styles;

    const NUMBERING: &str = r#"<w:numbering xmlns:w="urn:w"><w:abstractNum w:abstractNumId="4"><w:lvl w:ilvl="0"><w:start w:val="3"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1."/></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="4"/></w:num></w:numbering>"#;

    const STYLES: &str = r#"<w:styles xmlns:w="urn:w"><w:style w:type="paragraph" w:styleId="Listed"><w:pPr><w:numPr><w:numId w:val="1"/></w:numPr></w:pPr></w:style></w:styles>"#;

    fn setup(body: &str) -> (XmlTree, Numbering, Styles, Vec<NodeId>) {
        let tree = XmlTree::parse(format!(r#"<w:body xmlns:w="urn:w">{body}</w:body>"#).as_bytes()).unwrap();
        let ps = tree.children_named(tree.root(), "w:p").collect();
        (
            tree,
            Numbering::from_xml(NUMBERING.as_bytes()).unwrap(),
            Styles::from_xml(STYLES.as_bytes().to_vec()).unwrap(),
            ps,
        )
    }

    #[test]
    fn test_new_list_from_style() {
        let (mut tree, mut numbering, styles, ps) =
            setup(r#"<w:p><w:pPr><w:pStyle w:val="Listed"/></w:pPr></w:p>"#);
        let written = set_list_level(&mut tree, &mut numbering, &styles, ps[0], None, Some(0)).unwrap();
        assert_eq!(written, (2, 0));
        assert_eq!(numbering.abstract_definition(2).unwrap().id(), Some(4));
        assert_eq!(numbering.effective_start_value(2, 0), 1);
        assert_eq!(
            tree.node_to_xml(ps[0]),
            r#"<w:p><w:pPr><w:pStyle w:val="Listed"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="2"/></w:numPr></w:pPr></w:p>"#
        );
    }

    #[test]
    fn test_continue_predecessor() {
        let (mut tree, mut numbering, styles, ps) = setup(
            r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="1"/><w:numId w:val="1"/></w:numPr></w:pPr></w:p><w:p/>"#,
        );
        assert_eq!(
            set_list_level(&mut tree, &mut numbering, &styles, ps[1], Some(ps[0]), None).unwrap(),
            (1, 1)
        );
        assert_eq!(
            set_list_level(&mut tree, &mut numbering, &styles, ps[1], Some(ps[0]), Some(2)).unwrap(),
            (1, 2)
        );
        assert_eq!(numbering.nums().count(), 1);
    }

    #[test]
    fn test_unnumbered_predecessor_starts_new_list() {
        let (mut tree, mut numbering, styles, ps) =
            setup(r#"<w:p/><w:p><w:pPr><w:numPr><w:numId w:val="1"/></w:numPr></w:pPr></w:p>"#);
        let written = set_list_level(&mut tree, &mut numbering, &styles, ps[1], Some(ps[0]), None).unwrap();
        assert_eq!(written, (2, 0));
    }

    #[test]
    fn test_no_list_definition() {
        let (mut tree, mut numbering, styles, ps) = setup("<w:p/>");
        assert_eq!(
            set_list_level(&mut tree, &mut numbering, &styles, ps[0], None, None),
            Err(NumberingError::NoListDefinition)
        );
        assert_eq!(tree.node_to_xml(ps[0]), "<w:p/>");
    }
}
