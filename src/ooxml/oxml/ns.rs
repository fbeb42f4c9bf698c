//! Namespace URIs and schema child orderings for WordprocessingML.
//!
//! Word rejects parts whose children are out of schema order, so every
//! insertion goes through one of the sequences below via [`successors`].

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Children of `w:pPr`.
pub const PPR_SEQUENCE: &[&str] = &[
    "w:pStyle",
    "w:keepNext",
    "w:keepLines",
    "w:pageBreakBefore",
    "w:framePr",
    "w:widowControl",
    "w:numPr",
    "w:suppressLineNumbers",
    "w:pBdr",
    "w:shd",
    "w:tabs",
    "w:suppressAutoHyphens",
    "w:kinsoku",
    "w:wordWrap",
    "w:overflowPunct",
    "w:topLinePunct",
    "w:autoSpaceDE",
    "w:autoSpaceDN",
    "w:bidi",
    "w:adjustRightInd",
    "w:snapToGrid",
    "w:spacing",
    "w:ind",
    "w:contextualSpacing",
    "w:mirrorIndents",
    "w:suppressOverlap",
    "w:jc",
    "w:textDirection",
    "w:textAlignment",
    "w:textboxTightWrap",
    "w:outlineLvl",
    "w:divId",
    "w:cnfStyle",
    "w:rPr",
    "w:sectPr",
    "w:pPrChange",
];

/// Children of `w:numPr`.
pub const NUMPR_SEQUENCE: &[&str] = &["w:ilvl", "w:numId", "w:numberingChange", "w:ins"];

/// Children of `w:numbering`.
pub const NUMBERING_SEQUENCE: &[&str] =
    &["w:numPicBullet", "w:abstractNum", "w:num", "w:numIdMacAtCleanup"];

/// Children of `w:num`.
pub const NUM_SEQUENCE: &[&str] = &["w:abstractNumId", "w:lvlOverride"];

/// Children of `w:lvlOverride`.
pub const LVL_OVERRIDE_SEQUENCE: &[&str] = &["w:startOverride", "w:lvl"];

/// Children of `w:sdtPr` that this crate writes.
pub const SDTPR_SEQUENCE: &[&str] = &[
    "w:rPr",
    "w:alias",
    "w:tag",
    "w:id",
    "w:lock",
    "w:placeholder",
    "w:temporary",
    "w:showingPlcHdr",
];

/// Children of `w:sdt`.
pub const SDT_SEQUENCE: &[&str] = &["w:sdtPr", "w:sdtEndPr", "w:sdtContent"];

/// Elements that must stay after every block in `w:body`.
pub const BODY_TAIL: &[&str] = &["w:sectPr"];

/// Names that must follow `name` within `sequence`.
///
/// Unknown names have no successors and are appended.
pub fn successors<'a>(sequence: &'a [&'a str], name: &str) -> &'a [&'a str] {
    match sequence.iter().position(|&n| n == name) {
        Some(pos) => &sequence[pos + 1..],
        None => &[],
    }
}
