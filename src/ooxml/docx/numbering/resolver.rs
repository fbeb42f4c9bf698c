/// Resolution of a paragraph's list number.
///
/// The counter of a numbered paragraph is not stored anywhere; it is derived
/// by walking back over the preceding sibling paragraphs and counting the ones
/// that belong to the same list at the same level. The walk is driven by
/// [`CounterScan`], which only sees [`ListMember`] values and so can be
/// exercised without any XML.
use super::NumberingError;
use super::definitions::{Level, Numbering};
use super::format::format_number;
use super::template::LevelTemplate;
use crate::ooxml::docx::enums::LevelSuffix;
use crate::ooxml::docx::format::NumberingProperties;
use crate::ooxml::docx::styles::StyleCascade;
use crate::ooxml::oxml::{NodeId, XmlTree};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Deepest list level WordprocessingML allows.
pub const MAX_LEVEL: u32 = 8;

/// The resolved list number of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedNumber {
    /// The counter value at the paragraph's level.
    pub value: u32,
    /// Rendered level text, e.g. `1.2.`, without the suffix.
    pub text: String,
    /// Separator between the number and the paragraph text.
    pub suffix: LevelSuffix,
    /// Formatted counter per level, `0..=ilvl`. Deeper paragraphs take their
    /// leading segments from here.
    pub segments: Vec<String>,
}

impl fmt::Display for ResolvedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)?;
        f.write_str(self.suffix.as_str())
    }
}

/// Which list, at which level, a paragraph belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListMember {
    /// List instance id; 0 when numbering was explicitly removed.
    pub num_id: u32,
    /// Zero-based level.
    pub ilvl: u32,
    /// Whether `numId` came from the paragraph's own `w:numPr`.
    pub direct: bool,
    /// Paragraph style id written on the paragraph (`w:pStyle`).
    pub style: Option<String>,
}

impl ListMember {
    /// Membership of paragraph `p`, or `None` when it is in no list.
    ///
    /// Direct `w:numPr/w:numId` wins. Otherwise the style cascade supplies
    /// `numId`, and `ilvl` comes from the paragraph if set there, else from the
    /// style. Paragraphs without `w:pStyle` inherit from the default paragraph
    /// style but carry no style of their own.
    ///
    /// Levels deeper than [`MAX_LEVEL`] are malformed and give `None`.
    pub fn of<S: StyleCascade + ?Sized>(tree: &XmlTree, p: NodeId, styles: &S) -> Option<Self> {
        let style = tree
            .find_path(p, &["w:pPr", "w:pStyle"])
            .and_then(|s| tree.attr(s, "w:val"))
            .map(Cow::into_owned);

        let direct = NumberingProperties::of(tree, p);
        let member = match direct {
            Some(NumberingProperties {
                num_id: Some(num_id),
                ilvl,
            }) => Self {
                num_id,
                ilvl: ilvl.unwrap_or(0),
                direct: true,
                style,
            },
            _ => {
                let cascade_from = style.as_deref().or_else(|| styles.default_paragraph_style())?;
                let inherited = styles.numbering_properties(cascade_from)?;
                Self {
                    num_id: inherited.num_id?,
                    ilvl: direct
                        .and_then(|d| d.ilvl)
                        .or(inherited.ilvl)
                        .unwrap_or(0),
                    direct: false,
                    style,
                }
            },
        };
        if member.ilvl > MAX_LEVEL {
            log::debug!("paragraph {p:?} has out of range level {}", member.ilvl);
            return None;
        }
        Some(member)
    }

    /// Numbering switched off with `numId` 0.
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.num_id == 0
    }
}

/// Start overrides of list instances, as seen by the scan.
pub(crate) trait StartOverrides {
    fn start_override(&self, num_id: u32, ilvl: u32) -> Option<u32>;
}

/// How a sibling relates to the paragraph being numbered.
#[derive(Debug, Clone, Copy)]
struct Kinship {
    same_list: bool,
    same_style: bool,
    linked_style: bool,
}

impl Kinship {
    fn between(target: &ListMember, sibling: &ListMember, linked_styles: &[Cow<'_, str>]) -> Self {
        Self {
            same_list: sibling.num_id == target.num_id,
            same_style: sibling.style.is_some() && sibling.style == target.style,
            linked_style: sibling
                .style
                .as_deref()
                .is_some_and(|s| linked_styles.iter().any(|l| &**l == s)),
        }
    }

    /// Same list, same explicit style or a linked style.
    fn is_relative(&self) -> bool {
        self.same_list || self.same_style || self.linked_style
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    Scanning,
    /// A sibling of another list continues this one; its contribution is in.
    FoundAnchor,
    /// A shallower paragraph of the same list closes the counting scope.
    Stopped,
}

/// Backward counting over preceding siblings, nearest first.
pub(crate) struct CounterScan<'a, O: StartOverrides + ?Sized> {
    target: &'a ListMember,
    linked_styles: &'a [Cow<'a, str>],
    overrides: &'a O,
    count: u32,
    state: ScanState,
}

impl<'a, O: StartOverrides + ?Sized> CounterScan<'a, O> {
    /// `start` is the list's effective start value.
    pub(crate) fn new(
        target: &'a ListMember,
        linked_styles: &'a [Cow<'a, str>],
        overrides: &'a O,
        start: u32,
    ) -> Self {
        Self {
            target,
            linked_styles,
            overrides,
            count: start,
            state: ScanState::Scanning,
        }
    }

    /// Account for the next sibling paragraph that has list membership.
    pub(crate) fn feed(&mut self, sibling: &ListMember) -> ScanState {
        if self.state != ScanState::Scanning || sibling.is_removed() {
            return self.state;
        }
        let kin = Kinship::between(self.target, sibling, self.linked_styles);
        match sibling.ilvl.cmp(&self.target.ilvl) {
            Ordering::Greater => {},
            Ordering::Less => {
                if kin.same_list || kin.linked_style {
                    log::trace!("scan stops at shallower level {}", sibling.ilvl);
                    self.state = ScanState::Stopped;
                }
            },
            Ordering::Equal => {
                if !kin.same_list && !self.target.direct && kin.same_style {
                    let contribution = self
                        .overrides
                        .start_override(sibling.num_id, sibling.ilvl)
                        .filter(|&start| start > 1)
                        .unwrap_or(1);
                    log::trace!("anchored on list {} (+{contribution})", sibling.num_id);
                    self.count = self.count.saturating_add(contribution);
                    self.state = ScanState::FoundAnchor;
                } else if kin.is_relative() {
                    self.count = self.count.saturating_add(1);
                }
            },
        }
        self.state
    }

    #[inline]
    pub(crate) fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub(crate) fn state(&self) -> ScanState {
        self.state
    }
}

/// Memo of resolved numbers keyed by paragraph node.
///
/// Must be cleared whenever list membership or paragraph order changes
/// anywhere in the document.
#[derive(Debug, Default)]
pub struct NumberCache {
    entries: RefCell<HashMap<NodeId, Option<ResolvedNumber>>>,
}

impl NumberCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for `p`; the inner `None` means "not numbered".
    pub fn get(&self, p: NodeId) -> Option<Option<ResolvedNumber>> {
        self.entries.borrow().get(&p).cloned()
    }

    fn insert(&self, p: NodeId, number: Option<ResolvedNumber>) {
        self.entries.borrow_mut().insert(p, number);
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

/// Computes list numbers for the paragraphs of one document part.
pub struct NumberResolver<'a, S: StyleCascade + ?Sized> {
    tree: &'a XmlTree,
    numbering: &'a Numbering,
    styles: &'a S,
    cache: &'a NumberCache,
}

impl<'a, S: StyleCascade + ?Sized> NumberResolver<'a, S> {
    pub fn new(
        tree: &'a XmlTree,
        numbering: &'a Numbering,
        styles: &'a S,
        cache: &'a NumberCache,
    ) -> Self {
        Self {
            tree,
            numbering,
            styles,
            cache,
        }
    }

    /// List membership of `p`; `None` for non-paragraphs.
    pub fn membership(&self, p: NodeId) -> Option<ListMember> {
        if !self.tree.is(p, "w:p") {
            return None;
        }
        ListMember::of(self.tree, p, self.styles)
    }

    /// The numbering level that formats `p`.
    pub fn level(&self, p: NodeId) -> Option<Level<'a>> {
        let member = self.membership(p).filter(|m| !m.is_removed())?;
        self.numbering
            .abstract_definition(member.num_id)
            .ok()?
            .level(member.ilvl)
    }

    /// Resolve the number of paragraph `p`. Missing or malformed numbering
    /// data yields `None`.
    pub fn resolve(&self, p: NodeId) -> Option<ResolvedNumber> {
        if let Some(hit) = self.cache.get(p) {
            return hit;
        }
        let number = self.compute(p);
        self.cache.insert(p, number.clone());
        number
    }

    fn compute(&self, p: NodeId) -> Option<ResolvedNumber> {
        let member = self.membership(p)?;
        if member.is_removed() {
            log::debug!("paragraph {p:?} has numbering removed");
            return None;
        }
        let abstract_num = match self.numbering.abstract_definition(member.num_id) {
            Ok(abstract_num) => abstract_num,
            Err(e) => {
                log::debug!("paragraph {p:?} not numbered: {e}");
                return None;
            },
        };
        let Some(level) = abstract_num.level(member.ilvl) else {
            let e = NumberingError::LevelNotFound {
                abstract_num_id: abstract_num.id().unwrap_or_default(),
                ilvl: member.ilvl,
            };
            log::debug!("paragraph {p:?} not numbered: {e}");
            return None;
        };
        let format = match level.number_format() {
            Ok(format) => format,
            Err(e) => {
                log::debug!("paragraph {p:?} not numbered: {e}");
                return None;
            },
        };

        let linked_styles = abstract_num.linked_styles_above(member.ilvl);
        let start = self
            .numbering
            .effective_start_value(member.num_id, member.ilvl);

        let mut scan = CounterScan::new(&member, &linked_styles, self.numbering, start);
        for sibling in self.tree.preceding_siblings(p) {
            let Some(info) = self.membership(sibling) else {
                continue;
            };
            if scan.feed(&info) != ScanState::Scanning {
                break;
            }
        }
        let value = scan.count();
        let fresh = match format_number(value, format) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("paragraph {p:?} not numbered: {e}");
                return None;
            },
        };

        let depth = member.ilvl as usize;
        let mut segments = self
            .parent_number(p, &member, &linked_styles)
            .map(|parent| parent.segments)
            .unwrap_or_default();
        segments.truncate(depth);
        segments.resize(depth, fresh.clone());
        segments.push(fresh.clone());

        let level_text = level.text();
        let template = LevelTemplate::parse(&level_text);
        let text = if template.placeholder_count() > 1 {
            template.render(|k| {
                segments
                    .get(usize::from(k) - 1)
                    .map_or(fresh.as_str(), String::as_str)
            })
        } else {
            template.render(|_| fresh.as_str())
        };

        Some(ResolvedNumber {
            value,
            text,
            suffix: level.suffix(),
            segments,
        })
    }

    /// Number of the nearest preceding shallower paragraph in the same list,
    /// the same numbered style, or a linked style.
    fn parent_number(
        &self,
        p: NodeId,
        member: &ListMember,
        linked_styles: &[Cow<'_, str>],
    ) -> Option<ResolvedNumber> {
        if member.ilvl == 0 {
            return None;
        }
        let parent = self.tree.preceding_siblings(p).find(|&sibling| {
            self.membership(sibling).is_some_and(|m| {
                let kin = Kinship::between(member, &m, linked_styles);
                !m.is_removed() && m.ilvl < member.ilvl && kin.is_relative()
            })
        })?;
        self.resolve(parent)
    }
}
