/// Styles - document styles and the paragraph style cascade.
use crate::ooxml::docx::enums::WdStyleType;
use crate::ooxml::docx::format::NumberingProperties;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::ns::W_NS;
use quick_xml::Reader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use smallvec::SmallVec;

/// Deepest `basedOn` chain followed before giving up.
const MAX_CHAIN: usize = 32;

/// The paragraph style information the numbering resolver needs.
///
/// Implemented by [`Styles`]; tests and callers with their own style model
/// can implement it directly.
pub trait StyleCascade {
    /// Numbering properties written on the style itself (`w:pPr/w:numPr`).
    fn own_numbering(&self, style_id: &str) -> Option<NumberingProperties>;

    /// Id of the style `style_id` is based on.
    fn based_on(&self, style_id: &str) -> Option<&str>;

    /// Id of the default paragraph style, used for paragraphs without `w:pStyle`.
    fn default_paragraph_style(&self) -> Option<&str>;

    /// Numbering inherited through the `basedOn` chain.
    ///
    /// `numId` and `ilvl` are each taken from the nearest style that sets
    /// them. Returns `None` when no style in the chain names a list.
    fn numbering_properties(&self, style_id: &str) -> Option<NumberingProperties> {
        let mut merged = NumberingProperties::default();
        let mut visited: SmallVec<[&str; 8]> = SmallVec::new();
        let mut current = Some(style_id);
        while let Some(id) = current {
            if visited.contains(&id) || visited.len() >= MAX_CHAIN {
                log::warn!("style {style_id:?} has a cyclic or overlong basedOn chain");
                break;
            }
            visited.push(id);
            if let Some(own) = self.own_numbering(id) {
                merged.num_id = merged.num_id.or(own.num_id);
                merged.ilvl = merged.ilvl.or(own.ilvl);
            }
            if merged.num_id.is_some() && merged.ilvl.is_some() {
                break;
            }
            current = self.based_on(id);
        }
        merged.num_id.map(|_| merged)
    }
}

/// A collection of styles defined in a Word document.
///
/// Provides lookup by style ID or name and implements [`StyleCascade`]. The
/// part is never modified, so the original bytes are kept for writing back.
///
/// # Examples
///
/// ```rust
/// use wordml::ooxml::docx::styles::{StyleCascade, Styles};
///
/// let styles = Styles::from_xml(br#"<w:styles xmlns:w="urn:w">
///   <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
///   <w:style w:type="paragraph" w:styleId="ListBullet">
///     <w:basedOn w:val="Normal"/>
///     <w:pPr><w:numPr><w:numId w:val="7"/></w:numPr></w:pPr>
///   </w:style>
/// </w:styles>"#.to_vec())?;
///
/// assert_eq!(styles.default_paragraph_style(), Some("Normal"));
/// assert_eq!(styles.numbering_properties("ListBullet").unwrap().num_id, Some(7));
/// # Ok::<(), wordml::ooxml::error::OoxmlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Styles {
    xml: Vec<u8>,
    style_list: SmallVec<[Style; 32]>,
}

impl Styles {
    /// An empty styles part.
    pub fn new() -> Self {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="{W_NS}"/>"#
        );
        Self {
            xml: xml.into_bytes(),
            style_list: SmallVec::new(),
        }
    }

    /// Parse a `styles.xml` part.
    pub fn from_xml(xml: Vec<u8>) -> Result<Self> {
        let style_list = parse_styles(&xml)?;
        Ok(Self { xml, style_list })
    }

    /// The part exactly as it was read.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.xml
    }

    /// Get the number of styles in the document.
    #[inline]
    pub fn len(&self) -> usize {
        self.style_list.len()
    }

    /// Check if there are no styles defined.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.style_list.is_empty()
    }

    /// Get an iterator over all styles.
    pub fn iter(&self) -> std::slice::Iter<'_, Style> {
        self.style_list.iter()
    }

    /// Get a style by its ID.
    pub fn get_by_id(&self, style_id: &str) -> Option<&Style> {
        self.style_list.iter().find(|s| s.style_id == style_id)
    }

    /// Get a style by its UI name.
    pub fn get_by_name(&self, name: &str) -> Option<&Style> {
        self.style_list
            .iter()
            .find(|s| s.name.as_deref() == Some(name))
    }

    /// Get the default style for a given style type.
    pub fn get_default(&self, style_type: WdStyleType) -> Option<&Style> {
        self.style_list
            .iter()
            .find(|s| s.is_default && s.style_type == style_type)
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleCascade for Styles {
    fn own_numbering(&self, style_id: &str) -> Option<NumberingProperties> {
        self.get_by_id(style_id)?.numbering
    }

    fn based_on(&self, style_id: &str) -> Option<&str> {
        self.get_by_id(style_id)?.based_on()
    }

    fn default_paragraph_style(&self) -> Option<&str> {
        self.get_default(WdStyleType::Paragraph).map(Style::style_id)
    }
}

fn parse_styles(xml: &[u8]) -> Result<SmallVec<[Style; 32]>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut styles = SmallVec::new();
    let mut current_style: Option<StyleBuilder> = None;
    let mut in_num_pr = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"style" => {
                current_style = Some(StyleBuilder::from_element(&e, reader.decoder()));
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"style" => {
                styles.extend(StyleBuilder::from_element(&e, reader.decoder()).build());
            },
            // Formatting as it was before a tracked change.
            Ok(Event::Start(e)) if SKIPPED_BLOCKS.contains(&e.local_name().as_ref()) => {
                reader
                    .read_to_end(e.name())
                    .map_err(|err| OoxmlError::Xml(err.to_string()))?;
            },
            Ok(Event::Start(e)) => {
                if let Some(builder) = current_style.as_mut() {
                    in_num_pr |= builder.apply(&e, reader.decoder(), in_num_pr);
                }
            },
            Ok(Event::Empty(e)) => {
                if let Some(builder) = current_style.as_mut() {
                    builder.apply(&e, reader.decoder(), in_num_pr);
                }
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"numPr" => in_num_pr = false,
                b"style" => {
                    styles.extend(current_style.take().and_then(StyleBuilder::build));
                    in_num_pr = false;
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
    }

    Ok(styles)
}

/// Style children whose content does not describe the style's current
/// paragraph formatting.
const SKIPPED_BLOCKS: &[&[u8]] = &[b"pPrChange", b"rPrChange", b"tblStylePr"];

#[inline]
fn parse_decimal_value(raw: &str) -> Option<u32> {
    crate::ooxml::oxml::simpletypes::parse_decimal(raw)
}

/// Builder for constructing Style objects during XML parsing.
#[derive(Debug, Default)]
struct StyleBuilder {
    style_id: Option<String>,
    name: Option<String>,
    style_type: WdStyleType,
    is_default: bool,
    is_custom: bool,
    based_on: Option<String>,
    numbering: Option<NumberingProperties>,
}

impl StyleBuilder {
    /// Start a style from the attributes of its `w:style` element.
    fn from_element(e: &BytesStart<'_>, decoder: Decoder) -> Self {
        let mut builder = Self::default();
        for attr in e.attributes().flatten() {
            let Ok(value) = attr.decode_and_unescape_value(decoder) else {
                continue;
            };
            match attr.key.local_name().as_ref() {
                b"type" => {
                    builder.style_type = WdStyleType::from_xml(&value).unwrap_or_default();
                },
                b"styleId" => builder.style_id = Some(value.into_owned()),
                b"default" => builder.is_default = value == "1" || value == "true",
                b"customStyle" => builder.is_custom = value == "1" || value == "true",
                _ => {},
            }
        }
        builder
    }

    /// Record a descendant of `w:style`. Returns true when `e` is `w:numPr`.
    fn apply(&mut self, e: &BytesStart<'_>, decoder: Decoder, in_num_pr: bool) -> bool {
        let val = e.attributes().flatten().find_map(|attr| {
            (attr.key.local_name().as_ref() == b"val")
                .then(|| attr.decode_and_unescape_value(decoder).ok())
                .flatten()
                .map(|v| v.into_owned())
        });
        match e.local_name().as_ref() {
            b"name" => self.name = val,
            b"basedOn" => self.based_on = val,
            b"numPr" => {
                self.numbering.get_or_insert_with(NumberingProperties::default);
                return true;
            },
            b"numId" if in_num_pr => {
                if let Some(props) = self.numbering.as_mut() {
                    props.num_id = val.as_deref().and_then(parse_decimal_value);
                }
            },
            b"ilvl" if in_num_pr => {
                if let Some(props) = self.numbering.as_mut() {
                    props.ilvl = val.as_deref().and_then(parse_decimal_value);
                }
            },
            _ => {},
        }
        false
    }

    /// Finish the style; styles without an id are dropped.
    fn build(self) -> Option<Style> {
        Some(Style {
            style_id: self.style_id?,
            name: self.name,
            style_type: self.style_type,
            is_default: self.is_default,
            is_custom: self.is_custom,
            based_on: self.based_on,
            numbering: self.numbering,
        })
    }
}

/// A single style definition in a Word document.
///
/// Represents a `<w:style>` element with its properties.
#[derive(Debug, Clone)]
pub struct Style {
    /// Style identifier (required)
    style_id: String,
    /// UI-visible name
    name: Option<String>,
    /// Type of style (paragraph, character, table, or list)
    style_type: WdStyleType,
    /// Whether this is the default style for its type
    is_default: bool,
    /// Whether this is a custom (user-defined) style
    is_custom: bool,
    /// ID of the style this is based on
    based_on: Option<String>,
    /// Numbering properties from the style's own `w:pPr`
    numbering: Option<NumberingProperties>,
}

impl Style {
    /// Get the style identifier.
    #[inline]
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    /// Get the style name.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the style type.
    #[inline]
    pub fn style_type(&self) -> WdStyleType {
        self.style_type
    }

    /// Check if this is the default style for its type.
    #[inline]
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Check if this is a custom (user-defined) style.
    #[inline]
    pub fn is_custom(&self) -> bool {
        self.is_custom
    }

    /// Get the ID of the style this is based on.
    #[inline]
    pub fn based_on(&self) -> Option<&str> {
        self.based_on.as_deref()
    }

    /// Numbering properties set directly on this style.
    #[inline]
    pub fn numbering(&self) -> Option<NumberingProperties> {
        self.numbering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
  <w:style w:type="character" w:default="1" w:styleId="DefaultParagraphFont"><w:name w:val="Default Paragraph Font"/></w:style>
  <w:style w:type="paragraph" w:styleId="ListStyle"><w:name w:val="List Style"/><w:basedOn w:val="Normal"/>
    <w:pPr><w:numPr><w:ilvl w:val="1"/><w:numId w:val="7"/></w:numPr><w:ind w:left="720"/></w:pPr></w:style>
  <w:style w:type="paragraph" w:customStyle="1" w:styleId="ListChild"><w:name w:val="List Child"/><w:basedOn w:val="ListStyle"/>
    <w:pPr><w:numPr><w:ilvl w:val="2"/></w:numPr></w:pPr></w:style>
  <w:style w:type="paragraph" w:styleId="Unlisted"><w:basedOn w:val="ListStyle"/>
    <w:pPr><w:numPr><w:numId w:val="0"/></w:numPr></w:pPr></w:style>
  <w:style w:type="paragraph" w:styleId="LoopA"><w:basedOn w:val="LoopB"/></w:style>
  <w:style w:type="paragraph" w:styleId="LoopB"><w:basedOn w:val="LoopA"/></w:style>
</w:styles>"#;

    fn styles() -> Styles {
        Styles::from_xml(STYLES.to_vec()).unwrap()
    }

    #[test]
    fn test_lookup() {
        let styles = styles();
        assert_eq!(styles.len(), 7);
        assert_eq!(styles.get_by_name("List Style").unwrap().style_id(), "ListStyle");
        assert!(styles.get_by_id("ListChild").unwrap().is_custom());
        assert_eq!(styles.default_paragraph_style(), Some("Normal"));
        assert_eq!(
            styles.get_default(WdStyleType::Character).unwrap().style_id(),
            "DefaultParagraphFont"
        );
    }

    #[test]
    fn test_numbering_cascade() {
        let styles = styles();
        assert_eq!(
            styles.numbering_properties("ListStyle"),
            Some(NumberingProperties {
                num_id: Some(7),
                ilvl: Some(1)
            })
        );
        // ilvl from the derived style, numId from its base.
        assert_eq!(
            styles.numbering_properties("ListChild"),
            Some(NumberingProperties {
                num_id: Some(7),
                ilvl: Some(2)
            })
        );
        assert!(styles.numbering_properties("Unlisted").unwrap().is_removed());
        assert_eq!(styles.numbering_properties("Normal"), None);
        assert_eq!(styles.numbering_properties("Missing"), None);
    }

    #[test]
    fn test_cyclic_chain_terminates() {
        assert_eq!(styles().numbering_properties("LoopA"), None);
    }

    #[test]
    fn test_tracked_change_numbering_ignored() {
        let styles = Styles::from_xml(
            br#"<w:styles xmlns:w="urn:w"><w:style w:type="paragraph" w:styleId="L"><w:pPr><w:numPr><w:numId w:val="3"/></w:numPr><w:pPrChange w:id="1" w:author="a"><w:pPr><w:numPr><w:ilvl w:val="4"/><w:numId w:val="9"/></w:numPr></w:pPr></w:pPrChange></w:pPr><w:rPr><w:rPrChange w:id="2"><w:rPr/></w:rPrChange></w:rPr></w:style><w:style w:type="paragraph" w:styleId="After"><w:name w:val="After"/></w:style></w:styles>"#
                .to_vec(),
        )
        .unwrap();
        assert_eq!(
            styles.get_by_id("L").unwrap().numbering(),
            Some(NumberingProperties {
                num_id: Some(3),
                ilvl: None
            })
        );
        assert_eq!(styles.get_by_id("After").unwrap().name(), Some("After"));
    }

    #[test]
    fn test_self_closing_style() {
        let styles = Styles::from_xml(
            br#"<w:styles xmlns:w="urn:w"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"/><w:style w:type="paragraph" w:styleId="Body"><w:basedOn w:val="Normal"/></w:style></w:styles>"#
                .to_vec(),
        )
        .unwrap();
        assert_eq!(styles.len(), 2);
        assert_eq!(styles.default_paragraph_style(), Some("Normal"));
        assert_eq!(styles.based_on("Body"), Some("Normal"));
    }

    #[test]
    fn test_bytes_are_kept() {
        assert_eq!(styles().as_bytes(), STYLES);
        assert!(Styles::new().is_empty());
    }
}
