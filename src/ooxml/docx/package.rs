/// Access to the parts of a WordprocessingML package.
///
/// Reading the zip container and relationships is left to the caller; a
/// document only needs the bytes of a few well-known parts.
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// Main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Style definitions part.
pub const STYLES_PART: &str = "word/styles.xml";
/// Numbering definitions part.
pub const NUMBERING_PART: &str = "word/numbering.xml";
/// Footnotes part.
pub const FOOTNOTES_PART: &str = "word/footnotes.xml";

/// Something that can hand out part contents by part name.
///
/// Names are given without a leading `/`; implementations accept either
/// spelling through [`PartSource::get_part`].
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use wordml::ooxml::docx::package::{PartSource, DOCUMENT_PART};
///
/// let mut parts = HashMap::new();
/// parts.insert("/word/document.xml".to_string(), b"<w:document/>".to_vec());
/// assert!(parts.get_part(DOCUMENT_PART).is_some());
/// ```
pub trait PartSource {
    /// Bytes of the part stored under exactly `name`.
    fn part(&self, name: &str) -> Option<Cow<'_, [u8]>>;

    /// Bytes of `name`, trying both the bare and the `/`-prefixed spelling.
    fn get_part(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        let bare = name.trim_start_matches('/');
        self.part(bare)
            .or_else(|| self.part(&format!("/{bare}")))
    }
}

impl PartSource for HashMap<String, Vec<u8>> {
    fn part(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.get(name).map(|bytes| Cow::Borrowed(bytes.as_slice()))
    }
}

impl PartSource for BTreeMap<String, Vec<u8>> {
    fn part(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.get(name).map(|bytes| Cow::Borrowed(bytes.as_slice()))
    }
}

impl PartSource for HashMap<&str, &[u8]> {
    fn part(&self, name: &str) -> Option<Cow<'_, [u8]>> {
        self.get(name).map(|&bytes| Cow::Borrowed(bytes))
    }
}
