use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Built once, shared across threads.
static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(["&", "<", ">", "\""]).expect("Failed to build attribute escaper")
});

static TEXT_ESCAPER: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(["&", "<", ">"]).expect("Failed to build text escaper"));

/// Escape a value for use inside a double-quoted attribute.
///
/// # Examples
///
/// ```
/// use wordml::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<\"x\">"), "&lt;&quot;x&quot;&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    ATTR_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;"])
}

/// Escape character data. Quotes are left alone, as Word writes them.
///
/// # Examples
///
/// ```
/// use wordml::common::xml::escape_text;
/// assert_eq!(escape_text("\"1 < 2\""), "\"1 &lt; 2\"");
/// ```
#[inline]
pub fn escape_text(s: &str) -> String {
    TEXT_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_xml("Heading \"1\" & <b>"), "Heading &quot;1&quot; &amp; &lt;b&gt;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_escape_text_keeps_quotes() {
        assert_eq!(escape_text("it's \"x\" & y"), "it's \"x\" &amp; y");
    }
}
