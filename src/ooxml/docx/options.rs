//! Document behaviour options.
//!
//! This module provides configuration options for [`Document`](super::Document).

/// Document behaviour options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Whether resolved list numbers are memoised across queries until the
    /// next mutation. When off, every query resolves from scratch.
    pub cache_numbers: bool,
    /// Whether bookmarks whose names start with `_` (Word's hidden
    /// bookmarks such as `_GoBack` or `_Toc...`) are left out of listings
    pub skip_hidden_bookmarks: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            cache_numbers: true,
            skip_hidden_bookmarks: false,
        }
    }
}

impl DocumentOptions {
    /// Start building options from the defaults.
    pub fn builder() -> DocumentOptionsBuilder {
        DocumentOptionsBuilder::new()
    }
}

/// Builder for DocumentOptions
#[derive(Debug, Default)]
pub struct DocumentOptionsBuilder {
    options: DocumentOptions,
}

impl DocumentOptionsBuilder {
    /// Create a new DocumentOptionsBuilder with default options
    pub fn new() -> Self {
        Self {
            options: DocumentOptions::default(),
        }
    }

    /// Set whether resolved numbers are cached
    pub fn cache_numbers(mut self, cache_numbers: bool) -> Self {
        self.options.cache_numbers = cache_numbers;
        self
    }

    /// Set whether hidden bookmarks are skipped
    pub fn skip_hidden_bookmarks(mut self, skip_hidden_bookmarks: bool) -> Self {
        self.options.skip_hidden_bookmarks = skip_hidden_bookmarks;
        self
    }

    /// Build the options
    pub fn build(self) -> DocumentOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builder() {
        let defaults = DocumentOptions::default();
        assert!(defaults.cache_numbers);
        assert!(!defaults.skip_hidden_bookmarks);

        let options = DocumentOptions::builder()
            .cache_numbers(false)
            .skip_hidden_bookmarks(true)
            .build();
        assert!(!options.cache_numbers);
        assert!(options.skip_hidden_bookmarks);
    }
}
