//! Search engines and search URL construction

use std::sync::LazyLock;

use regex::Regex;
use url::form_urlencoded;

use super::{Entry, with_leading_aliases};

/// Query parameter used when an engine does not name its own
pub const DEFAULT_SEARCH_FIELD: &str = "q";

const LANGUAGE_PLACEHOLDER: &str = "{lang}";

static NEEDS_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://.*\{lang\}").expect("language placeholder pattern is valid")
});

/// A search engine reachable through a GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEngine {
    name: String,
    url: String,
    aliases: Vec<String>,
    field: String,
    escape: bool,
    private: bool,
}

impl SearchEngine {
    /// Create a search engine with the default field and escaping enabled
    #[must_use]
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        let aliases = with_leading_aliases(Vec::new(), &[name.to_lowercase().as_str()]);
        Self {
            name,
            url: url.into(),
            aliases,
            field: DEFAULT_SEARCH_FIELD.to_string(),
            escape: true,
            private: false,
        }
    }

    /// Add extra aliases after the lower-cased name
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extra = aliases.into_iter().map(Into::into).collect();
        self.aliases = with_leading_aliases(extra, &[self.name.to_lowercase().as_str()]);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    #[must_use]
    pub const fn with_escape(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    #[must_use]
    pub const fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// URL template, possibly containing `{lang}`
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Whether search terms are percent-encoded
    #[must_use]
    pub const fn escapes(&self) -> bool {
        self.escape
    }

    /// Whether the engine respects the user's privacy
    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.private
    }

    /// Build the request URL for `terms` in `language`
    ///
    /// Empty terms give the bare engine URL, which opens its home page.
    /// Escaping engines receive the terms form-encoded (spaces become `+`);
    /// the others receive them verbatim, for engines that take the query as
    /// part of a path and break under encoding.
    ///
    /// # Examples
    /// ```
    /// use rofi_search::entries::SearchEngine;
    ///
    /// let engine = SearchEngine::new("Yahoo!", "https://{lang}.search.yahoo.com/search");
    /// assert_eq!(
    ///     engine.format_url("rust lang", "fr"),
    ///     "https://fr.search.yahoo.com/search?q=rust+lang"
    /// );
    /// ```
    #[must_use]
    pub fn format_url(&self, terms: &str, language: &str) -> String {
        if terms.is_empty() {
            return self.url.clone();
        }

        let url = if NEEDS_LANGUAGE.is_match(&self.url) {
            self.url.replace(LANGUAGE_PLACEHOLDER, language)
        } else {
            self.url.clone()
        };

        let query = if self.escape {
            form_urlencoded::Serializer::new(String::new())
                .append_pair(&self.field, terms)
                .finish()
        } else {
            format!("{}={terms}", self.field)
        };
        format!("{url}?{query}")
    }
}

impl Entry for SearchEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn utility(&self) -> &str {
        &self.url
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }
}
