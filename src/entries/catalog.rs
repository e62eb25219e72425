//! Built-in browsers and search engines
//!
//! Privacy flags and base relations are data: each built-in entry is one
//! row below, so they can be reviewed and corrected in one place. Users who
//! disagree with a flag can override the entry from their configuration.

use super::{Browser, BrowserId, EngineId, Registry, SearchEngine};

/// Browser used when nothing else resolves
pub const DEFAULT_BROWSER: &str = "Firefox";

/// Search engine used when nothing else resolves
pub const DEFAULT_SEARCH_ENGINE: &str = "DuckDuckGo";

const FIREFOX_PRIVATE: &[&str] = &["--private-window"];
const CHROMIUM_PRIVATE: &[&str] = &["--incognito"];

/// Family a built-in browser belongs to
#[derive(Clone, Copy)]
enum Family {
    Firefox,
    Chromium,
}

/// (name, executable, private, family, private arguments)
type BrowserRow = (&'static str, &'static str, bool, Family, &'static [&'static str]);

/// Browsers based on one of the two roots, Chromium and Firefox
const BROWSERS: &[BrowserRow] = &[
    ("Brave", "brave", true, Family::Chromium, CHROMIUM_PRIVATE),
    ("Chrome", "google-chrome-stable", false, Family::Chromium, CHROMIUM_PRIVATE),
    ("Floorp", "floorp", true, Family::Firefox, FIREFOX_PRIVATE),
    ("Ice Cat", "icecat", true, Family::Firefox, FIREFOX_PRIVATE),
    ("Librewolf", "librewolf", true, Family::Firefox, FIREFOX_PRIVATE),
    ("Opera", "opera", false, Family::Chromium, &["--private"]),
    ("Palemoon", "palemoon", true, Family::Firefox, &["-private-window"]),
    ("qutebrowser", "qutebrowser", false, Family::Chromium, &["--target", "private-window"]),
    ("Tor", "torbrowser-launcher", true, Family::Firefox, &[]),
    ("Ungoogled Chromium", "ungoogled-chromium", true, Family::Chromium, CHROMIUM_PRIVATE),
    ("Vivaldi", "vivaldi", false, Family::Chromium, CHROMIUM_PRIVATE),
    ("Waterfox", "waterfox", true, Family::Firefox, FIREFOX_PRIVATE),
    ("Zen", "zen-browser", true, Family::Firefox, FIREFOX_PRIVATE),
];

/// (name, url, private, field, escape, extra aliases)
type EngineRow = (
    &'static str,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    &'static [&'static str],
);

const FALLBACK_SEARCH_ENGINE: EngineRow =
    (DEFAULT_SEARCH_ENGINE, "https://duckduckgo.com/", true, None, true, &["ddg"]);

const SEARCH_ENGINES: &[EngineRow] = &[
    ("aol", "https://search.aol.com/aol/search", false, None, true, &[]),
    ("Ask", "https://www.ask.com/web", false, None, true, &[]),
    ("Bing", "https://www.bing.com/search", false, None, true, &[]),
    ("Brave Search", "https://search.brave.com/search", true, None, true, &[]),
    ("Ecosia", "https://www.ecosia.org/search", false, None, true, &[]),
    ("Google", "https://www.google.com/search", false, None, true, &[]),
    ("Mojeek", "https://www.mojeek.com/search", true, None, true, &[]),
    ("Qwant", "https://www.qwant.com/", true, None, true, &[]),
    ("Startpage", "https://www.startpage.com/search", true, None, true, &[]),
    ("Swisscows", "https://swisscows.com/en/web", true, Some("query"), true, &[]),
    ("The Wayback Machine", "https://web.archive.org/web/", false, None, false, &["wayback"]),
    ("Yahoo!", "https://{lang}.search.yahoo.com/search", false, None, true, &[]),
    ("YouTube", "https://www.youtube.com/results", false, Some("search_query"), true, &["yt", "ytb"]),
];

fn search_engine(row: &EngineRow) -> SearchEngine {
    let &(name, url, private, field, escape, aliases) = row;
    let engine = SearchEngine::new(name, url)
        .with_private(private)
        .with_escape(escape)
        .with_aliases(aliases.iter().copied());
    match field {
        Some(field) => engine.with_field(field),
        None => engine,
    }
}

/// Browser and search engine registries of one run
#[derive(Debug, Clone)]
pub struct Catalog {
    pub browsers: Registry<Browser>,
    pub search_engines: Registry<SearchEngine>,
    default_browser: BrowserId,
    default_search_engine: EngineId,
}

impl Catalog {
    /// Catalog holding the built-in entries
    #[must_use]
    pub fn builtin() -> Self {
        let mut search_engines = Registry::new();
        let default_search_engine = search_engines.register(search_engine(&FALLBACK_SEARCH_ENGINE));
        for row in SEARCH_ENGINES {
            search_engines.register(search_engine(row));
        }

        let mut browsers = Registry::new();
        let chromium = browsers.register(
            Browser::new("Chromium", "chromium").with_private_arguments(CHROMIUM_PRIVATE.iter().copied()),
        );
        let firefox = browsers.register(
            Browser::new(DEFAULT_BROWSER, "firefox").with_private_arguments(FIREFOX_PRIVATE.iter().copied()),
        );
        for &(name, executable, private, family, private_arguments) in BROWSERS {
            let base = match family {
                Family::Firefox => firefox,
                Family::Chromium => chromium,
            };
            browsers.register(
                Browser::new(name, executable)
                    .with_private(private)
                    .with_private_arguments(private_arguments.iter().copied())
                    .based_on(base),
            );
        }

        Self {
            browsers,
            search_engines,
            default_browser: firefox,
            default_search_engine,
        }
    }

    /// Fallback browser of last resort
    #[must_use]
    pub const fn default_browser(&self) -> BrowserId {
        self.default_browser
    }

    /// Fallback search engine of last resort
    #[must_use]
    pub const fn default_search_engine(&self) -> EngineId {
        self.default_search_engine
    }

    #[must_use]
    pub fn browser(&self, id: BrowserId) -> &Browser {
        self.browsers.get(id)
    }

    #[must_use]
    pub fn search_engine(&self, id: EngineId) -> &SearchEngine {
        self.search_engines.get(id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
