//! Browsers as launchable executables
//!
//! A browser is an executable plus the flags needed to open a URL in it.
//! Browsers also carry a little metadata used for filtering: whether they
//! care about privacy, and which browser they are based on. There are two
//! big families, Firefox (Gecko) and Chromium; forks and browsers using one
//! of them as a backend are considered based on it.

use super::{BrowserId, EngineId, Entry, with_leading_aliases};

/// A browser that can open a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Browser {
    name: String,
    executable: String,
    aliases: Vec<String>,
    arguments: Vec<String>,
    private: bool,
    base: Option<BrowserId>,
    search_engine: Option<EngineId>,
    private_arguments: Vec<String>,
}

impl Browser {
    /// Create a browser started as `executable <url>`
    #[must_use]
    pub fn new(name: impl Into<String>, executable: impl Into<String>) -> Self {
        let name = name.into();
        let executable = executable.into();
        let aliases = Self::leading_aliases(&name, &executable, Vec::new());
        Self {
            name,
            executable,
            aliases,
            arguments: Vec::new(),
            private: false,
            base: None,
            search_engine: None,
            private_arguments: Vec::new(),
        }
    }

    fn leading_aliases(name: &str, executable: &str, extra: Vec<String>) -> Vec<String> {
        with_leading_aliases(extra, &[executable, name.to_lowercase().as_str()])
    }

    /// Add extra aliases after the executable and lower-cased name
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extra = aliases.into_iter().map(Into::into).collect();
        self.aliases = Self::leading_aliases(&self.name, &self.executable, extra);
        self
    }

    /// Flags always passed before the URL
    #[must_use]
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Flags passed before the URL only for private sessions
    #[must_use]
    pub fn with_private_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.private_arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Mark the browser as a fork or variant of `base`
    #[must_use]
    pub const fn based_on(mut self, base: BrowserId) -> Self {
        self.base = Some(base);
        self
    }

    /// Search engine this browser prefers when none is chosen explicitly
    #[must_use]
    pub const fn with_search_engine(mut self, search_engine: EngineId) -> Self {
        self.search_engine = Some(search_engine);
        self
    }

    #[must_use]
    pub fn executable(&self) -> &str {
        &self.executable
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    #[must_use]
    pub fn private_arguments(&self) -> &[String] {
        &self.private_arguments
    }

    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.private
    }

    #[must_use]
    pub const fn base(&self) -> Option<BrowserId> {
        self.base
    }

    #[must_use]
    pub const fn search_engine(&self) -> Option<EngineId> {
        self.search_engine
    }

    /// Full command line opening `url`
    ///
    /// # Examples
    /// ```
    /// use rofi_search::entries::Browser;
    ///
    /// let firefox = Browser::new("Firefox", "firefox").with_private_arguments(["--private-window"]);
    /// assert_eq!(firefox.command("https://example.org", true), ["firefox", "--private-window", "https://example.org"]);
    /// assert_eq!(firefox.command("https://example.org", false), ["firefox", "https://example.org"]);
    /// ```
    #[must_use]
    pub fn command(&self, url: &str, private: bool) -> Vec<String> {
        let mut command = Vec::with_capacity(2 + self.arguments.len() + self.private_arguments.len());
        command.push(self.executable.clone());
        command.extend(self.arguments.iter().cloned());
        if private {
            command.extend(self.private_arguments.iter().cloned());
        }
        command.push(url.to_string());
        command
    }
}

impl Entry for Browser {
    fn name(&self) -> &str {
        &self.name
    }

    fn utility(&self) -> &str {
        &self.executable
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }
}
