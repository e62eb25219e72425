//! Interactive session
//!
//! A [`Session`] holds what the user has selected so far (browser, search
//! engine, language, privacy and search terms) and drives the menu screens
//! as a loop over [`MenuState`] until a search is made or the menu closes.

use crate::config::Configuration;
use crate::entries::{BrowserId, EngineId, Entry};
use crate::launcher::{LaunchError, LaunchPlan, Launcher};
use crate::menu::{Menu, MenuRequest, MenuResponse, MenuState, Transition};
use crate::system::{InstallCheck, LocaleSource, language_candidates, language_code};
use crate::{AppError, ExitCode};

const SEARCH_PROMPT: &str = "\u{f002}";
const BROWSER_PROMPT: &str = "\u{f488}";
const SEARCH_ENGINE_PROMPT: &str = "\u{f059f}";
const LANGUAGE_PROMPT: &str = "\u{f05ca}";

/// Candidates listed by a picker, in menu order
#[derive(Debug, Clone, PartialEq, Eq)]
enum Choices {
    Browsers(Vec<BrowserId>),
    SearchEngines(Vec<EngineId>),
    Languages(Vec<String>),
}

impl Choices {
    fn len(&self) -> usize {
        match self {
            Self::Browsers(ids) => ids.len(),
            Self::SearchEngines(ids) => ids.len(),
            Self::Languages(codes) => codes.len(),
        }
    }
}

/// Selection of one run
pub struct Session<'a> {
    config: &'a Configuration,
    installed: &'a dyn InstallCheck,
    locales: &'a dyn LocaleSource,
    browser: BrowserId,
    search_engine: EngineId,
    /// Whether the user picked the search engine in this session
    engine_picked: bool,
    language: String,
    private: bool,
    terms: String,
}

impl<'a> Session<'a> {
    /// Start from the effective selection of `config`
    #[must_use]
    pub fn new(
        config: &'a Configuration,
        installed: &'a dyn InstallCheck,
        locales: &'a dyn LocaleSource,
    ) -> Self {
        let browser = config.browser(installed);
        let search_engine = config.search_engine(Some(browser), installed);
        tracing::debug!(
            browser = config.catalog.browser(browser).name(),
            search_engine = config.catalog.search_engine(search_engine).name(),
            "effective selection"
        );
        Self {
            config,
            installed,
            locales,
            browser,
            search_engine,
            engine_picked: false,
            language: config.language(),
            private: config.main.private_search,
            terms: String::new(),
        }
    }

    /// Seed the search field
    #[must_use]
    pub fn with_terms(mut self, terms: impl Into<String>) -> Self {
        self.terms = terms.into();
        self
    }

    #[must_use]
    pub const fn browser(&self) -> BrowserId {
        self.browser
    }

    #[must_use]
    pub const fn search_engine(&self) -> EngineId {
        self.search_engine
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.private
    }

    #[must_use]
    pub fn terms(&self) -> &str {
        &self.terms
    }

    /// Switch browser
    ///
    /// Until the user picks a search engine by hand, the search engine
    /// follows the browser's own preference.
    pub fn select_browser(&mut self, browser: BrowserId) {
        self.browser = browser;
        if !self.engine_picked {
            self.search_engine = self.config.search_engine(Some(browser), self.installed);
        }
    }

    pub fn select_search_engine(&mut self, search_engine: EngineId) {
        self.search_engine = search_engine;
        self.engine_picked = true;
    }

    pub fn select_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
    }

    pub fn toggle_private(&mut self) {
        self.private = !self.private;
    }

    /// What a search for the current terms would launch
    #[must_use]
    pub fn plan(&self) -> LaunchPlan {
        let browser = self.config.catalog.browser(self.browser);
        let search_engine = self.config.catalog.search_engine(self.search_engine);
        let url = search_engine.format_url(&self.terms, &self.language);
        LaunchPlan {
            browser: browser.name().to_string(),
            search_engine: search_engine.name().to_string(),
            language: self.language.clone(),
            terms: self.terms.clone(),
            command: browser.command(&url, self.private),
            url,
            private: self.private,
        }
    }

    /// Search for `terms` right away
    ///
    /// # Errors
    ///
    /// Returns `LaunchError` if the launcher fails.
    pub fn search(&mut self, terms: impl Into<String>, launcher: &dyn Launcher) -> Result<(), LaunchError> {
        self.terms = terms.into();
        launcher.launch(&self.plan())
    }

    /// Drive the menu until a search is made or the menu is closed
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the menu program cannot be run, returns an
    /// index that is not a candidate, or if the browser cannot be started.
    pub fn run(&mut self, menu: &dyn Menu, launcher: &dyn Launcher) -> Result<ExitCode, AppError> {
        let mut state = MenuState::Search;
        loop {
            let choices = self.choices(state);
            let response = menu.show(&self.request(state, choices.as_ref()))?;
            let transition = Transition::from_code(state, response.code);
            tracing::debug!(?state, code = response.code, ?transition, "menu closed");

            match transition {
                Transition::Apply => match choices {
                    None => {
                        self.search(response.output, launcher)?;
                        return Ok(ExitCode::Success);
                    }
                    Some(choices) => {
                        self.apply(&choices, &response)?;
                        state = MenuState::Search;
                    }
                },
                Transition::Enter(next) => state = next,
                Transition::TogglePrivate => self.toggle_private(),
                Transition::Exit(code) => return Ok(code),
            }
        }
    }

    fn choices(&self, state: MenuState) -> Option<Choices> {
        match state {
            MenuState::Search => None,
            MenuState::PickBrowser => Some(Choices::Browsers(
                self.config
                    .visible_browsers(self.installed)
                    .into_iter()
                    .filter(|&id| id != self.browser)
                    .collect(),
            )),
            MenuState::PickSearchEngine => Some(Choices::SearchEngines(
                self.config
                    .visible_search_engines()
                    .into_iter()
                    .filter(|&id| id != self.search_engine)
                    .collect(),
            )),
            MenuState::PickLanguage => Some(Choices::Languages(language_candidates(
                self.locales,
                &self.language,
            ))),
        }
    }

    fn request(&self, state: MenuState, choices: Option<&Choices>) -> MenuRequest {
        let catalog = &self.config.catalog;
        let color = self.config.customization.aliases_color();

        match (state, choices) {
            (MenuState::PickBrowser, Some(Choices::Browsers(ids))) => MenuRequest::new(BROWSER_PROMPT)
                .with_message(format!(
                    "Your current browser is {}.",
                    catalog.browser(self.browser).name()
                ))
                .with_markup_lines(ids.iter().map(|&id| catalog.browser(id).menu_line(color)).collect()),
            (MenuState::PickSearchEngine, Some(Choices::SearchEngines(ids))) => {
                MenuRequest::new(SEARCH_ENGINE_PROMPT)
                    .with_message(format!(
                        "Your current search engine is {}.",
                        catalog.search_engine(self.search_engine).name()
                    ))
                    .with_markup_lines(
                        ids.iter()
                            .map(|&id| catalog.search_engine(id).menu_line(color))
                            .collect(),
                    )
            }
            (MenuState::PickLanguage, Some(Choices::Languages(codes))) => MenuRequest::new(LANGUAGE_PROMPT)
                .with_message(format!("Your current language is [{}]", self.language))
                .with_lines(codes.clone()),
            _ => MenuRequest::new(SEARCH_PROMPT)
                .with_message(format!(
                    "Search{} on {} using {}.",
                    if self.private { " [privately]" } else { "" },
                    catalog.search_engine(self.search_engine).name(),
                    catalog.browser(self.browser).name()
                ))
                .with_filter(self.terms.clone())
                .with_theme(format!(
                    "window {{ width: {}%; }} listview {{ enabled: false; }}",
                    self.config.customization.width
                )),
        }
    }

    fn apply(&mut self, choices: &Choices, response: &MenuResponse) -> Result<(), AppError> {
        match choices {
            Choices::Languages(_) => match language_code(&response.output) {
                Some(language) => self.select_language(language),
                None => tracing::debug!(output = %response.output, "not a language, keeping the current one"),
            },
            Choices::Browsers(ids) => match response.index(choices.len())? {
                Some(index) => self.select_browser(ids[index]),
                None => tracing::debug!(output = %response.output, "no browser selected"),
            },
            Choices::SearchEngines(ids) => match response.index(choices.len())? {
                Some(index) => self.select_search_engine(ids[index]),
                None => tracing::debug!(output = %response.output, "no search engine selected"),
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::Browser;
    use crate::launcher::RecordingLauncher;
    use crate::menu::{MenuError, ScriptedMenu, SelectionFormat};
    use crate::testing::installed_only;

    struct FixedLocales;

    impl LocaleSource for FixedLocales {
        fn locales(&self) -> Vec<String> {
            ["de_DE.UTF-8", "en_US.UTF-8", "fr_FR.UTF-8"]
                .iter()
                .map(|l| (*l).to_string())
                .collect()
        }
    }

    fn browser(config: &Configuration, name: &str) -> BrowserId {
        config.catalog.browsers.find(name).unwrap()
    }

    fn engine(config: &Configuration, name: &str) -> EngineId {
        config.catalog.search_engines.find(name).unwrap()
    }

    #[test]
    fn test_accept_searches_and_exits() {
        let config = Configuration::default();
        let installed = installed_only(&["firefox"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);
        let menu = ScriptedMenu::from_codes(&[(0, "rust borrow checker\n")]);
        let launcher = RecordingLauncher::new();

        assert_eq!(session.run(&menu, &launcher).unwrap(), ExitCode::Success);

        let plans = launcher.plans();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].browser, "Firefox");
        assert_eq!(plans[0].search_engine, "DuckDuckGo");
        assert_eq!(plans[0].url, "https://duckduckgo.com/?q=rust+borrow+checker");
        assert_eq!(
            plans[0].command,
            vec!["firefox", "https://duckduckgo.com/?q=rust+borrow+checker"]
        );
    }

    #[test]
    fn test_search_screen_request() {
        let mut config = Configuration::default();
        config.customization.width = 40;
        let installed = installed_only(&["firefox"]);
        let session = Session::new(&config, &installed, &FixedLocales).with_terms("seed");

        let request = session.request(MenuState::Search, None);
        assert_eq!(request.prompt, SEARCH_PROMPT);
        assert_eq!(
            request.message.as_deref(),
            Some("Search on DuckDuckGo using Firefox.")
        );
        assert_eq!(request.filter.as_deref(), Some("seed"));
        assert_eq!(
            request.theme.as_deref(),
            Some("window { width: 40%; } listview { enabled: false; }")
        );
        assert_eq!(request.format, SelectionFormat::Text);
        assert!(request.lines.is_empty());
    }

    #[test]
    fn test_cancel_exits_without_search() {
        let config = Configuration::default();
        let installed = installed_only(&["firefox"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);
        let launcher = RecordingLauncher::new();

        let code = session.run(&ScriptedMenu::from_codes(&[(1, "")]), &launcher).unwrap();
        assert_eq!(code, ExitCode::Success);
        assert!(launcher.plans().is_empty());
    }

    #[test]
    fn test_pick_browser_then_search() {
        let config = Configuration::default();
        let installed = installed_only(&["firefox", "librewolf"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);
        let menu = ScriptedMenu::from_codes(&[(10, ""), (0, "0"), (0, "privacy")]);
        let launcher = RecordingLauncher::new();

        assert_eq!(session.run(&menu, &launcher).unwrap(), ExitCode::Success);
        assert_eq!(launcher.plans()[0].browser, "Librewolf");

        let requests = menu.requests();
        assert_eq!(requests[1].prompt, BROWSER_PROMPT);
        assert_eq!(requests[1].lines.len(), 1, "current browser is not offered");
        assert!(requests[1].lines[0].starts_with("Librewolf <span color=\"#444444\">"));
        assert_eq!(requests[2].prompt, SEARCH_PROMPT);
    }

    #[test]
    fn test_cancel_in_picker_returns_to_search() {
        let config = Configuration::default();
        let installed = installed_only(&["firefox"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);
        let menu = ScriptedMenu::from_codes(&[(11, ""), (1, ""), (1, "")]);
        let launcher = RecordingLauncher::new();

        assert_eq!(session.run(&menu, &launcher).unwrap(), ExitCode::Success);
        let prompts: Vec<_> = menu.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(prompts, vec![SEARCH_PROMPT, SEARCH_ENGINE_PROMPT, SEARCH_PROMPT]);
        assert!(launcher.plans().is_empty());
    }

    #[test]
    fn test_toggle_private_reenters_current_screen() {
        let config = Configuration::default();
        let installed = installed_only(&["firefox"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);
        let menu = ScriptedMenu::from_codes(&[(12, ""), (0, "tor project")]);
        let launcher = RecordingLauncher::new();

        session.run(&menu, &launcher).unwrap();

        let requests = menu.requests();
        assert_eq!(requests[1].prompt, SEARCH_PROMPT);
        assert_eq!(
            requests[1].message.as_deref(),
            Some("Search [privately] on DuckDuckGo using Firefox.")
        );
        let plans = launcher.plans();
        let plan = &plans[0];
        assert!(plan.private);
        assert_eq!(plan.command[1], "--private-window");
    }

    #[test]
    fn test_unbound_keybinding_reenters_picker() {
        let config = Configuration::default();
        let installed = installed_only(&["firefox"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);
        let menu = ScriptedMenu::from_codes(&[(13, ""), (20, ""), (1, ""), (1, "")]);

        session.run(&menu, &RecordingLauncher::new()).unwrap();
        let prompts: Vec<_> = menu.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(
            prompts,
            vec![SEARCH_PROMPT, LANGUAGE_PROMPT, LANGUAGE_PROMPT, SEARCH_PROMPT]
        );
    }

    #[test]
    fn test_unexpected_code_is_menu_error() {
        let config = Configuration::default();
        let installed = installed_only(&["firefox"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);

        let code = session
            .run(&ScriptedMenu::from_codes(&[(65, "")]), &RecordingLauncher::new())
            .unwrap();
        assert_eq!(code, ExitCode::MenuError);
    }

    #[test]
    fn test_unmatched_pick_returns_to_search() {
        let config = Configuration::default();
        let installed = installed_only(&["firefox", "brave"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);
        let menu = ScriptedMenu::from_codes(&[(10, ""), (0, "-1"), (11, ""), (0, "99"), (1, "")]);
        let launcher = RecordingLauncher::new();

        assert_eq!(session.run(&menu, &launcher).unwrap(), ExitCode::Success);
        let prompts: Vec<_> = menu.requests().into_iter().map(|r| r.prompt).collect();
        assert_eq!(
            prompts,
            vec![SEARCH_PROMPT, BROWSER_PROMPT, SEARCH_PROMPT, SEARCH_ENGINE_PROMPT, SEARCH_PROMPT]
        );
        assert_eq!(session.browser(), browser(&config, "Firefox"));
        assert_eq!(session.search_engine(), engine(&config, "DuckDuckGo"));
        assert!(launcher.plans().is_empty());
    }

    #[test]
    fn test_non_numeric_index_is_error() {
        let config = Configuration::default();
        let installed = installed_only(&["firefox", "brave"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);
        let menu = ScriptedMenu::from_codes(&[(10, ""), (0, "Brave")]);

        let error = session.run(&menu, &RecordingLauncher::new()).unwrap_err();
        assert!(matches!(error, AppError::Menu(MenuError::InvalidIndex(_))));
        assert_eq!(error.exit_code(), ExitCode::MenuError);
    }

    #[test]
    fn test_pick_language() {
        let config = Configuration::default();
        let installed = installed_only(&["firefox"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);
        let menu = ScriptedMenu::from_codes(&[(13, ""), (0, "fr"), (0, "")]);
        let launcher = RecordingLauncher::new();

        session.run(&menu, &launcher).unwrap();
        let requests = menu.requests();
        assert_eq!(requests[1].lines, vec!["de", "fr"]);
        assert_eq!(requests[1].format, SelectionFormat::Text);
        assert_eq!(session.language(), "fr");
        assert_eq!(launcher.plans()[0].language, "fr");
    }

    #[test]
    fn test_typed_language_must_be_a_code() {
        let mut config = Configuration::default();
        config.main.language = Some("de".to_string());
        let installed = installed_only(&["firefox"]);
        let mut session = Session::new(&config, &installed, &FixedLocales);
        let menu = ScriptedMenu::from_codes(&[
            (13, ""),
            (0, "hello"),
            (13, ""),
            (0, "fr FR"),
            (13, ""),
            (0, ""),
            (0, "rust"),
        ]);
        let launcher = RecordingLauncher::new();

        session.run(&menu, &launcher).unwrap();
        assert_eq!(launcher.plans()[0].language, "de");

        let menu = ScriptedMenu::from_codes(&[(13, ""), (0, "IT"), (1, "")]);
        session.run(&menu, &launcher).unwrap();
        assert_eq!(session.language(), "it");
    }

    #[test]
    fn test_browser_change_follows_its_search_engine() {
        let mut config = Configuration::default();
        let startpage = engine(&config, "Startpage");
        let work = config
            .catalog
            .browsers
            .register(Browser::new("Work", "work-browser").with_search_engine(startpage));
        let installed = installed_only(&["firefox", "work-browser"]);

        let mut session = Session::new(&config, &installed, &FixedLocales);
        session.select_browser(work);
        assert_eq!(session.search_engine(), startpage);

        session.select_browser(browser(&config, "Firefox"));
        assert_eq!(session.search_engine(), engine(&config, "DuckDuckGo"));
    }

    #[test]
    fn test_picked_search_engine_survives_browser_change() {
        let mut config = Configuration::default();
        let startpage = engine(&config, "Startpage");
        let work = config
            .catalog
            .browsers
            .register(Browser::new("Work", "work-browser").with_search_engine(startpage));
        let installed = installed_only(&["firefox", "work-browser"]);

        let mut session = Session::new(&config, &installed, &FixedLocales);
        let mojeek = engine(&config, "Mojeek");
        session.select_search_engine(mojeek);
        session.select_browser(work);
        assert_eq!(session.search_engine(), mojeek);
    }

    #[test]
    fn test_direct_search_uses_private_default() {
        let mut config = Configuration::default();
        config.main.private_search = true;
        config.main.language = Some("de".into());
        config.search_engines.default = Some(engine(&config, "Yahoo!"));
        let installed = installed_only(&["firefox"]);
        let launcher = RecordingLauncher::new();

        let mut session = Session::new(&config, &installed, &FixedLocales);
        session.search("wetter", &launcher).unwrap();

        let plans = launcher.plans();
        let plan = &plans[0];
        assert_eq!(plan.url, "https://de.search.yahoo.com/search?q=wetter");
        assert_eq!(
            plan.command,
            vec![
                "firefox",
                "--private-window",
                "https://de.search.yahoo.com/search?q=wetter"
            ]
        );
    }
}
