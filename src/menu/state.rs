//! Menu screens and the transitions between them

use crate::ExitCode;

/// Line accepted
pub const ACCEPTED: i32 = 0;
/// Menu dismissed
pub const CANCELLED: i32 = 1;
/// First custom keybinding, `-kb-custom-1`
pub const KB_BROWSERS: i32 = 10;
pub const KB_SEARCH_ENGINES: i32 = 11;
pub const KB_TOGGLE_PRIVATE: i32 = 12;
pub const KB_CHANGE_LANGUAGE: i32 = 13;
/// Last custom keybinding rofi reports, `-kb-custom-19`
pub const KB_LAST: i32 = 28;

/// Screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    /// Free-text search field
    #[default]
    Search,
    PickBrowser,
    PickSearchEngine,
    PickLanguage,
}

impl MenuState {
    #[must_use]
    pub const fn is_picker(self) -> bool {
        !matches!(self, Self::Search)
    }
}

/// What the session does after the menu closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Use the accepted line: search from `Search`, select from a picker
    Apply,
    /// Show another screen, or the same one again
    Enter(MenuState),
    /// Flip private search, then show the same screen again
    TogglePrivate,
    Exit(ExitCode),
}

impl Transition {
    /// Transition for the exit status `code` of the menu shown in `state`
    ///
    /// ```
    /// use rofi_search::ExitCode;
    /// use rofi_search::menu::{MenuState, Transition};
    ///
    /// assert_eq!(
    ///     Transition::from_code(MenuState::Search, 10),
    ///     Transition::Enter(MenuState::PickBrowser)
    /// );
    /// assert_eq!(
    ///     Transition::from_code(MenuState::Search, 1),
    ///     Transition::Exit(ExitCode::Success)
    /// );
    /// ```
    #[must_use]
    pub const fn from_code(state: MenuState, code: i32) -> Self {
        match code {
            ACCEPTED => Self::Apply,
            CANCELLED if state.is_picker() => Self::Enter(MenuState::Search),
            CANCELLED => Self::Exit(ExitCode::Success),
            KB_BROWSERS => Self::Enter(MenuState::PickBrowser),
            KB_SEARCH_ENGINES => Self::Enter(MenuState::PickSearchEngine),
            KB_TOGGLE_PRIVATE => Self::TogglePrivate,
            KB_CHANGE_LANGUAGE => Self::Enter(MenuState::PickLanguage),
            14..=KB_LAST => Self::Enter(state),
            _ => Self::Exit(ExitCode::MenuError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MenuState; 4] = [
        MenuState::Search,
        MenuState::PickBrowser,
        MenuState::PickSearchEngine,
        MenuState::PickLanguage,
    ];

    #[test]
    fn test_accept_applies_everywhere() {
        for state in ALL {
            assert_eq!(Transition::from_code(state, 0), Transition::Apply);
        }
    }

    #[test]
    fn test_cancel() {
        assert_eq!(
            Transition::from_code(MenuState::Search, 1),
            Transition::Exit(ExitCode::Success)
        );
        for state in [MenuState::PickBrowser, MenuState::PickSearchEngine, MenuState::PickLanguage] {
            assert_eq!(
                Transition::from_code(state, 1),
                Transition::Enter(MenuState::Search)
            );
        }
    }

    #[test]
    fn test_custom_keybindings() {
        for state in ALL {
            assert_eq!(
                Transition::from_code(state, 11),
                Transition::Enter(MenuState::PickSearchEngine)
            );
            assert_eq!(Transition::from_code(state, 12), Transition::TogglePrivate);
            assert_eq!(
                Transition::from_code(state, 13),
                Transition::Enter(MenuState::PickLanguage)
            );
        }
    }

    #[test]
    fn test_unbound_keybindings_reenter() {
        for state in ALL {
            for code in [14, 20, 28] {
                assert_eq!(Transition::from_code(state, code), Transition::Enter(state));
            }
        }
    }

    #[test]
    fn test_unexpected_codes_fail() {
        for code in [-1, 2, 9, 29, 65] {
            assert_eq!(
                Transition::from_code(MenuState::Search, code),
                Transition::Exit(ExitCode::MenuError)
            );
        }
    }
}
