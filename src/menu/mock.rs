//! Scripted menu for testing

use std::cell::RefCell;
use std::collections::VecDeque;

use super::error::{MenuError, Result};
use super::traits::{Menu, MenuRequest, MenuResponse};

/// Menu that replays predetermined responses
///
/// Every request it is shown is recorded, so tests can check what the user
/// would have seen.
#[derive(Debug, Default)]
pub struct ScriptedMenu {
    responses: RefCell<VecDeque<MenuResponse>>,
    requests: RefCell<Vec<MenuRequest>>,
}

impl ScriptedMenu {
    /// Create a menu answering with `responses`, in order
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = MenuResponse>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().collect()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Create a menu from `(code, output)` pairs
    #[must_use]
    pub fn from_codes(responses: &[(i32, &str)]) -> Self {
        Self::new(
            responses
                .iter()
                .map(|(code, output)| MenuResponse::new(*code, *output)),
        )
    }

    /// Requests shown so far
    #[must_use]
    pub fn requests(&self) -> Vec<MenuRequest> {
        self.requests.borrow().clone()
    }

    /// Number of responses not consumed yet
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl Menu for ScriptedMenu {
    fn show(&self, request: &MenuRequest) -> Result<MenuResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| MenuError::Exhausted(request.prompt.clone()))
    }
}
