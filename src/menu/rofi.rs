//! rofi / wofi backend

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::error::{MenuError, Result};
use super::traits::{Menu, MenuRequest, MenuResponse};
use crate::config::{Configuration, Customization};
use crate::system::Environment;

pub const ROFI: &str = "rofi";
pub const WOFI: &str = "wofi";

/// Menu backed by a dmenu-compatible program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RofiMenu {
    program: String,
    config: Option<PathBuf>,
    /// `-kb-custom-1` to `-kb-custom-4`
    keybindings: [Option<String>; 4],
}

impl RofiMenu {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            config: None,
            keybindings: Default::default(),
        }
    }

    /// `wofi` in a Wayland session, `rofi` otherwise
    #[must_use]
    pub fn for_environment(environment: &Environment) -> Self {
        Self::new(if environment.is_wayland() { WOFI } else { ROFI })
    }

    /// Menu for the session described by `config`
    #[must_use]
    pub fn from_config(config: &Configuration) -> Self {
        Self::for_environment(&config.environment).with_customization(&config.customization)
    }

    /// Take the rofi configuration file and keybindings from `customization`
    #[must_use]
    pub fn with_customization(mut self, customization: &Customization) -> Self {
        self.config.clone_from(&customization.rofi_config);
        self.keybindings = [
            customization.kb_browsers.clone(),
            customization.kb_search_engines.clone(),
            customization.kb_toggle_private.clone(),
            customization.kb_change_language.clone(),
        ];
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Command-line arguments for one screen
    #[must_use]
    pub fn arguments(&self, request: &MenuRequest) -> Vec<String> {
        let mut args = vec!["-dmenu".to_string(), "-no-sort".to_string()];
        if request.markup {
            args.push("-markup-rows".to_string());
        }

        push_option(&mut args, "-p", Some(&request.prompt));
        push_option(&mut args, "-mesg", request.message.as_deref());
        push_option(&mut args, "-format", Some(request.format.as_str()));
        push_option(&mut args, "-filter", request.filter.as_deref());
        push_option(&mut args, "-theme-str", request.theme.as_deref());

        let config = self.config.as_ref().map(|path| path.display().to_string());
        push_option(&mut args, "-config", config.as_deref());

        for (index, keybinding) in self.keybindings.iter().enumerate() {
            let flag = format!("-kb-custom-{}", index + 1);
            push_option(&mut args, &flag, keybinding.as_deref());
        }
        args
    }
}

/// Append `flag value`, unless the value is missing or empty
fn push_option(args: &mut Vec<String>, flag: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
}

impl Menu for RofiMenu {
    fn show(&self, request: &MenuRequest) -> Result<MenuResponse> {
        let args = self.arguments(request);
        tracing::debug!(program = %self.program, ?args, "spawning menu");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| MenuError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(request.lines.join("\n").as_bytes())?;
        }

        let output = child.wait_with_output()?;
        // Killed by a signal: no status, which no transition accepts.
        let code = output.status.code().unwrap_or(-1);
        let response = MenuResponse::new(code, String::from_utf8_lossy(&output.stdout));
        tracing::debug!(code = response.code, output = %response.output, "menu closed");
        Ok(response)
    }
}
