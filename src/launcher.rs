//! Starting the browser
//!
//! A finished session yields a [`LaunchPlan`]: the resolved selection and
//! the exact command line. A [`Launcher`] carries it out, either by
//! spawning the browser or, in debug mode, by printing the plan.

use std::cell::RefCell;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::output;

/// Errors that can occur while starting the browser
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Empty browser command")]
    EmptyCommand,
}

/// Everything decided for one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub browser: String,
    pub search_engine: String,
    pub language: String,
    pub terms: String,
    pub url: String,
    pub private: bool,
    /// Executable followed by its arguments
    pub command: Vec<String>,
}

/// Trait for launcher implementations
pub trait Launcher {
    /// Carry out `plan`
    ///
    /// # Errors
    ///
    /// Returns `LaunchError` if the browser cannot be started.
    fn launch(&self, plan: &LaunchPlan) -> Result<(), LaunchError>;
}

/// Spawns the browser and returns without waiting for it
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, plan: &LaunchPlan) -> Result<(), LaunchError> {
        let (program, args) = plan.command.split_first().ok_or(LaunchError::EmptyCommand)?;
        tracing::debug!(%program, ?args, "starting browser");

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;
        Ok(())
    }
}

/// Prints the plan instead of starting anything
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunLauncher;

impl Launcher for DryRunLauncher {
    fn launch(&self, plan: &LaunchPlan) -> Result<(), LaunchError> {
        print!("{}", output::launch_table(plan));
        Ok(())
    }
}

/// Keeps every plan it is given
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    plans: RefCell<Vec<LaunchPlan>>,
}

impl RecordingLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn plans(&self) -> Vec<LaunchPlan> {
        self.plans.borrow().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, plan: &LaunchPlan) -> Result<(), LaunchError> {
        self.plans.borrow_mut().push(plan.clone());
        Ok(())
    }
}
