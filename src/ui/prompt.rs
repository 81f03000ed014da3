//! Interactive prompt port
//!
//! The directive resolver never talks to the terminal directly. It asks
//! questions through the [`Prompt`] trait, which keeps the resolution logic
//! deterministic under test (see [`super::mock::ScriptedPrompt`]).

use std::io::{self, BufRead, IsTerminal, Write};

use tracing::debug;

/// Source of answers for interactive decisions
///
/// Implementations must not fail: a closed or unreadable input stream is
/// reported as an empty answer, which resolves to "use the default" for
/// [`Prompt::ask`] and "decline" for [`Prompt::confirm`].
pub trait Prompt {
    /// Ask for a free-form value. `default` is shown to the user; callers
    /// treat an empty answer as "use the default".
    fn ask(&mut self, question: &str, default: &str) -> String;

    /// Ask a yes/no question. Only an explicit yes confirms.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Interpret a typed answer to a yes/no question
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prompt backed by the process terminal
///
/// Uses `dialoguer` widgets when stdin is a terminal, and falls back to
/// reading plain lines from stdin when input is piped.
pub struct TerminalPrompt {
    theme: dialoguer::theme::ColorfulTheme,
    interactive_terminal: bool,
}

impl TerminalPrompt {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: dialoguer::theme::ColorfulTheme::default(),
            interactive_terminal: io::stdin().is_terminal(),
        }
    }

    fn read_line(question: &str) -> String {
        print!("{question} ");
        if let Err(e) = io::stdout().flush() {
            debug!(error = %e, "failed to flush prompt");
        }

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => {
                debug!("prompt input closed, treating as empty answer");
                String::new()
            }
            Ok(_) => line.trim().to_string(),
            Err(e) => {
                debug!(error = %e, "failed to read prompt answer");
                String::new()
            }
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, question: &str, default: &str) -> String {
        if !self.interactive_terminal {
            return Self::read_line(&format!("{question} (default {default}):"));
        }

        dialoguer::Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .default(default.to_string())
            .show_default(true)
            .allow_empty(true)
            .interact_text()
            .unwrap_or_else(|e| {
                debug!(error = %e, "prompt failed, treating as empty answer");
                String::new()
            })
    }

    fn confirm(&mut self, question: &str) -> bool {
        if !self.interactive_terminal {
            return is_affirmative(&Self::read_line(&format!("{question} (y/n):")));
        }

        dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                debug!(error = %e, "confirmation failed, treating as decline");
                false
            })
    }
}
