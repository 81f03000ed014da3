//! User interaction
//!
//! - **`Prompt`** - port used by the directive resolver for interactive decisions
//! - **`TerminalPrompt`** - dialoguer/stdin implementation used by the CLI
//! - **`ScriptedPrompt`** - canned answers for tests and non-terminal callers

pub mod mock;
pub mod prompt;

pub use mock::ScriptedPrompt;
pub use prompt::{Prompt, TerminalPrompt, is_affirmative};
