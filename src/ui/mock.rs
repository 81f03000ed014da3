//! Scripted prompt for testing

use std::collections::VecDeque;

use super::prompt::{Prompt, is_affirmative};

/// Prompt that replays predetermined answers
///
/// Every question is recorded so tests can assert on what was asked. Once the
/// answers run out it behaves like a closed input stream and returns empty
/// answers.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    /// Questions asked so far, in order
    pub questions: Vec<String>,
}

impl ScriptedPrompt {
    /// Create a prompt that answers with `answers` in order
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }

    /// Create a prompt whose input is already closed
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    fn next_answer(&mut self, question: &str) -> String {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or_default()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str, _default: &str) -> String {
        self.next_answer(question)
    }

    fn confirm(&mut self, question: &str) -> bool {
        is_affirmative(&self.next_answer(question))
    }
}
