//! Interactive decisions
//!
//! Orchestration code asks a [`DecisionSource`] instead of reading the
//! terminal itself, so confirmation and pod selection can be scripted.

use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Input};
use tracing::debug;

use crate::errors::PromptError;

/// Source of operator decisions
#[async_trait]
pub trait DecisionSource: Send + Sync {
    /// Yes/no question; anything but an explicit yes, including an
    /// interrupt, is a no.
    async fn confirm(&self, question: &str) -> bool;

    /// Pick one of `count` enumerated items. The returned index is not
    /// range-checked here.
    async fn select_index(&self, count: usize) -> Result<usize, PromptError>;
}

/// Only `y`/`Y` affirms
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Parse a typed selection
pub fn parse_index(answer: &str) -> Result<usize, PromptError> {
    let answer = answer.trim();
    answer
        .parse::<usize>()
        .map_err(|_| PromptError::Invalid(format!("'{}' is not a pod index", answer)))
}

/// Decisions read from the controlling terminal
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }

    /// Show `prompt` and wait for one typed line. Ctrl+C, a closed
    /// input or a non-interactive terminal cancels.
    async fn read_answer(&self, prompt: String) -> Result<String, PromptError> {
        let answer = tokio::task::spawn_blocking(move || {
            let theme = ColorfulTheme::default();
            Input::<String>::with_theme(&theme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
        })
        .await
        .map_err(|e| {
            debug!("Prompt task failed: {}", e);
            PromptError::Cancelled
        })?;

        answer.map_err(|e| {
            debug!("Prompt ended without an answer: {}", e);
            PromptError::Cancelled
        })
    }
}

#[async_trait]
impl DecisionSource for TerminalPrompt {
    async fn confirm(&self, question: &str) -> bool {
        match self.read_answer(format!("{} (y/N)", question)).await {
            Ok(answer) => is_affirmative(&answer),
            Err(_) => false,
        }
    }

    async fn select_index(&self, count: usize) -> Result<usize, PromptError> {
        let prompt = format!("Select pod (0-{})", count.saturating_sub(1));
        let answer = self.read_answer(prompt).await?;
        parse_index(&answer)
    }
}
