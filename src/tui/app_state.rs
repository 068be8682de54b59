use crate::session::{Choice, Prompt};

/// One row of the selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ChoiceItem {
    pub choice: Choice,
    pub label: &'static str,
}

pub(super) fn choice_items(prompt: &Prompt) -> Vec<ChoiceItem> {
    prompt
        .choices
        .iter()
        .map(|&choice| ChoiceItem {
            choice,
            label: choice.label(),
        })
        .collect()
}

/// How the interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every entry was decided.
    Completed,
    /// An operation failed; carries the message shown to the user.
    Failed(String),
    /// The user quit before every entry was decided.
    Aborted,
}
