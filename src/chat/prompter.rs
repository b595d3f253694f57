//! Interactive questions the controller asks the user.

use std::path::PathBuf;

/// Source of answers to confirmation, free-text and file-selection prompts.
pub trait Prompter {
    /// Ask a yes/no question.  Anything but an explicit yes is a no.
    fn confirm(&mut self, question: &str) -> bool;

    /// Ask for a line of text, pre-filled with `default`.
    ///
    /// Returns `None` when the user cancels or leaves the answer empty.
    fn prompt(&mut self, question: &str, default: &str) -> Option<String>;

    /// Ask the user to pick a file.  `None` means nothing was chosen.
    fn select_file(&mut self) -> Option<PathBuf>;
}

/// Interpret a free-form answer to a yes/no question.
pub fn parse_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
