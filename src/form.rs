//! Poll input parsing
//!
//! A UI collects the question in a single text field and the options in a
//! multi-line text area, one option per line. This module turns that raw
//! input into a [`PollDraft`] with normalized labels.

use crate::config::PollConfig;
use crate::{Result, validation_error};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Split a multi-line text area into option labels
///
/// Lines are trimmed and blank lines dropped. Duplicates are kept here;
/// see [`normalize_options`].
pub fn parse_options(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim labels, drop empty ones and remove duplicates keeping first occurrence
pub fn normalize_options<I, S>(options: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    options
        .into_iter()
        .filter_map(|option| {
            let label = option.as_ref().trim();
            if label.is_empty() || !seen.insert(label.to_string()) {
                None
            } else {
                Some(label.to_string())
            }
        })
        .collect()
}

/// Unvalidated poll input
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PollDraft {
    pub question: String,
    pub options: Vec<String>,
}

impl PollDraft {
    /// Build a draft from a question and a one-option-per-line text block
    pub fn new(question: impl Into<String>, options_text: &str) -> Self {
        Self {
            question: question.into(),
            options: parse_options(options_text),
        }
    }

    /// Build a draft from an already-split option list
    pub fn from_options<I, S>(question: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Normalize and check the draft against `config`
    ///
    /// Returns the trimmed question and the de-duplicated option list.
    pub fn validate(&self, config: &PollConfig) -> Result<(String, Vec<String>)> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(validation_error!("question must not be empty"));
        }
        if question.chars().count() > config.max_label_len {
            return Err(validation_error!(
                "question exceeds {} characters",
                config.max_label_len
            ));
        }

        let options = normalize_options(&self.options);
        if options.is_empty() {
            return Err(validation_error!("at least one option is required"));
        }
        if options.len() > config.max_options {
            return Err(validation_error!(
                "{} options given, at most {} allowed",
                options.len(),
                config.max_options
            ));
        }
        if let Some(long) = options
            .iter()
            .find(|option| option.chars().count() > config.max_label_len)
        {
            return Err(validation_error!(
                "option {:?} exceeds {} characters",
                long,
                config.max_label_len
            ));
        }

        Ok((question.to_string(), options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_parse_options_skips_blank_lines() {
        let parsed = parse_options("  Pizza \n\n Sushi\r\n   \nTacos");
        assert_eq!(parsed, vec!["Pizza", "Sushi", "Tacos"]);
        assert!(parse_options("\n  \n").is_empty());
    }

    #[test]
    fn test_normalize_keeps_first_duplicate() {
        let normalized = normalize_options(["B", " A", "B ", "", "A", "C"]);
        assert_eq!(normalized, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_validate_rejects_empty_input() {
        let config = PollConfig::for_testing();

        let no_question = PollDraft::new("   ", "A\nB");
        assert!(matches!(
            no_question.validate(&config),
            Err(Error::Validation { .. })
        ));

        let no_options = PollDraft::new("Q", " \n\n");
        assert!(matches!(
            no_options.validate(&config),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_limits() {
        let config = PollConfig {
            max_options: 2,
            max_label_len: 5,
            percent_precision: 1,
        };

        let too_many = PollDraft::from_options("Q", ["A", "B", "C"]);
        assert!(too_many.validate(&config).is_err());

        // Duplicates collapse before the count is checked.
        let dupes = PollDraft::from_options("Q", ["A", "B", "A"]);
        assert!(dupes.validate(&config).is_ok());

        let long_option = PollDraft::from_options("Q", ["short", "toolong"]);
        assert!(long_option.validate(&config).is_err());

        let long_question = PollDraft::from_options("Question", ["A"]);
        assert!(long_question.validate(&config).is_err());
    }

    #[test]
    fn test_validate_normalizes() {
        let draft = PollDraft::new("  Lunch? ", "Pizza\n Sushi \nPizza");
        let (question, options) = draft.validate(&PollConfig::default()).unwrap();
        assert_eq!(question, "Lunch?");
        assert_eq!(options, vec!["Pizza", "Sushi"]);
    }
}
