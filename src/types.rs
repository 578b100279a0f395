//! # Core Types for the Poll System
//!
//! This module defines the data structures shared by the store and the
//! presentation helpers.
//!
//! ## Type Categories
//!
//! - [`Poll`]: a question, its ordered options and their live tallies
//! - [`ResultRow`]: one derived `(option, count, percentage)` line of a snapshot
//! - [`Color`]: RGB color assigned to a snapshot rank
//!
//! ## Usage Examples
//!
//! ```rust
//! use quickpoll::types::Poll;
//!
//! let mut poll = Poll::new("Lunch?", ["Pizza", "Sushi", "Pizza"]).unwrap();
//! assert_eq!(poll.options, vec!["Pizza", "Sushi"]);
//! assert_eq!(poll.increment("Pizza"), Some(1));
//! assert_eq!(poll.increment("Tacos"), None);
//! assert_eq!(poll.total_votes(), 1);
//!
//! assert!(Poll::new("", ["Pizza"]).is_err());
//! ```

use crate::form::normalize_options;
use crate::{Error, Result, validation_error};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A live poll held by the store
///
/// # Invariants
///
/// - `question` is trimmed and non-empty.
/// - `options` holds at least one trimmed, non-empty, unique label.
/// - `tallies` has exactly one key per entry of `options`, for the whole
///   lifetime of the poll.
/// - Counts only move through [`Poll::increment`], one at a time.
///
/// Both [`Poll::new`] and deserialization enforce these; a record that
/// breaks them is rejected rather than repaired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "PollRecord")]
pub struct Poll {
    /// Identifier assigned at creation
    ///
    /// A UUID v4 that lets a caller notice the poll it rendered has been
    /// replaced by a newer one.
    pub id: Uuid,

    /// The question being asked
    pub question: String,

    /// Option labels in the order they were entered
    pub options: Vec<String>,

    /// Vote count per option label
    tallies: HashMap<String, u64>,

    /// When this poll was created
    pub created_at: DateTime<Utc>,
}

impl Poll {
    /// Create a poll with every tally at zero
    ///
    /// The question and labels are trimmed, blank labels dropped and
    /// duplicates removed keeping the first occurrence. Fails with
    /// [`Error::Validation`] when the question or the option list ends up
    /// empty. Size limits are the store's concern, not checked here.
    pub fn new<I, S>(question: &str, options: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let question = question.trim();
        if question.is_empty() {
            return Err(validation_error!("question must not be empty"));
        }

        let options = normalize_options(options);
        if options.is_empty() {
            return Err(validation_error!("at least one option is required"));
        }

        let tallies = options.iter().map(|option| (option.clone(), 0)).collect();

        Ok(Self {
            id: Uuid::new_v4(),
            question: question.to_string(),
            options,
            tallies,
            created_at: Utc::now(),
        })
    }

    /// Record one vote for `option`
    ///
    /// Returns the new count, or `None` when the label is not one of the
    /// poll's options. Unknown labels never create a tally entry.
    pub fn increment(&mut self, option: &str) -> Option<u64> {
        let count = self.tallies.get_mut(option)?;
        *count += 1;
        Some(*count)
    }

    /// Current count for `option`
    pub fn tally(&self, option: &str) -> Option<u64> {
        self.tallies.get(option).copied()
    }

    /// Whether `option` is one of the poll's labels
    pub fn has_option(&self, option: &str) -> bool {
        self.tallies.contains_key(option)
    }

    /// Options paired with their counts, in entry order
    pub fn tallies(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.options
            .iter()
            .map(|option| (option.as_str(), self.tallies.get(option).copied().unwrap_or(0)))
    }

    /// Sum of all tallies
    pub fn total_votes(&self) -> u64 {
        self.tallies.values().sum()
    }
}

/// Wire shape of a [`Poll`], checked before it becomes one
#[derive(Deserialize)]
struct PollRecord {
    id: Uuid,
    question: String,
    options: Vec<String>,
    tallies: HashMap<String, u64>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PollRecord> for Poll {
    type Error = Error;

    fn try_from(record: PollRecord) -> Result<Self> {
        if record.question.trim().is_empty() || record.question.trim() != record.question {
            return Err(validation_error!("question must be trimmed and non-empty"));
        }
        if record.options.is_empty() {
            return Err(validation_error!("at least one option is required"));
        }
        if normalize_options(&record.options) != record.options {
            return Err(validation_error!(
                "options must be trimmed, non-empty and unique"
            ));
        }
        if record.tallies.len() != record.options.len()
            || !record
                .options
                .iter()
                .all(|option| record.tallies.contains_key(option))
        {
            return Err(validation_error!("tallies must cover exactly the options"));
        }

        Ok(Self {
            id: record.id,
            question: record.question,
            options: record.options,
            tallies: record.tallies,
            created_at: record.created_at,
        })
    }
}

/// One line of a snapshot
///
/// Rows are derived on every read and never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultRow {
    /// Option label
    pub option: String,

    /// Votes received by this option
    pub count: u64,

    /// Share of all votes, `0.0..=100.0`
    ///
    /// `0.0` for every row while no votes have been cast.
    pub percentage: f64,

    /// Zero-based position in the snapshot
    pub rank: usize,

    /// Color assigned to `rank`
    pub color: Color,
}

/// An RGB color
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Color from its red, green and blue channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS-style hex form, e.g. `#636efa`
    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode([self.r, self.g, self.b]))
    }
}
