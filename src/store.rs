//! Poll store
//!
//! Holds zero or one active [`Poll`]. The store is an ordinary value owned
//! by whoever drives the UI; wrap it in an `Arc` to share it between
//! request handlers. Every operation takes the same `RwLock`, so a vote
//! can never interleave with a create or reset.

use crate::config::PollConfig;
use crate::form::PollDraft;
use crate::presentation::{self, ChartData};
use crate::types::{Poll, ResultRow};
use crate::{Error, Result, poll_error};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// In-memory holder for the active poll
pub struct PollStore {
    active: RwLock<Option<Poll>>,
    config: PollConfig,
}

impl Default for PollStore {
    fn default() -> Self {
        Self::new(PollConfig::default())
    }
}

impl PollStore {
    /// Create an empty store with the given limits
    pub fn new(config: PollConfig) -> Self {
        Self {
            active: RwLock::new(None),
            config,
        }
    }

    /// Create an empty store with testing limits
    pub fn for_testing() -> Self {
        Self::new(PollConfig::for_testing())
    }

    /// Limits this store validates against
    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Start a new poll, replacing any active one
    ///
    /// The question and options are trimmed, blank options dropped and
    /// duplicates removed. Fails with [`Error::Validation`] when nothing
    /// usable is left or a limit is exceeded; the previous poll, if any,
    /// stays active in that case.
    pub fn create<I, S>(&self, question: &str, options: I) -> Result<Poll>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.create_from_draft(&PollDraft::from_options(question, options))
    }

    /// Start a new poll from form input
    pub fn create_from_draft(&self, draft: &PollDraft) -> Result<Poll> {
        let (question, options) = draft.validate(&self.config).inspect_err(|e| {
            warn!(error = %e, "Rejected poll creation");
        })?;

        let poll = Poll::new(&question, options)?;

        let mut active = self.write()?;
        if let Some(previous) = active.as_ref() {
            info!(previous_id = %previous.id, "Replacing active poll");
        }
        *active = Some(poll.clone());

        info!(
            poll_id = %poll.id,
            options = poll.options.len(),
            "Poll created"
        );
        Ok(poll)
    }

    /// Discard the active poll
    ///
    /// Idempotent. Returns `true` when a poll was actually removed.
    pub fn reset(&self) -> Result<bool> {
        let removed = self.write()?.take();

        match &removed {
            Some(poll) => info!(
                poll_id = %poll.id,
                total_votes = poll.total_votes(),
                "Poll reset"
            ),
            None => debug!("Reset requested with no active poll"),
        }

        Ok(removed.is_some())
    }

    /// Cast one vote for `option`
    ///
    /// Returns the option's new count. Leading and trailing whitespace in
    /// `option` is ignored, so `" A "` counts for `"A"`; otherwise the label
    /// must match exactly (case-sensitive). There is no per-voter limit:
    /// every call that names a valid option is counted.
    pub fn vote(&self, option: &str) -> Result<u64> {
        let label = option.trim();
        let mut active = self.write()?;

        let poll = active.as_mut().ok_or_else(|| {
            warn!(option = label, "Vote with no active poll");
            Error::not_found("no active poll")
        })?;

        let count = poll.increment(label).ok_or_else(|| {
            warn!(poll_id = %poll.id, option = label, "Vote for unknown option");
            Error::invalid_option(label)
        })?;

        debug!(poll_id = %poll.id, option = label, count, "Vote recorded");
        Ok(count)
    }

    /// Sorted result rows for the active poll
    ///
    /// Empty when no poll is active; callers show a "no active poll" state.
    pub fn snapshot(&self) -> Result<Vec<ResultRow>> {
        Ok(self
            .read()?
            .as_ref()
            .map(presentation::snapshot)
            .unwrap_or_default())
    }

    /// Results table for the active poll using the configured precision
    ///
    /// `None` when no poll is active.
    pub fn results_table(&self) -> Result<Option<String>> {
        let active = self.read()?;
        Ok(active.as_ref().map(|poll| {
            presentation::results_table(
                &presentation::snapshot(poll),
                self.config.percent_precision,
            )
        }))
    }

    /// Pie and bar chart series for the active poll, titled by its question
    pub fn chart_data(&self) -> Result<Option<ChartData>> {
        let active = self.read()?;
        Ok(active
            .as_ref()
            .map(|poll| presentation::chart_data(&poll.question, &presentation::snapshot(poll))))
    }

    /// Copy of the active poll, if any
    pub fn current(&self) -> Result<Option<Poll>> {
        Ok(self.read()?.clone())
    }

    /// Whether a poll is currently live
    pub fn is_active(&self) -> Result<bool> {
        Ok(self.read()?.is_some())
    }

    /// Votes accepted since the last create; `0` with no active poll
    pub fn total_votes(&self) -> Result<u64> {
        Ok(self.read()?.as_ref().map_or(0, Poll::total_votes))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Option<Poll>>> {
        self.active
            .read()
            .map_err(|_| poll_error!("Poll store read error"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Option<Poll>>> {
        self.active
            .write()
            .map_err(|_| poll_error!("Poll store write error"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_snapshot() {
        let store = PollStore::for_testing();
        let poll = store.create("Q", ["A", "B"]).unwrap();

        assert_eq!(poll.question, "Q");
        assert!(store.is_active().unwrap());

        let rows = store.snapshot().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.count == 0));
    }

    #[test]
    fn test_create_rejects_empty_options() {
        let store = PollStore::for_testing();
        let result = store.create("Q", Vec::<String>::new());

        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(!store.is_active().unwrap());
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_failed_create_keeps_previous_poll() {
        let store = PollStore::for_testing();
        let original = store.create("Q", ["A"]).unwrap();
        store.vote("A").unwrap();

        assert!(store.create("", ["X"]).is_err());

        let current = store.current().unwrap().unwrap();
        assert_eq!(current.id, original.id);
        assert_eq!(current.tally("A"), Some(1));
    }

    #[test]
    fn test_create_replaces_previous_poll() {
        let store = PollStore::for_testing();
        let first = store.create("First", ["A"]).unwrap();
        store.vote("A").unwrap();

        let second = store.create("Second", ["X", "Y"]).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.total_votes().unwrap(), 0);
        assert!(matches!(store.vote("A"), Err(Error::InvalidOption { .. })));
    }

    #[test]
    fn test_vote_returns_new_count() {
        let store = PollStore::for_testing();
        store.create("Q", ["A", "B"]).unwrap();

        assert_eq!(store.vote("A").unwrap(), 1);
        assert_eq!(store.vote(" A ").unwrap(), 2);
        assert_eq!(store.vote("B").unwrap(), 1);
        assert_eq!(store.total_votes().unwrap(), 3);
    }

    #[test]
    fn test_vote_errors() {
        let store = PollStore::for_testing();
        assert!(matches!(store.vote("A"), Err(Error::NotFound { .. })));

        store.create("Q", ["A", "B"]).unwrap();
        store.vote("A").unwrap();
        assert!(matches!(store.vote("C"), Err(Error::InvalidOption { .. })));

        let poll = store.current().unwrap().unwrap();
        assert_eq!(poll.tally("A"), Some(1));
        assert_eq!(poll.tally("B"), Some(0));
        assert_eq!(poll.total_votes(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let store = PollStore::for_testing();
        store.create("Q", ["A"]).unwrap();

        assert!(store.reset().unwrap());
        assert!(!store.reset().unwrap());
        assert!(store.snapshot().unwrap().is_empty());
        assert!(store.current().unwrap().is_none());
        assert_eq!(store.total_votes().unwrap(), 0);
    }

    #[test]
    fn test_vote_ignores_surrounding_whitespace_only() {
        let store = PollStore::for_testing();
        store.create("Q", ["A"]).unwrap();

        assert_eq!(store.vote("\tA \n").unwrap(), 1);
        assert!(matches!(store.vote("a"), Err(Error::InvalidOption { .. })));
        assert!(matches!(store.vote("A A"), Err(Error::InvalidOption { .. })));
    }

    #[test]
    fn test_results_table_uses_configured_precision() {
        let store = PollStore::new(PollConfig {
            percent_precision: 2,
            ..PollConfig::default()
        });
        assert!(store.results_table().unwrap().is_none());
        assert!(store.chart_data().unwrap().is_none());

        store.create("Q", ["A", "B", "C"]).unwrap();
        store.vote("A").unwrap();
        store.vote("B").unwrap();
        store.vote("C").unwrap();

        let table = store.results_table().unwrap().unwrap();
        assert!(table.contains("<td>A</td><td>1</td><td>33.33%</td>"));

        let chart = store.chart_data().unwrap().unwrap();
        assert_eq!(chart.title, "Q");
        assert_eq!(chart.total_votes, 3);
    }

    #[test]
    fn test_create_from_draft() {
        let store = PollStore::default();
        let draft = PollDraft::new("Lunch?", "Pizza\n\nSushi\nPizza\n");
        let poll = store.create_from_draft(&draft).unwrap();

        assert_eq!(poll.options, vec!["Pizza", "Sushi"]);
    }
}
