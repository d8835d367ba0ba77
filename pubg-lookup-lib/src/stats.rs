use serde::Serialize;

use crate::{LookupResult, ResultKind, ratelimit::RateUsage};

/// Results of a batch, in input order, and the budget left afterwards
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// One result per requested token
    pub results: Vec<LookupResult>,
    /// Governor state after the last lookup
    pub usage: RateUsage,
}

impl BatchSummary {
    /// Number of lookups
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of lookups with the given outcome
    #[must_use]
    pub fn count(&self, kind: ResultKind) -> usize {
        self.results.iter().filter(|r| r.kind() == kind).count()
    }

    /// Number of players the API knows
    #[must_use]
    pub fn resolved(&self) -> usize {
        self.count(ResultKind::Resolved)
    }

    /// Number of players the API does not know
    #[must_use]
    pub fn not_found(&self) -> usize {
        self.count(ResultKind::NotFound)
    }

    /// Number of failed lookups
    #[must_use]
    pub fn errored(&self) -> usize {
        self.count(ResultKind::Errored)
    }

    /// Number of lookups that did not resolve to a player
    #[must_use]
    pub fn unresolved(&self) -> usize {
        self.total() - self.resolved()
    }

    /// Returns `true` if every lookup resolved
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.unresolved() == 0
    }
}
