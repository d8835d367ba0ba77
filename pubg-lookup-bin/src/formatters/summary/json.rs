use anyhow::{Context, Result};
use pubg_lookup_lib::{BatchSummary, LookupResult, ratelimit::RateUsage};
use serde::Serialize;

use super::SummaryFormatter;

/// Counts are included so that scripts do not have to recount the results
#[derive(Serialize)]
struct JsonSummary<'a> {
    total: usize,
    resolved: usize,
    not_found: usize,
    errored: usize,
    unresolved: usize,
    usage: &'a RateUsage,
    results: &'a [LookupResult],
}

pub(crate) struct Json;

impl Json {
    pub(crate) const fn new() -> Self {
        Self {}
    }
}

impl SummaryFormatter for Json {
    /// Format the summary as JSON object
    fn format(&self, summary: &BatchSummary) -> Result<String> {
        let json = JsonSummary {
            total: summary.total(),
            resolved: summary.resolved(),
            not_found: summary.not_found(),
            errored: summary.errored(),
            unresolved: summary.unresolved(),
            usage: &summary.usage,
            results: &summary.results,
        };
        serde_json::to_string_pretty(&json).context("Cannot format summary as JSON")
    }
}
