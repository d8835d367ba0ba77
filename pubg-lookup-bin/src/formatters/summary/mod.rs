mod compact;
mod json;

pub(crate) use compact::Compact;
pub(crate) use json::Json;

use anyhow::Result;
use pubg_lookup_lib::BatchSummary;

pub(crate) trait SummaryFormatter {
    /// Format the summary of a batch
    fn format(&self, summary: &BatchSummary) -> Result<String>;
}
