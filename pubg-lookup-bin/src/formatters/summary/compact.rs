use std::fmt::{self, Display};

use anyhow::Result;
use pubg_lookup_lib::BatchSummary;

use crate::formatters::color::{BOLD_GREEN, BOLD_PINK, BOLD_YELLOW, DIM, NORMAL, color};

use super::SummaryFormatter;

struct CompactSummary<'a> {
    summary: &'a BatchSummary,
}

impl Display for CompactSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;

        color!(f, NORMAL, "🔍 {} Total", summary.total())?;
        color!(f, BOLD_GREEN, " ✅ {} Resolved", summary.resolved())?;
        color!(f, BOLD_PINK, " 🚫 {} Unresolved", summary.unresolved())?;
        if summary.unresolved() > 0 {
            color!(
                f,
                DIM,
                " ({} not found, {} failed)",
                summary.not_found(),
                summary.errored()
            )?;
        }
        writeln!(f)?;

        let usage = summary.usage;
        color!(
            f,
            BOLD_YELLOW,
            "⏱ API usage {}/{}, window resets in {}s",
            usage.request_count,
            usage.limit,
            usage.resets_in.as_secs()
        )?;
        Ok(())
    }
}

pub(crate) struct Compact;

impl Compact {
    pub(crate) const fn new() -> Self {
        Self {}
    }
}

impl SummaryFormatter for Compact {
    fn format(&self, summary: &BatchSummary) -> Result<String> {
        Ok(CompactSummary { summary }.to_string())
    }
}
