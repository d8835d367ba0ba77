use std::sync::LazyLock;

use console::Style;
use pubg_lookup_lib::{LookupResult, ResultKind};

use crate::formatters::color::{DIM, GREEN, PINK, YELLOW};

use super::ResultFormatter;

/// A colorized formatter for lookup results
///
/// This formatter is used if the terminal supports color and the user
/// has not explicitly requested plain output.
pub(crate) struct ColorFormatter;

impl ColorFormatter {
    /// Determine the color for formatted output based on the outcome
    fn kind_color(kind: ResultKind) -> &'static LazyLock<Style> {
        match kind {
            ResultKind::Resolved => &GREEN,
            ResultKind::NotFound => &YELLOW,
            ResultKind::Errored => &PINK,
        }
    }
}

impl ResultFormatter for ColorFormatter {
    fn format_result(&self, result: &LookupResult) -> String {
        let color = Self::kind_color(result.kind());
        let icon = color.apply_to(format!("[{}]", result.icon()));
        match result {
            LookupResult::Resolved {
                input,
                canonical_id,
                canonical_name,
            } => format!(
                "{icon} {input} → {} {}",
                color.apply_to(canonical_name),
                DIM.apply_to(format!("({canonical_id})"))
            ),
            other => format!("{icon} {other}"),
        }
    }
}
