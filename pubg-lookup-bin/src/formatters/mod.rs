pub(crate) mod color;
pub(crate) mod log;
pub(crate) mod result;
pub(crate) mod summary;

use self::{result::ResultFormatter, summary::SummaryFormatter};
use crate::options::{OutputMode, SummaryFormat};

/// Whether stdout is a terminal that should get colors.
/// Takes into account the `NO_COLOR` and `CLICOLOR` environment variables.
fn supports_color() -> bool {
    console::colors_enabled()
}

pub(crate) fn get_summary_formatter(format: SummaryFormat) -> Box<dyn SummaryFormatter> {
    match format {
        SummaryFormat::Compact => Box::new(summary::Compact::new()),
        SummaryFormat::Json => Box::new(summary::Json::new()),
    }
}

/// Create a result formatter based on the given mode
pub(crate) fn get_result_formatter(mode: OutputMode) -> Box<dyn ResultFormatter> {
    if mode.is_plain() || !supports_color() {
        return Box::new(result::PlainFormatter);
    }
    Box::new(result::ColorFormatter)
}
