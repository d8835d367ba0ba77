use pubg_lookup_lib::LookupResult;

use super::ResultFormatter;

/// A plain text formatter for lookup results
///
/// This formatter is used when the user has requested raw output
/// or when the terminal does not support color.
pub(crate) struct PlainFormatter;

impl ResultFormatter for PlainFormatter {
    fn format_result(&self, result: &LookupResult) -> String {
        format!("[{}] {result}", result.icon())
    }
}
