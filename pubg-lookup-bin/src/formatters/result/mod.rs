use pubg_lookup_lib::LookupResult;

mod color;
mod plain;

pub(crate) use color::ColorFormatter;
pub(crate) use plain::PlainFormatter;

/// A trait for formatting the result of a single lookup
///
/// This trait is used to convert a lookup result into a human-readable string.
/// It can be implemented for different formatting styles such as
/// colorized output or plaintext.
pub(crate) trait ResultFormatter: Send + Sync {
    /// Format the result into a human-readable string
    fn format_result(&self, result: &LookupResult) -> String;
}
