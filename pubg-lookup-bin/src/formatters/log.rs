use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

use crate::{formatters, options::OutputMode, verbosity::Verbosity};

/// Initialize the logging system with the given verbosity level.
pub(crate) fn init_logging(verbose: &Verbosity, mode: OutputMode) {
    // Set a base level for all modules to `warn`, which is a reasonable default.
    // It will be overridden by RUST_LOG if it's set.
    let env = Env::default().filter_or("RUST_LOG", "warn");

    let mut builder = Builder::from_env(env);
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if std::env::var("RUST_LOG").is_err() {
        // Other crates (reqwest, hyper) stay at `warn`; `-v` only affects ours.
        builder.filter_level(LevelFilter::Warn);
        let level_filter = verbose.log_level_filter();
        builder
            .filter_module("pubg_lookup", level_filter)
            .filter_module("pubg_lookup_lib", level_filter);
    }

    // Calculate the longest log level text, including brackets.
    let max_level_text_width = log::LevelFilter::iter()
        .map(|level| level.as_str().len() + 2)
        .max()
        .unwrap_or(0);

    if mode.is_plain() {
        // Explicitly disable colors for plain output
        builder.format(move |buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    } else {
        builder.format(move |buf, record| {
            let level = record.level();
            let level_text = format!("{level}");
            let level_padding = max_level_text_width.saturating_sub(level_text.len() + 2);
            let prefix = format!("{:>width$}[{level_text}]", "", width = level_padding);
            let color = formatters::color::color_for_level(level);
            writeln!(buf, "{} {}", color.apply_to(&prefix), record.args())
        });
    }

    builder.init();
}
