//! A counting `-v`/`-q` flag, in the style of `clap_verbosity_flag`.
//!
//! By default only warnings and errors of the lookup crates are reported.
//! - `-q` only reports errors
//! - `-qq` silences output
//! - `-v` shows info, e.g. rate limit waits
//! - `-vv` shows debug, e.g. every request and the API usage
//! - `-vvv` shows trace

use log::Level;
use log::LevelFilter;

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Verbosity {
    /// Pass many times for more log output
    ///
    /// By default, it'll only report warnings and errors. Passing `-v` one time
    /// also prints info messages, `-vv` enables debug logging, and `-vvv` trace.
    #[arg(
        long,
        short = 'v',
        action = clap::ArgAction::Count,
        global = true,
        help = Self::verbose_help(),
        long_help = Self::verbose_long_help(),
        conflicts_with = "quiet",
    )]
    verbose: u8,

    #[arg(
        long,
        short = 'q',
        action = clap::ArgAction::Count,
        global = true,
        help = Self::quiet_help(),
        long_help = Self::quiet_long_help(),
        conflicts_with = "verbose",
    )]
    quiet: u8,
}

impl Verbosity {
    /// Get the log level filter.
    ///
    /// `LevelFilter::Off` means all output is disabled.
    pub(crate) fn log_level_filter(&self) -> LevelFilter {
        level_filter(self.verbosity())
    }

    #[allow(clippy::cast_possible_wrap)]
    const fn verbosity(&self) -> i8 {
        level_value(Level::Warn) - (self.quiet as i8) + (self.verbose as i8)
    }

    const fn verbose_help() -> &'static str {
        "More output per occurrence"
    }

    const fn verbose_long_help() -> Option<&'static str> {
        None
    }

    const fn quiet_help() -> &'static str {
        "Less output per occurrence"
    }

    const fn quiet_long_help() -> Option<&'static str> {
        None
    }
}

const fn level_value(level: Level) -> i8 {
    match level {
        Level::Error => 0,
        Level::Warn => 1,
        Level::Info => 2,
        Level::Debug => 3,
        Level::Trace => 4,
    }
}

fn level_filter(verbosity: i8) -> LevelFilter {
    match verbosity {
        i8::MIN..=-1 => LevelFilter::Off,
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
