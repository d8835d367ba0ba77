//! `pubg-lookup` resolves PUBG player names and account IDs to player
//! identities, without exceeding the request budget of the API key.
//!
//! The pubg-lookup binary is a wrapper around pubg-lookup-lib, which
//! provides the rate limited client.
//!
//! Look up a batch of players:
//! ```sh
//! pubg-lookup --api-key "$KEY" "shroud|account.c0e530e9b7244b358def282782f893af"
//! ```
//!
//! Query another shard and print a JSON summary:
//! ```sh
//! PUBG_API_KEY="$KEY" pubg-lookup --platform pc-eu --format json "PlayerOne|PlayerTwo"
//! ```
//!
//! Enter batches interactively:
//! ```sh
//! pubg-lookup --api-key "$KEY"
//! ```
#![warn(clippy::all, clippy::pedantic)]
#![warn(
    absolute_paths_not_starting_with_crate,
    rustdoc::invalid_html_tags,
    missing_copy_implementations,
    missing_debug_implementations,
    semicolon_in_expressions_from_macros,
    unreachable_pub,
    unused_extern_crates,
    variant_size_differences,
    clippy::missing_const_for_fn
)]
#![deny(anonymous_parameters, macro_use_extern_crate)]
#![deny(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use formatters::log::init_logging;
use log::{error, warn};
use pubg_lookup_lib::ratelimit::RateGovernor;
use tokio_util::sync::CancellationToken;

mod commands;
mod formatters;
mod options;
mod verbosity;

use crate::commands::CommandParams;
use crate::formatters::{get_result_formatter, get_summary_formatter};
use crate::options::LookupOptions;

/// A C-like enum that can be cast to `i32` and used as process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExitCode {
    Success = 0,
    // NOTE: exit code 1 is used for any `Result::Err` bubbled up to `main()`
    // using the `?` operator.
    #[allow(unused)]
    UnexpectedFailure = 1,
    LookupFailure = 2,
    ConfigError = 3,
    Interrupted = 130,
}

fn main() -> Result<()> {
    // std::process::exit doesn't guarantee that all destructors will be run,
    // therefore we wrap the main code in another function to ensure that.
    // See: https://doc.rust-lang.org/stable/std/process/fn.exit.html
    let exit_code = run_main()?;
    std::process::exit(exit_code);
}

/// Set up runtime and call the lookup entrypoint
fn run_main() -> Result<i32> {
    let opts = LookupOptions::parse();

    if opts.mode.is_plain() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
    init_logging(&opts.verbose, opts.mode);

    let governor_config = opts.governor_config();
    if let Err(e) = governor_config.validate() {
        error!("{e}");
        return Ok(ExitCode::ConfigError as i32);
    }

    let client = match opts.client_builder().client() {
        Ok(client) => client,
        Err(e) => {
            error!("{e}");
            return Ok(ExitCode::ConfigError as i32);
        }
    };

    let runtime = tokio::runtime::Runtime::new().context("Cannot start the async runtime")?;
    let cancel = CancellationToken::new();
    let mut params = CommandParams {
        client,
        governor: RateGovernor::new(governor_config),
        batch_options: opts.batch_options(),
        cancel: cancel.clone(),
        result_formatter: get_result_formatter(opts.mode),
        summary_formatter: get_summary_formatter(opts.format),
        format: opts.format,
    };

    let exit_code = runtime.block_on(async {
        spawn_interrupt_handler(cancel);
        if opts.inputs.is_empty() {
            commands::interactive(&mut params).await
        } else {
            commands::lookup(&mut params, &opts.inputs).await
        }
    });

    // A pending read of the interactive prompt would block a regular shutdown
    runtime.shutdown_background();
    Ok(exit_code? as i32)
}

/// Cancel `cancel` on Ctrl-C
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Cannot listen for Ctrl-C: {e}");
            return;
        }
        warn!("Interrupted, stopping");
        cancel.cancel();
    });
}
