use std::time::Duration;

use clap::{Parser, builder::PossibleValuesParser, builder::TypedValueParser};
use pubg_lookup_lib::{
    BatchOptions, ClientBuilder, DEFAULT_API_URL, Platform,
    ratelimit::{DEFAULT_LIMIT, GovernorConfig},
};
use secrecy::SecretString;
use strum::{Display, EnumString, VariantNames};

use crate::verbosity::Verbosity;

const HELP_MSG_INPUTS: &str = "Batches of players to look up. Each batch is a list of player
names and account IDs separated by `|`, e.g. `shroud|account.c0e530e9b7244b358def282782f893af`.
Tokens starting with `account.` are looked up by ID, everything else by name.

Without inputs, batches are read interactively from standard input.
Enter `back`, `exit` or `quit` to leave.";

/// The format of the batch summary
#[derive(Debug, Default, Clone, Copy, Display, EnumString, VariantNames, PartialEq, Eq)]
#[non_exhaustive]
pub(crate) enum SummaryFormat {
    /// One line per player and a short summary
    #[default]
    #[strum(serialize = "compact", ascii_case_insensitive)]
    Compact,

    /// A JSON document with all results and the rate limit usage
    #[strum(serialize = "json", ascii_case_insensitive)]
    Json,
}

/// The different formatter modes
///
/// This decides over whether to use color or plain text for the output.
#[derive(Debug, Default, Clone, Copy, Display, EnumString, VariantNames, PartialEq, Eq)]
#[non_exhaustive]
pub(crate) enum OutputMode {
    /// Plain text output.
    ///
    /// Useful for scripting or when you want to pipe the output to another
    /// program.
    #[strum(serialize = "plain", ascii_case_insensitive)]
    Plain,

    /// Colorful output.
    ///
    /// This is the default output mode.
    #[default]
    #[strum(serialize = "color", ascii_case_insensitive)]
    Color,
}

impl OutputMode {
    /// Returns `true` if the output mode is `Plain`
    pub(crate) const fn is_plain(self) -> bool {
        matches!(self, OutputMode::Plain)
    }
}

/// pubg-lookup resolves PUBG player names and account IDs to player
/// identities, staying within the request budget of your API key.
///
/// pubg-lookup is powered by pubg-lookup-lib.
#[derive(Parser, Debug)]
#[command(version, about, next_display_order = None)]
pub(crate) struct LookupOptions {
    /// Batches of players to look up
    #[arg(name = "inputs", long_help = HELP_MSG_INPUTS)]
    pub(crate) inputs: Vec<String>,

    /// API key from the PUBG developer portal
    #[arg(long, env = "PUBG_API_KEY", hide_env_values = true)]
    pub(crate) api_key: Option<SecretString>,

    /// Platform shard to query. Unknown shards fall back to `steam`
    #[arg(long, env = "PUBG_PLATFORM", default_value = "steam")]
    pub(crate) platform: String,

    /// Root URL of the API, below which the shards live
    #[arg(long, env = "PUBG_API_URL", default_value = DEFAULT_API_URL)]
    pub(crate) api_url: String,

    /// Maximum number of requests per rate limit window
    #[arg(long, env = "PUBG_RATE_LIMIT", default_value_t = DEFAULT_LIMIT)]
    pub(crate) limit: u32,

    /// Length of the rate limit window, e.g. `60s`
    #[arg(long, env = "PUBG_RATE_WINDOW", default_value = "60s", value_parser = humantime::parse_duration)]
    pub(crate) window: Duration,

    /// Wait once the limit is reached. Must not be shorter than the window
    #[arg(long, env = "PUBG_COOLDOWN", default_value = "65s", value_parser = humantime::parse_duration)]
    pub(crate) cooldown: Duration,

    /// Wait after the API throttled a request. Must not be shorter than the cooldown
    #[arg(long, env = "PUBG_THROTTLE_RECOVERY", default_value = "70s", value_parser = humantime::parse_duration)]
    pub(crate) throttle_recovery: Duration,

    /// Network timeout of a single request
    #[arg(long, env = "PUBG_TIMEOUT", default_value = "20s", value_parser = humantime::parse_duration)]
    pub(crate) timeout: Duration,

    /// Pause between two lookups while the rate limit is not reached
    #[arg(long, default_value = "500ms", value_parser = humantime::parse_duration)]
    pub(crate) pause: Duration,

    /// Retry a lookup once after the API throttled it, instead of
    /// reporting it as failed
    #[arg(long)]
    pub(crate) retry_throttled: bool,

    /// Output format of the batch summary
    #[arg(short, long, default_value = "compact", ignore_case = true, value_parser = PossibleValuesParser::new(SummaryFormat::VARIANTS).try_map(|s| s.parse::<SummaryFormat>()))]
    pub(crate) format: SummaryFormat,

    /// Set the output display mode. Determines how results are presented in the terminal
    #[arg(long, default_value = "color", ignore_case = true, value_parser = PossibleValuesParser::new(OutputMode::VARIANTS).try_map(|s| s.parse::<OutputMode>()))]
    pub(crate) mode: OutputMode,

    #[command(flatten)]
    pub(crate) verbose: Verbosity,
}

impl LookupOptions {
    /// Rate limit settings from the command line
    pub(crate) fn governor_config(&self) -> GovernorConfig {
        GovernorConfig::from_options(
            Some(self.limit),
            Some(self.window),
            Some(self.cooldown),
            Some(self.throttle_recovery),
        )
    }

    /// Client settings from the command line
    pub(crate) fn client_builder(&self) -> ClientBuilder {
        ClientBuilder::builder()
            .api_key(self.api_key.clone())
            .platform(Platform::parse_or_default(&self.platform))
            .api_url(self.api_url.clone())
            .timeout(Some(self.timeout))
            .retry_throttled(self.retry_throttled)
            .build()
    }

    pub(crate) const fn batch_options(&self) -> BatchOptions {
        BatchOptions { pause: self.pause }
    }
}
