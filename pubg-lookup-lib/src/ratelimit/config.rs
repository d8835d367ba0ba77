use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{ErrorKind, Result};

/// Default number of requests allowed per window
pub const DEFAULT_LIMIT: u32 = 10;

/// Default length of the request window
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Default suspension once the local budget is spent.
/// Longer than the window so that the server's window has rolled over as well.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(65);

/// Default suspension after the server reported throttling
pub const DEFAULT_THROTTLE_RECOVERY: Duration = Duration::from_secs(70);

/// Upper bound for the window, the cool-down and the throttle recovery
pub const MAX_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

/// Settings of the [`RateGovernor`](crate::ratelimit::RateGovernor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GovernorConfig {
    /// Maximum number of requests per window (`L`)
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Length of the request window
    #[serde(default = "default_window", with = "humantime_serde")]
    pub window: Duration,

    /// Suspension once `limit` requests were recorded (`W`)
    #[serde(default = "default_cooldown", with = "humantime_serde")]
    pub cooldown: Duration,

    /// Suspension after a `429 Too Many Requests` response (`R`)
    #[serde(default = "default_throttle_recovery", with = "humantime_serde")]
    pub throttle_recovery: Duration,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            window: DEFAULT_WINDOW,
            cooldown: DEFAULT_COOLDOWN,
            throttle_recovery: DEFAULT_THROTTLE_RECOVERY,
        }
    }
}

const fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

const fn default_window() -> Duration {
    DEFAULT_WINDOW
}

const fn default_cooldown() -> Duration {
    DEFAULT_COOLDOWN
}

const fn default_throttle_recovery() -> Duration {
    DEFAULT_THROTTLE_RECOVERY
}

impl GovernorConfig {
    /// Create a `GovernorConfig` from CLI options, using defaults for missing values
    #[must_use]
    pub fn from_options(
        limit: Option<u32>,
        window: Option<Duration>,
        cooldown: Option<Duration>,
        throttle_recovery: Option<Duration>,
    ) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT),
            window: window.unwrap_or(DEFAULT_WINDOW),
            cooldown: cooldown.unwrap_or(DEFAULT_COOLDOWN),
            throttle_recovery: throttle_recovery.unwrap_or(DEFAULT_THROTTLE_RECOVERY),
        }
    }

    /// Check that the settings can be enforced.
    ///
    /// The cool-down must cover a full window, and a server throttling
    /// signal must never be answered with a shorter wait than the cool-down.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidGovernorConfig`] describing the first
    /// violated constraint.
    pub fn validate(&self) -> Result<()> {
        if self.limit == 0 {
            return Err(invalid("limit must be at least 1"));
        }
        if self.window.is_zero() {
            return Err(invalid("window must not be zero"));
        }
        for (name, value) in [
            ("window", self.window),
            ("cooldown", self.cooldown),
            ("throttle recovery", self.throttle_recovery),
        ] {
            if value > MAX_DURATION {
                return Err(invalid(format!(
                    "{name} ({value:?}) must not be longer than {MAX_DURATION:?}"
                )));
            }
        }
        if self.cooldown < self.window {
            return Err(invalid(format!(
                "cooldown ({:?}) must not be shorter than the window ({:?})",
                self.cooldown, self.window
            )));
        }
        if self.throttle_recovery < self.cooldown {
            return Err(invalid(format!(
                "throttle recovery ({:?}) must not be shorter than the cooldown ({:?})",
                self.throttle_recovery, self.cooldown
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ErrorKind {
    ErrorKind::InvalidGovernorConfig(message.into())
}
