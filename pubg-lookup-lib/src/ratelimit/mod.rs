//! Client side rate limiting for the PUBG API.
//!
//! The API grants a fixed number of requests per minute to an API key.
//! All lookups of a process share one [`RateGovernor`], which keeps the
//! local request count below that budget and backs off when the server
//! throttles anyway.
//!
//! # Architecture
//!
//! - [`GovernorConfig`]: Limit, window, cool-down and throttle recovery
//! - [`RateGovernor`]: The window state machine gating every request
//! - [`RateUsage`]: Snapshot of the budget for reporting
//! - [`ServerRateLimit`]: Rate limit headers reported by the server

mod config;
mod governor;
mod headers;

pub use config::{
    DEFAULT_COOLDOWN, DEFAULT_LIMIT, DEFAULT_THROTTLE_RECOVERY, DEFAULT_WINDOW, GovernorConfig,
    MAX_DURATION,
};
pub use governor::{RateGovernor, RateUsage};
pub use headers::{ServerRateLimit, parse_rate_limit_headers};
