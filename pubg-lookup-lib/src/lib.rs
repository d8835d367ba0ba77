//! `pubg_lookup_lib` resolves PUBG player names and account IDs to
//! player identities, without exceeding the API's request budget.
//!
//! Every request passes a [`RateGovernor`](ratelimit::RateGovernor),
//! which waits for a cool-down once the per-minute budget is spent and
//! backs off when the server throttles anyway.
//!
//! ```no_run
//! use pubg_lookup_lib::{ClientBuilder, Platform, Result, ratelimit::RateGovernor};
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ClientBuilder::builder()
//!         .api_key(SecretString::from("your-api-key".to_string()))
//!         .platform(Platform::Steam)
//!         .build()
//!         .client()?;
//!     let mut governor = RateGovernor::default();
//!
//!     let result = client.lookup_token(&mut governor, "shroud").await;
//!     println!("{result}");
//!     Ok(())
//! }
//! ```
//!
//! Whole batches go through [`run_batch`], which keeps the input order
//! and can be cancelled:
//!
//! ```no_run
//! use pubg_lookup_lib::{BatchOptions, ClientBuilder, Result, parse_batch, ratelimit::RateGovernor, run_batch};
//! use secrecy::SecretString;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ClientBuilder::builder()
//!         .api_key(SecretString::from("your-api-key".to_string()))
//!         .build()
//!         .client()?;
//!     let mut governor = RateGovernor::default();
//!     let requests = parse_batch("shroud|account.c0e530e9b7244b358def282782f893af");
//!
//!     let summary = run_batch(
//!         &client,
//!         &mut governor,
//!         &requests,
//!         &BatchOptions::default(),
//!         &CancellationToken::new(),
//!         &mut (),
//!     )
//!     .await?;
//!     println!("{} of {} resolved", summary.resolved(), summary.total());
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

mod batch;
mod client;
mod stats;
mod types;

pub mod ratelimit;
pub mod transport;

#[cfg(test)]
mod test_utils;

pub use batch::{BatchObserver, BatchOptions, DEFAULT_PAUSE, run_batch};
pub use client::{Client, ClientBuilder, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use stats::BatchSummary;
pub use types::*;
