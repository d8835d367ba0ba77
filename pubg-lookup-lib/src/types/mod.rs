#![allow(unreachable_pub)]

mod error;
mod platform;
mod player;
mod request;
mod result;

pub use error::ErrorKind;
pub use platform::{DEFAULT_API_URL, Platform};
pub use player::{PlayerAttributes, PlayerRecord, first_player};
pub use request::{ACCOUNT_ID_PREFIX, BATCH_DELIMITER, LookupRequest, parse_batch};
pub use result::{LookupResult, ResultKind};

/// The `pubg_lookup_lib` `Result` type
pub type Result<T> = std::result::Result<T, crate::ErrorKind>;
