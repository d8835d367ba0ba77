//! JSON:API documents returned by the `/players` endpoints.
//!
//! Lookups by name return `{"data": [ ... ]}`, lookups by ID return
//! `{"data": { ... }}`. Both are handled by [`first_player`].

use serde::Deserialize;
use serde_json::Value;

use crate::Result;

/// A player resource as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerRecord {
    /// Account ID, e.g. `account.c0e530e9b7244b358def282782f893af`
    pub id: String,
    /// Resource attributes
    pub attributes: PlayerAttributes,
}

/// Attributes of a [`PlayerRecord`] that we care about
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerAttributes {
    /// Current display name
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    data: Option<Value>,
}

/// Extract the first player from a response body.
///
/// A missing, `null`, empty array or empty object `data` member yields
/// `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the body is not JSON, or if the first
/// resource lacks an `id` or `attributes.name`.
pub fn first_player(body: &str) -> Result<Option<PlayerRecord>> {
    let document: Document = serde_json::from_str(body)?;
    let resource = match document.data {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
        Some(Value::Object(map)) if map.is_empty() => return Ok(None),
        Some(other) => other,
    };
    Ok(Some(serde_json::from_value(resource)?))
}
