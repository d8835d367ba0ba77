use std::fmt::Display;

use serde::Serialize;

use crate::ErrorKind;

const ICON_RESOLVED: &str = "✔";
const ICON_NOT_FOUND: &str = "?";
const ICON_ERRORED: &str = "✗";

/// Outcome of looking up a single input token.
#[derive(Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupResult {
    /// The API knows this player
    Resolved {
        /// The token as it was entered
        input: String,
        /// Account ID reported by the API
        canonical_id: String,
        /// Display name reported by the API
        canonical_name: String,
    },
    /// The API has no matching player
    NotFound {
        /// The token as it was entered
        input: String,
    },
    /// The lookup failed; the batch continues
    Errored {
        /// The token as it was entered
        input: String,
        /// Why the lookup failed
        reason: ErrorKind,
    },
}

/// Discriminant of a [`LookupResult`], without the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// See [`LookupResult::Resolved`]
    Resolved,
    /// See [`LookupResult::NotFound`]
    NotFound,
    /// See [`LookupResult::Errored`]
    Errored,
}

impl LookupResult {
    /// The token this result belongs to
    #[must_use]
    pub fn input(&self) -> &str {
        match self {
            Self::Resolved { input, .. } | Self::NotFound { input } | Self::Errored { input, .. } => {
                input
            }
        }
    }

    #[must_use]
    /// Classification of this result
    pub const fn kind(&self) -> ResultKind {
        match self {
            Self::Resolved { .. } => ResultKind::Resolved,
            Self::NotFound { .. } => ResultKind::NotFound,
            Self::Errored { .. } => ResultKind::Errored,
        }
    }

    #[inline]
    #[must_use]
    /// Returns `true` if the player was resolved
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    #[inline]
    #[must_use]
    /// Returns `true` if the lookup failed, including throttling
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Errored { .. })
    }

    /// The error reason, if the lookup failed
    #[must_use]
    pub const fn reason(&self) -> Option<&ErrorKind> {
        match self {
            Self::Errored { reason, .. } => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    /// Return a unicode icon to visualize the result
    pub const fn icon(&self) -> &str {
        match self {
            Self::Resolved { .. } => ICON_RESOLVED,
            Self::NotFound { .. } => ICON_NOT_FOUND,
            Self::Errored { .. } => ICON_ERRORED,
        }
    }
}

impl Display for LookupResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved {
                input,
                canonical_id,
                canonical_name,
            } => write!(f, "{input} → {canonical_name} ({canonical_id})"),
            Self::NotFound { input } => write!(f, "{input} → not found"),
            Self::Errored { input, reason } => write!(f, "{input} → error: {reason}"),
        }
    }
}
