use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, VariantNames};
use url::Url;

use crate::{ErrorKind, Result};

/// Base URL of the official API. Each platform is a path segment below it.
pub const DEFAULT_API_URL: &str = "https://api.pubg.com/shards";

/// A shard of the PUBG API.
///
/// Every platform is served from its own base URL,
/// e.g. `https://api.pubg.com/shards/pc-eu`.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Steam (PC, global)
    #[default]
    Steam,
    /// PC, North America
    PcNa,
    /// PC, Europe
    PcEu,
    /// PC, Asia
    PcAs,
    /// PC, Korea and Japan
    PcKrjp,
    /// PC, South America
    PcSa,
    /// PC, Oceania
    PcOc,
    /// PC, South East Asia
    PcSea,
}

impl Platform {
    /// Parse a shard name, falling back to the default platform
    /// if the name is unknown.
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        Self::from_str(name.trim()).unwrap_or_else(|_| {
            let fallback = Self::default();
            log::warn!("Unknown platform `{name}`, using `{fallback}` instead");
            fallback
        })
    }

    /// The base URL of this shard below the given API root.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` cannot have path segments
    /// (e.g. `mailto:` or `data:` URLs).
    pub fn base_url(self, api_url: &Url) -> Result<Url> {
        let mut url = api_url.clone();
        url.path_segments_mut()
            .map_err(|()| ErrorKind::InvalidApiUrl(api_url.to_string()))?
            .pop_if_empty()
            .push(&self.to_string());
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[rstest]
    #[case("steam", Platform::Steam)]
    #[case("pc-na", Platform::PcNa)]
    #[case("PC-KRJP", Platform::PcKrjp)]
    #[case(" pc-sea ", Platform::PcSea)]
    #[case("xbox", Platform::Steam)]
    #[case("", Platform::Steam)]
    fn test_parse_or_default(#[case] input: &str, #[case] expected: Platform) {
        assert_eq!(Platform::parse_or_default(input), expected);
    }

    #[test]
    fn test_base_urls() {
        let api = Url::parse(DEFAULT_API_URL).unwrap();
        let urls: Vec<String> = Platform::iter()
            .map(|p| p.base_url(&api).unwrap().to_string())
            .collect();
        assert_eq!(urls.len(), 8);
        assert_eq!(urls[0], "https://api.pubg.com/shards/steam");
        assert_eq!(urls[7], "https://api.pubg.com/shards/pc-sea");
    }

    #[test]
    fn test_base_url_with_trailing_slash() {
        let api = Url::parse("http://127.0.0.1:8080/shards/").unwrap();
        assert_eq!(
            Platform::PcEu.base_url(&api).unwrap().as_str(),
            "http://127.0.0.1:8080/shards/pc-eu"
        );
    }

    #[test]
    fn test_base_url_rejects_opaque_urls() {
        let api = Url::parse("mailto:someone@example.com").unwrap();
        assert!(Platform::Steam.base_url(&api).is_err());
    }
}
