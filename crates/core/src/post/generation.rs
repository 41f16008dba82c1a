//! Rules for serving pages that are missing or out of date.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};

use super::error::PostError;

/// Pages are regenerated at most once per interval (30 minutes).
pub const DEFAULT_REVALIDATE_SECONDS: u64 = 60 * 30;

/// How a request for a slug that was not pre-rendered is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackMode {
    /// Unknown slugs are not found.
    #[serde(rename = "false")]
    Disabled,
    /// Show the loading placeholder and generate the page in the background.
    #[default]
    #[serde(rename = "true")]
    Placeholder,
    /// Generate the page while the request waits.
    #[serde(rename = "blocking")]
    Blocking,
}

impl FromStr for FallbackMode {
    type Err = PostError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "false" => Ok(FallbackMode::Disabled),
            "true" => Ok(FallbackMode::Placeholder),
            "blocking" => Ok(FallbackMode::Blocking),
            _ => Err(PostError::InvalidFallbackMode(value.to_string())),
        }
    }
}

impl fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            FallbackMode::Disabled => "false",
            FallbackMode::Placeholder => "true",
            FallbackMode::Blocking => "blocking",
        };
        f.write_str(value)
    }
}

/// What to do with a request for a page that is not in the page cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissAction {
    NotFound,
    ServePlaceholder,
    RenderBlocking,
}

/// Decides how a cache miss is served under the given fallback mode.
pub fn resolve_miss(mode: FallbackMode) -> MissAction {
    match mode {
        FallbackMode::Disabled => MissAction::NotFound,
        FallbackMode::Placeholder => MissAction::ServePlaceholder,
        FallbackMode::Blocking => MissAction::RenderBlocking,
    }
}

/// A page generated `age` ago is stale once the revalidation interval has passed.
pub fn is_stale(age: Duration, revalidate: Duration) -> bool {
    age >= revalidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fallback_modes() {
        assert_eq!("false".parse(), Ok(FallbackMode::Disabled));
        assert_eq!("true".parse(), Ok(FallbackMode::Placeholder));
        assert_eq!("blocking".parse(), Ok(FallbackMode::Blocking));
        assert_eq!(" Blocking ".parse(), Ok(FallbackMode::Blocking));
    }

    #[test]
    fn test_parse_invalid_fallback_mode() {
        let result: Result<FallbackMode, _> = "sometimes".parse();
        assert_eq!(
            result,
            Err(PostError::InvalidFallbackMode("sometimes".to_string()))
        );
    }

    #[test]
    fn test_fallback_mode_display_round_trips() {
        for mode in [
            FallbackMode::Disabled,
            FallbackMode::Placeholder,
            FallbackMode::Blocking,
        ] {
            assert_eq!(mode.to_string().parse(), Ok(mode));
        }
    }

    #[test]
    fn test_default_fallback_mode_is_placeholder() {
        assert_eq!(FallbackMode::default(), FallbackMode::Placeholder);
    }

    #[test]
    fn test_fallback_mode_serde_names() {
        let json = serde_json::to_string(&FallbackMode::Blocking).unwrap();
        assert_eq!(json, "\"blocking\"");
        let mode: FallbackMode = serde_json::from_str("\"false\"").unwrap();
        assert_eq!(mode, FallbackMode::Disabled);
    }

    #[test]
    fn test_resolve_miss() {
        assert_eq!(resolve_miss(FallbackMode::Disabled), MissAction::NotFound);
        assert_eq!(
            resolve_miss(FallbackMode::Placeholder),
            MissAction::ServePlaceholder
        );
        assert_eq!(
            resolve_miss(FallbackMode::Blocking),
            MissAction::RenderBlocking
        );
    }

    #[test]
    fn test_is_stale() {
        let revalidate = Duration::from_secs(DEFAULT_REVALIDATE_SECONDS);
        assert!(!is_stale(Duration::from_secs(0), revalidate));
        assert!(!is_stale(Duration::from_secs(1799), revalidate));
        assert!(is_stale(Duration::from_secs(1800), revalidate));
        assert!(is_stale(Duration::from_secs(3600), revalidate));
    }
}
