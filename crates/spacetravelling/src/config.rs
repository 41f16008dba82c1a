use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use spacetravelling_core::post::{
    FallbackMode, PostError, RenderOptions, DEFAULT_LOCALE, DEFAULT_REVALIDATE_SECONDS,
    DEFAULT_SITE_NAME,
};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prismic API endpoint (no default; required unless fixtures are used)
    pub prismic_endpoint: Option<String>,
    /// Prismic access token for private repositories
    pub prismic_access_token: Option<String>,
    /// Seconds before a served page is regenerated (default: 1800)
    pub revalidate_seconds: u64,
    /// Maximum number of rendered pages kept in memory (default: 1,000)
    pub page_cache_max_entries: usize,
    /// How slugs that were not pre-rendered are served (default: true)
    pub fallback: FallbackMode,
    /// Suffix of every page title (default: "spacetravelling")
    pub site_name: String,
    /// Locale used for publication dates (default: "pt_BR")
    pub date_locale: String,
    /// Directory of static assets served next to the pages (default: "public")
    pub public_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PRISMIC_API_ENDPOINT` - Prismic API endpoint
    /// - `PRISMIC_ACCESS_TOKEN` - Prismic access token
    /// - `REVALIDATE_SECONDS` - Page regeneration interval (default: 1800)
    /// - `PAGE_CACHE_MAX_ENTRIES` - Maximum cached pages (default: 1,000)
    /// - `FALLBACK_MODE` - `true`, `false` or `blocking` (default: `true`)
    /// - `SITE_NAME` - Page title suffix (default: "spacetravelling")
    /// - `DATE_LOCALE` - Publication date locale (default: "pt_BR")
    /// - `PUBLIC_DIR` - Static assets directory (default: "public")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            prismic_endpoint: non_empty("PRISMIC_API_ENDPOINT"),
            prismic_access_token: non_empty("PRISMIC_ACCESS_TOKEN"),
            revalidate_seconds: parse_setting("REVALIDATE_SECONDS", non_empty("REVALIDATE_SECONDS"))
                .unwrap_or(DEFAULT_REVALIDATE_SECONDS),
            page_cache_max_entries: parse_setting(
                "PAGE_CACHE_MAX_ENTRIES",
                non_empty("PAGE_CACHE_MAX_ENTRIES"),
            )
            .unwrap_or(1_000),
            fallback: parse_setting("FALLBACK_MODE", non_empty("FALLBACK_MODE")).unwrap_or_default(),
            site_name: non_empty("SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
            date_locale: non_empty("DATE_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            public_dir: non_empty("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
        }
    }

    /// Get the revalidation interval as a Duration.
    pub fn revalidate(&self) -> Duration {
        Duration::from_secs(self.revalidate_seconds)
    }

    /// Build the render options for pages.
    pub fn render_options(&self) -> Result<RenderOptions, PostError> {
        RenderOptions::new(&self.date_locale, self.site_name.clone())
    }
}

/// Parses a setting, warning when the value is present but invalid.
fn parse_setting<T>(key: &str, value: Option<String>) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    let value = value?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(key, value = %value, error = %e, "Ignoring invalid setting, using default");
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
