//! HTTP client for the Prismic REST API (v2).

pub mod api;
pub mod documents;
pub mod query;

use url::Url;

use crate::error::{ClientError, Result};

/// HTTP client for a Prismic repository.
#[derive(Debug, Clone)]
pub struct PrismicClient {
    client: reqwest::Client,
    endpoint: Url,
    access_token: Option<String>,
}

impl PrismicClient {
    /// Create a new client for an API endpoint such as
    /// `https://my-repo.cdn.prismic.io/api/v2`.
    pub fn new(endpoint: &str, access_token: Option<String>) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint(e.to_string()))?;
        if endpoint.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint(endpoint.to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            access_token: access_token.filter(|token| !token.trim().is_empty()),
        })
    }

    /// Get the API endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build a URL below the endpoint, with the access token attached.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if let Some(token) = &self.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }
        url
    }

    /// Handle error responses and decode successful ones.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(ClientError::from)
        } else if status.as_u16() == 404 {
            Err(ClientError::NotFound {
                resource: response.url().path().to_string(),
            })
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        assert!(matches!(
            PrismicClient::new("not a url", None),
            Err(ClientError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            PrismicClient::new("mailto:someone@example.com", None),
            Err(ClientError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_url_appends_segments() {
        let client = PrismicClient::new("https://repo.cdn.prismic.io/api/v2", None).unwrap();
        assert_eq!(
            client.url(&["documents", "search"]).as_str(),
            "https://repo.cdn.prismic.io/api/v2/documents/search"
        );
    }

    #[test]
    fn test_url_handles_trailing_slash() {
        let client = PrismicClient::new("https://repo.cdn.prismic.io/api/v2/", None).unwrap();
        assert_eq!(
            client.url(&["documents", "search"]).as_str(),
            "https://repo.cdn.prismic.io/api/v2/documents/search"
        );
    }

    #[test]
    fn test_url_includes_access_token() {
        let client = PrismicClient::new(
            "https://repo.cdn.prismic.io/api/v2",
            Some("secret".to_string()),
        )
        .unwrap();
        assert_eq!(
            client.url(&[]).as_str(),
            "https://repo.cdn.prismic.io/api/v2?access_token=secret"
        );
    }

    #[test]
    fn test_blank_access_token_is_ignored() {
        let client =
            PrismicClient::new("https://repo.cdn.prismic.io/api/v2", Some("  ".to_string()))
                .unwrap();
        assert_eq!(client.url(&[]).query(), None);
    }
}
