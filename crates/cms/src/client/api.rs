//! Repository metadata: the refs of published content releases.

use serde::{Deserialize, Serialize};

use super::PrismicClient;
use crate::error::{ClientError, Result};

/// A content release reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

/// The subset of `GET /api/v2` the client needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiInfo {
    pub refs: Vec<ApiRef>,
}

impl ApiInfo {
    /// The ref of the currently published content.
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

impl PrismicClient {
    /// Fetch repository metadata.
    pub async fn api_info(&self) -> Result<ApiInfo> {
        let response = self.client.get(self.url(&[])).send().await?;
        self.handle_response(response).await
    }

    /// Fetch the master ref required by every search query.
    pub async fn master_ref(&self) -> Result<String> {
        let info = self.api_info().await?;
        info.master_ref()
            .map(str::to_string)
            .ok_or(ClientError::MissingMasterRef)
    }
}
