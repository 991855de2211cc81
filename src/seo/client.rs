use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use super::types::{DesignBrief, KeywordInsight};
use crate::errors::StudioError;

/// Product type constant attached to every workflow payload.
pub const PRODUCT_TYPE: &str = "T-shirt";

/// Action discriminators understood by the workflow. Both operations share
/// one endpoint and one payload shape; only this field differs.
pub const ACTION_ANALYSE: &str = "AnalyseSEO";
pub const ACTION_WRITE: &str = "RédactionSEO";

/// Payload POSTed to the external workflow endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SeoRequest {
    pub action: &'static str,
    pub product_type: &'static str,
    pub slogan: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub niche: Option<String>,
    pub sub_niche: Option<String>,
    pub mockups: Vec<String>,
    /// Only attached to the content-writing dispatch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<KeywordInsight>>,
}

impl SeoRequest {
    pub fn analyse(brief: &DesignBrief) -> Self {
        Self::build(ACTION_ANALYSE, brief, None)
    }

    pub fn write(brief: &DesignBrief, keywords: Vec<KeywordInsight>) -> Self {
        Self::build(ACTION_WRITE, brief, Some(keywords))
    }

    fn build(
        action: &'static str,
        brief: &DesignBrief,
        keywords: Option<Vec<KeywordInsight>>,
    ) -> Self {
        Self {
            action,
            product_type: PRODUCT_TYPE,
            slogan: brief.slogan.clone(),
            description: brief.description.clone(),
            theme: brief.theme.clone(),
            niche: brief.niche.clone(),
            sub_niche: brief.sub_niche.clone(),
            mockups: brief.mockup_urls.clone(),
            keywords,
        }
    }
}

/// Boundary to the external SEO workflow. One synchronous request per
/// dispatch; no retries, no timeout, no authentication.
#[async_trait]
pub trait SeoWorkflow: Send + Sync {
    /// POST the request and return the raw JSON body on HTTP success.
    async fn dispatch(&self, request: &SeoRequest) -> Result<Value, StudioError>;
}

/// reqwest-backed implementation POSTing to a fixed endpoint.
pub struct HttpSeoWorkflow {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSeoWorkflow {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SeoWorkflow for HttpSeoWorkflow {
    async fn dispatch(&self, request: &SeoRequest) -> Result<Value, StudioError> {
        debug!("Dispatching {} to {}", request.action, self.endpoint);
        let response = self.http.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            // The body sometimes carries workflow diagnostics; log it, the
            // caller only sees the status line.
            let body = response.text().await.unwrap_or_default();
            error!("SEO workflow answered {}: {}", status, body);
            return Err(StudioError::Workflow {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        Ok(response.json().await?)
    }
}
