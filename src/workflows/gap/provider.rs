use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::domain::GapKeyword;

/// Which external keyword-data vendor serves a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Dataforseo,
    Ahrefs,
}

impl ProviderKind {
    pub const fn label(self) -> &'static str {
        match self {
            ProviderKind::Dataforseo => "dataforseo",
            ProviderKind::Ahrefs => "ahrefs",
        }
    }
}

/// Per-fetch parameters forwarded to the vendor.
#[derive(Debug, Clone, PartialEq)]
pub struct GapKeywordRequest {
    pub location_code: u32,
    pub language_name: String,
    pub limit: usize,
    pub provider: ProviderKind,
}

/// One competitor's gap keywords as returned by the vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapKeywordResponse {
    pub brand_domain: String,
    pub competitor_domain: String,
    pub gap_keywords: Vec<GapKeyword>,
    pub total_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {status}")]
    Status { status: u16 },
    #[error("provider payload malformed: {0}")]
    Payload(String),
    #[error("no credentials configured for provider {0}")]
    MissingCredentials(&'static str),
}

/// Seam to the external keyword-data capability. Implementations must be
/// safe to call concurrently; the orchestrator bounds simultaneity, not
/// the trait.
#[async_trait]
pub trait GapKeywordProvider: Send + Sync {
    async fn gap_keywords(
        &self,
        brand_domain: &str,
        competitor_domain: &str,
        request: &GapKeywordRequest,
    ) -> Result<GapKeywordResponse, ProviderError>;

    /// Whether this provider can serve the requested vendor at all. Used by
    /// the HTTP surface to reject runs that would silently degrade to empty
    /// results for every competitor.
    fn supports(&self, _kind: ProviderKind) -> bool {
        true
    }
}

const DATAFORSEO_BASE_URL: &str = "https://api.dataforseo.com";
const AHREFS_BASE_URL: &str = "https://api.ahrefs.com";

/// DataForSEO Labs domain-intersection adapter.
pub struct DataForSeoProvider {
    client: reqwest::Client,
    base_url: String,
    login: String,
    password: String,
}

impl DataForSeoProvider {
    pub fn new(login: String, password: String) -> Self {
        Self::with_base_url(DATAFORSEO_BASE_URL.to_string(), login, password)
    }

    pub fn with_base_url(base_url: String, login: String, password: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            login,
            password,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DataForSeoEnvelope {
    #[serde(default)]
    tasks: Vec<DataForSeoTask>,
}

#[derive(Debug, Deserialize)]
struct DataForSeoTask {
    #[serde(default)]
    result: Option<Vec<DataForSeoResult>>,
}

#[derive(Debug, Deserialize)]
struct DataForSeoResult {
    #[serde(default)]
    total_count: Option<usize>,
    #[serde(default)]
    items: Option<Vec<DataForSeoItem>>,
}

#[derive(Debug, Deserialize)]
struct DataForSeoItem {
    keyword_data: DataForSeoKeywordData,
    #[serde(default)]
    first_domain_serp_element: Option<DataForSeoSerpElement>,
}

#[derive(Debug, Deserialize)]
struct DataForSeoKeywordData {
    keyword: String,
    #[serde(default)]
    keyword_info: DataForSeoKeywordInfo,
    #[serde(default)]
    keyword_properties: Option<DataForSeoKeywordProperties>,
}

#[derive(Debug, Default, Deserialize)]
struct DataForSeoKeywordInfo {
    #[serde(default)]
    search_volume: Option<u64>,
    #[serde(default)]
    cpc: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DataForSeoKeywordProperties {
    #[serde(default)]
    keyword_difficulty: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DataForSeoSerpElement {
    #[serde(default)]
    rank_absolute: Option<u32>,
}

#[async_trait]
impl GapKeywordProvider for DataForSeoProvider {
    async fn gap_keywords(
        &self,
        brand_domain: &str,
        competitor_domain: &str,
        request: &GapKeywordRequest,
    ) -> Result<GapKeywordResponse, ProviderError> {
        let payload = serde_json::json!([{
            "target1": competitor_domain,
            "target2": brand_domain,
            "location_code": request.location_code,
            "language_name": request.language_name,
            "intersections": false,
            "limit": request.limit,
        }]);

        let response = self
            .client
            .post(format!(
                "{}/v3/dataforseo_labs/google/domain_intersection/live",
                self.base_url
            ))
            .basic_auth(&self.login, Some(&self.password))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: DataForSeoEnvelope = response.json().await?;
        let result = envelope
            .tasks
            .into_iter()
            .next()
            .and_then(|task| task.result.unwrap_or_default().into_iter().next())
            .ok_or_else(|| ProviderError::Payload("response carried no task result".into()))?;

        let gap_keywords: Vec<GapKeyword> = result
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| GapKeyword {
                keyword: item.keyword_data.keyword,
                search_volume: item.keyword_data.keyword_info.search_volume.unwrap_or(0),
                competitor_position: item
                    .first_domain_serp_element
                    .and_then(|element| element.rank_absolute),
                cpc: item.keyword_data.keyword_info.cpc,
                difficulty: item
                    .keyword_data
                    .keyword_properties
                    .and_then(|properties| properties.keyword_difficulty),
            })
            .collect();

        Ok(GapKeywordResponse {
            brand_domain: brand_domain.to_string(),
            competitor_domain: competitor_domain.to_string(),
            total_count: result.total_count.unwrap_or(gap_keywords.len()),
            gap_keywords,
        })
    }

    fn supports(&self, kind: ProviderKind) -> bool {
        kind == ProviderKind::Dataforseo
    }
}

/// Ahrefs content-gap adapter.
pub struct AhrefsProvider {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl AhrefsProvider {
    pub fn new(token: String) -> Self {
        Self::with_base_url(AHREFS_BASE_URL.to_string(), token)
    }

    pub fn with_base_url(base_url: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AhrefsEnvelope {
    #[serde(default)]
    keywords: Vec<AhrefsKeyword>,
    #[serde(default)]
    total: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct AhrefsKeyword {
    keyword: String,
    #[serde(default)]
    volume: Option<u64>,
    #[serde(default)]
    position: Option<u32>,
    #[serde(default)]
    cpc: Option<f64>,
    #[serde(default)]
    difficulty: Option<f64>,
}

#[async_trait]
impl GapKeywordProvider for AhrefsProvider {
    async fn gap_keywords(
        &self,
        brand_domain: &str,
        competitor_domain: &str,
        request: &GapKeywordRequest,
    ) -> Result<GapKeywordResponse, ProviderError> {
        let limit = request.limit.to_string();
        let location_code = request.location_code.to_string();
        let response = self
            .client
            .get(format!("{}/v3/site-explorer/content-gap", self.base_url))
            .bearer_auth(&self.token)
            .query(&[
                ("target", brand_domain),
                ("competitor", competitor_domain),
                ("limit", limit.as_str()),
                ("location_code", location_code.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: AhrefsEnvelope = response.json().await?;
        let gap_keywords: Vec<GapKeyword> = envelope
            .keywords
            .into_iter()
            .map(|entry| GapKeyword {
                keyword: entry.keyword,
                search_volume: entry.volume.unwrap_or(0),
                competitor_position: entry.position,
                cpc: entry.cpc,
                difficulty: entry.difficulty,
            })
            .collect();

        Ok(GapKeywordResponse {
            brand_domain: brand_domain.to_string(),
            competitor_domain: competitor_domain.to_string(),
            total_count: envelope.total.unwrap_or(gap_keywords.len()),
            gap_keywords,
        })
    }

    fn supports(&self, kind: ProviderKind) -> bool {
        kind == ProviderKind::Ahrefs
    }
}

/// Holds whichever vendor adapters have credentials configured and
/// dispatches on the per-run provider choice.
#[derive(Default)]
pub struct ProviderRegistry {
    dataforseo: Option<DataForSeoProvider>,
    ahrefs: Option<AhrefsProvider>,
}

impl ProviderRegistry {
    pub fn new(dataforseo: Option<DataForSeoProvider>, ahrefs: Option<AhrefsProvider>) -> Self {
        Self { dataforseo, ahrefs }
    }
}

#[async_trait]
impl GapKeywordProvider for ProviderRegistry {
    async fn gap_keywords(
        &self,
        brand_domain: &str,
        competitor_domain: &str,
        request: &GapKeywordRequest,
    ) -> Result<GapKeywordResponse, ProviderError> {
        match request.provider {
            ProviderKind::Dataforseo => {
                let provider = self
                    .dataforseo
                    .as_ref()
                    .ok_or(ProviderError::MissingCredentials("dataforseo"))?;
                provider
                    .gap_keywords(brand_domain, competitor_domain, request)
                    .await
            }
            ProviderKind::Ahrefs => {
                let provider = self
                    .ahrefs
                    .as_ref()
                    .ok_or(ProviderError::MissingCredentials("ahrefs"))?;
                provider
                    .gap_keywords(brand_domain, competitor_domain, request)
                    .await
            }
        }
    }

    fn supports(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Dataforseo => self.dataforseo.is_some(),
            ProviderKind::Ahrefs => self.ahrefs.is_some(),
        }
    }
}
