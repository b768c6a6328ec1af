use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use super::cache::{cache_key, GapCache};
use super::domain::{
    CompetitorStatus, CompetitorTier, GapConfiguration, GapKeyword, KeywordGapResult,
};
use super::evaluation::KeywordEvaluator;
use super::normalize::{normalize_domain, normalize_keyword};
use super::provider::{GapKeywordProvider, GapKeywordRequest, ProviderKind};
use super::report::{build_report, ThemeAssigner};

/// Admission control for provider calls: bounds simultaneity, not the
/// total number of competitors.
const MAX_IN_FLIGHT_FETCHES: usize = 3;

fn default_limit_per_domain() -> usize {
    200
}

fn default_location_code() -> u32 {
    2840 // United States
}

fn default_language_name() -> String {
    "English".to_string()
}

fn default_max_competitors() -> usize {
    5
}

/// Caller-tunable knobs for one analysis run.
#[derive(Debug, Clone, Deserialize)]
pub struct GapRunOptions {
    #[serde(default = "default_limit_per_domain")]
    pub limit_per_domain: usize,
    #[serde(default = "default_location_code")]
    pub location_code: u32,
    #[serde(default = "default_language_name")]
    pub language_name: String,
    #[serde(default = "default_max_competitors")]
    pub max_competitors: usize,
    #[serde(default)]
    pub provider: ProviderKind,
}

impl Default for GapRunOptions {
    fn default() -> Self {
        Self {
            limit_per_domain: default_limit_per_domain(),
            location_code: default_location_code(),
            language_name: default_language_name(),
            max_competitors: default_max_competitors(),
            provider: ProviderKind::default(),
        }
    }
}

/// One unique normalized keyword accumulated across competitor fetches.
struct MergedKeyword {
    data: GapKeyword,
    competitors_seen: Vec<String>,
}

/// Orchestrates a full gap analysis: competitor resolution, bounded
/// concurrent fetches through the cache, merge-by-max-volume dedup,
/// evaluation, and aggregation.
pub struct KeywordGapService<P> {
    provider: Arc<P>,
    cache: Arc<GapCache>,
}

impl<P> KeywordGapService<P>
where
    P: GapKeywordProvider + 'static,
{
    pub fn new(provider: Arc<P>, cache: Arc<GapCache>) -> Self {
        Self { provider, cache }
    }

    /// Whether the underlying provider can serve the given vendor.
    pub fn supports(&self, kind: ProviderKind) -> bool {
        self.provider.supports(kind)
    }

    /// Drop all memoized provider responses.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub async fn compute(
        &self,
        config: &GapConfiguration,
        options: &GapRunOptions,
    ) -> KeywordGapResult {
        let brand_domain = normalize_domain(&config.brand.domain);
        let competitors = qualifying_competitors(config, options.max_competitors);

        if brand_domain.is_empty() || competitors.is_empty() {
            info!(
                configuration = %config.name,
                "gap analysis skipped: no brand domain or no qualifying competitors"
            );
            return KeywordGapResult::empty(brand_domain, config);
        }

        let request = GapKeywordRequest {
            location_code: options.location_code,
            language_name: options.language_name.clone(),
            limit: options.limit_per_domain,
            provider: options.provider,
        };

        let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT_FETCHES));
        let fetches = competitors.iter().map(|competitor| {
            let semaphore = Arc::clone(&semaphore);
            let competitor = competitor.clone();
            let brand_domain = brand_domain.clone();
            let request = &request;
            async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        warn!(%competitor, "fetch slot unavailable; treating as empty");
                        return (competitor, Vec::new());
                    }
                };
                self.fetch_one(&brand_domain, competitor, request).await
            }
        });

        // join_all preserves submission order, so the merge below is
        // deterministic regardless of fetch completion order.
        let fetched = futures::future::join_all(fetches).await;

        let mut order: Vec<String> = Vec::new();
        let mut merged: HashMap<String, MergedKeyword> = HashMap::new();
        for (competitor, keywords) in fetched {
            for keyword in keywords {
                let normalized = normalize_keyword(&keyword.keyword);
                if normalized.is_empty() {
                    continue;
                }
                match merged.get_mut(&normalized) {
                    Some(entry) => {
                        if !entry.competitors_seen.contains(&competitor) {
                            entry.competitors_seen.push(competitor.clone());
                        }
                        if keyword.search_volume > entry.data.search_volume {
                            entry.data = keyword;
                        }
                    }
                    None => {
                        order.push(normalized.clone());
                        merged.insert(
                            normalized,
                            MergedKeyword {
                                data: keyword,
                                competitors_seen: vec![competitor.clone()],
                            },
                        );
                    }
                }
            }
        }

        let evaluator = KeywordEvaluator::from_config(config);
        let themer = ThemeAssigner::from_config(config);
        let mut results = Vec::with_capacity(order.len());
        for normalized in &order {
            if let Some(entry) = merged.get(normalized) {
                let mut result = evaluator.evaluate(&entry.data, &entry.competitors_seen);
                let theme = themer.assign(&result);
                result.theme = theme;
                results.push(result);
            }
        }

        info!(
            brand = %brand_domain,
            competitors = competitors.len(),
            keywords = results.len(),
            "gap analysis evaluated"
        );

        build_report(brand_domain, competitors, results, config)
    }

    async fn fetch_one(
        &self,
        brand_domain: &str,
        competitor: String,
        request: &GapKeywordRequest,
    ) -> (String, Vec<GapKeyword>) {
        let key = cache_key(
            brand_domain,
            &competitor,
            request.location_code,
            &request.language_name,
        );

        if let Some(hit) = self.cache.get(&key) {
            debug!(%competitor, "gap keywords served from cache");
            return (competitor, hit.gap_keywords);
        }

        match self
            .provider
            .gap_keywords(brand_domain, &competitor, request)
            .await
        {
            Ok(response) => {
                self.cache.set(&key, response.clone());
                (competitor, response.gap_keywords)
            }
            Err(error) => {
                // Failure is isolated: this competitor contributes nothing,
                // the run continues.
                warn!(%competitor, %error, "gap keyword fetch failed; continuing with empty list");
                (competitor, Vec::new())
            }
        }
    }
}

/// Active tier1/tier2 competitors with a usable domain, in configured
/// order, capped at `max_competitors`.
fn qualifying_competitors(config: &GapConfiguration, max_competitors: usize) -> Vec<String> {
    config
        .competitors
        .iter()
        .filter(|competitor| {
            matches!(
                competitor.tier,
                CompetitorTier::Tier1 | CompetitorTier::Tier2
            )
        })
        .filter(|competitor| competitor.status == CompetitorStatus::Active)
        .map(|competitor| normalize_domain(&competitor.domain))
        .filter(|domain| !domain.is_empty())
        .take(max_competitors)
        .collect()
}
