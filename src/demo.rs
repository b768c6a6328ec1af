//! Canned fixture used by `rankgap gap demo`: a footwear brand, two
//! tier-one competitors, and a static provider so the full pipeline runs
//! without vendor credentials.

use async_trait::async_trait;
use rankgap::workflows::gap::{
    BrandProfile, CategoryDefinition, CompetitorProfile, CompetitorStatus, CompetitorTier,
    DemandDefinition, GapConfiguration, GapKeyword, GapKeywordProvider, GapKeywordRequest,
    GapKeywordResponse, NegativeScope, ProviderError, ScoringConfig,
};

pub fn fixture_configuration() -> GapConfiguration {
    GapConfiguration {
        name: "Stridewell demo".to_string(),
        context_version: Some("demo-1".to_string()),
        brand: BrandProfile {
            domain: "stridewell.com".to_string(),
            industry: "footwear".to_string(),
            business_model: "dtc".to_string(),
        },
        competitors: vec![
            CompetitorProfile {
                name: "Hoka".to_string(),
                domain: "hoka.com".to_string(),
                tier: CompetitorTier::Tier1,
                status: CompetitorStatus::Active,
            },
            CompetitorProfile {
                name: "Oofos".to_string(),
                domain: "oofos.com".to_string(),
                tier: CompetitorTier::Tier1,
                status: CompetitorStatus::Active,
            },
        ],
        category_definition: CategoryDefinition {
            primary_category: "recovery footwear".to_string(),
            included: vec![
                "comfort sandals".to_string(),
                "orthopedic slides".to_string(),
            ],
            excluded: Vec::new(),
            approved_categories: vec!["walking shoes".to_string()],
        },
        negative_scope: NegativeScope {
            excluded_categories: vec!["socks".to_string()],
            excluded_keywords: vec!["wholesale".to_string()],
            excluded_use_cases: Vec::new(),
            excluded_competitors: Vec::new(),
            enforced: true,
        },
        demand_definition: DemandDefinition {
            brand_terms: vec!["stridewell".to_string()],
            category_terms: vec!["sandals".to_string(), "slides".to_string()],
            problem_terms: vec![
                "plantar fasciitis".to_string(),
                "heel pain".to_string(),
            ],
        },
        capability_model: None,
        scoring_config: Some(ScoringConfig {
            pass_threshold: 0.7,
            review_threshold: 0.4,
            difficulty_weight: 0.5,
            position_weight: 0.5,
            vertical_preset: Some("footwear".to_string()),
        }),
        governance: None,
    }
}

#[derive(Default)]
pub struct FixtureProvider;

fn kw(
    keyword: &str,
    search_volume: u64,
    position: u32,
    cpc: Option<f64>,
    difficulty: Option<f64>,
) -> GapKeyword {
    GapKeyword {
        keyword: keyword.to_string(),
        search_volume,
        competitor_position: Some(position),
        cpc,
        difficulty,
    }
}

#[async_trait]
impl GapKeywordProvider for FixtureProvider {
    async fn gap_keywords(
        &self,
        brand_domain: &str,
        competitor_domain: &str,
        _request: &GapKeywordRequest,
    ) -> Result<GapKeywordResponse, ProviderError> {
        let gap_keywords = match competitor_domain {
            "hoka.com" => vec![
                kw("plantar fasciitis recovery shoes", 1200, 6, Some(1.8), Some(35.0)),
                kw("hoka running shoes", 33000, 1, Some(1.2), Some(70.0)),
                kw("comfort sandals", 500, 8, Some(0.9), Some(28.0)),
                kw("size 10 wide shoes", 2400, 12, None, None),
                kw("cushioned walking shoes", 2900, 7, Some(1.4), Some(41.0)),
            ],
            _ => vec![
                kw("comfort sandals", 900, 5, Some(1.1), Some(30.0)),
                kw("orthopedic slides for women", 1900, 9, Some(1.3), Some(33.0)),
                kw("recovery sandals wholesale", 400, 18, Some(0.6), None),
                kw("compression socks", 8100, 4, Some(0.8), Some(52.0)),
            ],
        };

        Ok(GapKeywordResponse {
            brand_domain: brand_domain.to_string(),
            competitor_domain: competitor_domain.to_string(),
            total_count: gap_keywords.len(),
            gap_keywords,
        })
    }
}
