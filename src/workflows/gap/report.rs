use std::cmp::Ordering;

use super::domain::{
    FilterCounters, GapConfiguration, GapStats, KeywordFlag, KeywordGapResult, KeywordResult,
    KeywordStatus, ThemeGroup,
};

const THEME_BRAND: &str = "Brand";
const THEME_CATEGORY: &str = "Category";
const THEME_PROBLEM: &str = "Problem / Solution";
const THEME_PRODUCT: &str = "Product";
const THEME_OTHER: &str = "Other";

const PRODUCT_THEME_TERMS: &[&str] = &[
    "shoe", "shoes", "sneaker", "sneakers", "boot", "boots", "footwear", "trainer", "trainers",
    "running", "walking",
];

/// Buckets keywords into one of four named themes by token match, in
/// priority order: Brand, Category, Problem / Solution, Product. Pass
/// keywords that land in no theme take the friendlier intent-derived label
/// instead of "Other".
pub struct ThemeAssigner {
    lists: Vec<(&'static str, Vec<String>)>,
}

fn theme_tokens<'a>(terms: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut tokens = Vec::new();
    for term in terms {
        for token in term.split_whitespace() {
            let token = token.to_lowercase();
            if token.len() > 2 && !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }
    tokens
}

impl ThemeAssigner {
    pub fn from_config(config: &GapConfiguration) -> Self {
        let demand = &config.demand_definition;
        let lists = vec![
            (
                THEME_BRAND,
                theme_tokens(demand.brand_terms.iter().map(String::as_str)),
            ),
            (
                THEME_CATEGORY,
                theme_tokens(
                    demand
                        .category_terms
                        .iter()
                        .chain(config.category_definition.included.iter())
                        .map(String::as_str),
                ),
            ),
            (
                THEME_PROBLEM,
                theme_tokens(demand.problem_terms.iter().map(String::as_str)),
            ),
            (
                THEME_PRODUCT,
                theme_tokens(PRODUCT_THEME_TERMS.iter().copied()),
            ),
        ];
        Self { lists }
    }

    pub fn assign(&self, result: &KeywordResult) -> String {
        let keyword_tokens: Vec<String> = result
            .normalized
            .split_whitespace()
            .map(str::to_lowercase)
            .filter(|token| token.len() > 2)
            .collect();

        for (label, tokens) in &self.lists {
            let matched = tokens.iter().any(|theme_token| {
                keyword_tokens.iter().any(|keyword_token| {
                    keyword_token.contains(theme_token.as_str())
                        || theme_token.contains(keyword_token.as_str())
                })
            });
            if matched {
                return (*label).to_string();
            }
        }

        if result.status == KeywordStatus::Pass {
            result.intent.theme_label().to_string()
        } else {
            THEME_OTHER.to_string()
        }
    }
}

/// Sorts, buckets, and summarizes evaluated keywords into the run output.
pub fn build_report(
    brand_domain: String,
    competitors: Vec<String>,
    mut results: Vec<KeywordResult>,
    config: &GapConfiguration,
) -> KeywordGapResult {
    // Stable sort keeps insertion order as the tie-break within a score.
    results.sort_by(|a, b| {
        a.status
            .rank()
            .cmp(&b.status.rank())
            .then_with(|| {
                b.opportunity_score
                    .partial_cmp(&a.opportunity_score)
                    .unwrap_or(Ordering::Equal)
            })
    });

    let total = results.len();
    let mut filters = FilterCounters::default();
    for result in &results {
        for flag in &result.flags {
            match flag {
                KeywordFlag::CompetitorBrand => filters.competitor_brand += 1,
                KeywordFlag::SizeVariant => filters.size_variant += 1,
                KeywordFlag::Excluded => filters.excluded += 1,
                KeywordFlag::OutsideFence => filters.outside_fence += 1,
            }
        }
    }

    let mut top_opportunities: Vec<ThemeGroup> = Vec::new();
    let mut needs_review = Vec::new();
    let mut out_of_play = Vec::new();
    let mut passed = 0usize;

    for result in results {
        match result.status {
            KeywordStatus::Pass => {
                passed += 1;
                match top_opportunities
                    .iter_mut()
                    .find(|group| group.theme == result.theme)
                {
                    Some(group) => group.keywords.push(result),
                    None => top_opportunities.push(ThemeGroup {
                        theme: result.theme.clone(),
                        keywords: vec![result],
                    }),
                }
            }
            KeywordStatus::Review => needs_review.push(result),
            KeywordStatus::OutOfPlay => out_of_play.push(result),
        }
    }

    let denominator = total.max(1) as f64;
    let pct = |count: usize| ((count as f64 / denominator) * 100.0).round() as u32;

    let stats = GapStats {
        total,
        passed,
        review: needs_review.len(),
        out_of_play: out_of_play.len(),
        passed_pct: pct(passed),
        review_pct: pct(needs_review.len()),
        out_of_play_pct: pct(out_of_play.len()),
    };

    KeywordGapResult {
        brand_domain,
        competitors,
        total_keywords: total,
        top_opportunities,
        needs_review,
        out_of_play,
        stats,
        filters_applied: filters,
        context_version: config.context_version.clone(),
        configuration: config.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::gap::domain::{
        BrandProfile, Confidence, DemandDefinition, IntentType,
    };

    fn config() -> GapConfiguration {
        GapConfiguration {
            name: "themes".to_string(),
            context_version: Some("v2".to_string()),
            brand: BrandProfile::default(),
            competitors: Vec::new(),
            category_definition: Default::default(),
            negative_scope: Default::default(),
            demand_definition: DemandDefinition {
                brand_terms: vec!["oofos".to_string()],
                category_terms: vec!["sandals".to_string()],
                problem_terms: vec!["plantar fasciitis".to_string()],
            },
            capability_model: None,
            scoring_config: None,
            governance: None,
        }
    }

    fn result(keyword: &str, status: KeywordStatus, score: f64) -> KeywordResult {
        KeywordResult {
            keyword: keyword.to_string(),
            normalized: keyword.to_lowercase(),
            status,
            status_icon: status.icon().to_string(),
            intent: IntentType::CategoryCapture,
            capability_score: 0.8,
            opportunity_score: score,
            difficulty_factor: 1.0,
            position_factor: 1.0,
            reason: "test".to_string(),
            flags: Vec::new(),
            confidence: Confidence::High,
            competitors_seen: Vec::new(),
            search_volume: 100,
            cpc: None,
            difficulty: None,
            competitor_position: None,
            theme: THEME_OTHER.to_string(),
        }
    }

    #[test]
    fn themes_resolve_in_priority_order() {
        let assigner = ThemeAssigner::from_config(&config());
        assert_eq!(
            assigner.assign(&result("oofos sandals", KeywordStatus::Pass, 1.0)),
            THEME_BRAND
        );
        assert_eq!(
            assigner.assign(&result("comfort sandals", KeywordStatus::Pass, 1.0)),
            THEME_CATEGORY
        );
        assert_eq!(
            assigner.assign(&result("plantar fasciitis relief", KeywordStatus::Pass, 1.0)),
            THEME_PROBLEM
        );
        assert_eq!(
            assigner.assign(&result("trail running", KeywordStatus::Pass, 1.0)),
            THEME_PRODUCT
        );
    }

    #[test]
    fn unthemed_pass_results_take_the_intent_label() {
        let assigner = ThemeAssigner::from_config(&config());
        let mut unthemed = result("gift ideas", KeywordStatus::Pass, 1.0);
        unthemed.intent = IntentType::ProblemSolution;
        assert_eq!(assigner.assign(&unthemed), "Problem & Solution");

        let review = result("gift ideas", KeywordStatus::Review, 1.0);
        assert_eq!(assigner.assign(&review), THEME_OTHER);
    }

    #[test]
    fn report_sorts_by_status_rank_then_score_descending() {
        let mut a = result("a", KeywordStatus::Review, 50.0);
        a.theme = THEME_OTHER.to_string();
        let b = result("b", KeywordStatus::Pass, 10.0);
        let c = result("c", KeywordStatus::Pass, 90.0);
        let d = result("d", KeywordStatus::OutOfPlay, 999.0);

        let report = build_report(
            "brand.com".to_string(),
            vec!["rival.com".to_string()],
            vec![a, b, c, d],
            &config(),
        );

        let pass_scores: Vec<f64> = report
            .top_opportunities
            .iter()
            .flat_map(|group| group.keywords.iter().map(|k| k.opportunity_score))
            .collect();
        assert_eq!(pass_scores, vec![90.0, 10.0]);
        assert_eq!(report.needs_review.len(), 1);
        assert_eq!(report.out_of_play.len(), 1);
        assert_eq!(report.stats.passed, 2);
        assert_eq!(report.stats.review, 1);
        assert_eq!(report.stats.out_of_play, 1);
        assert_eq!(report.stats.total, 4);
    }

    #[test]
    fn percentages_cover_the_whole_set_within_rounding() {
        let results = vec![
            result("a", KeywordStatus::Pass, 3.0),
            result("b", KeywordStatus::Review, 2.0),
            result("c", KeywordStatus::OutOfPlay, 1.0),
        ];
        let report = build_report("brand.com".to_string(), Vec::new(), results, &config());
        let sum = report.stats.passed_pct + report.stats.review_pct + report.stats.out_of_play_pct;
        assert!((99..=101).contains(&sum));
        assert_eq!(
            report.stats.passed + report.stats.review + report.stats.out_of_play,
            report.stats.total
        );
    }

    #[test]
    fn empty_result_sets_do_not_divide_by_zero() {
        let report = build_report("brand.com".to_string(), Vec::new(), Vec::new(), &config());
        assert_eq!(report.stats.total, 0);
        assert_eq!(report.stats.passed_pct, 0);
    }

    #[test]
    fn exclusion_flags_are_counted_for_reporting() {
        let mut flagged = result("nike slides", KeywordStatus::OutOfPlay, 0.0);
        flagged.flags = vec![KeywordFlag::CompetitorBrand, KeywordFlag::SizeVariant];
        let mut excluded = result("socks", KeywordStatus::OutOfPlay, 0.0);
        excluded.flags = vec![KeywordFlag::Excluded];

        let report = build_report(
            "brand.com".to_string(),
            Vec::new(),
            vec![flagged, excluded],
            &config(),
        );
        assert_eq!(report.filters_applied.competitor_brand, 1);
        assert_eq!(report.filters_applied.size_variant, 1);
        assert_eq!(report.filters_applied.excluded, 1);
        assert_eq!(report.filters_applied.outside_fence, 0);
    }
}
