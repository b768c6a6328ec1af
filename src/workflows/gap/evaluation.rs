use super::capability::CapabilityScorer;
use super::domain::{
    Confidence, GapConfiguration, GapKeyword, IntentType, KeywordFlag, KeywordResult,
    KeywordStatus, ScoringConfig,
};
use super::exclusion::ExclusionChecker;
use super::fence::FenceChecker;
use super::intent::IntentClassifier;
use super::normalize::normalize_keyword;
use super::resolve::{resolve_capability_model, resolve_scoring_config};
use super::scoring;

const REASON_COMPETITOR_BRAND: &str = "Competitor brand term";
const REASON_SIZE_VARIANT: &str = "Size/variant query";
const REASON_LOW_CAPABILITY: &str = "Low capability fit";
const REASON_LOW_RELEVANCE: &str = "Low relevance";
const REASON_PASS_OUTSIDE_FENCE: &str = "Strong capability fit - verify category alignment";
const REASON_REVIEW_OUTSIDE_FENCE: &str = "Moderate capability fit - outside category fence";

/// Stateless evaluator producing one terminal classification per keyword.
///
/// Decision order is a contract: competitor-brand and size/variant signals
/// first, then the capability floor, then exclusions, and only then the
/// threshold split. The fence result annotates reasons and flags but never
/// gates the status.
pub struct KeywordEvaluator {
    exclusions: ExclusionChecker,
    fence: FenceChecker,
    intents: IntentClassifier,
    capability: CapabilityScorer,
    scoring: ScoringConfig,
}

impl KeywordEvaluator {
    pub fn from_config(config: &GapConfiguration) -> Self {
        let intents = IntentClassifier::from_config(config);
        let model = resolve_capability_model(config);
        let capability = CapabilityScorer::new(&model, intents.brand_terms());
        Self {
            exclusions: ExclusionChecker::from_scope(&config.negative_scope),
            fence: FenceChecker::from_config(
                &config.category_definition,
                &config.demand_definition,
            ),
            intents,
            capability,
            scoring: resolve_scoring_config(config),
        }
    }

    pub fn evaluate(&self, data: &GapKeyword, competitors_seen: &[String]) -> KeywordResult {
        let normalized = normalize_keyword(&data.keyword);
        let classification = self.intents.classify(&normalized);
        let mut flags = classification.flags.clone();

        let capability_score = self.capability.score(&normalized);
        let difficulty_factor =
            scoring::difficulty_factor(data.difficulty, self.scoring.difficulty_weight);
        let position_factor =
            scoring::position_factor(data.competitor_position, self.scoring.position_weight);
        let opportunity_score = scoring::opportunity_score(
            data.search_volume,
            data.cpc,
            classification.intent,
            capability_score,
            difficulty_factor,
            position_factor,
        );

        let (status, reason, confidence) = self.decide(
            &normalized,
            &classification.flags,
            classification.intent,
            capability_score,
            &mut flags,
        );

        KeywordResult {
            keyword: data.keyword.clone(),
            normalized,
            status,
            status_icon: status.icon().to_string(),
            intent: classification.intent,
            capability_score,
            opportunity_score,
            difficulty_factor,
            position_factor,
            reason,
            flags,
            confidence,
            competitors_seen: competitors_seen.to_vec(),
            search_volume: data.search_volume,
            cpc: data.cpc,
            difficulty: data.difficulty,
            competitor_position: data.competitor_position,
            theme: String::new(),
        }
    }

    fn decide(
        &self,
        normalized: &str,
        raised: &[KeywordFlag],
        intent: IntentType,
        capability_score: f64,
        flags: &mut Vec<KeywordFlag>,
    ) -> (KeywordStatus, String, Confidence) {
        if raised.contains(&KeywordFlag::CompetitorBrand) {
            return (
                KeywordStatus::OutOfPlay,
                REASON_COMPETITOR_BRAND.to_string(),
                Confidence::High,
            );
        }

        if intent == IntentType::VariantOrSize {
            return (
                KeywordStatus::OutOfPlay,
                REASON_SIZE_VARIANT.to_string(),
                Confidence::High,
            );
        }

        if capability_score < self.scoring.review_threshold {
            return (
                KeywordStatus::OutOfPlay,
                REASON_LOW_CAPABILITY.to_string(),
                Confidence::High,
            );
        }

        if let Some(exclusion) = self.exclusions.check(normalized) {
            flags.push(KeywordFlag::Excluded);
            return (
                KeywordStatus::OutOfPlay,
                exclusion.reason(),
                Confidence::High,
            );
        }

        let fence = self.fence.check(normalized);
        if !fence.in_fence {
            flags.push(KeywordFlag::OutsideFence);
        }

        if capability_score >= self.scoring.pass_threshold {
            let reason = if fence.in_fence {
                fence.reason
            } else {
                REASON_PASS_OUTSIDE_FENCE.to_string()
            };
            return (KeywordStatus::Pass, reason, Confidence::High);
        }

        if capability_score >= self.scoring.review_threshold {
            let confidence = if capability_score >= self.scoring.pass_threshold - 0.1 {
                Confidence::Medium
            } else {
                Confidence::Low
            };
            let reason = if fence.in_fence {
                format!("Moderate capability fit - {}", fence.reason)
            } else {
                REASON_REVIEW_OUTSIDE_FENCE.to_string()
            };
            return (KeywordStatus::Review, reason, confidence);
        }

        (
            KeywordStatus::OutOfPlay,
            REASON_LOW_RELEVANCE.to_string(),
            Confidence::High,
        )
    }
}
