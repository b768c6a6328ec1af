use super::domain::CapabilityModel;
use super::matcher::{contains_term, TermMatcher};

/// Flat penalty applied once when a keyword carries any competitor or
/// common brand term.
const BRAND_PENALTY: f64 = 0.6;

/// Computes the continuous capability fit score for a keyword: base score
/// plus booster weights, plus (negative) penalty weights, minus the brand
/// penalty on first brand-term hit, clamped to [0, 1].
pub struct CapabilityScorer {
    base_score: f64,
    boosters: Vec<(TermMatcher, f64)>,
    penalties: Vec<(TermMatcher, f64)>,
    brand_terms: Vec<String>,
}

impl CapabilityScorer {
    pub fn new(model: &CapabilityModel, competitor_brand_terms: &[String]) -> Self {
        let compile = |rules: &[super::domain::CapabilityRule]| {
            rules
                .iter()
                .filter(|rule| !rule.pattern.trim().is_empty())
                .map(|rule| (TermMatcher::word_bounded(&rule.pattern), rule.weight))
                .collect::<Vec<_>>()
        };

        let mut brand_terms: Vec<String> = competitor_brand_terms.to_vec();
        for brand in &model.common_brands {
            let brand = brand.trim().to_lowercase();
            if !brand.is_empty() && !brand_terms.contains(&brand) {
                brand_terms.push(brand);
            }
        }

        Self {
            base_score: model.base_score,
            boosters: compile(&model.boosters),
            penalties: compile(&model.penalties),
            brand_terms,
        }
    }

    pub fn score(&self, keyword: &str) -> f64 {
        let mut score = self.base_score;

        for (matcher, weight) in &self.boosters {
            if matcher.is_match(keyword) {
                score += weight;
            }
        }
        for (matcher, weight) in &self.penalties {
            if matcher.is_match(keyword) {
                score += weight;
            }
        }

        for term in &self.brand_terms {
            if contains_term(keyword, term) {
                score -= BRAND_PENALTY;
                break;
            }
        }

        score.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::gap::domain::CapabilityRule;

    fn model() -> CapabilityModel {
        CapabilityModel {
            base_score: 0.5,
            boosters: vec![
                CapabilityRule {
                    pattern: "comfort|cushion".to_string(),
                    weight: 0.2,
                },
                CapabilityRule {
                    pattern: "arch support".to_string(),
                    weight: 0.15,
                },
            ],
            penalties: vec![CapabilityRule {
                pattern: "cheap|free".to_string(),
                weight: -0.3,
            }],
            common_brands: vec!["Crocs".to_string()],
        }
    }

    #[test]
    fn boosters_and_penalties_accumulate_from_base() {
        let scorer = CapabilityScorer::new(&model(), &[]);
        let score = scorer.score("comfort shoes with arch support");
        assert!((score - 0.85).abs() < 1e-9);
        let penalized = scorer.score("cheap comfort shoes");
        assert!((penalized - 0.4).abs() < 1e-9);
    }

    #[test]
    fn brand_terms_apply_one_flat_penalty() {
        let scorer = CapabilityScorer::new(&model(), &["nike".to_string()]);
        // Both a competitor term and a common brand appear; only one penalty.
        let score = scorer.score("nike crocs comfort clog");
        assert!((score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn scores_clamp_to_unit_interval() {
        let mut rich = model();
        rich.boosters.push(CapabilityRule {
            pattern: "sandal".to_string(),
            weight: 0.9,
        });
        let scorer = CapabilityScorer::new(&rich, &[]);
        assert_eq!(scorer.score("comfort sandal with arch support"), 1.0);

        let scorer = CapabilityScorer::new(&model(), &["nike".to_string()]);
        assert_eq!(scorer.score("cheap nike deal"), 0.0);
    }

    #[test]
    fn invalid_booster_patterns_fall_back_to_substring() {
        let mut broken = model();
        broken.boosters.push(CapabilityRule {
            pattern: "slip-on (".to_string(),
            weight: 0.2,
        });
        let scorer = CapabilityScorer::new(&broken, &[]);
        assert!((scorer.score("slip-on ( wide )") - 0.7).abs() < 1e-9);
    }
}
