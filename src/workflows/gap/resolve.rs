//! Configuration fallback chains.
//!
//! The capability model and scoring config each resolve through a fixed
//! precedence list: canonical field, governance-nested copy, then the
//! vertical preset named by `scoring_config.vertical_preset` (own or
//! governance-nested), with a built-in default preset as the floor. Call
//! sites never re-implement this chain.

use super::domain::{CapabilityModel, CapabilityRule, GapConfiguration, ScoringConfig};

pub const DEFAULT_PASS_THRESHOLD: f64 = 0.7;
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 0.4;
pub const DEFAULT_FACTOR_WEIGHT: f64 = 0.5;

pub fn resolve_capability_model(config: &GapConfiguration) -> CapabilityModel {
    if let Some(model) = &config.capability_model {
        if model.is_populated() {
            return model.clone();
        }
    }
    if let Some(model) = config
        .governance
        .as_ref()
        .and_then(|governance| governance.capability_model.as_ref())
    {
        if model.is_populated() {
            return model.clone();
        }
    }
    preset(preset_name(config)).capability
}

pub fn resolve_scoring_config(config: &GapConfiguration) -> ScoringConfig {
    if let Some(scoring) = &config.scoring_config {
        return scoring.clone();
    }
    if let Some(scoring) = config
        .governance
        .as_ref()
        .and_then(|governance| governance.scoring_config.as_ref())
    {
        return scoring.clone();
    }
    preset(preset_name(config)).scoring
}

fn preset_name(config: &GapConfiguration) -> Option<&str> {
    config
        .scoring_config
        .as_ref()
        .and_then(|scoring| scoring.vertical_preset.as_deref())
        .or_else(|| {
            config
                .governance
                .as_ref()
                .and_then(|governance| governance.scoring_config.as_ref())
                .and_then(|scoring| scoring.vertical_preset.as_deref())
        })
}

struct VerticalPreset {
    capability: CapabilityModel,
    scoring: ScoringConfig,
}

fn rule(pattern: &str, weight: f64) -> CapabilityRule {
    CapabilityRule {
        pattern: pattern.to_string(),
        weight,
    }
}

fn default_scoring() -> ScoringConfig {
    ScoringConfig {
        pass_threshold: DEFAULT_PASS_THRESHOLD,
        review_threshold: DEFAULT_REVIEW_THRESHOLD,
        difficulty_weight: DEFAULT_FACTOR_WEIGHT,
        position_weight: DEFAULT_FACTOR_WEIGHT,
        vertical_preset: None,
    }
}

fn footwear_preset() -> VerticalPreset {
    VerticalPreset {
        capability: CapabilityModel {
            base_score: 0.5,
            boosters: vec![
                rule("comfort|comfortable|cushion|cushioned", 0.15),
                rule("arch support|orthopedic|orthotic", 0.2),
                rule("recovery|plantar fasciitis|heel pain", 0.2),
                rule("sandal|sandals|slide|slides|clog|clogs", 0.15),
                rule("walking|standing all day", 0.1),
            ],
            penalties: vec![
                rule("cleat|cleats|ski|skate|golf", -0.4),
                rule("repair|glue|diy|cobbler", -0.35),
                rule("cheap|free|wholesale|bulk", -0.25),
                rule("kids|toddler|baby", -0.2),
            ],
            common_brands: vec![
                "nike".to_string(),
                "adidas".to_string(),
                "birkenstock".to_string(),
                "crocs".to_string(),
                "skechers".to_string(),
            ],
        },
        scoring: default_scoring(),
    }
}

fn generic_preset() -> VerticalPreset {
    VerticalPreset {
        capability: CapabilityModel::default(),
        scoring: default_scoring(),
    }
}

fn preset(name: Option<&str>) -> VerticalPreset {
    match name.map(str::trim).map(str::to_lowercase).as_deref() {
        Some("footwear") => footwear_preset(),
        _ => generic_preset(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::gap::domain::{BrandProfile, GovernanceConfig};

    fn base_config() -> GapConfiguration {
        GapConfiguration {
            name: "resolution".to_string(),
            context_version: None,
            brand: BrandProfile::default(),
            competitors: Vec::new(),
            category_definition: Default::default(),
            negative_scope: Default::default(),
            demand_definition: Default::default(),
            capability_model: None,
            scoring_config: None,
            governance: None,
        }
    }

    #[test]
    fn populated_canonical_model_wins() {
        let mut config = base_config();
        config.capability_model = Some(CapabilityModel {
            base_score: 0.6,
            boosters: vec![rule("comfort", 0.2)],
            penalties: Vec::new(),
            common_brands: Vec::new(),
        });
        config.governance = Some(GovernanceConfig {
            capability_model: Some(CapabilityModel {
                base_score: 0.1,
                boosters: vec![rule("never", 0.1)],
                penalties: Vec::new(),
                common_brands: Vec::new(),
            }),
            scoring_config: None,
        });
        assert_eq!(resolve_capability_model(&config).base_score, 0.6);
    }

    #[test]
    fn empty_canonical_model_falls_through_to_governance() {
        let mut config = base_config();
        config.capability_model = Some(CapabilityModel::default());
        config.governance = Some(GovernanceConfig {
            capability_model: Some(CapabilityModel {
                base_score: 0.55,
                boosters: vec![rule("cushion", 0.25)],
                penalties: Vec::new(),
                common_brands: Vec::new(),
            }),
            scoring_config: None,
        });
        let resolved = resolve_capability_model(&config);
        assert_eq!(resolved.base_score, 0.55);
        assert_eq!(resolved.boosters.len(), 1);
    }

    #[test]
    fn vertical_preset_is_the_last_resort() {
        let mut config = base_config();
        config.scoring_config = Some(ScoringConfig {
            pass_threshold: 0.8,
            review_threshold: 0.5,
            difficulty_weight: 0.5,
            position_weight: 0.5,
            vertical_preset: Some("footwear".to_string()),
        });
        let resolved = resolve_capability_model(&config);
        assert!(!resolved.boosters.is_empty());
        assert!(resolved
            .common_brands
            .contains(&"birkenstock".to_string()));
    }

    #[test]
    fn scoring_resolution_prefers_own_then_governance_then_default() {
        let mut config = base_config();
        assert_eq!(
            resolve_scoring_config(&config).pass_threshold,
            DEFAULT_PASS_THRESHOLD
        );

        config.governance = Some(GovernanceConfig {
            capability_model: None,
            scoring_config: Some(ScoringConfig {
                pass_threshold: 0.75,
                review_threshold: 0.45,
                difficulty_weight: 0.5,
                position_weight: 0.5,
                vertical_preset: None,
            }),
        });
        assert_eq!(resolve_scoring_config(&config).pass_threshold, 0.75);

        config.scoring_config = Some(ScoringConfig {
            pass_threshold: 0.9,
            review_threshold: 0.6,
            difficulty_weight: 0.4,
            position_weight: 0.6,
            vertical_preset: None,
        });
        assert_eq!(resolve_scoring_config(&config).pass_threshold, 0.9);
    }
}
