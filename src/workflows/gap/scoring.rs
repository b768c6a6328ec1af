use super::domain::IntentType;

/// Maps external keyword difficulty (0-100) into a [0,1] multiplier. An
/// unknown difficulty never dampens the score.
pub fn difficulty_factor(difficulty: Option<f64>, weight: f64) -> f64 {
    match difficulty {
        None => 1.0,
        Some(kd) => {
            let kd = kd.clamp(0.0, 100.0);
            let raw = 1.0 - kd / 100.0;
            1.0 - weight * (1.0 - raw)
        }
    }
}

/// Maps the competitor's SERP position into a [0,1] multiplier. Positions
/// 1-3 are already well-defended, 4-10 are the prime gap target, 11-20 are
/// still reachable, and deeper positions signal weak demand evidence.
pub fn position_factor(position: Option<u32>, weight: f64) -> f64 {
    let Some(position) = position else {
        return 1.0;
    };
    if position == 0 {
        return 1.0;
    }
    let raw = match position {
        1..=3 => 0.6,
        4..=10 => 1.0,
        11..=20 => 0.8,
        _ => 0.5,
    };
    1.0 - weight * (1.0 - raw)
}

/// Fixed commercial weight per intent class.
pub const fn intent_weight(intent: IntentType) -> f64 {
    match intent {
        IntentType::CategoryCapture => 1.0,
        IntentType::ProblemSolution => 1.0,
        IntentType::ProductGeneric => 0.7,
        IntentType::BrandCapture => 0.2,
        IntentType::VariantOrSize => 0.0,
        IntentType::Other => 0.1,
    }
}

/// Unbounded ranking score. A missing or zero CPC contributes a neutral
/// economics multiplier of 1.
pub fn opportunity_score(
    search_volume: u64,
    cpc: Option<f64>,
    intent: IntentType,
    capability_score: f64,
    difficulty_factor: f64,
    position_factor: f64,
) -> f64 {
    let economics = cpc.filter(|value| *value > 0.0).unwrap_or(1.0);
    search_volume as f64
        * economics
        * intent_weight(intent)
        * capability_score
        * difficulty_factor
        * position_factor
}
