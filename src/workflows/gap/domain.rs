use serde::{Deserialize, Serialize};

/// Terminal classification for an evaluated gap keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordStatus {
    Pass,
    Review,
    OutOfPlay,
}

impl KeywordStatus {
    pub const fn label(self) -> &'static str {
        match self {
            KeywordStatus::Pass => "pass",
            KeywordStatus::Review => "review",
            KeywordStatus::OutOfPlay => "out_of_play",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            KeywordStatus::Pass => "✅",
            KeywordStatus::Review => "🟡",
            KeywordStatus::OutOfPlay => "⛔",
        }
    }

    /// Sort rank: pass entries precede review, which precede out-of-play.
    pub const fn rank(self) -> u8 {
        match self {
            KeywordStatus::Pass => 0,
            KeywordStatus::Review => 1,
            KeywordStatus::OutOfPlay => 2,
        }
    }
}

/// Search intent assigned by the ordered classification ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentType {
    BrandCapture,
    CategoryCapture,
    ProblemSolution,
    ProductGeneric,
    VariantOrSize,
    Other,
}

impl IntentType {
    pub const fn label(self) -> &'static str {
        match self {
            IntentType::BrandCapture => "brand_capture",
            IntentType::CategoryCapture => "category_capture",
            IntentType::ProblemSolution => "problem_solution",
            IntentType::ProductGeneric => "product_generic",
            IntentType::VariantOrSize => "variant_or_size",
            IntentType::Other => "other",
        }
    }

    /// Friendlier name used when a pass keyword does not land in a
    /// configured theme.
    pub const fn theme_label(self) -> &'static str {
        match self {
            IntentType::BrandCapture => "Brand & Competitor",
            IntentType::CategoryCapture => "Category Capture",
            IntentType::ProblemSolution => "Problem & Solution",
            IntentType::ProductGeneric => "General Product",
            IntentType::VariantOrSize => "Variants & Sizes",
            IntentType::Other => "Other",
        }
    }
}

/// How certain the evaluator is about the assigned status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Signals attached to a keyword while it moves through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordFlag {
    CompetitorBrand,
    SizeVariant,
    Excluded,
    OutsideFence,
}

impl KeywordFlag {
    pub const fn label(self) -> &'static str {
        match self {
            KeywordFlag::CompetitorBrand => "competitor_brand",
            KeywordFlag::SizeVariant => "size_variant",
            KeywordFlag::Excluded => "excluded",
            KeywordFlag::OutsideFence => "outside_fence",
        }
    }
}

/// Competitive relevance of a configured competitor; only tier1/tier2
/// domains are queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorTier {
    Tier1,
    Tier2,
    Tier3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorStatus {
    #[default]
    Active,
    Paused,
    Archived,
}

/// A competitor domain tracked by the brand configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domain: String,
    pub tier: CompetitorTier,
    #[serde(default)]
    pub status: CompetitorStatus,
}

/// The brand under analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub business_model: String,
}

/// Concept lists bounding what the brand considers in-category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    #[serde(default)]
    pub primary_category: String,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    pub excluded: Vec<String>,
    #[serde(default)]
    pub approved_categories: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Exclusion lists checked in order: categories, keywords, use cases,
/// competitors. `enforced` switches the whole checker off when false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegativeScope {
    #[serde(default)]
    pub excluded_categories: Vec<String>,
    #[serde(default)]
    pub excluded_keywords: Vec<String>,
    #[serde(default)]
    pub excluded_use_cases: Vec<String>,
    #[serde(default)]
    pub excluded_competitors: Vec<String>,
    #[serde(default = "default_true")]
    pub enforced: bool,
}

impl Default for NegativeScope {
    fn default() -> Self {
        Self {
            excluded_categories: Vec::new(),
            excluded_keywords: Vec::new(),
            excluded_use_cases: Vec::new(),
            excluded_competitors: Vec::new(),
            enforced: true,
        }
    }
}

/// Seed vocabularies describing the demand the brand wants to capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandDefinition {
    #[serde(default)]
    pub brand_terms: Vec<String>,
    #[serde(default)]
    pub category_terms: Vec<String>,
    #[serde(default)]
    pub problem_terms: Vec<String>,
}

/// A single booster or penalty rule: a user-supplied pattern and the weight
/// it contributes when the pattern matches. Penalty weights are negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityRule {
    pub pattern: String,
    pub weight: f64,
}

fn default_base_score() -> f64 {
    0.5
}

/// Capability rubric: base score plus booster/penalty rules and the brand
/// names that trigger the flat brand penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityModel {
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    #[serde(default)]
    pub boosters: Vec<CapabilityRule>,
    #[serde(default)]
    pub penalties: Vec<CapabilityRule>,
    #[serde(default)]
    pub common_brands: Vec<String>,
}

impl Default for CapabilityModel {
    fn default() -> Self {
        Self {
            base_score: default_base_score(),
            boosters: Vec::new(),
            penalties: Vec::new(),
            common_brands: Vec::new(),
        }
    }
}

impl CapabilityModel {
    /// An empty model falls through to the governance copy or a preset.
    pub fn is_populated(&self) -> bool {
        !self.boosters.is_empty()
            || !self.penalties.is_empty()
            || !self.common_brands.is_empty()
    }
}

fn default_weight() -> f64 {
    0.5
}

/// Thresholds and factor weights applied by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub pass_threshold: f64,
    pub review_threshold: f64,
    #[serde(default = "default_weight")]
    pub difficulty_weight: f64,
    #[serde(default = "default_weight")]
    pub position_weight: f64,
    #[serde(default)]
    pub vertical_preset: Option<String>,
}

/// Governance-managed copies of the tunable models; consulted when the
/// canonical fields are absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    #[serde(default)]
    pub capability_model: Option<CapabilityModel>,
    #[serde(default)]
    pub scoring_config: Option<ScoringConfig>,
}

/// Immutable input to one gap analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapConfiguration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub context_version: Option<String>,
    pub brand: BrandProfile,
    #[serde(default)]
    pub competitors: Vec<CompetitorProfile>,
    #[serde(default)]
    pub category_definition: CategoryDefinition,
    #[serde(default)]
    pub negative_scope: NegativeScope,
    #[serde(default)]
    pub demand_definition: DemandDefinition,
    #[serde(default)]
    pub capability_model: Option<CapabilityModel>,
    #[serde(default)]
    pub scoring_config: Option<ScoringConfig>,
    #[serde(default)]
    pub governance: Option<GovernanceConfig>,
}

/// A ranked keyword surfaced by the external provider for one competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapKeyword {
    pub keyword: String,
    #[serde(default)]
    pub search_volume: u64,
    #[serde(default)]
    pub competitor_position: Option<u32>,
    #[serde(default)]
    pub cpc: Option<f64>,
    #[serde(default)]
    pub difficulty: Option<f64>,
}

/// Fully evaluated keyword; created once per unique normalized keyword per
/// run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,
    pub normalized: String,
    pub status: KeywordStatus,
    pub status_icon: String,
    pub intent: IntentType,
    pub capability_score: f64,
    pub opportunity_score: f64,
    pub difficulty_factor: f64,
    pub position_factor: f64,
    pub reason: String,
    pub flags: Vec<KeywordFlag>,
    pub confidence: Confidence,
    pub competitors_seen: Vec<String>,
    pub search_volume: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpc: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitor_position: Option<u32>,
    pub theme: String,
}

/// Bucket counts and rounded percentages over the full result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapStats {
    pub total: usize,
    pub passed: usize,
    pub review: usize,
    pub out_of_play: usize,
    pub passed_pct: u32,
    pub review_pct: u32,
    pub out_of_play_pct: u32,
}

/// How many results carried each exclusion-related flag, so a diminished
/// run is distinguishable from a misconfigured one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCounters {
    pub competitor_brand: usize,
    pub size_variant: usize,
    pub excluded: usize,
    pub outside_fence: usize,
}

/// Pass keywords grouped under one theme, highest scores first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeGroup {
    pub theme: String,
    pub keywords: Vec<KeywordResult>,
}

/// Top-level output of one analysis run; plain serializable data suitable
/// for JSON transport to any presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordGapResult {
    pub brand_domain: String,
    pub competitors: Vec<String>,
    pub total_keywords: usize,
    pub top_opportunities: Vec<ThemeGroup>,
    pub needs_review: Vec<KeywordResult>,
    pub out_of_play: Vec<KeywordResult>,
    pub stats: GapStats,
    pub filters_applied: FilterCounters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_version: Option<String>,
    pub configuration: String,
}

impl KeywordGapResult {
    /// Well-formed empty result for runs with no brand domain or no
    /// qualifying competitors. Input insufficiency is not an error.
    pub fn empty(brand_domain: String, config: &GapConfiguration) -> Self {
        Self {
            brand_domain,
            competitors: Vec::new(),
            total_keywords: 0,
            top_opportunities: Vec::new(),
            needs_review: Vec::new(),
            out_of_play: Vec::new(),
            stats: GapStats::default(),
            filters_applied: FilterCounters::default(),
            context_version: config.context_version.clone(),
            configuration: config.name.clone(),
        }
    }
}
