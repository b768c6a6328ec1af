//! Keyword gap classification and opportunity scoring.
//!
//! The engine ingests ranked-keyword data for a brand and its competitors
//! and produces a deterministic, auditable classification of gap keywords
//! into pass / review / out-of-play buckets, each with an opportunity score
//! and a human-readable justification. Persistence, authentication, and
//! presentation belong to external collaborators; this module owns the
//! normalization, rule evaluation, scoring, caching, and fan-out.

pub mod cache;
pub mod capability;
pub mod domain;
pub mod evaluation;
pub mod exclusion;
pub mod fence;
pub mod intent;
pub mod matcher;
pub mod normalize;
pub mod provider;
pub mod report;
pub mod resolve;
pub mod router;
pub mod scoring;
pub mod service;

pub use cache::{cache_key, Clock, GapCache, SystemClock};
pub use domain::{
    BrandProfile, CapabilityModel, CapabilityRule, CategoryDefinition, CompetitorProfile,
    CompetitorStatus, CompetitorTier, Confidence, DemandDefinition, FilterCounters,
    GapConfiguration, GapKeyword, GapStats, GovernanceConfig, IntentType, KeywordFlag,
    KeywordGapResult, KeywordResult, KeywordStatus, NegativeScope, ScoringConfig, ThemeGroup,
};
pub use evaluation::KeywordEvaluator;
pub use provider::{
    AhrefsProvider, DataForSeoProvider, GapKeywordProvider, GapKeywordRequest,
    GapKeywordResponse, ProviderError, ProviderKind, ProviderRegistry,
};
pub use router::gap_router;
pub use service::{GapRunOptions, KeywordGapService};
