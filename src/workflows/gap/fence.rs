use super::domain::{CategoryDefinition, DemandDefinition};

pub const NO_FENCE_REASON: &str = "No fence defined - auto-pass";
const OUTSIDE_FENCE_REASON: &str = "Outside defined category fence";

/// Outcome of the in-scope concept test. Informational: the evaluator uses
/// it to annotate reasons, never to gate status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceCheck {
    pub in_fence: bool,
    pub reason: String,
}

/// Tests whether a keyword falls inside the configured in-scope concept
/// set: category included terms, the primary category, approved categories,
/// and the demand seed vocabularies. With no concepts configured every
/// keyword auto-passes.
pub struct FenceChecker {
    concepts: Vec<Concept>,
}

struct Concept {
    text: String,
    tokens: Vec<String>,
}

fn tokens_of(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|token| token.len() > 2)
        .collect()
}

impl FenceChecker {
    pub fn from_config(category: &CategoryDefinition, demand: &DemandDefinition) -> Self {
        let mut sources: Vec<&str> = Vec::new();
        sources.extend(category.included.iter().map(String::as_str));
        if !category.primary_category.trim().is_empty() {
            sources.push(category.primary_category.as_str());
        }
        sources.extend(category.approved_categories.iter().map(String::as_str));
        sources.extend(demand.brand_terms.iter().map(String::as_str));
        sources.extend(demand.category_terms.iter().map(String::as_str));
        sources.extend(demand.problem_terms.iter().map(String::as_str));

        let concepts = sources
            .into_iter()
            .filter_map(|text| {
                let text = text.trim();
                let tokens = tokens_of(text);
                if text.is_empty() || tokens.is_empty() {
                    None
                } else {
                    Some(Concept {
                        text: text.to_string(),
                        tokens,
                    })
                }
            })
            .collect();

        Self { concepts }
    }

    pub fn check(&self, keyword: &str) -> FenceCheck {
        if self.concepts.is_empty() {
            return FenceCheck {
                in_fence: true,
                reason: NO_FENCE_REASON.to_string(),
            };
        }

        let keyword_tokens = tokens_of(keyword);
        for concept in &self.concepts {
            let matched = concept.tokens.iter().any(|concept_token| {
                keyword_tokens.iter().any(|keyword_token| {
                    keyword_token.contains(concept_token.as_str())
                        || concept_token.contains(keyword_token.as_str())
                })
            });
            if matched {
                return FenceCheck {
                    in_fence: true,
                    reason: concept.text.clone(),
                };
            }
        }

        FenceCheck {
            in_fence: false,
            reason: OUTSIDE_FENCE_REASON.to_string(),
        }
    }
}
