use std::sync::OnceLock;

use regex::Regex;

use super::domain::{GapConfiguration, IntentType, KeywordFlag};
use super::matcher::contains_term;

/// Industry brand names recognized even when not configured as competitors.
pub const KNOWN_BRANDS: &[&str] = &[
    "nike",
    "adidas",
    "birkenstock",
    "crocs",
    "skechers",
    "new balance",
    "hoka",
    "brooks",
    "asics",
    "oofos",
    "teva",
    "chaco",
    "vionic",
    "clarks",
    "ecco",
    "keen",
    "merrell",
    "puma",
    "reebok",
    "vans",
    "converse",
    "timberland",
    "ugg",
    "allbirds",
    "saucony",
];

/// Tokens dropped when deriving brand terms from competitor names/domains.
const BRAND_STOP_WORDS: &[&str] = &[
    "the", "and", "inc", "llc", "ltd", "corp", "company", "shoes", "shoe", "footwear", "official",
    "store", "online", "shop", "brand", "usa", "global", "group", "com", "net", "org", "www",
];

const PROBLEM_TERMS: &[&str] = &[
    "plantar fasciitis",
    "heel pain",
    "arch support",
    "bunion",
    "flat feet",
    "overpronation",
    "pronation",
    "supination",
    "knee pain",
    "back pain",
    "foot pain",
    "recovery",
    "pain relief",
    "swollen feet",
    "diabetic",
    "orthotic",
    "achilles",
    "metatarsal",
    "neuropathy",
];

const CATEGORY_TERMS: &[&str] = &[
    "sandal",
    "slide",
    "orthopedic",
    "clog",
    "flip flop",
    "slipper",
    "mule",
    "loafer",
    "comfort shoe",
];

const PRODUCT_TERMS: &[&str] = &[
    "shoe", "shoes", "sneaker", "sneakers", "running", "walking", "trainer", "trainers",
    "footwear", "boot", "boots",
];

// Size numbers, width codes, and color+product phrasings.
const SIZE_VARIANT_PATTERN: &str = r"(?x)(?i)
    \bsize\s*\d+ |
    \b\d+(?:\.5)?\s*(?:us|uk|eu)\b |
    \b(?:narrow|wide|extra\s+wide|2e|4e|6e|ee|eee)\b |
    \b(?:black|white|red|blue|navy|pink|brown|beige|grey|gray|green)\s+
      (?:shoe|shoes|sandal|sandals|slide|slides|sneaker|sneakers|boot|boots)\b";

fn size_variant_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(SIZE_VARIANT_PATTERN).expect("size/variant pattern compiles")
    })
}

/// Intent plus the brand/size flags raised while classifying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentClassification {
    pub intent: IntentType,
    pub flags: Vec<KeywordFlag>,
}

/// Ordered decision ladder over the normalized keyword. Brand and variant
/// signals dominate category/product signals: they indicate navigational or
/// out-of-scope intent regardless of surface vocabulary, so rule order is
/// part of the contract.
pub struct IntentClassifier {
    brand_terms: Vec<String>,
    problem_terms: Vec<String>,
    category_terms: Vec<String>,
    product_terms: Vec<String>,
}

fn brand_tokens(source: &str) -> Vec<String> {
    source
        .split(|c: char| !c.is_ascii_alphanumeric())
        .map(str::to_lowercase)
        .filter(|token| token.len() > 2)
        .filter(|token| !BRAND_STOP_WORDS.contains(&token.as_str()))
        .filter(|token| token.chars().any(|c| c.is_ascii_alphabetic()))
        .collect()
}

fn extend_unique(target: &mut Vec<String>, candidates: impl IntoIterator<Item = String>) {
    for candidate in candidates {
        if !target.contains(&candidate) {
            target.push(candidate);
        }
    }
}

impl IntentClassifier {
    pub fn from_config(config: &GapConfiguration) -> Self {
        let mut brand_terms = Vec::new();
        for competitor in &config.competitors {
            extend_unique(&mut brand_terms, brand_tokens(&competitor.name));
            extend_unique(&mut brand_terms, brand_tokens(&competitor.domain));
        }
        extend_unique(
            &mut brand_terms,
            KNOWN_BRANDS.iter().map(|brand| brand.to_string()),
        );

        let mut problem_terms: Vec<String> =
            PROBLEM_TERMS.iter().map(|term| term.to_string()).collect();
        extend_unique(
            &mut problem_terms,
            config
                .demand_definition
                .problem_terms
                .iter()
                .map(|term| term.trim().to_lowercase())
                .filter(|term| !term.is_empty()),
        );

        let mut category_terms: Vec<String> =
            CATEGORY_TERMS.iter().map(|term| term.to_string()).collect();
        extend_unique(
            &mut category_terms,
            config
                .demand_definition
                .category_terms
                .iter()
                .map(|term| term.trim().to_lowercase())
                .filter(|term| !term.is_empty()),
        );

        let product_terms = PRODUCT_TERMS.iter().map(|term| term.to_string()).collect();

        Self {
            brand_terms,
            problem_terms,
            category_terms,
            product_terms,
        }
    }

    /// Brand vocabulary shared with the capability scorer's brand penalty.
    pub fn brand_terms(&self) -> &[String] {
        &self.brand_terms
    }

    pub fn classify(&self, keyword: &str) -> IntentClassification {
        let mut flags = Vec::new();

        let brand_hit = self
            .brand_terms
            .iter()
            .any(|term| contains_term(keyword, term));
        if brand_hit {
            flags.push(KeywordFlag::CompetitorBrand);
        }

        let size_hit = size_variant_pattern().is_match(keyword);
        if size_hit {
            flags.push(KeywordFlag::SizeVariant);
        }

        let intent = if brand_hit {
            IntentType::BrandCapture
        } else if self.matches_vocabulary(&self.problem_terms, keyword) {
            IntentType::ProblemSolution
        } else if self.matches_vocabulary(&self.category_terms, keyword) {
            IntentType::CategoryCapture
        } else if self.matches_vocabulary(&self.product_terms, keyword) {
            if size_hit {
                IntentType::VariantOrSize
            } else {
                IntentType::ProductGeneric
            }
        } else if size_hit {
            IntentType::VariantOrSize
        } else {
            IntentType::Other
        };

        IntentClassification { intent, flags }
    }

    fn matches_vocabulary(&self, terms: &[String], keyword: &str) -> bool {
        terms.iter().any(|term| keyword.contains(term.as_str()))
    }
}
