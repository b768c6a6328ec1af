use regex::Regex;

/// Pattern-matching seam for user-supplied rule terms.
///
/// Exclusion terms and capability patterns come from configuration and may
/// not be valid regex fragments. The variant is picked once at construction:
/// a compiled word-boundary, case-insensitive regex when the term compiles,
/// or plain lower-cased substring containment when it does not.
#[derive(Debug, Clone)]
pub enum TermMatcher {
    Compiled(Regex),
    Substring(String),
}

impl TermMatcher {
    pub fn word_bounded(term: &str) -> Self {
        let trimmed = term.trim();
        match Regex::new(&format!(r"(?i)\b(?:{trimmed})\b")) {
            Ok(pattern) => TermMatcher::Compiled(pattern),
            Err(_) => TermMatcher::Substring(trimmed.to_lowercase()),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            TermMatcher::Compiled(pattern) => pattern.is_match(text),
            TermMatcher::Substring(needle) => {
                !needle.is_empty() && text.to_lowercase().contains(needle.as_str())
            }
        }
    }
}

/// Whole-word containment for plain (non-pattern) terms: multi-word terms
/// match as substrings, single tokens must equal a keyword token.
pub(crate) fn contains_term(keyword: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    if term.contains(' ') {
        keyword.contains(term)
    } else {
        keyword.split_whitespace().any(|token| token == term)
    }
}
