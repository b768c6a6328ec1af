use super::domain::NegativeScope;
use super::matcher::TermMatcher;

/// Which negative-scope list a term came from; evaluation order is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionList {
    Categories,
    Keywords,
    UseCases,
    Competitors,
}

impl ExclusionList {
    pub const fn label(self) -> &'static str {
        match self {
            ExclusionList::Categories => "category",
            ExclusionList::Keywords => "keyword",
            ExclusionList::UseCases => "use case",
            ExclusionList::Competitors => "competitor",
        }
    }
}

/// The first exclusion term that matched a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionMatch {
    pub list: ExclusionList,
    pub term: String,
}

impl ExclusionMatch {
    pub fn reason(&self) -> String {
        format!("Excluded {}: {}", self.list.label(), self.term)
    }
}

/// Evaluates a keyword against the four exclusion lists in order:
/// categories, keywords, use cases, competitors. First match wins; no
/// further lists are checked once one matches.
pub struct ExclusionChecker {
    rules: Vec<(ExclusionList, String, TermMatcher)>,
    enforced: bool,
}

impl ExclusionChecker {
    pub fn from_scope(scope: &NegativeScope) -> Self {
        let lists: [(ExclusionList, &[String]); 4] = [
            (ExclusionList::Categories, &scope.excluded_categories),
            (ExclusionList::Keywords, &scope.excluded_keywords),
            (ExclusionList::UseCases, &scope.excluded_use_cases),
            (ExclusionList::Competitors, &scope.excluded_competitors),
        ];

        let mut rules = Vec::new();
        for (list, terms) in lists {
            for term in terms {
                let term = term.trim();
                if term.is_empty() {
                    continue;
                }
                rules.push((list, term.to_string(), TermMatcher::word_bounded(term)));
            }
        }

        Self {
            rules,
            enforced: scope.enforced,
        }
    }

    pub fn check(&self, keyword: &str) -> Option<ExclusionMatch> {
        if !self.enforced {
            return None;
        }
        self.rules
            .iter()
            .find(|(_, _, matcher)| matcher.is_match(keyword))
            .map(|(list, term, _)| ExclusionMatch {
                list: *list,
                term: term.clone(),
            })
    }
}
