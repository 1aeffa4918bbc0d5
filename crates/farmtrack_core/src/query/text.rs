//! Case-insensitive free-text matching.

use crate::model::crop::Crop;
use crate::model::expense::Expense;
use crate::model::task::Task;

/// Records that expose text fields to free-text search.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Crop {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.variety.as_str(),
            self.field_location.as_str(),
        ]
    }
}

impl Searchable for Expense {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str(), self.category.as_str()]
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        if let Some(notes) = self.notes.as_deref() {
            fields.push(notes);
        }
        fields
    }
}

/// Case-insensitive substring matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Lowercases a search term, keeping surrounding whitespace as part of the
    /// substring. Returns `None` for blank input, which callers treat as
    /// "match everything".
    pub fn new(term: &str) -> Option<Self> {
        if term.trim().is_empty() {
            return None;
        }
        Some(Self {
            needle: term.to_lowercase(),
        })
    }

    /// Builds a matcher from an optional criteria term.
    pub fn from_term(term: Option<&str>) -> Option<Self> {
        term.and_then(Self::new)
    }

    /// Whether any searchable field of `record` contains the term.
    pub fn matches<R: Searchable>(&self, record: &R) -> bool {
        record
            .search_fields()
            .into_iter()
            .any(|field| self.matches_field(field))
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::{Searchable, TextMatcher};

    struct Labels(&'static str, &'static str);

    impl Searchable for Labels {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.0, self.1]
        }
    }

    #[test]
    fn blank_terms_produce_no_matcher() {
        assert!(TextMatcher::new("").is_none());
        assert!(TextMatcher::new("   ").is_none());
        assert!(TextMatcher::from_term(None).is_none());
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let labels = Labels("North Field A", "Hard Red Winter");
        let matcher = TextMatcher::new("field a").unwrap();
        assert!(matcher.matches(&labels));
        assert!(TextMatcher::new("RED").unwrap().matches(&labels));
        assert!(!TextMatcher::new("south").unwrap().matches(&labels));
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_term() {
        let labels = Labels("North Field A", "Hard Red Winter");
        assert!(!TextMatcher::new("field a ").unwrap().matches(&labels));
        assert!(TextMatcher::new(" field").unwrap().matches(&labels));
        assert!(TextMatcher::new("red winter").unwrap().matches(&labels));
    }
}
