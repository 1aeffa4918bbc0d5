//! Validation error shared by all record kinds.
//!
//! Validation failures are reported as a list of human-readable messages so
//! the presentation layer can show every violated rule at once.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One or more violated field rules for a draft or merged record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    /// Creates an error carrying a single message.
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Returns violated rules in the order they were detected.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns whether `message` is among the violated rules.
    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|value| value == message)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.messages.join(", "))
    }
}

impl Error for ValidationError {}

/// Accumulates messages while checking a record.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records `message` when `violated` is true.
    pub(crate) fn check(&mut self, violated: bool, message: &str) {
        if violated {
            self.messages.push(message.to_string());
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                messages: self.messages,
            })
        }
    }
}

/// Returns true when `value` is empty after trimming.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Returns true when an optional text field is absent or blank.
pub(crate) fn is_missing(value: Option<&str>) -> bool {
    value.map_or(true, is_blank)
}

/// Trims free text and maps blank input to `None`.
pub(crate) fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{is_missing, normalize_text, Violations};

    #[test]
    fn violations_collect_every_message_in_order() {
        let mut violations = Violations::new();
        violations.check(true, "first");
        violations.check(false, "skipped");
        violations.check(true, "second");

        let err = violations.finish().unwrap_err();
        assert_eq!(err.messages(), ["first", "second"]);
        assert_eq!(err.to_string(), "first, second");
    }

    #[test]
    fn empty_violations_finish_ok() {
        assert!(Violations::new().finish().is_ok());
    }

    #[test]
    fn whitespace_only_text_counts_as_missing() {
        assert!(is_missing(None));
        assert!(is_missing(Some("  \t")));
        assert!(!is_missing(Some(" wheat ")));
    }

    #[test]
    fn normalize_text_trims_and_drops_blank() {
        assert_eq!(normalize_text(Some("  note ".into())).as_deref(), Some("note"));
        assert_eq!(normalize_text(Some("   ".into())), None);
    }
}
