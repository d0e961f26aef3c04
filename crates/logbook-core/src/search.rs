//! Declarative search semantics shared by both storage tiers.
//!
//! This module provides:
//! - [`SearchMode`] — Which fields a query matches against
//! - [`SearchSpec`] — A query plus its matching rules
//! - [`SearchMatcher`] — A compiled spec, ready to test records
//!
//! Historically the cache tier matched the full serialized record while the
//! durable tier matched only the level field, so the same query could return
//! different results depending on which tier answered. A [`SearchSpec`] is
//! built once per request and handed to whichever tier serves it, so both
//! tiers apply identical semantics.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::LogRecord;

/// Errors from compiling a search spec.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query is not a valid pattern for the selected mode.
    #[error("invalid search pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending query string.
        pattern: String,
        /// Why compilation failed.
        message: String,
    },
}

/// Which fields of a record a query matches against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Substring match over the whole serialized record, keys included.
    #[default]
    FullRecord,
    /// Pattern match against the level field only.
    Level,
}

/// A search query together with the rules for applying it.
///
/// Matching is case-insensitive unless
/// [`with_case_sensitive`](Self::with_case_sensitive) says otherwise, which
/// mirrors what both tiers have always done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    query: String,
    mode: SearchMode,
    case_sensitive: bool,
}

impl SearchSpec {
    /// Creates a case-insensitive spec with the given mode.
    #[must_use]
    pub fn new(query: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            query: query.into(),
            mode,
            case_sensitive: false,
        }
    }

    /// Creates a spec matching the whole serialized record.
    #[must_use]
    pub fn full_record(query: impl Into<String>) -> Self {
        Self::new(query, SearchMode::FullRecord)
    }

    /// Creates a spec matching the level field only.
    #[must_use]
    pub fn level(query: impl Into<String>) -> Self {
        Self::new(query, SearchMode::Level)
    }

    /// Sets case sensitivity.
    #[must_use]
    pub const fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Returns the raw query string.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the match mode.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Returns whether matching is case-sensitive.
    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Compiles the spec into a reusable matcher.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPattern`] when the mode is
    /// [`SearchMode::Level`] and the query is not a valid regular expression.
    pub fn compile(&self) -> Result<SearchMatcher, SearchError> {
        let kind = match self.mode {
            SearchMode::FullRecord => MatcherKind::Substring {
                needle: if self.case_sensitive {
                    self.query.clone()
                } else {
                    self.query.to_lowercase()
                },
                case_sensitive: self.case_sensitive,
            },
            SearchMode::Level => {
                let pattern = RegexBuilder::new(&self.query)
                    .case_insensitive(!self.case_sensitive)
                    .build()
                    .map_err(|e| SearchError::InvalidPattern {
                        pattern: self.query.clone(),
                        message: e.to_string(),
                    })?;
                MatcherKind::LevelPattern(pattern)
            }
        };

        Ok(SearchMatcher { kind })
    }
}

/// A compiled [`SearchSpec`].
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    kind: MatcherKind,
}

#[derive(Debug, Clone)]
enum MatcherKind {
    Substring { needle: String, case_sensitive: bool },
    LevelPattern(Regex),
}

impl SearchMatcher {
    /// Tests a record against the compiled query.
    ///
    /// Full-record mode matches against the canonical JSON serialization, so
    /// field names and the level string are themselves matchable text.
    #[must_use]
    pub fn matches(&self, record: &LogRecord) -> bool {
        match &self.kind {
            MatcherKind::Substring {
                needle,
                case_sensitive,
            } => serde_json::to_string(record).is_ok_and(|raw| {
                if *case_sensitive {
                    raw.contains(needle)
                } else {
                    raw.to_lowercase().contains(needle)
                }
            }),
            MatcherKind::LevelPattern(pattern) => pattern.is_match(record.level.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;

    fn record(level: Level, message: &str) -> LogRecord {
        LogRecord::new("1", level, "auth-service", message)
    }

    fn compiled(spec: &SearchSpec) -> SearchMatcher {
        match spec.compile() {
            Ok(matcher) => matcher,
            Err(e) => panic!("spec should compile: {e}"),
        }
    }

    // ===========================================
    // FullRecord Mode Tests
    // ===========================================

    #[test]
    fn full_record_matches_message_substring() {
        let matcher = compiled(&SearchSpec::full_record("token"));
        assert!(matcher.matches(&record(Level::info(), "token refreshed")));
        assert!(!matcher.matches(&record(Level::info(), "user created")));
    }

    #[test]
    fn full_record_is_case_insensitive_by_default() {
        let matcher = compiled(&SearchSpec::full_record("TOKEN"));
        assert!(matcher.matches(&record(Level::info(), "token refreshed")));
    }

    #[test]
    fn full_record_matches_level_text() {
        // The serialized record contains the level string, so a level query
        // still works in full-record mode.
        let matcher = compiled(&SearchSpec::full_record("error"));
        assert!(matcher.matches(&record(Level::error(), "nothing interesting")));
    }

    #[test]
    fn full_record_matches_field_names() {
        let matcher = compiled(&SearchSpec::full_record("userid"));
        assert!(matcher.matches(&record(Level::info(), "anything")));
    }

    #[test]
    fn full_record_case_sensitive_opt_in() {
        let spec = SearchSpec::full_record("Token").with_case_sensitive(true);
        let matcher = compiled(&spec);
        assert!(matcher.matches(&record(Level::info(), "Token issued")));
        assert!(!matcher.matches(&record(Level::info(), "token issued")));
    }

    #[test]
    fn empty_query_matches_everything() {
        let matcher = compiled(&SearchSpec::full_record(""));
        assert!(matcher.matches(&record(Level::info(), "anything at all")));
    }

    // ===========================================
    // Level Mode Tests
    // ===========================================

    #[test]
    fn level_mode_matches_level_only() {
        let matcher = compiled(&SearchSpec::level("ERROR"));
        assert!(matcher.matches(&record(Level::error(), "disk full")));
        // Message content is invisible to level mode.
        assert!(!matcher.matches(&record(Level::info(), "ERROR in payload text")));
    }

    #[test]
    fn level_mode_is_case_insensitive_by_default() {
        let matcher = compiled(&SearchSpec::level("error"));
        assert!(matcher.matches(&record(Level::error(), "disk full")));
    }

    #[test]
    fn level_mode_accepts_regex_syntax() {
        let matcher = compiled(&SearchSpec::level("^(WARN|ERROR)$"));
        assert!(matcher.matches(&record(Level::warn(), "m")));
        assert!(matcher.matches(&record(Level::error(), "m")));
        assert!(!matcher.matches(&record(Level::info(), "m")));
    }

    #[test]
    fn level_mode_substring_semantics_without_anchors() {
        let matcher = compiled(&SearchSpec::level("ERR"));
        assert!(matcher.matches(&record(Level::error(), "m")));
    }

    #[test]
    fn level_mode_rejects_invalid_regex() {
        let result = SearchSpec::level("[unclosed").compile();
        assert!(matches!(
            result,
            Err(SearchError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn level_mode_case_sensitive_opt_in() {
        let spec = SearchSpec::level("error").with_case_sensitive(true);
        let matcher = compiled(&spec);
        assert!(!matcher.matches(&record(Level::error(), "m")));
    }

    #[test]
    fn empty_level_query_matches_everything() {
        let matcher = compiled(&SearchSpec::level(""));
        assert!(matcher.matches(&record(Level::info(), "m")));
    }

    // ===========================================
    // Spec Accessor Tests
    // ===========================================

    #[test]
    fn spec_accessors() {
        let spec = SearchSpec::new("q", SearchMode::Level).with_case_sensitive(true);
        assert_eq!(spec.query(), "q");
        assert_eq!(spec.mode(), SearchMode::Level);
        assert!(spec.is_case_sensitive());
    }

    #[test]
    fn mode_default_is_full_record() {
        assert_eq!(SearchMode::default(), SearchMode::FullRecord);
    }

    #[test]
    fn mode_serializes_kebab_case() {
        let json = serde_json::to_string(&SearchMode::FullRecord).map_err(|e| e.to_string());
        assert_eq!(json, Ok("\"full-record\"".to_string()));

        let parsed: Result<SearchMode, _> =
            serde_json::from_str("\"level\"").map_err(|e| e.to_string());
        assert_eq!(parsed, Ok(SearchMode::Level));
    }

    #[test]
    fn invalid_pattern_error_names_the_pattern() {
        let err = SearchSpec::level("(").compile();
        if let Err(e) = err {
            assert!(e.to_string().contains('('));
        } else {
            panic!("expected compile failure");
        }
    }
}
