//! Invalidation Pattern Module
//!
//! Regex rules attached to a store that assign custom TTLs to matching keys.

use std::time::Duration;

use regex::Regex;
use tracing::warn;

use crate::error::{CacheError, Result};

// == Pattern Rule ==
/// A compiled key pattern with an optional TTL override.
#[derive(Debug, Clone)]
struct PatternRule {
    /// Compiled key matcher
    regex: Regex,
    /// TTL to apply to matching keys; None means the store default
    custom_ttl: Option<Duration>,
}

// == Pattern Registry ==
/// Ordered collection of invalidation pattern rules.
///
/// Registration order defines priority: the first rule whose regex matches
/// a key decides its TTL. Lives inside a store and is only touched under
/// the store's lock.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    rules: Vec<PatternRule>,
}

impl PatternRegistry {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // == Add Pattern ==
    /// Registers a pattern rule with an optional TTL override.
    ///
    /// An invalid regex is logged and dropped; the registry is unchanged
    /// and the caller sees no failure.
    pub fn add_pattern(&mut self, pattern: &str, custom_ttl: Option<Duration>) {
        match compile_pattern(pattern) {
            Ok(regex) => self.rules.push(PatternRule { regex, custom_ttl }),
            Err(err) => warn!("Ignoring invalidation pattern: {}", err),
        }
    }

    // == Effective TTL ==
    /// Returns the TTL governing `key`.
    ///
    /// The first registered rule matching the key wins; a rule without a
    /// custom TTL, and a key matching no rule, both resolve to
    /// `default_ttl`.
    pub fn effective_ttl(&self, key: &str, default_ttl: Duration) -> Duration {
        self.rules
            .iter()
            .find(|rule| rule.regex.is_match(key))
            .map(|rule| rule.custom_ttl.unwrap_or(default_ttl))
            .unwrap_or(default_ttl)
    }

    // == Length ==
    /// Returns the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// == Utility Functions ==
/// Compiles a caller-supplied pattern into a regex.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| CacheError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
