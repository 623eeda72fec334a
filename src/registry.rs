//! Ordered name → value tables and the selection matcher used by every menu.

use itertools::Itertools;
use tracing::{debug, warn};

use crate::error::{PatternError, Result};

/// How free-text input is matched against registry keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Only a key equal to the input matches.
    Exact,
    /// Exact key first, otherwise the last key (in registry order) containing the input.
    #[default]
    LastSubstring,
    /// Exact key first, otherwise the only key containing the input.
    UniqueSubstring,
}

#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: Vec<(&'static str, T)>,
}

impl<T> Registry<T> {
    /// Builds a registry from literal entries, keeping their order.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'static str, T)>,
    {
        let mut registry = Self {
            entries: Vec::new(),
        };
        for (key, value) in entries {
            if registry.get(key).is_some() {
                return Err(PatternError::DuplicateKey(key));
            }
            registry.entries.push((key, value));
        }
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Keys joined for display in a prompt.
    pub fn options(&self) -> String {
        self.keys().join(", ")
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value)
    }

    pub fn resolve(&self, input: &str, policy: MatchPolicy) -> Result<(&'static str, &T)> {
        if input.is_empty() {
            return Err(PatternError::not_found(input));
        }

        if let Some((key, value)) = self.entries.iter().find(|(key, _)| *key == input) {
            debug!(input, key, "exact match");
            return Ok((*key, value));
        }

        if policy == MatchPolicy::Exact {
            return Err(PatternError::not_found(input));
        }

        let candidates: Vec<&(&'static str, T)> = self
            .entries
            .iter()
            .filter(|(key, _)| key.contains(input))
            .collect();

        match (policy, candidates.as_slice()) {
            (_, []) => Err(PatternError::not_found(input)),
            (MatchPolicy::UniqueSubstring, [_, _, ..]) => {
                let keys: Vec<&'static str> = candidates.iter().map(|(key, _)| *key).collect();
                warn!(input, ?keys, "ambiguous selection");
                Err(PatternError::ambiguous(input, keys))
            }
            (_, [.., (key, value)]) => {
                debug!(input, key, candidates = candidates.len(), "substring match");
                Ok((*key, value))
            }
        }
    }
}
