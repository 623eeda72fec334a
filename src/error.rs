use std::io;

use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("no entry matches '{input}'")]
    NotFound { input: String },

    #[error("'{input}' is ambiguous, it matches: {}", candidates.iter().join(", "))]
    Ambiguous {
        input: String,
        candidates: Vec<&'static str>,
    },

    #[error("duplicate registry key '{0}'")]
    DuplicateKey(&'static str),

    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl PatternError {
    pub fn not_found(input: impl Into<String>) -> Self {
        Self::NotFound {
            input: input.into(),
        }
    }

    pub fn ambiguous(input: impl Into<String>, candidates: Vec<&'static str>) -> Self {
        Self::Ambiguous {
            input: input.into(),
            candidates,
        }
    }

    /// True for failures caused by an unmatched selection, which end the
    /// current menu level instead of the whole program.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Ambiguous { .. })
    }
}

pub type Result<T, E = PatternError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failures() {
        assert!(PatternError::not_found("x").is_lookup_failure());
        assert!(PatternError::ambiguous("a", vec!["ab", "ac"]).is_lookup_failure());
        assert!(!PatternError::DuplicateKey("a").is_lookup_failure());

        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "closed");
        assert!(!PatternError::from(io_err).is_lookup_failure());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            PatternError::not_found("xyz").to_string(),
            "no entry matches 'xyz'"
        );
        assert_eq!(
            PatternError::ambiguous("o", vec!["foo", "boo"]).to_string(),
            "'o' is ambiguous, it matches: foo, boo"
        );
    }
}
