use crate::registry::MatchPolicy;

pub const DEFAULT_SEPARATOR_WIDTH: usize = 120;

/// Knobs shared by every menu level of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Matching used by category and pattern menus. Sub-menus inside a demo always match exactly.
    pub match_policy: MatchPolicy,
    pub separator_width: usize,
    /// Keep factory-method creators alive between selections instead of rebuilding them.
    pub cache_creators: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::LastSubstring,
            separator_width: DEFAULT_SEPARATOR_WIDTH,
            cache_creators: false,
        }
    }
}

impl Settings {
    pub fn with_match_policy(mut self, policy: MatchPolicy) -> Self {
        self.match_policy = policy;
        self
    }

    pub fn with_separator_width(mut self, width: usize) -> Self {
        self.separator_width = width;
        self
    }

    pub fn with_cached_creators(mut self, cache: bool) -> Self {
        self.cache_creators = cache;
        self
    }

    pub fn separator(&self) -> String {
        "-".repeat(self.separator_width)
    }
}
