// Composition configuration.

use crate::DEFAULT_MAX_STATES;

/// Options for [`Fst::compose_with`](crate::Fst::compose_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeConfig {
    /// Trim the product, dropping states left dead by filter rejections.
    pub trim: bool,
    /// Abort once the product has more states than this.
    pub max_states: usize,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            trim: true,
            max_states: DEFAULT_MAX_STATES,
        }
    }
}

impl ComposeConfig {
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = max_states;
        self
    }
}
