//! Parse configuration.

/// How the walker tracks the group that receives new paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupNesting {
    /// One "current group" cursor: a nested group replaces it, and closing
    /// tags never restore an outer group.
    #[default]
    Flat,
    /// Closing a group restores the enclosing one; closing the outermost
    /// group sends later paths back to the root list.
    Stack,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub group_nesting: GroupNesting,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_nesting(mut self, group_nesting: GroupNesting) -> Self {
        self.group_nesting = group_nesting;
        self
    }
}
