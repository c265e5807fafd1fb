//! Parser configuration.

/// Default limit for recursive expression nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Parser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum recursion depth for nested groups, prefix chains and right-associative chains
    pub max_nesting_depth: usize,
    /// When to run the parenthesizer before precedence climbing
    pub normalization: Normalization,
    /// Whether to collapse single-child `expression` / `subexpression` wrappers
    pub simplify: bool,
}

/// When an expression range is normalized by the parenthesizer first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Parse the token range as written.
    Never,
    /// Always parenthesize first.
    Always,
    /// Parenthesize only ranges that contain a bracketed postfix construct (`f(..)`, `a[..]`, `T{..}`).
    #[default]
    Auto,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            normalization: Normalization::Auto,
            simplify: true,
        }
    }
}

impl ParseConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Set the normalization mode
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Enable or disable wrapper simplification
    pub fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }
}
