//! Parse and highlight options.
//!
//! Both option sets are small `Copy` values with builder-style setters. The defaults reproduce the full behavior:
//! comments are attached to statements, generic argument lists are tried speculatively, nothing is capped and
//! every highlight category is emitted.

/// Options for [`parse_with`](crate::parse_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Attach comments to neighbouring statements as leading/trailing trivia. When off, every comment becomes a
    /// standalone `Comment` node.
    pub attach_comments: bool,
    /// Try `name<...>` as a generic argument list when `name` is a type or template.
    pub speculate_generics: bool,
    /// Stop recording errors after this many. Parsing still runs to the end of input.
    pub max_errors: Option<usize>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            attach_comments: true,
            speculate_generics: true,
            max_errors: None,
        }
    }
}

impl ParseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach_comments(mut self, on: bool) -> Self {
        self.attach_comments = on;
        self
    }

    pub fn speculate_generics(mut self, on: bool) -> Self {
        self.speculate_generics = on;
        self
    }

    pub fn max_errors(mut self, max: usize) -> Self {
        self.max_errors = Some(max);
        self
    }
}

/// Which categories [`highlight_with`](crate::highlight_with) emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightConfig {
    pub comments: bool,
    pub operators: bool,
    /// Keywords and modifiers (storage/visibility keywords).
    pub keywords: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            comments: true,
            operators: true,
            keywords: true,
        }
    }
}

impl HighlightConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comments(mut self, on: bool) -> Self {
        self.comments = on;
        self
    }

    pub fn operators(mut self, on: bool) -> Self {
        self.operators = on;
        self
    }

    pub fn keywords(mut self, on: bool) -> Self {
        self.keywords = on;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let parse = ParseConfig::default();
        assert!(parse.attach_comments && parse.speculate_generics);
        assert_eq!(parse.max_errors, None);
        let hl = HighlightConfig::default();
        assert!(hl.comments && hl.operators && hl.keywords);
    }

    #[test]
    fn builders_chain() {
        let parse = ParseConfig::new().attach_comments(false).max_errors(3);
        assert!(!parse.attach_comments);
        assert_eq!(parse.max_errors, Some(3));
        let hl = HighlightConfig::new().operators(false);
        assert!(!hl.operators && hl.comments);
    }
}
