//! Analysis configuration.
//!
//! Hosts build one [`AnalysisConfig`] per document: the dialect usually comes from the file extension or the editor's
//! language identifier.

use std::path::Path;

use stylelens_core::lang::dialect::Dialect;

/// Options for [`crate::frontend::analysis::analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Grammar to parse with.
    pub dialect: Dialect,
    /// Build the scope tree after parsing
    pub build_scopes: bool,
    /// Keep at most this many issues in the result (`None` keeps all)
    pub max_issues: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Css,
            build_scopes: true,
            max_issues: None,
        }
    }
}

impl AnalysisConfig {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    /// Config for a file, with the dialect taken from its extension.
    ///
    /// ## Returns
    /// - `None` if the extension is not `.css`, `.scss` or `.less`.
    pub fn for_path(path: &Path) -> Option<Self> {
        Dialect::from_path(path).map(Self::new)
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_scopes(mut self, build_scopes: bool) -> Self {
        self.build_scopes = build_scopes;
        self
    }

    pub fn with_max_issues(mut self, max_issues: usize) -> Self {
        self.max_issues = Some(max_issues);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.dialect, Dialect::Css);
        assert!(config.build_scopes);
        assert_eq!(config.max_issues, None);
    }

    #[test]
    fn test_builder_chain() {
        let config = AnalysisConfig::new(Dialect::Less).with_scopes(false).with_max_issues(10);
        assert_eq!(config.dialect, Dialect::Less);
        assert!(!config.build_scopes);
        assert_eq!(config.max_issues, Some(10));
    }

    #[test]
    fn test_config_for_path() {
        assert_eq!(
            AnalysisConfig::for_path(Path::new("theme/_vars.scss")).map(|c| c.dialect),
            Some(Dialect::Scss)
        );
        assert!(AnalysisConfig::for_path(Path::new("notes.txt")).is_none());
    }
}
