//! Issues recorded while scanning and parsing.
//!
//! Nothing in this crate returns `Err` for bad input. Problems become [`Issue`] values: attached to the node that was
//! under construction when they were detected, and also available as one ordered list from
//! [`crate::tree::SyntaxTree::issues`].
//!
//! [`Issue`] implements [`miette::Diagnostic`], so hosts can render it with source context:
//!
//! ```rust
//! use stylelens_syntax::ast::Span;
//! use stylelens_syntax::diagnostics::{Issue, IssueCode};
//!
//! let issue = Issue::syntax(IssueCode::SemicolonExpected, Span::new(4, 5));
//! assert_eq!(issue.to_string(), "semi-colon expected");
//! assert_eq!(issue.code.as_str(), "css(semicolon-expected)");
//! ```

use std::fmt;

use miette::{LabeledSpan, SourceSpan};

use crate::ast::Span;

/// How bad an issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Hint,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Hint => write!(f, "hint"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Which stage detected the issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Scanner: unterminated strings and comments.
    Lexical,
    /// Parser: missing or unexpected tokens.
    Syntax,
    /// Reserved for layers built on top of the tree (linters, validators).
    Semantic,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Lexical => write!(f, "lexical error"),
            IssueKind::Syntax => write!(f, "syntax error"),
            IssueKind::Semantic => write!(f, "semantic warning"),
        }
    }
}

/// Stable issue codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueCode {
    // Lexical
    UnterminatedString,
    UnterminatedComment,

    // Punctuation
    SemicolonExpected,
    ColonExpected,
    CommaExpected,
    LeftCurlyExpected,
    RightCurlyExpected,
    LeftParenthesisExpected,
    RightParenthesisExpected,
    RightSquareBracketExpected,

    // Structure
    RuleOrSelectorExpected,
    SelectorExpected,
    UnknownAtRule,
    AtRuleNotAllowed,

    // Values
    PropertyValueExpected,
    TermExpected,
    ExpressionExpected,
    OperatorExpected,
    IdentifierExpected,
    NumberExpected,
    PercentageExpected,
    UriExpected,
    UriOrStringExpected,
    StringLiteralExpected,

    // At-rule preludes
    MediaQueryExpected,
    ConditionExpected,
    KeyframeSelectorExpected,
    PageDirectiveOrDeclarationExpected,

    // Preprocessor constructs
    VariableNameExpected,
    VariableValueExpected,
    FromExpected,
    ThroughOrToExpected,
    InExpected,
    DollarSignExpected,
}

impl IssueCode {
    /// Machine-readable code, shown by the CLI and sent to editors.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCode::UnterminatedString => "css(unterminated-string)",
            IssueCode::UnterminatedComment => "css(unterminated-comment)",
            IssueCode::SemicolonExpected => "css(semicolon-expected)",
            IssueCode::ColonExpected => "css(colon-expected)",
            IssueCode::CommaExpected => "css(comma-expected)",
            IssueCode::LeftCurlyExpected => "css(lcurly-expected)",
            IssueCode::RightCurlyExpected => "css(rcurly-expected)",
            IssueCode::LeftParenthesisExpected => "css(lparent-expected)",
            IssueCode::RightParenthesisExpected => "css(rparent-expected)",
            IssueCode::RightSquareBracketExpected => "css(rbracket-expected)",
            IssueCode::RuleOrSelectorExpected => "css(rule-or-selector-expected)",
            IssueCode::SelectorExpected => "css(selector-expected)",
            IssueCode::UnknownAtRule => "css(unknown-at-rule)",
            IssueCode::AtRuleNotAllowed => "css(at-rule-not-allowed)",
            IssueCode::PropertyValueExpected => "css(property-value-expected)",
            IssueCode::TermExpected => "css(term-expected)",
            IssueCode::ExpressionExpected => "css(expression-expected)",
            IssueCode::OperatorExpected => "css(operator-expected)",
            IssueCode::IdentifierExpected => "css(identifier-expected)",
            IssueCode::NumberExpected => "css(number-expected)",
            IssueCode::PercentageExpected => "css(percentage-expected)",
            IssueCode::UriExpected => "css(uri-expected)",
            IssueCode::UriOrStringExpected => "css(uri-or-string-expected)",
            IssueCode::StringLiteralExpected => "css(string-literal-expected)",
            IssueCode::MediaQueryExpected => "css(media-query-expected)",
            IssueCode::ConditionExpected => "css(condition-expected)",
            IssueCode::KeyframeSelectorExpected => "css(keyframe-selector-expected)",
            IssueCode::PageDirectiveOrDeclarationExpected => "css(page-directive-or-declaration-expected)",
            IssueCode::VariableNameExpected => "css(variable-name-expected)",
            IssueCode::VariableValueExpected => "css(variable-value-expected)",
            IssueCode::FromExpected => "css(from-expected)",
            IssueCode::ThroughOrToExpected => "css(through-or-to-expected)",
            IssueCode::InExpected => "css(in-expected)",
            IssueCode::DollarSignExpected => "css(dollar-sign-expected)",
        }
    }

    /// Default human-readable message.
    pub fn message(self) -> &'static str {
        match self {
            IssueCode::UnterminatedString => "unterminated string",
            IssueCode::UnterminatedComment => "unterminated comment",
            IssueCode::SemicolonExpected => "semi-colon expected",
            IssueCode::ColonExpected => "colon expected",
            IssueCode::CommaExpected => "comma expected",
            IssueCode::LeftCurlyExpected => "{ expected",
            IssueCode::RightCurlyExpected => "} expected",
            IssueCode::LeftParenthesisExpected => "( expected",
            IssueCode::RightParenthesisExpected => ") expected",
            IssueCode::RightSquareBracketExpected => "] expected",
            IssueCode::RuleOrSelectorExpected => "at-rule or selector expected",
            IssueCode::SelectorExpected => "selector expected",
            IssueCode::UnknownAtRule => "unknown at-rule",
            IssueCode::AtRuleNotAllowed => "at-rule not allowed here",
            IssueCode::PropertyValueExpected => "property value expected",
            IssueCode::TermExpected => "term expected",
            IssueCode::ExpressionExpected => "expression expected",
            IssueCode::OperatorExpected => "operator expected",
            IssueCode::IdentifierExpected => "identifier expected",
            IssueCode::NumberExpected => "number expected",
            IssueCode::PercentageExpected => "percentage expected",
            IssueCode::UriExpected => "URI expected",
            IssueCode::UriOrStringExpected => "URI or string expected",
            IssueCode::StringLiteralExpected => "string literal expected",
            IssueCode::MediaQueryExpected => "media query expected",
            IssueCode::ConditionExpected => "condition expected",
            IssueCode::KeyframeSelectorExpected => "keyframe selector expected",
            IssueCode::PageDirectiveOrDeclarationExpected => "page directive or declaration expected",
            IssueCode::VariableNameExpected => "variable name expected",
            IssueCode::VariableValueExpected => "variable value expected",
            IssueCode::FromExpected => "'from' expected",
            IssueCode::ThroughOrToExpected => "'through' or 'to' expected",
            IssueCode::InExpected => "'in' expected",
            IssueCode::DollarSignExpected => "'$' expected",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded, non-fatal problem.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct Issue {
    pub message: String,
    pub span: Span,
    pub severity: Severity,
    pub kind: IssueKind,
    pub code: IssueCode,
    pub notes: Vec<String>,
}

impl Issue {
    pub fn new(code: IssueCode, kind: IssueKind, span: Span) -> Self {
        Self {
            message: code.message().to_string(),
            span,
            severity: Severity::Error,
            kind,
            code,
            notes: Vec::new(),
        }
    }

    pub fn lexical(code: IssueCode, span: Span) -> Self {
        Self::new(code, IssueKind::Lexical, span)
    }

    pub fn syntax(code: IssueCode, span: Span) -> Self {
        Self::new(code, IssueKind::Syntax, span)
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl miette::Diagnostic for Issue {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code.as_str()))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
            Severity::Info | Severity::Hint => miette::Severity::Advice,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        if self.notes.is_empty() {
            None
        } else {
            Some(Box::new(self.notes.join("\n")))
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::from(self.span.start..self.span.end);
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.kind.to_string()),
            span,
        ))))
    }
}
