//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use miette::{NamedSource, Report};
use serde_json::{Value, json};
use stylelens_syntax::diagnostics::Issue;
use stylelens_syntax::lexer;
use stylelens_syntax::tree::{NodeRef, SyntaxTree};

use crate::config::AnalysisConfig;
use crate::frontend::analysis::analyze;
use crate::symbols::{ScopeTree, Symbol, SymbolKind};

use super::{CliError, CliResult, ExitCode, Options};

/// Maximum source file size (100 MB).
///
/// Files larger than this are rejected to prevent out-of-memory conditions.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a source file with size validation.
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(path: &Path) -> CliResult<String> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io_error)?;
    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::TooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_SOURCE_SIZE,
        });
    }
    fs::read_to_string(path).map_err(io_error)
}

/// 1-based line and column (in characters) of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut col = 1;
    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

// ============================================================================
// check
// ============================================================================

/// Report the issues of every file. Exits with [`ExitCode::ISSUES`] if any file has one.
pub fn check_files(files: &[PathBuf], options: Options) -> CliResult<ExitCode> {
    let mut any_issues = false;
    let mut reports = Vec::new();
    for path in files {
        let source = read_source(path)?;
        let config = AnalysisConfig::new(options.dialect_for(path)?).with_scopes(false);
        let analysis = analyze(&source, &config);
        let issues = analysis.issues();
        any_issues |= !issues.is_empty();

        if options.json {
            reports.push(issues_json(path, &source, &issues));
            continue;
        }
        if issues.is_empty() {
            println!("✓ {}: no issues", path.display());
            continue;
        }
        for issue in &issues {
            eprintln!("{}", render_issue(path, &source, issue));
        }
        println!("✗ {}: {} issue(s)", path.display(), issues.len());
    }
    if options.json {
        println!("{}", serde_json::to_string_pretty(&Value::Array(reports))?);
    }
    Ok(if any_issues { ExitCode::ISSUES } else { ExitCode::SUCCESS })
}

/// Fancy miette rendering of one issue with its source context.
pub fn render_issue(path: &Path, source: &str, issue: &Issue) -> String {
    let report = Report::new(issue.clone())
        .with_source_code(NamedSource::new(path.display().to_string(), source.to_string()));
    format!("{report:?}")
}

pub fn issues_json(path: &Path, source: &str, issues: &[&Issue]) -> Value {
    let issues: Vec<Value> = issues
        .iter()
        .map(|issue| {
            let (line, column) = line_col(source, issue.span.start);
            json!({
                "code": issue.code.as_str(),
                "message": issue.message,
                "severity": issue.severity.to_string(),
                "kind": issue.kind.to_string(),
                "start": issue.span.start,
                "end": issue.span.end,
                "line": line,
                "column": column,
            })
        })
        .collect();
    json!({ "file": path.display().to_string(), "issues": issues })
}

// ============================================================================
// tree
// ============================================================================

pub fn print_tree(path: &Path, options: Options) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let config = AnalysisConfig::new(options.dialect_for(path)?).with_scopes(false);
    let analysis = analyze(&source, &config);
    if options.json {
        println!("{}", serde_json::to_string_pretty(&node_json(analysis.tree.root()))?);
    } else {
        print!("{}", analysis.tree.dump());
    }
    Ok(ExitCode::SUCCESS)
}

/// A node and its subtree as JSON. Leaves carry their text.
pub fn node_json(node: NodeRef<'_>) -> Value {
    let span = node.span();
    let mut value = json!({
        "kind": node.kind().as_str(),
        "start": span.start,
        "end": span.end,
    });
    if node.child_count() == 0 {
        value["text"] = json!(node.text());
    } else {
        value["children"] = Value::Array(node.children().map(node_json).collect());
    }
    if !node.issues().is_empty() {
        value["issues"] = json!(node.issues().iter().map(|i| i.code.as_str()).collect::<Vec<_>>());
    }
    value
}

// ============================================================================
// tokens
// ============================================================================

pub fn print_tokens(path: &Path, trivia: bool, options: Options) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    let lexed = lexer::lex(&source, options.dialect_for(path)?, trivia);
    if options.json {
        let tokens: Vec<Value> = lexed
            .tokens
            .iter()
            .map(|t| json!({ "kind": t.kind.name(), "start": t.span.start, "end": t.span.end, "text": t.text(&source) }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&Value::Array(tokens))?);
    } else {
        for token in &lexed.tokens {
            println!("{:<20} {:<10} {:?}", token.kind.name(), token.span.to_string(), token.text(&source));
        }
        for issue in &lexed.issues {
            eprintln!("{}", render_issue(path, &source, issue));
        }
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// symbols
// ============================================================================

/// List all declared symbols, or, with `offset`, the symbols visible there (nearest scope first).
pub fn print_symbols(
    path: &Path,
    offset: Option<usize>,
    kind: Option<SymbolKind>,
    options: Options,
) -> CliResult<ExitCode> {
    let source = read_source(path)?;
    if let Some(offset) = offset {
        if offset > source.len() || !source.is_char_boundary(offset) {
            return Err(CliError::InvalidOffset {
                path: path.to_path_buf(),
                offset,
                len: source.len(),
            });
        }
    }
    let analysis = analyze(&source, &AnalysisConfig::new(options.dialect_for(path)?));
    let Some(scopes) = analysis.scopes.as_ref() else {
        return Ok(ExitCode::SUCCESS);
    };
    let symbols = select_symbols(scopes, offset, kind);

    if options.json {
        let values: Vec<Value> = symbols.iter().map(|s| symbol_json(&analysis.tree, scopes, s)).collect();
        println!("{}", serde_json::to_string_pretty(&Value::Array(values))?);
    } else {
        for symbol in &symbols {
            let (line, column) = line_col(&source, symbol.name_span.start);
            let value = symbol.value_text(&analysis.tree).map(|v| format!(" = {v}")).unwrap_or_default();
            println!("{:<10} {}{} ({}:{})", symbol.kind.as_str(), symbol.name, value, line, column);
        }
    }
    Ok(ExitCode::SUCCESS)
}

pub fn select_symbols(scopes: &ScopeTree, offset: Option<usize>, kind: Option<SymbolKind>) -> Vec<&Symbol> {
    match offset {
        Some(offset) => scopes.find_symbols_at_offset(offset, kind),
        None => scopes
            .symbols()
            .iter()
            .filter(|s| kind.is_none_or(|k| k == s.kind))
            .collect(),
    }
}

fn symbol_json(tree: &SyntaxTree, scopes: &ScopeTree, symbol: &Symbol) -> Value {
    let scope = scopes.scope(symbol.scope);
    json!({
        "name": symbol.name,
        "kind": symbol.kind.as_str(),
        "start": symbol.name_span.start,
        "end": symbol.name_span.end,
        "value": symbol.value_text(tree),
        "scope": { "start": scope.span.start, "end": scope.span.end },
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use stylelens_core::lang::dialect::Dialect;
    use stylelens_syntax::parser;

    #[test]
    fn test_line_col() {
        let source = "a\nbc\n\u{e9}d";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 3), (2, 2));
        // `d` follows a two-byte character
        assert_eq!(line_col(source, 7), (3, 2));
        assert_eq!(line_col(source, 100), (3, 3));
    }

    #[test]
    fn test_issues_json_shape() {
        let source = ".a {\n  color: red";
        let tree = parser::parse(source, Dialect::Css);
        let value = issues_json(Path::new("a.css"), source, &tree.issues());
        assert_eq!(value["file"], "a.css");
        let issues = value["issues"].as_array().unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0]["code"], "css(rcurly-expected)");
        assert_eq!(issues[0]["kind"], "syntax error");
        assert_eq!(issues[0]["line"], 2);
    }

    #[test]
    fn test_node_json_leaves_carry_text() {
        let tree = parser::parse(".a { color: red; }", Dialect::Css);
        let value = node_json(tree.root());
        assert_eq!(value["kind"], "Stylesheet");
        let rule = &value["children"][0];
        assert_eq!(rule["kind"], "RuleSet");
        assert_eq!(rule["children"][0]["children"][0]["children"][0]["text"], ".a");
        assert!(rule.get("text").is_none());
    }

    #[test]
    fn test_render_issue_mentions_code() {
        let source = ".a { color: red";
        let tree = parser::parse(source, Dialect::Css);
        let rendered = render_issue(Path::new("a.css"), source, tree.issues()[0]);
        assert!(rendered.contains("css(rcurly-expected)"), "{rendered}");
    }

    #[test]
    fn test_select_symbols() {
        let source = "$a: 1; @mixin m { $b: 2; }";
        let tree = parser::parse(source, Dialect::Scss);
        let scopes = ScopeTree::build(&tree);
        let all: Vec<_> = select_symbols(&scopes, None, None).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(all, vec!["$a", "m", "$b"]);
        let mixins: Vec<_> = select_symbols(&scopes, None, Some(SymbolKind::Mixin))
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(mixins, vec!["m"]);
        let at_top = select_symbols(&scopes, Some(0), Some(SymbolKind::Variable));
        assert_eq!(at_top.len(), 1);
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/nonexistent/stylelens/x.css")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert_eq!(err.exit_code(), ExitCode::FAILURE);
    }
}
