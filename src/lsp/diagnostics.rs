//! Convert stylelens issues to LSP diagnostics, and byte offsets to LSP positions

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

use stylelens_syntax::diagnostics::{Issue, Severity};

/// Convert a byte offset to an LSP Position (0-based line, UTF-16 character)
pub fn offset_to_position(source: &str, offset: usize) -> Position {
    let offset = offset.min(source.len());
    let mut line = 0u32;
    let mut col = 0u32;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 0;
        } else {
            col += c.len_utf16() as u32;
        }
    }

    Position::new(line, col)
}

/// Convert an LSP Position to a byte offset.
///
/// Returns `None` if the line does not exist. A character past the end of its line clamps to the line end.
pub fn position_to_offset(source: &str, position: Position) -> Option<usize> {
    let mut line_start = 0usize;
    for _ in 0..position.line {
        let newline = source[line_start..].find('\n')?;
        line_start += newline + 1;
    }
    let line = &source[line_start..];
    let line_end = line.find('\n').unwrap_or(line.len());

    let mut col = 0u32;
    for (i, c) in line[..line_end].char_indices() {
        if col >= position.character {
            return Some(line_start + i);
        }
        col += c.len_utf16() as u32;
    }
    Some(line_start + line_end)
}

/// Convert a byte span to an LSP Range
pub fn span_to_range(source: &str, start: usize, end: usize) -> Range {
    Range::new(offset_to_position(source, start), offset_to_position(source, end.max(start)))
}

fn severity_to_lsp(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Info => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    }
}

/// Convert an Issue to an LSP Diagnostic
pub fn issue_to_diagnostic(issue: &Issue, source: &str) -> Diagnostic {
    let mut message = issue.message.clone();
    for note in &issue.notes {
        message.push_str("\n\nnote: ");
        message.push_str(note);
    }

    Diagnostic {
        range: span_to_range(source, issue.span.start, issue.span.end),
        severity: Some(severity_to_lsp(issue.severity)),
        code: Some(NumberOrString::String(issue.code.as_str().to_string())),
        code_description: None,
        source: Some("stylelens".to_string()),
        message,
        related_information: None,
        tags: None,
        data: None,
    }
}
