// crates/engine/src/tokenizer.rs
//! Python-style tokenizer adapter.
//!
//! Produces the ordered token stream the counter consumes: statement
//! terminators (`Newline`), non-logical newlines (`Nl`), comments, string
//! literals with their full line span, plain code tokens, and a final
//! `EndMarker` whose start line is one past the last source line.

use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

use crate::error::{EngineError, Result};
use crate::token::{Position, Token, TokenKind};

// PEP 263 coding cookie, honoured on the first two lines only.
static CODING_COOKIE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t\x0c]*#.*?coding[:=][ \t]*([-_.a-zA-Z0-9]+)").unwrap());

const OPS3: &[&str] = &["**=", "//=", ">>=", "<<=", "..."];
const OPS2: &[&str] = &[
    "**", "//", ">>", "<<", "<=", ">=", "==", "!=", "->", ":=", "+=", "-=", "*=", "/=", "%=",
    "&=", "|=", "^=", "@=",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (line {line})")]
pub struct TokenizeError {
    pub line: usize,
    pub message: String,
}

impl TokenizeError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Read, decode and tokenize a source file.
///
/// # Errors
///
/// Returns `SourceUnavailable` if the file cannot be read,
/// `InvalidEncoding`/`UnsupportedEncoding` if it cannot be decoded, and
/// `Tokenize` for malformed source such as an unterminated string literal.
pub fn tokenize_file(path: &Path) -> Result<Vec<Token>> {
    let bytes = fs::read(path).map_err(|source| EngineError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let source = decode(path, &bytes)?;
    tokenize(&source).map_err(|source| EngineError::Tokenize {
        path: path.to_path_buf(),
        source,
    })
}

fn decode(path: &Path, bytes: &[u8]) -> Result<String> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|_| EngineError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;
    if let Some(encoding) = declared_encoding(text)
        && !is_utf8_family(&encoding)
    {
        return Err(EngineError::UnsupportedEncoding {
            path: path.to_path_buf(),
            encoding,
        });
    }
    Ok(text.to_string())
}

fn declared_encoding(text: &str) -> Option<String> {
    text.lines()
        .take(2)
        .find_map(|line| CODING_COOKIE.captures(line).map(|c| c[1].to_string()))
}

fn is_utf8_family(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().replace('_', "-").as_str(),
        "utf-8" | "utf8" | "ascii" | "us-ascii"
    )
}

/// Tokenize already-decoded source text.
///
/// # Errors
///
/// Returns a [`TokenizeError`] for unterminated string literals.
pub fn tokenize(source: &str) -> std::result::Result<Vec<Token>, TokenizeError> {
    let lines: Vec<Vec<char>> = source.lines().map(|l| l.chars().collect()).collect();
    let mut tokenizer = Tokenizer {
        tokens: Vec::new(),
        depth: 0,
        logical_open: false,
    };

    let mut row = 0;
    let mut continued = false;
    while row < lines.len() {
        row = tokenizer.scan_line(&lines, row, &mut continued)?;
    }

    if tokenizer.logical_open {
        // Code on the last line with no trailing newline still terminates.
        let lnum = lines.len();
        let col = lines[lnum - 1].len() + 1;
        tokenizer.push(TokenKind::Newline, String::new(), lnum, col, lnum, col);
    }

    // A final line without a trailing newline gets an empty-text terminator,
    // as Python's tokenize does.
    if !source.ends_with('\n')
        && let Some(last) = tokenizer.tokens.last_mut()
        && matches!(last.kind, TokenKind::Newline | TokenKind::Nl)
    {
        last.text.clear();
    }

    let end = lines.len() + 1;
    tokenizer.push(TokenKind::EndMarker, String::new(), end, 1, end, 1);
    Ok(tokenizer.tokens)
}

struct Tokenizer {
    tokens: Vec<Token>,
    /// Bracket nesting depth; line ends inside brackets are non-logical.
    depth: usize,
    /// Code seen since the last statement terminator.
    logical_open: bool,
}

impl Tokenizer {
    fn push(
        &mut self,
        kind: TokenKind,
        text: String,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) {
        self.tokens.push(Token {
            kind,
            text,
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        });
    }

    /// Scan one physical line (more if a string literal spans further) and
    /// return the next row to scan.
    fn scan_line(
        &mut self,
        lines: &[Vec<char>],
        row: usize,
        continued: &mut bool,
    ) -> std::result::Result<usize, TokenizeError> {
        let mut row = row;
        let mut lnum = row + 1;
        let mut col = 0usize;
        let fresh = !*continued && self.depth == 0 && !self.logical_open;
        *continued = false;

        skip_whitespace(&lines[row], &mut col);

        if fresh {
            let line = &lines[row];
            if col >= line.len() || line[col] == '#' {
                // Blank or comment-only line.
                if col < line.len() {
                    self.push(
                        TokenKind::Comment,
                        collect(line, col, line.len()),
                        lnum,
                        col + 1,
                        lnum,
                        line.len() + 1,
                    );
                }
                let eol = line.len() + 1;
                self.push(TokenKind::Nl, "\n".to_string(), lnum, eol, lnum, eol);
                return Ok(row + 1);
            }
        }

        loop {
            let line = &lines[row];
            skip_whitespace(line, &mut col);
            if col >= line.len() {
                break;
            }
            let c = line[col];

            if c == '#' {
                self.push(
                    TokenKind::Comment,
                    collect(line, col, line.len()),
                    lnum,
                    col + 1,
                    lnum,
                    line.len() + 1,
                );
                col = line.len();
                break;
            }

            if c == '\\' && col + 1 == line.len() {
                // Explicit line joining.
                *continued = true;
                break;
            }

            if c == '"' || c == '\'' {
                let (new_row, new_col) = self.scan_string(lines, row, col, 0)?;
                if new_row != row {
                    row = new_row;
                    lnum = row + 1;
                }
                col = new_col;
                self.logical_open = true;
                continue;
            }

            if c.is_alphabetic() || c == '_' {
                let mut end = col;
                while end < line.len() && (line[end].is_alphanumeric() || line[end] == '_') {
                    end += 1;
                }
                let is_prefix = end - col <= 2
                    && line[col..end]
                        .iter()
                        .all(|p| matches!(p, 'r' | 'R' | 'b' | 'B' | 'u' | 'U' | 'f' | 'F'))
                    && end < line.len()
                    && (line[end] == '"' || line[end] == '\'');
                if is_prefix {
                    let (new_row, new_col) = self.scan_string(lines, row, col, end - col)?;
                    if new_row != row {
                        row = new_row;
                        lnum = row + 1;
                    }
                    col = new_col;
                } else {
                    self.push(
                        TokenKind::Name,
                        collect(line, col, end),
                        lnum,
                        col + 1,
                        lnum,
                        end + 1,
                    );
                    col = end;
                }
                self.logical_open = true;
                continue;
            }

            if c.is_ascii_digit()
                || (c == '.' && line.get(col + 1).is_some_and(char::is_ascii_digit))
            {
                let mut end = col + 1;
                while end < line.len()
                    && (line[end].is_ascii_alphanumeric() || line[end] == '_' || line[end] == '.')
                {
                    end += 1;
                }
                self.push(
                    TokenKind::Number,
                    collect(line, col, end),
                    lnum,
                    col + 1,
                    lnum,
                    end + 1,
                );
                col = end;
                self.logical_open = true;
                continue;
            }

            // Operator or delimiter.
            match c {
                '(' | '[' | '{' => self.depth += 1,
                ')' | ']' | '}' => self.depth = self.depth.saturating_sub(1),
                _ => {}
            }
            let len = operator_len(line, col);
            self.push(
                TokenKind::Op,
                collect(line, col, col + len),
                lnum,
                col + 1,
                lnum,
                col + len + 1,
            );
            col += len;
            self.logical_open = true;
        }

        let eol = lines[row].len() + 1;
        if *continued {
            // The joined line carries the terminator.
        } else if self.depth > 0 {
            self.push(TokenKind::Nl, "\n".to_string(), lnum, eol, lnum, eol);
        } else if self.logical_open {
            self.push(TokenKind::Newline, "\n".to_string(), lnum, eol, lnum, eol);
            self.logical_open = false;
        } else {
            self.push(TokenKind::Nl, "\n".to_string(), lnum, eol, lnum, eol);
        }
        Ok(row + 1)
    }

    /// Scan a string literal starting at `(row, col)`; `prefix_len` chars of
    /// prefix precede the opening quote. Returns the row and column right
    /// after the literal.
    fn scan_string(
        &mut self,
        lines: &[Vec<char>],
        row: usize,
        col: usize,
        prefix_len: usize,
    ) -> std::result::Result<(usize, usize), TokenizeError> {
        let start_row = row;
        let start_col = col;
        let line = &lines[row];
        let quote = line[col + prefix_len];
        let triple = line.len() >= col + prefix_len + 3
            && line[col + prefix_len + 1] == quote
            && line[col + prefix_len + 2] == quote;

        let mut row = row;
        let mut pos = col + prefix_len + if triple { 3 } else { 1 };
        let mut text = collect(line, col, pos);

        loop {
            let line = &lines[row];
            let mut hanging_escape = false;
            while pos < line.len() {
                let c = line[pos];
                if c == '\\' {
                    text.push(c);
                    pos += 1;
                    if pos < line.len() {
                        text.push(line[pos]);
                        pos += 1;
                    } else {
                        hanging_escape = true;
                    }
                    continue;
                }
                if c == quote {
                    if !triple {
                        text.push(c);
                        pos += 1;
                        self.push(
                            TokenKind::Str,
                            text,
                            start_row + 1,
                            start_col + 1,
                            row + 1,
                            pos + 1,
                        );
                        return Ok((row, pos));
                    }
                    if line.get(pos + 1) == Some(&quote) && line.get(pos + 2) == Some(&quote) {
                        for _ in 0..3 {
                            text.push(quote);
                        }
                        pos += 3;
                        self.push(
                            TokenKind::Str,
                            text,
                            start_row + 1,
                            start_col + 1,
                            row + 1,
                            pos + 1,
                        );
                        return Ok((row, pos));
                    }
                }
                text.push(c);
                pos += 1;
            }

            if triple {
                if row + 1 >= lines.len() {
                    return Err(TokenizeError::new(start_row + 1, "EOF in multi-line string"));
                }
            } else if hanging_escape {
                if row + 1 >= lines.len() {
                    return Err(TokenizeError::new(
                        row + 1,
                        "EOL while scanning string literal",
                    ));
                }
            } else {
                return Err(TokenizeError::new(
                    row + 1,
                    "EOL while scanning string literal",
                ));
            }
            text.push('\n');
            row += 1;
            pos = 0;
        }
    }
}

fn skip_whitespace(line: &[char], col: &mut usize) {
    while *col < line.len() && matches!(line[*col], ' ' | '\t' | '\x0c') {
        *col += 1;
    }
}

fn collect(line: &[char], from: usize, to: usize) -> String {
    line[from..to].iter().collect()
}

fn operator_len(line: &[char], col: usize) -> usize {
    if line.len() >= col + 3 {
        let three: String = collect(line, col, col + 3);
        if OPS3.contains(&three.as_str()) {
            return 3;
        }
    }
    if line.len() >= col + 2 {
        let two: String = collect(line, col, col + 2);
        if OPS2.contains(&two.as_str()) {
            return 2;
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn simple_statement() {
        assert_eq!(
            kinds("x = 1\n"),
            vec![
                TokenKind::Name,
                TokenKind::Op,
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn end_marker_is_one_past_the_last_line() {
        let tokens = tokenize("x = 1\ny = 2\n").unwrap();
        let end = tokens.last().unwrap();
        assert_eq!(end.kind, TokenKind::EndMarker);
        assert_eq!(end.start.line, 3);
    }

    #[test]
    fn empty_source_is_end_marker_only() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::EndMarker);
        assert_eq!(tokens[0].start.line, 1);
    }

    #[test]
    fn blank_line_is_a_non_logical_newline() {
        assert_eq!(
            kinds("x = 1\n\ny = 2\n"),
            vec![
                TokenKind::Name,
                TokenKind::Op,
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::Nl,
                TokenKind::Name,
                TokenKind::Op,
                TokenKind::Number,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn comment_only_line_yields_comment_then_nl() {
        let tokens = tokenize("# note\n").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Comment);
        assert_eq!(tokens[0].text, "# note");
        assert_eq!(tokens[1].kind, TokenKind::Nl);
        assert_eq!(tokens[1].start.line, 1);
    }

    #[test]
    fn trailing_comment_keeps_the_statement_terminator() {
        assert_eq!(
            kinds("x = 1  # note\n"),
            vec![
                TokenKind::Name,
                TokenKind::Op,
                TokenKind::Number,
                TokenKind::Comment,
                TokenKind::Newline,
                TokenKind::EndMarker,
            ]
        );
    }

    #[test]
    fn triple_quoted_string_carries_its_span() {
        let tokens = tokenize("\"\"\"doc\nstring\n\"\"\"\n").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].start.line, 1);
        assert_eq!(tokens[0].end.line, 3);
        assert!(tokens[0].text.starts_with("\"\"\""));
        assert_eq!(tokens[1].kind, TokenKind::Newline);
        assert_eq!(tokens[1].start.line, 3);
    }

    #[test]
    fn prefixed_string_keeps_the_prefix_in_its_text() {
        let tokens = tokenize("x = r'a\\b'\n").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert!(tokens[2].text.starts_with("r'"));
    }

    #[test]
    fn brackets_suppress_statement_terminators() {
        let tokens = tokenize("x = [1,\n     2]\n").unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        // Exactly one Newline, at the closing line; the inner line end is Nl.
        assert_eq!(
            kinds.iter().filter(|k| **k == TokenKind::Newline).count(),
            1
        );
        let nl = tokens.iter().find(|t| t.kind == TokenKind::Nl).unwrap();
        assert_eq!(nl.start.line, 1);
        let newline = tokens.iter().find(|t| t.kind == TokenKind::Newline).unwrap();
        assert_eq!(newline.start.line, 2);
    }

    #[test]
    fn backslash_joins_physical_lines() {
        let tokens = tokenize("x = \\\n    1\n").unwrap();
        let newlines: Vec<&Token> = tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Newline | TokenKind::Nl))
            .collect();
        assert_eq!(newlines.len(), 1);
        assert_eq!(newlines[0].kind, TokenKind::Newline);
        assert_eq!(newlines[0].start.line, 2);
    }

    #[test]
    fn missing_trailing_newline_still_terminates() {
        let tokens = tokenize("x = 1").unwrap();
        let newline = tokens.iter().find(|t| t.kind == TokenKind::Newline).unwrap();
        assert_eq!(newline.text, "");
        assert_eq!(newline.start.line, 1);
        assert_eq!(tokens.last().unwrap().start.line, 2);
    }

    #[test]
    fn escaped_quote_does_not_close_the_string() {
        let tokens = tokenize("x = 'a\\'b'\n").unwrap();
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert_eq!(tokens[2].text, "'a\\'b'");
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = tokenize("x = 'open\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("EOL"));
    }

    #[test]
    fn unterminated_triple_quote_is_an_error() {
        let err = tokenize("\"\"\"never closed\nstill open\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.contains("EOF"));
    }

    #[test]
    fn coding_cookie_detection() {
        assert_eq!(
            declared_encoding("# -*- coding: latin-1 -*-\nx = 1\n"),
            Some("latin-1".to_string())
        );
        assert_eq!(declared_encoding("x = 1\n# coding: latin-1\n"), None);
        assert_eq!(declared_encoding("x = 1\n"), None);
    }

    mod file_io {
        use super::super::*;
        use std::io::Write;

        fn temp_file(bytes: &[u8]) -> tempfile::NamedTempFile {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(bytes).unwrap();
            file
        }

        #[test]
        fn missing_file_is_source_unavailable() {
            let err = tokenize_file(Path::new("definitely/not/here.py")).unwrap_err();
            assert!(matches!(err, EngineError::SourceUnavailable { .. }));
        }

        #[test]
        fn utf8_bom_is_stripped() {
            let file = temp_file(b"\xef\xbb\xbfx = 1\n");
            let tokens = tokenize_file(file.path()).unwrap();
            assert_eq!(tokens[0].kind, TokenKind::Name);
            assert_eq!(tokens[0].text, "x");
        }

        #[test]
        fn invalid_utf8_is_rejected() {
            let file = temp_file(b"x = \xff\xfe\n");
            let err = tokenize_file(file.path()).unwrap_err();
            assert!(matches!(err, EngineError::InvalidEncoding { .. }));
        }

        #[test]
        fn declared_non_utf8_encoding_is_rejected() {
            let file = temp_file(b"# -*- coding: latin-1 -*-\nx = 1\n");
            let err = tokenize_file(file.path()).unwrap_err();
            match err {
                EngineError::UnsupportedEncoding { encoding, .. } => {
                    assert_eq!(encoding, "latin-1");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn declared_utf8_encoding_is_accepted() {
            let file = temp_file(b"# -*- coding: utf-8 -*-\nx = 1\n");
            assert!(tokenize_file(file.path()).is_ok());
        }
    }
}
