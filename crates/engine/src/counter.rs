// crates/engine/src/counter.rs
//! Single-pass line counting over a token stream.
//!
//! Logical lines are driven entirely by statement terminators. Physical
//! lines are the raw line number of the terminal token minus deductions
//! accumulated for blank lines, comment-only lines and docstrings. The
//! first line crossing a configured limit is latched during the same pass,
//! so no second scan is ever needed.

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::options::CountMode;
use crate::token::{Token, TokenKind};

/// Final counts for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineCounts {
    pub logical: usize,
    pub physical: usize,
    /// First line at which the mode-relevant count exceeded the limit.
    pub leak_line: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LimitStatus {
    NotReached,
    Reached,
}

/// Counting state for one request. Fed tokens left to right, finished once.
#[derive(Debug)]
pub struct LineCounter {
    mode: CountMode,
    limit: Option<usize>,
    logical: i64,
    deductions: i64,
    limit_status: LimitStatus,
    leak_line: Option<usize>,
    prev_kind: Option<TokenKind>,
    prev_line: Option<usize>,
    last_line: Option<usize>,
}

impl LineCounter {
    #[must_use]
    pub fn new(mode: CountMode, limit: Option<usize>) -> Self {
        Self {
            mode,
            limit,
            logical: 0,
            deductions: 0,
            limit_status: LimitStatus::NotReached,
            leak_line: None,
            prev_kind: None,
            prev_line: None,
            last_line: None,
        }
    }

    /// Advance the counter by one token.
    pub fn feed(&mut self, token: &Token) {
        let line = token.start.line;
        // Running estimate of the physical line, before this token's own
        // deduction lands.
        let physical_here = line as i64 - self.deductions;

        match token.kind {
            TokenKind::Newline => self.logical += 1,
            TokenKind::Nl if self.prev_line != Some(line) => self.deductions += 1,
            TokenKind::Comment | TokenKind::EndMarker => self.deductions += 1,
            TokenKind::Str
                if is_triple_quoted(&token.text) && self.prev_kind != Some(TokenKind::Op) =>
            {
                // Docstring position: the terminator that follows would
                // otherwise count it as a logical line.
                self.logical -= 1;
                let span = token.end.line.saturating_sub(token.start.line) as i64;
                self.deductions += if span == 0 { 1 } else { span + 1 };
            }
            _ => {}
        }

        if self.limit_status == LimitStatus::NotReached
            && let Some(limit) = self.limit
        {
            let running = match self.mode {
                CountMode::Logical => self.logical,
                CountMode::Physical => physical_here,
            };
            // A crossing is only ever attributed to a token that represents
            // real code, never to whitespace/comment/string bookkeeping.
            let is_code = !matches!(
                token.kind,
                TokenKind::Nl | TokenKind::Comment | TokenKind::Str
            );
            if running > limit as i64 && is_code {
                self.limit_status = LimitStatus::Reached;
                self.leak_line = Some(line);
            }
        }

        self.prev_kind = Some(token.kind);
        self.prev_line = Some(line);
        self.last_line = Some(line);
    }

    /// Consume the counter and produce the final counts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyInput`] if no token was ever fed; without
    /// a terminal token there is no last line to count from.
    pub fn finish(self) -> Result<LineCounts> {
        let last_line = self.last_line.ok_or(EngineError::EmptyInput)?;
        let physical = last_line as i64 - self.deductions;
        Ok(LineCounts {
            logical: clamp_count(self.logical),
            physical: clamp_count(physical),
            leak_line: self.leak_line,
        })
    }
}

/// Count `tokens` in a single left-to-right pass.
///
/// `limit` of `None` disables limit checking; only the counts are produced.
///
/// # Errors
///
/// Returns [`EngineError::EmptyInput`] for a completely empty token sequence.
pub fn count(tokens: &[Token], mode: CountMode, limit: Option<usize>) -> Result<LineCounts> {
    let mut counter = LineCounter::new(mode, limit);
    for token in tokens {
        counter.feed(token);
    }
    counter.finish()
}

fn is_triple_quoted(text: &str) -> bool {
    text.starts_with("\"\"\"") || text.starts_with("'''")
}

fn clamp_count(n: i64) -> usize {
    usize::try_from(n).unwrap_or(0)
}
