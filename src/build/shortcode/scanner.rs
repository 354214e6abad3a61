//! Locates shortcode invocations in raw text.
//!
//! Grammar:
//!
//! ```text
//! invocation := "{{<" ws* keyword attrs "/"? ws* ">}}"
//! keyword    := (letter | "_") (letter | digit | "_")*
//! attrs      := any text up to the first ">}}"
//! ```
//!
//! The scan is a single left-to-right pass. Attribute text is never
//! scanned for nested invocations, and text that does not form a complete
//! invocation is left alone.

use std::ops::Range;

const OPEN: &str = "{{<";
const CLOSE: &str = ">}}";

/// One shortcode occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Component keyword
    pub name: &'a str,
    /// Attribute text without the surrounding whitespace or self-closing `/`
    pub raw_params: &'a str,
    /// Byte range of the whole invocation in the scanned text
    pub span: Range<usize>,
}

/// Iterator over the invocations in a text, left to right.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    /// Start of the last close delimiter; no open after it can match.
    last_close: Option<usize>,
}

/// Scan `text` for invocations. Call again to restart.
pub fn scan(text: &str) -> Scanner<'_> {
    Scanner {
        text,
        pos: 0,
        last_close: text.rfind(CLOSE),
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Invocation<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(offset) = self.text[self.pos..].find(OPEN) {
            let start = self.pos + offset;
            if let Some(invocation) = match_at(self.text, start) {
                self.pos = invocation.span.end;
                return Some(invocation);
            }
            match self.last_close {
                Some(close) if close > start => {}
                _ => break,
            }
            self.pos = start + 1;
        }
        self.pos = self.text.len();
        None
    }
}

/// Try to match an invocation whose open delimiter starts at `start`.
fn match_at(text: &str, start: usize) -> Option<Invocation<'_>> {
    let after_open = start + OPEN.len();
    let name_start = after_open + leading_whitespace(&text[after_open..]);

    let rest = &text[name_start..];
    let mut chars = rest.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_alphabetic() || c == '_' => {}
        _ => return None,
    }
    let name_len = chars
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
        .map_or(rest.len(), |(idx, _)| idx);
    let name_end = name_start + name_len;

    let close = name_end + text[name_end..].find(CLOSE)?;

    let raw = text[name_end..close].trim_end();
    let raw = raw.strip_suffix('/').unwrap_or(raw).trim();

    Some(Invocation {
        name: &text[name_start..name_end],
        raw_params: raw,
        span: start..close + CLOSE.len(),
    })
}

fn leading_whitespace(s: &str) -> usize {
    s.len() - s.trim_start().len()
}
