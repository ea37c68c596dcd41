//! Delimiter-based N-Quads line scanning.
//!
//! This is a heuristic, not an N-Quads parser: it looks for `<...>` tokens
//! and never interprets literals, escapes, or blank nodes.

use crate::types::{is_iri, Triple};

/// The first three bracketed tokens of a line, borrowed from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spo<'a> {
    pub subject: &'a str,
    pub predicate: &'a str,
    pub object: &'a str,
}

impl Spo<'_> {
    pub fn object_is_iri(&self) -> bool {
        is_iri(self.object)
    }

    pub fn to_triple(&self) -> Triple {
        Triple::new(self.subject, self.predicate, self.object)
    }
}

/// Result of scanning one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan<'a> {
    Spo(Spo<'a>),
    /// Fewer than three bracketed tokens.
    Malformed,
}

/// Return the first three `<...>` tokens of `line` in order.
///
/// Everything after the third token is ignored. A quad with a literal
/// object therefore yields its graph tag as the object, and a literal
/// triple without a graph tag is `Malformed`.
pub fn extract_spo(line: &str) -> Scan<'_> {
    let mut tokens = [""; 3];
    let mut pos = 0;

    for slot in tokens.iter_mut() {
        let Some(start) = line[pos..].find('<').map(|i| pos + i) else {
            return Scan::Malformed;
        };
        let Some(end) = line[start..].find('>').map(|i| start + i) else {
            return Scan::Malformed;
        };
        *slot = &line[start..=end];
        pos = end + 1;
    }

    Scan::Spo(Spo {
        subject: tokens[0],
        predicate: tokens[1],
        object: tokens[2],
    })
}

/// Rewrite the graph tag of a raw line to `output_graph`.
///
/// Strips the ` .` terminator, drops the last bracketed token and appends
/// `output_graph` followed by ` .\n`. A line with no bracketed token gets
/// the graph appended as-is.
pub fn replace_graph(line: &str, output_graph: &str) -> String {
    let body = strip_terminator(line);
    let base = match last_bracketed(body) {
        Some((start, _)) => body[..start].trim_end(),
        None => body,
    };
    format!("{base} {output_graph} .\n")
}

/// The last bracketed token before the terminator, i.e. the graph tag of a
/// well-formed quad line.
pub fn graph_tag(line: &str) -> Option<&str> {
    let body = strip_terminator(line);
    last_bracketed(body).map(|(start, end)| &body[start..=end])
}

fn strip_terminator(line: &str) -> &str {
    let trimmed = line.trim_end();
    trimmed
        .strip_suffix(" .")
        .or_else(|| trimmed.strip_suffix('.'))
        .unwrap_or(trimmed)
        .trim_end()
}

/// Byte offsets of the last `>` and the closest `<` before it.
fn last_bracketed(s: &str) -> Option<(usize, usize)> {
    let end = s.rfind('>')?;
    let start = s[..end].rfind('<')?;
    Some((start, end))
}
