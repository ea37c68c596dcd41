//! Owned domain types shared by the expansion phases.

use std::collections::HashSet;

/// Set of bracketed IRI strings (e.g. `<http://example.org/a>`).
pub type NodeSet = HashSet<String>;

/// A subject-predicate-object statement, with the graph deliberately left out.
///
/// Used as the duplicate-suppression key: two quads in different graphs
/// with the same terms are the same `Triple`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(subject: &str, predicate: &str, object: &str) -> Self {
        Self {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.to_string(),
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

/// True when a term is written as a bracketed IRI rather than a literal.
pub fn is_iri(term: &str) -> bool {
    term.len() >= 2 && term.starts_with('<') && term.ends_with('>')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_identity_ignores_graph() {
        let mut seen = HashSet::new();
        seen.insert(Triple::new("<a>", "<p>", "<b>"));
        assert!(seen.contains(&Triple::new("<a>", "<p>", "<b>")));
        assert!(!seen.contains(&Triple::new("<a>", "<p>", "<c>")));
    }

    #[test]
    fn iri_shape() {
        assert!(is_iri("<http://example.org/a>"));
        assert!(!is_iri("\"literal\""));
        assert!(!is_iri("<"));
        assert!(!is_iri("<unterminated"));
    }
}
