//! Fixed vocabulary used by the expansion pipeline.
//!
//! The allow-list mixes the ICA Records in Contexts ontology (RiC-O) with
//! the project-local `bodi` ontology. It is not configurable at runtime.

use std::collections::HashSet;

/// Graph every emitted quad is rewritten into.
pub const OUTPUT_GRAPH: &str = "<http://ficlit.unibo.it/ArchivioEvangelisti/revision_safe>";

/// Predicates followed one hop from an existing subject to discover linked resources.
pub const FOLLOW_PREDICATES: [&str; 14] = [
    "<https://www.ica.org/standards/RiC/ontology#hasOrHadInstantiation>",
    "<http://w3id.org/bodi#hasTechnicalMetadata>",
    "<http://w3id.org/bodi#hasTechnicalMetadataType>",
    "<http://w3id.org/bodi#hasTechnicalDescription>",
    "<http://w3id.org/bodi#generatedBy>",
    "<https://www.ica.org/standards/RiC/ontology#isRelatedTo>",
    "<http://w3id.org/bodi#hasSameHashCodeAs>",
    "<http://w3id.org/bodi#hasHashCode>",
    "<https://www.ica.org/standards/RiC/ontology#isOrWasPerformedBy>",
    "<https://www.ica.org/standards/RiC/ontology#occurredAtDate>",
    "<https://www.ica.org/standards/RiC/ontology#hasExtent>",
    "<http://w3id.org/bodi#hasOrHadSupervisor>",
    "<http://w3id.org/bodi#hasHumanValidation>",
    "<https://www.ica.org/standards/RiC/ontology#isOrWasPartOf>",
];

/// Immutable set of predicates the discover phase is allowed to follow.
#[derive(Debug, Clone)]
pub struct AllowList {
    predicates: HashSet<&'static str>,
}

impl AllowList {
    /// The built-in RiC/bodi allow-list.
    pub fn standard() -> Self {
        Self {
            predicates: FOLLOW_PREDICATES.iter().copied().collect(),
        }
    }

    pub fn contains(&self, predicate: &str) -> bool {
        self.predicates.contains(predicate)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_allow_list_has_all_predicates() {
        let allow = AllowList::standard();
        assert_eq!(allow.len(), 14);
        assert!(allow.contains("<http://w3id.org/bodi#hasTechnicalMetadata>"));
        assert!(allow.contains("<https://www.ica.org/standards/RiC/ontology#isOrWasPartOf>"));
    }

    #[test]
    fn unbracketed_or_unknown_predicates_are_rejected() {
        let allow = AllowList::standard();
        assert!(!allow.contains("http://w3id.org/bodi#hasTechnicalMetadata"));
        assert!(!allow.contains("<http://www.w3.org/1999/02/22-rdf-syntax-ns#type>"));
    }

    #[test]
    fn output_graph_is_bracketed() {
        assert!(OUTPUT_GRAPH.starts_with('<') && OUTPUT_GRAPH.ends_with('>'));
    }
}
