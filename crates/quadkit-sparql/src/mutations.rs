//! SPARQL 1.1 Update operations: `LOAD` and `DROP GRAPH`.

use crate::client::{SparqlClient, SparqlError};

/// `LOAD <uri>` or `LOAD <uri> INTO GRAPH <graph>`.
pub fn load_query(file_uri: &str, graph: Option<&str>) -> String {
    match graph {
        Some(g) => format!("LOAD {} INTO GRAPH {}", bracket(file_uri), bracket(g)),
        None => format!("LOAD {}", bracket(file_uri)),
    }
}

/// `DROP GRAPH <graph>`.
pub fn drop_graph_query(graph: &str) -> String {
    format!("DROP GRAPH {}", bracket(graph))
}

/// Wrap an IRI in angle brackets, accepting input that already has them.
pub(crate) fn bracket(iri: &str) -> String {
    let bare = iri.trim();
    let bare = bare.strip_prefix('<').unwrap_or(bare);
    let bare = bare.strip_suffix('>').unwrap_or(bare);
    format!("<{bare}>")
}

impl SparqlClient {
    /// Ask the endpoint to fetch and load `file_uri`, optionally into `graph`.
    pub async fn load(&self, file_uri: &str, graph: Option<&str>) -> Result<String, SparqlError> {
        let update = load_query(file_uri, graph);
        tracing::info!(file_uri, graph, "Issuing LOAD");
        self.update(&update).await
    }

    /// Drop one named graph.
    pub async fn drop_graph(&self, graph: &str) -> Result<String, SparqlError> {
        tracing::info!(graph, "Issuing DROP GRAPH");
        self.update(&drop_graph_query(graph)).await
    }
}
