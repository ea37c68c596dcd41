//! SPARQL 1.1 Query operations and result parsing.

use std::collections::HashMap;

use serde::Deserialize;

use crate::client::{SparqlClient, SparqlError};

/// One solution: variable name → bound value.
pub type Row = HashMap<String, String>;

#[derive(Debug, Deserialize)]
struct SelectResponse {
    results: ResultSet,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    bindings: Vec<HashMap<String, Binding>>,
}

#[derive(Debug, Deserialize)]
struct Binding {
    value: String,
}

/// `SELECT DISTINCT ?graph` restricted to graphs whose IRI starts with `namespace`.
pub fn list_graphs_query(namespace: &str) -> String {
    let literal = namespace.replace('\\', "\\\\").replace('"', "\\\"");
    format!(
        "SELECT DISTINCT ?graph WHERE {{ GRAPH ?graph {{ ?s ?p ?o }} \
         FILTER(STRSTARTS(STR(?graph), \"{literal}\")) }}"
    )
}

/// Parse an `application/sparql-results+json` document into rows.
pub fn parse_select_results(body: &str) -> Result<Vec<Row>, SparqlError> {
    let parsed: SelectResponse =
        serde_json::from_str(body).map_err(|e| SparqlError::InvalidResponse(e.to_string()))?;

    Ok(parsed
        .results
        .bindings
        .into_iter()
        .map(|solution| {
            solution
                .into_iter()
                .map(|(var, binding)| (var, binding.value))
                .collect()
        })
        .collect())
}

impl SparqlClient {
    /// Run a SELECT query and collect every solution.
    pub async fn select(&self, query: &str) -> Result<Vec<Row>, SparqlError> {
        let body = self
            .post(
                "application/sparql-query",
                Some("application/sparql-results+json"),
                query,
            )
            .await?;
        parse_select_results(&body)
    }

    /// List named graphs under `namespace`, sorted.
    ///
    /// The prefix filter is re-applied locally in case the endpoint ignores
    /// the FILTER clause.
    pub async fn list_graphs(&self, namespace: &str) -> Result<Vec<String>, SparqlError> {
        let rows = self.select(&list_graphs_query(namespace)).await?;
        let mut graphs: Vec<String> = rows
            .into_iter()
            .filter_map(|mut row| row.remove("graph"))
            .filter(|g| g.starts_with(namespace))
            .collect();
        graphs.sort();
        graphs.dedup();

        tracing::info!(namespace, count = graphs.len(), "Listed graphs");
        Ok(graphs)
    }
}
