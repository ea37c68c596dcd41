//! quadkit-sparql: HTTP client for a SPARQL 1.1 endpoint.
//!
//! Covers the handful of operations the uploader needs: `LOAD` and
//! `DROP GRAPH` updates, and a `SELECT` used to list named graphs.
//! Every failure, including timeouts and refused connections, comes back
//! as a [`SparqlError`] value; nothing is retried.

pub mod client;
pub mod mutations;
pub mod queries;

pub use client::{SparqlClient, SparqlError};
pub use mutations::{drop_graph_query, load_query};
pub use queries::{list_graphs_query, parse_select_results, Row};
