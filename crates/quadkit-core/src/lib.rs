//! quadkit-core: Shared vocabulary, quad line scanning, and configuration.
//!
//! This crate provides the pieces every quadkit tool needs:
//! - The fixed predicate allow-list and output graph
//! - The delimiter-based N-Quads line scanner and graph rewriter
//! - Owned triple and node-set types
//! - Configuration loading (file + environment)

pub mod config;
pub mod error;
pub mod quad;
pub mod types;
pub mod vocab;

pub use error::CoreError;
pub use quad::{extract_spo, graph_tag, replace_graph, Scan, Spo};
pub use types::{NodeSet, Triple};
pub use vocab::{AllowList, FOLLOW_PREDICATES, OUTPUT_GRAPH};
