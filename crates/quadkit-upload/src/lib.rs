//! quadkit-upload: Bulk-load N-Quads files into a SPARQL endpoint.
//!
//! Files are checked against a required graph namespace before anything
//! is sent, then loaded one at a time with `LOAD <file-uri>`. Destructive
//! steps (dropping graphs) sit behind an interactive confirmation.

pub mod batch;
pub mod confirm;
pub mod error;
pub mod files;
pub mod loader;
pub mod namespace;
