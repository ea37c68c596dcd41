//! quadkit-expand: Grow a curated N-Quads extract from a large source dump.
//!
//! The run is three strictly ordered passes:
//! 1. [`analyze`] reads the existing extract into subject/object/triple sets.
//! 2. [`discover`] scans the source for allow-listed links out of existing subjects.
//! 3. [`extract`] scans the source again and appends every quad touching a
//!    safe node, rewritten into the output graph.

pub mod analyze;
pub mod discover;
pub mod error;
pub mod extract;
pub mod input;
pub mod pipeline;

pub use pipeline::{run_expansion, ExpansionReport};
