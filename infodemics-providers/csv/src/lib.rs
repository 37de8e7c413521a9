//! CSV provider loading node and edge tables into core network records.
//!
//! Malformed rows are rejected here so the graph builder only ever sees
//! well-formed input.

mod errors;
mod parse;
mod provider;

pub use errors::{CsvProviderError, CsvProviderErrorCode};
pub use provider::{CsvNetworkProvider, EDGES_FILE, NODES_FILE};

#[cfg(test)]
mod tests;
