//! Unit tests for record splitting and table parsing.
pub(crate) use super::{CsvNetworkProvider, CsvProviderError, CsvProviderErrorCode};
