//! Synthetic benchmark network sources.

mod errors;
mod scale_free;

pub use errors::SyntheticError;
pub use scale_free::{ScaleFreeConfig, SyntheticNetwork};
