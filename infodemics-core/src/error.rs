//! Error types for the infodemics core library.
//!
//! Every precondition failure is raised before any node state is touched, so
//! a rejected call leaves its inputs exactly as they were.

use std::fmt;

use thiserror::Error;

use crate::engine::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when building graphs or running simulations.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimulationError {
    /// A transition rate was outside `[0, 1]` or not finite.
    #[error("{parameter} must be a finite rate in [0, 1] (got {value})")]
    InvalidRate {
        /// Name of the offending rate (`beta` or `gamma`).
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A percentage was outside `[0, 100]` or not finite.
    #[error("{parameter} must be a finite percentage in [0, 100] (got {value})")]
    InvalidPercentage {
        /// Name of the offending percentage.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The supplied state map does not cover the graph's node set.
    #[error("state map holds {states} entries but the graph has {nodes} nodes")]
    StateCountMismatch {
        /// Number of entries in the supplied state map.
        states: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
}

define_error_codes! {
    /// Stable codes describing [`SimulationError`] variants.
    enum SimulationErrorCode for SimulationError {
        /// A transition rate was outside `[0, 1]` or not finite.
        InvalidRate => InvalidRate { .. } => "INFODEMICS_INVALID_RATE",
        /// A percentage was outside `[0, 100]` or not finite.
        InvalidPercentage => InvalidPercentage { .. } => "INFODEMICS_INVALID_PERCENTAGE",
        /// The supplied state map does not cover the graph's node set.
        StateCountMismatch => StateCountMismatch { .. } => "INFODEMICS_STATE_COUNT_MISMATCH",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "INFODEMICS_BACKEND_UNAVAILABLE",
    }
}

impl SimulationError {
    /// Returns `true` when the error reports a caller-supplied parameter that
    /// was out of range.
    #[must_use]
    pub const fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidRate { .. }
                | Self::InvalidPercentage { .. }
                | Self::StateCountMismatch { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SimulationError>;

pub(crate) fn validate_rate(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimulationError::InvalidRate { parameter, value })
    }
}

pub(crate) fn validate_percentage(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimulationError::InvalidPercentage { parameter, value })
    }
}
