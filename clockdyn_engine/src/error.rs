//! Error types for the hand dynamics engine.
//!
//! Construction errors are fatal and prevent a simulator from existing;
//! call-order errors are returned from the offending call. Nothing is
//! swallowed: the driver surfaces every failure to its caller.

use clockdyn_common::config::ConfigError;
use clockdyn_common::hand::HandKind;
use thiserror::Error;

/// Oscillator model construction failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A physical parameter or the sampling period is out of range.
    #[error("{hand}: invalid {name} = {value}")]
    InvalidParameter {
        /// Hand whose model was being built.
        hand: HandKind,
        /// Parameter name (`mass`, `damping`, `stiffness`, `sampling_period`).
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// `I − A·T/2` could not be inverted.
    #[error("{hand}: discretization matrix is singular")]
    SingularTransform {
        /// Hand whose model was being built.
        hand: HandKind,
    },
}

/// Discrete simulator call-order failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// `step` was called before `initialize`.
    #[error("{hand}: step requested before initialization")]
    NotInitialized {
        /// Hand that was stepped.
        hand: HandKind,
    },
}

/// Step driver failure.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Model construction failed.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Simulator misuse.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Renderer sink failed.
    #[error("renderer error: {0}")]
    Render(String),
}
