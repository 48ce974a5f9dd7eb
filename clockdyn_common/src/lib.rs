//! clockdyn Common Library
//!
//! This crate provides shared constants, hand parameter types, built-in clock
//! presets and configuration loading utilities for all clockdyn crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Dial geometry and timing defaults
//! - [`hand`] - Hand identities and physical parameters
//! - [`clock`] - Complete clock configuration and presets
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use clockdyn_common::prelude::*;
//!
//! let cfg = ClockConfig::preset(Preset::Stepping);
//! assert!(cfg.validate().is_ok());
//! ```

pub mod clock;
pub mod config;
pub mod consts;
pub mod hand;
pub mod prelude;
