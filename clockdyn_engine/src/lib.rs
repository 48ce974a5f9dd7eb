//! # clockdyn engine
//!
//! Clock hands simulated as damped second-order systems. Each hand is a
//! mass-spring-damper pulled toward its reference angle; the continuous
//! model is discretized once with the bilinear (Tustin) transform and
//! then stepped at a fixed sampling period.
//!
//! ## Layers
//!
//! 1. [`model`]: continuous and discrete state-space matrices per hand
//! 2. [`simulator`]: warped-state stepping with 360° wrap correction
//! 3. [`perturbation`]: one-step impulse forces, direct or via an inbox
//! 4. [`reference`]: wall-clock time to reference angles
//! 5. [`render`]: angle sinks
//! 6. [`driver`]: fixed-period loop tying the above together
//!
//! ```rust
//! use clockdyn_common::prelude::*;
//! use clockdyn_engine::model::OscillatorModel;
//! use clockdyn_engine::simulator::HandSimulator;
//!
//! let params = OscillatorParameters::new(0.1, 0.3, 8.0);
//! let model = OscillatorModel::build(HandKind::Second, params, 0.02, true).unwrap();
//! let mut sim = HandSimulator::new(model);
//! sim.initialize(0.0, 0.0);
//! let angle = sim.step(6.0).unwrap();
//! assert!(angle > 0.0 && angle < 6.0);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod input;
pub mod linalg;
pub mod model;
pub mod perturbation;
pub mod reference;
pub mod render;
pub mod simulator;
