//! # Twine BLDC
//!
//! Brushless DC motor sizing models for
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! A motor is sized from a handful of design targets (max speed, design
//! power, max current, operating speed, phase and pole-pair counts, and
//! geometric ratios). Sizing and the electrical operating point are coupled
//! through an energy balance on the no-load current, which is solved
//! iteratively.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models, including numeric
//!   constraints and a damped Newton-Raphson solver.
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable.
//!
//! ## Logging
//!
//! Solver progress is reported through the [`log`] facade at `debug` and
//! `trace` levels. No logger is installed by this crate.

pub mod models;
pub mod support;
