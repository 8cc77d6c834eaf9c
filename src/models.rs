//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core`
//! submodule where the computation and domain logic live. The
//! [`twine_core::Model`] implementation is a thin adapter that delegates to
//! the core, which also exposes its solve functions for callers that want
//! them directly.

pub mod electromechanical;
