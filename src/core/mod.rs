//! Core types for extup.
//!
//! Currently this module hosts the error system; see [`error`] for the
//! design notes on the split between the crate-wide [`ExtupError`] and the
//! cacheable [`ResolveFailure`].

pub mod error;

pub use error::{ExtupError, ResolveFailure, Result};
