//! rotinet-common: error types shared by every rotinet crate.

pub mod error;

pub use error::{Result, RotinetError};
