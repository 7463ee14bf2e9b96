//! Helpers shared by every Tazapay tool: argument parsing, validation,
//! payload reshaping, unit conversion and response formatting.

pub mod args;
pub mod models;
pub mod money;
pub mod reshape;
pub mod response;
pub mod validate;

#[cfg(test)]
pub mod testing;

pub use args::{ArgReader, FromArguments, id_argument};
