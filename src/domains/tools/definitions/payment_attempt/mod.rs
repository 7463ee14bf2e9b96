//! Payment attempt tools.

pub mod get;

pub use get::{GetPaymentAttemptParams, GetPaymentAttemptTool};
