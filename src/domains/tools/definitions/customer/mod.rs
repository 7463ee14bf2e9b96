//! Customer tools.

pub mod create;
pub mod fetch;

pub use create::{CreateCustomerParams, CreateCustomerTool, CustomerRequest};
pub use fetch::{FetchCustomerParams, FetchCustomerTool};
