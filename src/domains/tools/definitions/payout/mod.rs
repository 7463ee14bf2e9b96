//! Payout tools.

pub mod create;
pub mod fund;
pub mod get;

pub use create::{CreatePayoutParams, CreatePayoutTool, PayoutRequest};
pub use fund::{FundPayoutParams, FundPayoutTool};
pub use get::{GetPayoutParams, GetPayoutTool};
