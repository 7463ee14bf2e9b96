//! Beneficiary tools: create, get and update payout recipients.

pub mod create;
pub mod get;
pub mod update;

pub use create::{BeneficiaryDetails, BeneficiaryParams, CreateBeneficiaryTool};
pub use get::{GetBeneficiaryParams, GetBeneficiaryTool};
pub use update::{UpdateBeneficiaryParams, UpdateBeneficiaryTool};
