//! Tool definitions module.
//!
//! One submodule per Tazapay resource, each tool in its own file. Shared
//! parsing, validation and formatting helpers live in `common`.

pub mod balance;
pub mod beneficiary;
pub mod checkout;
pub mod common;
pub mod customer;
pub mod payin;
pub mod payment_attempt;
pub mod payout;

pub use balance::{FetchBalanceTool, FetchFxTool};
pub use beneficiary::{CreateBeneficiaryTool, GetBeneficiaryTool, UpdateBeneficiaryTool};
pub use checkout::{ExpireCheckoutTool, FetchCheckoutTool, PaymentLinkTool};
pub use customer::{CreateCustomerTool, FetchCustomerTool};
pub use payin::{CancelPayinTool, ConfirmPayinTool, CreatePayinTool, GetPayinTool, UpdatePayinTool};
pub use payment_attempt::GetPaymentAttemptTool;
pub use payout::{CreatePayoutTool, FundPayoutTool, GetPayoutTool};
