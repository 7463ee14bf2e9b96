//! Checkout tools: payment links and hosted checkout sessions.

pub mod expire;
pub mod fetch;
pub mod payment_link;

pub use expire::ExpireCheckoutTool;
pub use fetch::{CheckoutIdParams, FetchCheckoutTool};
pub use payment_link::{PaymentLinkParams, PaymentLinkRequest, PaymentLinkTool};
