//! Payin tools: create, read, update, cancel and confirm collections.

pub mod cancel;
pub mod confirm;
pub mod create;
pub mod get;
pub mod update;

pub use cancel::CancelPayinTool;
pub use confirm::{ConfirmPayinParams, ConfirmPayinTool};
pub use create::{CreatePayinParams, CreatePayinTool, PayinRequest};
pub use get::{GetPayinTool, PayinIdParams};
pub use update::{UpdatePayinParams, UpdatePayinTool};
