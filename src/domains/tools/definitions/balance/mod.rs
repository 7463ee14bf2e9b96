//! Balance and FX tools.

pub mod fetch;
pub mod fx;

pub use fetch::{BalanceParams, FetchBalanceTool};
pub use fx::{FetchFxTool, FxParams};
