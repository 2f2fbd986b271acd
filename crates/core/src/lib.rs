//! Broker Core Types
//!
//! Fixed-width values, packed ABI encoding and channel call shapes shared by
//! every Broker crate.

mod channel;
mod error;
mod packed;
mod types;

pub use channel::*;
pub use error::*;
pub use packed::*;
pub use types::*;

pub use alloy_primitives::{Address, I256, U256};
