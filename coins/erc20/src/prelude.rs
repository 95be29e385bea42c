//! This prelude module simplifies importing many useful items from the erc20token crate using a glob import.
//!
//! To use this prelude, add the following to your code:
//! ```
//! use erc20token::prelude::*;
//! ```

pub use crate::{Config, Erc20Token, Erc20TokenBuilder, Error, TokenAmount};

pub use alloy::primitives::{Address, U256};
pub use alloy::signers::local::PrivateKeySigner;
