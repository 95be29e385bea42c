//! # ERC-20 Token Library
//!
//! A thin, typed wrapper around an ERC-20 token contract, built on the
//! [alloy](https://github.com/alloy-rs/alloy) framework. The wrapper reads
//! token metadata (symbol, name, decimals, total supply), caching each value
//! after its first fetch, and performs `approve` and `transfer` against the
//! contract. All ABI encoding, signing, transport and receipt polling are
//! delegated to alloy.
//!
//! ## Quickstart Guide
//!
//! Use the [Erc20Token] struct as the starting point. Each [Erc20Token] is
//! associated with one contract address and one RPC endpoint.
//!
//! ### Reading Token Metadata
//!
//! ```no_run
//! use erc20token::prelude::*;
//!
//! # async fn erc20() -> Result<(), erc20token::Error> {
//! let usdc = Erc20Token::builder()
//!     .contract_address("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")
//!     .rpc_url("https://eth.llamarpc.com")
//!     .build()?;
//!
//! println!("symbol: {}", usdc.symbol().await?);
//! println!("name: {}", usdc.name().await?);
//! println!("decimals: {}", usdc.decimals().await?);
//! println!("total supply: {}", usdc.total_supply().await?);
//! # Ok(())
//! # }
//! ```
//!
//! ### Approving and Transferring
//!
//! State-changing operations need a signer, typically loaded from a config
//! file along with the RPC endpoint.
//!
//! ```no_run
//! use erc20token::prelude::*;
//!
//! # async fn erc20() -> Result<(), erc20token::Error> {
//! let config = Config::from_file("erc20.toml")?;
//! let token = Erc20Token::builder()
//!     .contract_address("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")
//!     .config(&config)?
//!     .build()?;
//!
//! let to: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045".parse().unwrap();
//! let amount = token.amount(100.0).await?;
//! let confirmed = token.transfer(to, amount).await?;
//! println!("transfer mined, status: {}", confirmed);
//! # Ok(())
//! # }
//! ```
//!
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod amount;
pub use amount::TokenAmount;
mod config;
pub use config::{Config, ProviderConfig, SignerConfig};
mod contract;
mod error;
pub use error::Error;
mod token;
pub use token::{Erc20Token, Erc20TokenBuilder};
pub use alloy;
pub mod prelude;
