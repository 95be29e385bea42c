use thiserror::Error;

/// The error type for ERC-20 token operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The supplied contract or account address could not be parsed.
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress {
        /// The invalid address
        address: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The builder was not given a contract address.
    #[error("A contract address is required")]
    MissingContractAddress,

    /// The builder was not given an RPC endpoint URL.
    #[error("An RPC endpoint URL is required")]
    MissingRpcUrl,

    /// A state-changing operation was attempted without a configured signer.
    #[error("No private key configured for signing transactions")]
    MissingSigner,

    /// A read-only contract call failed or reverted.
    #[error("Contract call failed: {0}")]
    ContractError(String),

    /// Transaction submission or receipt retrieval failed.
    #[error("Transaction failed: {0}")]
    TxResponse(String),

    /// Checked arithmetic on a token amount overflowed.
    #[error("Amount overflow: {0}")]
    Overflow(String),

    /// Two amounts with different decimal counts were combined.
    #[error("Decimal mismatch: {left} vs {right}")]
    DecimalMismatch {
        /// Decimals of the left-hand amount
        left: u8,
        /// Decimals of the right-hand amount
        right: u8,
    },

    /// The configuration file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The configuration file could not be parsed.
    #[error("Failed to parse config: {0}")]
    Config(String),

    /// Custom error message
    #[error("{0}")]
    Custom(String),
}
