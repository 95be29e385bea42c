//! ERC-20 contract bindings and provider construction.

use crate::Error;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;

// Creates Rust bindings for the ERC20 ABI using alloy's sol! macro
sol! {
    #[sol(rpc)]
    contract ERC20 {
        function name() public view returns (string memory);
        function symbol() public view returns (string memory);
        function decimals() public view returns (uint8);
        function totalSupply() public view returns (uint256);
        function balanceOf(address account) public view returns (uint256);
        function transfer(address to, uint256 amount) public returns (bool);
        function allowance(address owner, address spender) public view returns (uint256);
        function approve(address spender, uint256 amount) public returns (bool);
        function transferFrom(address from, address to, uint256 amount) public returns (bool);
    }
}

/// Connects a read-only HTTP provider to the given RPC endpoint.
pub(crate) fn connect(rpc_url: &str) -> Result<impl Provider, Error> {
    Ok(ProviderBuilder::new().connect_http(
        rpc_url
            .parse()
            .map_err(|e| Error::Custom(format!("Invalid URL: {e}")))?,
    ))
}

/// Connects an HTTP provider with a wallet attached so that transactions can
/// be signed and submitted.
pub(crate) fn connect_with_signer(
    rpc_url: &str,
    signer: PrivateKeySigner,
) -> Result<impl Provider, Error> {
    Ok(ProviderBuilder::new()
        .wallet(alloy::network::EthereumWallet::from(signer))
        .connect_http(
            rpc_url
                .parse()
                .map_err(|e| Error::Custom(format!("Invalid URL: {e}")))?,
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};
    use alloy::sol_types::SolCall;

    // ============================================================================
    // ERC20 Call Encoding Tests
    // ============================================================================

    #[test]
    fn test_name_call_encoding() {
        let call = ERC20::nameCall {};
        let encoded = call.abi_encode();
        // name() function selector is 0x06fdde03
        assert_eq!(&encoded[0..4], &[0x06, 0xfd, 0xde, 0x03]);
    }

    #[test]
    fn test_symbol_call_encoding() {
        let call = ERC20::symbolCall {};
        let encoded = call.abi_encode();
        // symbol() function selector is 0x95d89b41
        assert_eq!(&encoded[0..4], &[0x95, 0xd8, 0x9b, 0x41]);
    }

    #[test]
    fn test_decimals_call_encoding() {
        let call = ERC20::decimalsCall {};
        let encoded = call.abi_encode();
        // decimals() function selector is 0x313ce567
        assert_eq!(&encoded[0..4], &[0x31, 0x3c, 0xe5, 0x67]);
    }

    #[test]
    fn test_total_supply_call_encoding() {
        let call = ERC20::totalSupplyCall {};
        let encoded = call.abi_encode();
        // totalSupply() function selector is 0x18160ddd
        assert_eq!(&encoded[0..4], &[0x18, 0x16, 0x0d, 0xdd]);
    }

    #[test]
    fn test_balance_of_call_encoding() {
        let account = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        let call = ERC20::balanceOfCall { account };
        let encoded = call.abi_encode();

        // balanceOf(address) function selector is 0x70a08231
        assert_eq!(&encoded[0..4], &[0x70, 0xa0, 0x82, 0x31]);

        // Encoded data should be 36 bytes (4 selector + 32 address)
        assert_eq!(encoded.len(), 36);
    }

    #[test]
    fn test_allowance_call_encoding() {
        let owner = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        let spender = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
        let call = ERC20::allowanceCall { owner, spender };
        let encoded = call.abi_encode();

        // allowance(address,address) function selector is 0xdd62ed3e
        assert_eq!(&encoded[0..4], &[0xdd, 0x62, 0xed, 0x3e]);

        // Encoded data should be 68 bytes (4 selector + 32 owner + 32 spender)
        assert_eq!(encoded.len(), 68);
    }

    #[test]
    fn test_approve_call_encoding() {
        let spender = address!("7a250d5630B4cF539739dF2C5dAcb4c659F2488D");
        let call = ERC20::approveCall {
            spender,
            amount: U256::from(1_000_000u64),
        };
        let encoded = call.abi_encode();

        // approve(address,uint256) function selector is 0x095ea7b3
        assert_eq!(&encoded[0..4], &[0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(encoded.len(), 68);
    }

    #[test]
    fn test_transfer_call_encoding() {
        let to = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        let call = ERC20::transferCall {
            to,
            amount: U256::from(1_000_000u64),
        };
        let encoded = call.abi_encode();

        // transfer(address,uint256) function selector is 0xa9059cbb
        assert_eq!(&encoded[0..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(encoded.len(), 68);
    }

    // ============================================================================
    // Provider Construction Tests
    // ============================================================================

    #[test]
    fn test_connect_rejects_invalid_url() {
        let result = connect("not-a-valid-url");
        assert!(result.is_err());
    }

    #[test]
    fn test_connect_accepts_http_url() {
        let result = connect("http://127.0.0.1:8545");
        assert!(result.is_ok());
    }
}
