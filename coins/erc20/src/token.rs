use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use alloy::network::Ethereum;
use alloy::primitives::Address;
use alloy::providers::PendingTransactionBuilder;
use alloy::signers::local::PrivateKeySigner;
use tokio::sync::OnceCell;

use crate::contract::{connect, connect_with_signer, ERC20};
use crate::{Config, Error, TokenAmount};

/// Wait bound passed to the provider's receipt polling.
const RECEIPT_TIMEOUT: Duration = Duration::from_secs(60);

/// Pause between clearing an old allowance and setting the new one. Some
/// tokens (USDT among them) revert on approve unless the allowance is reset
/// to zero first.
const APPROVAL_RESET_DELAY: Duration = Duration::from_secs(1);

/// Builder for [Erc20Token], allows for specification of options for the token wrapper.
#[derive(Debug, Default, Clone)]
pub struct Erc20TokenBuilder {
    contract_address: Option<String>,
    rpc_url: Option<String>,
    signer: Option<PrivateKeySigner>,
}

impl Erc20TokenBuilder {
    /// Creates a new Erc20TokenBuilder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies the token contract address. Accepts checksummed or
    /// all-lowercase hex; the address is normalized on build.
    pub fn contract_address(&mut self, contract_address: &str) -> &mut Self {
        self.contract_address = Some(contract_address.to_string());
        self
    }

    /// Specifies the RPC endpoint URL.
    pub fn rpc_url(&mut self, rpc_url: &str) -> &mut Self {
        self.rpc_url = Some(rpc_url.to_string());
        self
    }

    /// Specifies the signer used for state-changing operations.
    pub fn signer(&mut self, signer: PrivateKeySigner) -> &mut Self {
        self.signer = Some(signer);
        self
    }

    /// Takes the RPC endpoint and signer (when present) from a loaded [Config].
    pub fn config(&mut self, config: &Config) -> Result<&mut Self, Error> {
        self.rpc_url = Some(config.rpc_url().to_string());
        if config.signer.is_some() {
            self.signer = Some(config.signer()?);
        }
        Ok(self)
    }

    /// Builds the [Erc20Token] with the specified options.
    pub fn build(&self) -> Result<Erc20Token, Error> {
        let raw = self
            .contract_address
            .as_ref()
            .ok_or(Error::MissingContractAddress)?;

        // Accept a checksummed address as-is; normalize anything else that
        // still parses as hex. Garbage is an error.
        let contract_address = match Address::parse_checksummed(raw, None) {
            Ok(address) => address,
            Err(_) => Address::from_str(raw).map_err(|e| Error::InvalidAddress {
                address: raw.clone(),
                reason: e.to_string(),
            })?,
        };

        let rpc_url = self.rpc_url.clone().ok_or(Error::MissingRpcUrl)?;

        Ok(Erc20Token {
            contract_address,
            rpc_url,
            signer: self.signer.clone(),
            symbol: OnceCell::new(),
            name: OnceCell::new(),
            decimals: OnceCell::new(),
            total_supply: OnceCell::new(),
        })
    }
}

/// A wrapper around a single ERC-20 token contract.
///
/// Metadata fields (symbol, name, decimals, total supply) are fetched from the
/// chain at most once per instance and cached thereafter. State-changing
/// operations require a signer; read-only access needs only the RPC endpoint.
#[derive(Debug, Clone)]
pub struct Erc20Token {
    contract_address: Address,
    rpc_url: String,
    signer: Option<PrivateKeySigner>,
    symbol: OnceCell<String>,
    name: OnceCell<String>,
    decimals: OnceCell<u8>,
    total_supply: OnceCell<TokenAmount>,
}

impl Erc20Token {
    /// Returns the builder for the [Erc20Token].
    pub fn builder() -> Erc20TokenBuilder {
        Erc20TokenBuilder::new()
    }

    /// Returns the checksummed contract address of the token.
    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Returns the symbol of the token, fetching it on first use.
    pub async fn symbol(&self) -> Result<String, Error> {
        let symbol = self
            .symbol
            .get_or_try_init(|| async {
                let provider = connect(&self.rpc_url)?;
                let contract = ERC20::new(self.contract_address, provider);
                contract
                    .symbol()
                    .call()
                    .await
                    .map_err(|e| Error::ContractError(e.to_string()))
            })
            .await?;
        Ok(symbol.clone())
    }

    /// Returns the name of the token, fetching it on first use.
    pub async fn name(&self) -> Result<String, Error> {
        let name = self
            .name
            .get_or_try_init(|| async {
                let provider = connect(&self.rpc_url)?;
                let contract = ERC20::new(self.contract_address, provider);
                contract
                    .name()
                    .call()
                    .await
                    .map_err(|e| Error::ContractError(e.to_string()))
            })
            .await?;
        Ok(name.clone())
    }

    /// Returns the decimal count of the token, fetching it on first use.
    pub async fn decimals(&self) -> Result<u8, Error> {
        let decimals = self
            .decimals
            .get_or_try_init(|| async {
                let provider = connect(&self.rpc_url)?;
                let contract = ERC20::new(self.contract_address, provider);
                contract
                    .decimals()
                    .call()
                    .await
                    .map_err(|e| Error::ContractError(e.to_string()))
            })
            .await?;
        Ok(*decimals)
    }

    /// Returns the total supply of the token scaled by its decimal count,
    /// fetching it on first use. Decimals are fetched first if not yet cached.
    pub async fn total_supply(&self) -> Result<TokenAmount, Error> {
        let total_supply = self
            .total_supply
            .get_or_try_init(|| async {
                let decimals = self.decimals().await?;
                let provider = connect(&self.rpc_url)?;
                let contract = ERC20::new(self.contract_address, provider);
                let raw = contract
                    .totalSupply()
                    .call()
                    .await
                    .map_err(|e| Error::ContractError(e.to_string()))?;
                Ok::<_, Error>(TokenAmount::from_base_units(raw, decimals))
            })
            .await?;
        Ok(*total_supply)
    }

    /// Populates every cached metadata field with one call each.
    pub async fn fetch_all(&self) -> Result<(), Error> {
        self.symbol().await?;
        self.name().await?;
        self.decimals().await?;
        self.total_supply().await?;
        Ok(())
    }

    /// Returns the token balance of the given address. Not cached.
    pub async fn balance_of(&self, owner: Address) -> Result<TokenAmount, Error> {
        let decimals = self.decimals().await?;
        let provider = connect(&self.rpc_url)?;
        let contract = ERC20::new(self.contract_address, provider);
        let raw = contract
            .balanceOf(owner)
            .call()
            .await
            .map_err(|e| Error::ContractError(e.to_string()))?;
        Ok(TokenAmount::from_base_units(raw, decimals))
    }

    /// Returns the amount the spender is allowed to move on the owner's
    /// behalf. Not cached.
    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<TokenAmount, Error> {
        let decimals = self.decimals().await?;
        let provider = connect(&self.rpc_url)?;
        let contract = ERC20::new(self.contract_address, provider);
        let raw = contract
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| Error::ContractError(e.to_string()))?;
        Ok(TokenAmount::from_base_units(raw, decimals))
    }

    /// Builds a [TokenAmount] in this token's decimals from a display-unit value.
    pub async fn amount(&self, value: f64) -> Result<TokenAmount, Error> {
        let decimals = self.decimals().await?;
        Ok(TokenAmount::from_display(value, decimals))
    }

    /// Approves the spender to move `amount` of the signer's tokens.
    ///
    /// The existing allowance is checked first: an allowance that already
    /// equals the requested amount is left alone, and a conflicting non-zero
    /// allowance is reset to zero before the new value is set. Returns the
    /// status of the final transaction receipt.
    pub async fn approve(&self, spender: Address, amount: TokenAmount) -> Result<bool, Error> {
        let signer = self.signer.clone().ok_or(Error::MissingSigner)?;
        let owner = signer.address();
        let provider = connect_with_signer(&self.rpc_url, signer)?;
        let contract = ERC20::new(self.contract_address, &provider);

        let current = contract
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| Error::ContractError(e.to_string()))?;

        if current == amount.base_units() {
            tracing::debug!(%spender, "allowance already set, skipping approve");
            return Ok(true);
        }

        if !current.is_zero() {
            tracing::info!(%spender, %current, "clearing existing allowance");
            let pending = contract
                .approve(spender, alloy::primitives::U256::ZERO)
                .send()
                .await
                .map_err(|e| Error::TxResponse(format!("Failed to send transaction: {e}")))?;
            if !wait_for_receipt(pending, "approve").await? {
                return Ok(false);
            }
            tokio::time::sleep(APPROVAL_RESET_DELAY).await;
        }

        tracing::info!(%spender, amount = %amount.base_units(), "approving");
        let pending = contract
            .approve(spender, amount.base_units())
            .send()
            .await
            .map_err(|e| Error::TxResponse(format!("Failed to send transaction: {e}")))?;
        wait_for_receipt(pending, "approve").await
    }

    /// Transfers `amount` of the signer's tokens to the given address.
    /// Returns the status of the transaction receipt.
    pub async fn transfer(&self, to: Address, amount: TokenAmount) -> Result<bool, Error> {
        let signer = self.signer.clone().ok_or(Error::MissingSigner)?;
        let provider = connect_with_signer(&self.rpc_url, signer)?;
        let contract = ERC20::new(self.contract_address, provider);

        tracing::info!(%to, amount = %amount.base_units(), "transferring");
        let pending = contract
            .transfer(to, amount.base_units())
            .send()
            .await
            .map_err(|e| Error::TxResponse(format!("Failed to send transaction: {e}")))?;
        wait_for_receipt(pending, "transfer").await
    }
}

/// Blocks until the pending transaction is mined, bounded by
/// [RECEIPT_TIMEOUT], and reports the receipt status.
async fn wait_for_receipt(
    pending: PendingTransactionBuilder<Ethereum>,
    operation: &str,
) -> Result<bool, Error> {
    let receipt = pending
        .with_timeout(Some(RECEIPT_TIMEOUT))
        .get_receipt()
        .await
        .map_err(|e| Error::TxResponse(format!("Failed to get receipt: {e}")))?;
    tracing::info!(
        operation,
        tx_hash = %receipt.transaction_hash,
        status = receipt.status(),
        "transaction mined"
    );
    Ok(receipt.status())
}

impl fmt::Display for Erc20Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn unfetched<T: fmt::Display>(field: Option<&T>) -> String {
            field.map_or_else(|| "?".to_string(), |v| v.to_string())
        }
        write!(
            f,
            "ERC20 {}: symbol={}, name={}, decimals={}, total_supply={}",
            self.contract_address,
            unfetched(self.symbol.get()),
            unfetched(self.name.get()),
            unfetched(self.decimals.get()),
            unfetched(self.total_supply.get()),
        )
    }
}
