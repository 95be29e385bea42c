//! Configuration file loading.
//!
//! The config file is TOML (or equivalent JSON) with a `[provider]` table
//! holding the RPC endpoint
//! and an optional `[signer]` table holding the private key used for
//! state-changing operations:
//!
//! ```toml
//! [provider]
//! rpc_url = "https://eth.llamarpc.com"
//!
//! [signer]
//! private_key = "0x..."
//! ```

use crate::Error;
use alloy::signers::local::PrivateKeySigner;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The RPC provider section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// URL of the Ethereum JSON-RPC endpoint
    pub rpc_url: String,
}

/// The signer section of the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Hex-encoded secp256k1 private key, with or without a 0x prefix
    pub private_key: String,
}

/// Configuration for connecting to a chain and signing transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC provider settings
    pub provider: ProviderConfig,
    /// Signing key settings, absent for read-only use
    pub signer: Option<SignerConfig>,
}

impl Config {
    /// Loads the configuration from a file. The format is determined by the
    /// file extension; `.toml` and `.json` are supported.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?
            }
            Some("json") => {
                serde_json::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?
            }
            Some(ext) => {
                return Err(Error::Config(format!("Unsupported file extension: {ext}")))
            }
            None => return Err(Error::Config("No file extension found".to_string())),
        };

        Ok(config)
    }

    /// Returns the RPC endpoint URL.
    pub fn rpc_url(&self) -> &str {
        &self.provider.rpc_url
    }

    /// Parses the configured private key into a signer.
    ///
    /// Returns [`Error::MissingSigner`] if the config has no `[signer]` table.
    pub fn signer(&self) -> Result<PrivateKeySigner, Error> {
        let signer = self.signer.as_ref().ok_or(Error::MissingSigner)?;
        signer
            .private_key
            .parse::<PrivateKeySigner>()
            .map_err(|e| Error::Config(format!("Invalid private key: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // Anvil's first well-known development key
    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(&format!(
            "[provider]\nrpc_url = \"http://127.0.0.1:8545\"\n\n[signer]\nprivate_key = \"{TEST_PRIVATE_KEY}\"\n"
        ));
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.rpc_url(), "http://127.0.0.1:8545");
        assert!(config.signer.is_some());
    }

    #[test]
    fn test_load_read_only_config() {
        let file = write_config("[provider]\nrpc_url = \"https://eth.llamarpc.com\"\n");
        let config = Config::from_file(file.path()).unwrap();
        assert!(config.signer.is_none());
        assert!(matches!(config.signer(), Err(Error::MissingSigner)));
    }

    #[test]
    fn test_signer_parses_to_expected_address() {
        let file = write_config(&format!(
            "[provider]\nrpc_url = \"http://127.0.0.1:8545\"\n\n[signer]\nprivate_key = \"{TEST_PRIVATE_KEY}\"\n"
        ));
        let config = Config::from_file(file.path()).unwrap();
        let signer = config.signer().unwrap();
        // Address for Anvil's first development key
        assert_eq!(
            signer.address().to_string(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }

    #[test]
    fn test_invalid_private_key_is_config_error() {
        let file = write_config(
            "[provider]\nrpc_url = \"http://127.0.0.1:8545\"\n\n[signer]\nprivate_key = \"0xnotakey\"\n",
        );
        let config = Config::from_file(file.path()).unwrap();
        assert!(matches!(config.signer(), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_json_config() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .unwrap();
        file.write_all(
            b"{\"provider\": {\"rpc_url\": \"http://127.0.0.1:8545\"}, \"signer\": null}",
        )
        .unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.rpc_url(), "http://127.0.0.1:8545");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_config("[provider]\nrpc_url = \"http://127.0.0.1:8545\"\n");
        let renamed = file.path().with_extension("cfg");
        std::fs::copy(file.path(), &renamed).unwrap();
        let result = Config::from_file(&renamed);
        std::fs::remove_file(&renamed).unwrap();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let file = write_config("provider = \"oops\"");
        assert!(matches!(Config::from_file(file.path()), Err(Error::Config(_))));
    }
}
