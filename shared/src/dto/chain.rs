//! Network switch and registration parameters (EIP-3326 / EIP-3085).

use serde::{Deserialize, Serialize};

/// Decimals every EVM native currency is registered with.
pub const NATIVE_DECIMALS: u8 = 18;

/// Parameter object for `wallet_switchEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainParameter {
    /// `0x`-prefixed lowercase hex chain id
    pub chain_id: String,
}

/// Native currency block of an add-chain request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Parameter object for `wallet_addEthereumChain`.
///
/// Wallets reject requests carrying an empty `blockExplorerUrls` array on some
/// versions, so the field is omitted entirely when there is nothing to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParameter {
    /// `0x`-prefixed lowercase hex chain id
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_explorer_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_chain_parameter_wire_names() {
        let param = AddChainParameter {
            chain_id: "0xaa36a7".to_string(),
            chain_name: "Sepolia".to_string(),
            native_currency: NativeCurrency {
                name: "SepoliaETH".to_string(),
                symbol: "SepoliaETH".to_string(),
                decimals: NATIVE_DECIMALS,
            },
            rpc_urls: vec!["https://sepolia.infura.io/v3/".to_string()],
            block_explorer_urls: vec!["https://sepolia.etherscan.io".to_string()],
        };

        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value["chainId"], "0xaa36a7");
        assert_eq!(value["chainName"], "Sepolia");
        assert_eq!(value["nativeCurrency"]["decimals"], 18);
        assert_eq!(value["rpcUrls"][0], "https://sepolia.infura.io/v3/");
        assert_eq!(value["blockExplorerUrls"][0], "https://sepolia.etherscan.io");
    }

    #[test]
    fn test_empty_explorer_list_is_omitted() {
        let param = AddChainParameter {
            chain_id: "0x539".to_string(),
            chain_name: "Localhost".to_string(),
            native_currency: NativeCurrency {
                name: "ETH".to_string(),
                symbol: "ETH".to_string(),
                decimals: NATIVE_DECIMALS,
            },
            rpc_urls: vec!["http://127.0.0.1:8545".to_string()],
            block_explorer_urls: vec![],
        };

        let value = serde_json::to_value(&param).unwrap();
        assert!(value.get("blockExplorerUrls").is_none());
    }
}
