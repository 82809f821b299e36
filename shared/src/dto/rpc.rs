//! Provider rejection payloads (EIP-1193 `ProviderRpcError`).

use serde::{Deserialize, Serialize};

/// Error object a wallet rejects a request with.
///
/// Every field is optional because wallets are inconsistent: some reject with
/// a bare string, some nest the real code under `data.originalError` (MetaMask
/// mobile does this for unrecognized chains).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorPayload {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl RpcErrorPayload {
    /// Code of the wrapped error, if the wallet nested one.
    pub fn original_code(&self) -> Option<i64> {
        self.data.as_ref()?.get("originalError")?.get("code")?.as_i64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_rejection() {
        let payload: RpcErrorPayload =
            serde_json::from_str(r#"{"code":4001,"message":"User rejected the request."}"#).unwrap();
        assert_eq!(payload.code, Some(4001));
        assert_eq!(payload.original_code(), None);
    }

    #[test]
    fn test_parse_wrapped_unrecognized_chain() {
        let payload: RpcErrorPayload = serde_json::from_str(
            r#"{"code":-32603,"message":"Internal error","data":{"originalError":{"code":4902}}}"#,
        )
        .unwrap();
        assert_eq!(payload.code, Some(-32603));
        assert_eq!(payload.original_code(), Some(4902));
    }
}
