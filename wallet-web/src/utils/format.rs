//! # Formatting Utilities for Wallet Web
//!
//! Display helpers for session values. For address truncation use
//! [`shared::utils::truncate_address`].

use lib_web3::ChainId;

/// Group the digits of an integer string with commas ("1234567" -> "1,234,567").
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Format a decimal balance string for display.
///
/// The fraction is cut (not rounded) to `decimals` places so a balance is
/// never shown higher than it is.
///
/// # Examples
///
/// ```rust
/// use wallet_web::utils::format::format_balance;
///
/// assert_eq!(format_balance("1234.567891", 4, "ETH"), "1,234.5678 ETH");
/// assert_eq!(format_balance("0.0", 4, "ETH"), "0.0 ETH");
/// ```
pub fn format_balance(balance: &str, decimals: usize, symbol: &str) -> String {
    let (whole, fraction) = balance.split_once('.').unwrap_or((balance, "0"));

    let mut fraction: String = fraction.chars().take(decimals.max(1)).collect();
    while fraction.len() > 1 && fraction.ends_with('0') {
        fraction.pop();
    }
    if fraction.is_empty() {
        fraction.push('0');
    }

    format!("{}.{} {}", group_thousands(whole), fraction, symbol)
}

/// "137 (0x89)"
pub fn format_chain_id(chain_id: ChainId) -> String {
    format!("{} ({})", chain_id, chain_id.to_hex())
}
