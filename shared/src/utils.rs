//! # Shared Utility Functions
//!
//! Display helpers used by the session library and the browser app.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - first N and last M characters with an ellipsis
//! - [`truncate_address`] - `0x1234...abcd`, the form wallets show
//!
//! ## Unit Formatting
//!
//! - [`format_units`] - integer minor units → decimal string
//! - [`format_ether`] - wei → ether (18 decimals)
//!
//! ```rust
//! use shared::utils::{format_ether, truncate_address};
//!
//! let address = "0x52908400098527886E0F7030069857D2E4169EE7";
//! assert_eq!(truncate_address(address), "0x5290...9EE7");
//! assert_eq!(format_ether(1_500_000_000_000_000_000), "1.5");
//! ```

/// Decimals of the native currency on every EVM chain.
pub const ETHER_DECIMALS: u32 = 18;

/// Format an address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0x52908400098527886E0F7030069857D2E4169EE7";
/// assert_eq!(format_address(addr, 6, 4), "0x5290...9EE7");
/// assert_eq!(format_address("0x12", 6, 4), "0x12");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len || !address.is_ascii() {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format an address the way wallets do: `0x` plus four digits, then the last four.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Format an integer amount of minor units as a decimal string.
///
/// Matches ethers' `formatUnits`: the fractional part keeps at least one digit
/// and drops trailing zeros, so whole amounts render as `"1.0"`.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_units;
///
/// assert_eq!(format_units(0, 18), "0.0");
/// assert_eq!(format_units(1_234_500, 6), "1.2345");
/// assert_eq!(format_units(42, 0), "42.0");
/// ```
pub fn format_units(value: u128, decimals: u32) -> String {
    // u128 tops out below 10^39, so wider scales have no whole part
    let (whole, fraction) = match 10u128.checked_pow(decimals) {
        Some(base) => (value / base, value % base),
        None => (0, value),
    };

    let mut fraction = format!("{:0width$}", fraction, width = decimals as usize);
    while fraction.len() > 1 && fraction.ends_with('0') {
        fraction.pop();
    }

    format!("{}.{}", whole, fraction)
}

/// Format wei as ether.
pub fn format_ether(wei: u128) -> String {
    format_units(wei, ETHER_DECIMALS)
}
