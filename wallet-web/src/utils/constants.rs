//! Application constants

/// Infura project id baked in at build time (`WEB3_INFURA_PROJECT_ID=... trunk build`)
pub const INFURA_PROJECT_ID: Option<&str> = option_env!("WEB3_INFURA_PROJECT_ID");

pub const METAMASK_DOWNLOAD_URL: &str = "https://metamask.io/download/";

// UI constants
pub const TOAST_DURATION_MS: u32 = 4000;
pub const BALANCE_DISPLAY_DECIMALS: usize = 4;
