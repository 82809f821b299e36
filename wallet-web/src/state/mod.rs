//! Application state

pub mod web3;
