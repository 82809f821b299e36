//! Page modules

pub mod connect;
pub mod network;
pub mod status;

pub use connect::ConnectPage;
pub use network::NetworkPage;
pub use status::StatusPage;
