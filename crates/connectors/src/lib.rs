pub mod cluster;
pub mod error;
pub mod provider;
