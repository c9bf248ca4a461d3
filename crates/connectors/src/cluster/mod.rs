pub mod definition;
pub mod provider;
