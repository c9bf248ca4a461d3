pub mod compile;
pub mod oracle;
