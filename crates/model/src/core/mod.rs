pub mod errors;
pub mod identifiers;
pub mod value;
