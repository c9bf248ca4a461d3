pub mod error;
pub mod predicate;
pub mod pushdown;

pub use error::{OracleError, PushdownError};
pub use predicate::{ast::Predicate, builder::PredicateBuilder, operator::ComparisonOperator};
pub use pushdown::{
    compile::compile,
    oracle::{CapabilityOracle, SchemaOracle},
};
