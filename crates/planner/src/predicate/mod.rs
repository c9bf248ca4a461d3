pub mod ast;
pub mod builder;
pub mod operator;
