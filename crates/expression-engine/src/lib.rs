pub mod eval;

pub use eval::{Evaluator, matching};
