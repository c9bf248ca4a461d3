use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-equality comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    NotEqual,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonOperator::GreaterThan => write!(f, ">"),
            ComparisonOperator::LessThan => write!(f, "<"),
            ComparisonOperator::GreaterOrEqual => write!(f, ">="),
            ComparisonOperator::LessOrEqual => write!(f, "<="),
            ComparisonOperator::NotEqual => write!(f, "!="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_operator_display() {
        assert_eq!(format!("{}", ComparisonOperator::GreaterOrEqual), ">=");
        assert_eq!(format!("{}", ComparisonOperator::NotEqual), "!=");
    }
}
