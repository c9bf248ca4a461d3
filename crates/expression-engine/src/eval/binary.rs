use model::core::value::Value;
use planner::ComparisonOperator;
use std::cmp::Ordering;
use tracing::trace;

/// Evaluates a comparison leaf against a property value that may be absent.
pub(crate) struct ComparisonEvaluator<'a> {
    actual: Option<&'a Value>,
    expected: &'a Value,
    op: ComparisonOperator,
}

impl<'a> ComparisonEvaluator<'a> {
    pub fn new(actual: Option<&'a Value>, expected: &'a Value, op: ComparisonOperator) -> Self {
        Self {
            actual,
            expected,
            op,
        }
    }

    pub fn evaluate(&self) -> bool {
        let actual = self.actual.unwrap_or(&Value::Null);

        if let ComparisonOperator::NotEqual = self.op {
            return !actual.equal(self.expected);
        }

        match actual.compare(self.expected) {
            Some(ordering) => self.accepts(ordering),
            None => {
                trace!(
                    "Values {} and {} are not comparable with {}",
                    actual, self.expected, self.op
                );
                false
            }
        }
    }

    fn accepts(&self, ordering: Ordering) -> bool {
        match self.op {
            ComparisonOperator::GreaterThan => ordering == Ordering::Greater,
            ComparisonOperator::LessThan => ordering == Ordering::Less,
            ComparisonOperator::GreaterOrEqual => ordering != Ordering::Less,
            ComparisonOperator::LessOrEqual => ordering != Ordering::Greater,
            ComparisonOperator::NotEqual => ordering != Ordering::Equal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(actual: Option<Value>, op: ComparisonOperator, expected: Value) -> bool {
        ComparisonEvaluator::new(actual.as_ref(), &expected, op).evaluate()
    }

    #[test]
    fn test_ordered_operators() {
        use ComparisonOperator::*;
        assert!(eval(Some(Value::Int(13)), GreaterThan, Value::Int(12)));
        assert!(!eval(Some(Value::Int(12)), GreaterThan, Value::Int(12)));
        assert!(eval(Some(Value::Int(12)), GreaterOrEqual, Value::Int(12)));
        assert!(eval(Some(Value::Float(1.5)), LessThan, Value::Int(2)));
        assert!(eval(Some(Value::String("4".into())), LessOrEqual, Value::Int(4)));
    }

    #[test]
    fn test_missing_or_incomparable_values_fail_ordered_operators() {
        use ComparisonOperator::*;
        assert!(!eval(None, GreaterThan, Value::Int(1)));
        assert!(!eval(None, LessThan, Value::Int(1)));
        assert!(!eval(Some(Value::Boolean(true)), GreaterThan, Value::Int(0)));
    }

    #[test]
    fn test_not_equal_is_negated_equality() {
        use ComparisonOperator::*;
        assert!(eval(None, NotEqual, Value::Int(1)));
        assert!(!eval(None, NotEqual, Value::Null));
        assert!(eval(Some(Value::from("a")), NotEqual, Value::from("b")));
        assert!(!eval(Some(Value::Int(3)), NotEqual, Value::Float(3.0)));
    }
}
