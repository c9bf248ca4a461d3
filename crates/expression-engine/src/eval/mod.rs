mod binary;

use binary::ComparisonEvaluator;
use model::{core::value::Value, records::resource::Resource};
use planner::Predicate;

/// Exact evaluation of a filter against a resource.
pub trait Evaluator {
    fn evaluate(&self, resource: &Resource) -> bool;
}

enum Frame<'a> {
    Visit(&'a Predicate),
    And,
    Or,
}

impl Evaluator for Predicate {
    fn evaluate(&self, resource: &Resource) -> bool {
        let mut work = vec![Frame::Visit(self)];
        let mut results: Vec<bool> = Vec::new();

        while let Some(frame) = work.pop() {
            match frame {
                Frame::Visit(node) => match node {
                    Predicate::Equality { property, value } => {
                        let actual = resource.get(property).unwrap_or(&Value::Null);
                        results.push(actual.equal(value));
                    }
                    Predicate::Comparison {
                        property,
                        operator,
                        value,
                    } => {
                        let actual = resource.get(property);
                        results.push(ComparisonEvaluator::new(actual, value, *operator).evaluate());
                    }
                    Predicate::CategoryExistence {
                        category,
                        must_be_empty,
                    } => results.push(resource.has_category(category) != *must_be_empty),
                    Predicate::And { left, right } => {
                        work.push(Frame::And);
                        work.push(Frame::Visit(right));
                        work.push(Frame::Visit(left));
                    }
                    Predicate::Or { left, right } => {
                        work.push(Frame::Or);
                        work.push(Frame::Visit(right));
                        work.push(Frame::Visit(left));
                    }
                },
                Frame::And => {
                    let right = results.pop().unwrap_or(false);
                    let left = results.pop().unwrap_or(false);
                    results.push(left && right);
                }
                Frame::Or => {
                    let right = results.pop().unwrap_or(false);
                    let left = results.pop().unwrap_or(false);
                    results.push(left || right);
                }
            }
        }

        results.pop().unwrap_or(false)
    }
}

/// Keeps the resources `predicate` matches, preserving order.
pub fn matching(predicate: &Predicate, resources: Vec<Resource>) -> Vec<Resource> {
    resources
        .into_iter()
        .filter(|resource| predicate.evaluate(resource))
        .collect()
}
