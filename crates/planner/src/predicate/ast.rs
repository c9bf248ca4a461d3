use crate::{error::PushdownError, predicate::operator::ComparisonOperator};
use model::core::{identifiers::PropertyId, value::Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boolean filter tree over resource properties.
///
/// Trees are immutable once built. Composite nodes always own both operands;
/// serialized trees with a missing operand are rejected when parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    Equality {
        property: PropertyId,
        value: Value,
    },
    Comparison {
        property: PropertyId,
        operator: ComparisonOperator,
        value: Value,
    },
    CategoryExistence {
        category: String,
        must_be_empty: bool,
    },
    And {
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
    Or {
        left: Box<Predicate>,
        right: Box<Predicate>,
    },
}

impl Predicate {
    pub fn equality(property: PropertyId, value: impl Into<Value>) -> Self {
        Predicate::Equality {
            property,
            value: value.into(),
        }
    }

    pub fn comparison(
        property: PropertyId,
        operator: ComparisonOperator,
        value: impl Into<Value>,
    ) -> Self {
        Predicate::Comparison {
            property,
            operator,
            value: value.into(),
        }
    }

    pub fn category_is_empty(category: impl Into<String>) -> Self {
        Predicate::CategoryExistence {
            category: category.into(),
            must_be_empty: true,
        }
    }

    pub fn category_not_empty(category: impl Into<String>) -> Self {
        Predicate::CategoryExistence {
            category: category.into(),
            must_be_empty: false,
        }
    }

    pub fn and(left: Predicate, right: Predicate) -> Self {
        Predicate::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Predicate, right: Predicate) -> Self {
        Predicate::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Left-associative conjunction of all operands.
    pub fn and_all(operands: Vec<Predicate>) -> Result<Self, PushdownError> {
        fold_operands(operands, Predicate::and)
            .ok_or_else(|| PushdownError::invalid("AND requires at least one operand"))
    }

    /// Left-associative disjunction of all operands.
    pub fn or_all(operands: Vec<Predicate>) -> Result<Self, PushdownError> {
        fold_operands(operands, Predicate::or)
            .ok_or_else(|| PushdownError::invalid("OR requires at least one operand"))
    }

    /// Parses a serialized tree, reporting any malformed node as
    /// [`PushdownError::InvalidPredicate`].
    pub fn from_json(source: &str) -> Result<Self, PushdownError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Predicate::And { .. } | Predicate::Or { .. })
    }

    /// Every property referenced by the tree, in left-to-right order and
    /// without duplicates.
    pub fn property_ids(&self) -> Vec<PropertyId> {
        let mut ids: Vec<PropertyId> = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Predicate::Equality { property, .. } | Predicate::Comparison { property, .. } => {
                    if !ids.contains(property) {
                        ids.push(property.clone());
                    }
                }
                Predicate::CategoryExistence { .. } => {}
                Predicate::And { left, right } | Predicate::Or { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        ids
    }
}

/// Frees composite trees with an explicit stack; the derived drop glue would
/// recurse once per level.
impl Drop for Predicate {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        detach_operands(self, &mut stack);
        while let Some(mut node) = stack.pop() {
            detach_operands(&mut node, &mut stack);
        }
    }
}

fn detach_operands(node: &mut Predicate, stack: &mut Vec<Predicate>) {
    if let Predicate::And { left, right } | Predicate::Or { left, right } = node {
        stack.push(std::mem::replace(left.as_mut(), placeholder()));
        stack.push(std::mem::replace(right.as_mut(), placeholder()));
    }
}

fn placeholder() -> Predicate {
    Predicate::CategoryExistence {
        category: String::new(),
        must_be_empty: false,
    }
}

fn fold_operands(
    operands: Vec<Predicate>,
    combine: fn(Predicate, Predicate) -> Predicate,
) -> Option<Predicate> {
    let mut iter = operands.into_iter();
    let first = iter.next()?;
    Some(iter.fold(first, combine))
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equality { property, value } => write!(f, "{property} = {value}"),
            Predicate::Comparison {
                property,
                operator,
                value,
            } => write!(f, "{property} {operator} {value}"),
            Predicate::CategoryExistence {
                category,
                must_be_empty: true,
            } => write!(f, "isEmpty({category})"),
            Predicate::CategoryExistence {
                category,
                must_be_empty: false,
            } => write!(f, "notEmpty({category})"),
            Predicate::And { left, right } => write!(f, "({left} AND {right})"),
            Predicate::Or { left, right } => write!(f, "({left} OR {right})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str) -> PropertyId {
        PropertyId::new("category", name)
    }

    #[test]
    fn test_display_infix() {
        let p = Predicate::and(
            Predicate::equality(prop("A"), "Monkey"),
            Predicate::comparison(prop("D"), ComparisonOperator::GreaterThan, 12),
        );
        assert_eq!(p.to_string(), "(category/A = 'Monkey' AND category/D > 12)");
    }

    #[test]
    fn test_and_all_is_left_associative() {
        let a = Predicate::equality(prop("A"), 1);
        let b = Predicate::equality(prop("B"), 2);
        let c = Predicate::equality(prop("C"), 3);
        let folded = Predicate::and_all(vec![a.clone(), b.clone(), c.clone()]).unwrap();
        assert_eq!(folded, Predicate::and(Predicate::and(a, b), c));
    }

    #[test]
    fn test_empty_fold_is_invalid() {
        let err = Predicate::or_all(Vec::new()).unwrap_err();
        assert!(matches!(err, PushdownError::InvalidPredicate(_)));
    }

    #[test]
    fn test_property_ids_left_to_right_unique() {
        let p = Predicate::or(
            Predicate::and(
                Predicate::equality(prop("B"), 1),
                Predicate::category_is_empty("cat1"),
            ),
            Predicate::or(
                Predicate::equality(prop("A"), 2),
                Predicate::comparison(prop("B"), ComparisonOperator::LessThan, 3),
            ),
        );
        assert_eq!(p.property_ids(), vec![prop("B"), prop("A")]);
    }

    #[test]
    fn test_json_round_trip_shape() {
        let json = r#"{
            "kind": "or",
            "left": {"kind": "equality", "property": "category/A", "value": "Monkey"},
            "right": {"kind": "comparison", "property": "category/D", "operator": "greater_than", "value": 12}
        }"#;
        let parsed = Predicate::from_json(json).unwrap();
        assert_eq!(
            parsed,
            Predicate::or(
                Predicate::equality(prop("A"), "Monkey"),
                Predicate::comparison(prop("D"), ComparisonOperator::GreaterThan, 12),
            )
        );
    }

    #[test]
    fn test_json_missing_operand_is_invalid() {
        let json = r#"{"kind": "and", "left": {"kind": "equality", "property": "category/A", "value": 1}}"#;
        let err = Predicate::from_json(json).unwrap_err();
        match err {
            PushdownError::InvalidPredicate(msg) => assert!(msg.contains("right"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_json_null_operand_is_invalid() {
        let json = r#"{"kind": "or", "left": null, "right": {"kind": "category_existence", "category": "c", "must_be_empty": true}}"#;
        assert!(matches!(
            Predicate::from_json(json),
            Err(PushdownError::InvalidPredicate(_))
        ));
    }
}
