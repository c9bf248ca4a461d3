use crate::{
    error::PushdownError,
    predicate::{ast::Predicate, operator::ComparisonOperator},
};
use model::core::{identifiers::PropertyId, value::Value};

/// Fluent construction of predicate trees.
///
/// ```ignore
/// let p = PredicateBuilder::new()
///     .property(service_name).equals("HDFS")
///     .or()
///     .begin()
///         .property(state).equals("STARTED")
///         .and()
///         .property(mem).greater_than(1024)
///     .end()
///     .to_predicate()?;
/// ```
///
/// AND binds tighter than OR. Misuse is recorded and reported by
/// [`PredicateBuilder::to_predicate`], so chains never panic midway.
#[derive(Debug)]
pub struct PredicateBuilder {
    groups: Vec<Group>,
    pending: Option<PropertyId>,
    error: Option<String>,
}

#[derive(Debug, Default)]
struct Group {
    /// Completed OR branches, each already folded into one conjunction.
    alternatives: Vec<Predicate>,
    /// Operands of the AND chain currently being built.
    terms: Vec<Predicate>,
    /// Set after `and()`/`or()` until the next operand arrives.
    awaiting_operand: bool,
}

impl Group {
    fn accepts_operand(&self) -> bool {
        self.terms.is_empty() || self.awaiting_operand
    }

    fn close_branch(&mut self) -> Result<(), String> {
        let terms = std::mem::take(&mut self.terms);
        let branch =
            Predicate::and_all(terms).map_err(|_| "junction without a left operand".to_string())?;
        self.alternatives.push(branch);
        Ok(())
    }

    fn finish(mut self) -> Result<Predicate, String> {
        if self.awaiting_operand {
            return Err("dangling AND/OR without a right operand".to_string());
        }
        if self.terms.is_empty() {
            return Err("empty predicate group".to_string());
        }
        self.close_branch()?;
        Predicate::or_all(self.alternatives).map_err(|e| e.to_string())
    }
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self {
            groups: vec![Group::default()],
            pending: None,
            error: None,
        }
    }

    fn fail(&mut self, message: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(message.into());
        }
    }

    fn current(&mut self) -> &mut Group {
        if self.groups.is_empty() {
            self.groups.push(Group::default());
        }
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    fn push_operand(&mut self, operand: Predicate) {
        if self.error.is_some() {
            return;
        }
        let group = self.current();
        if !group.accepts_operand() {
            self.fail(format!("missing AND/OR before '{operand}'"));
            return;
        }
        group.terms.push(operand);
        group.awaiting_operand = false;
    }

    fn junction(&mut self, name: &str) -> Option<&mut Group> {
        if self.error.is_some() {
            return None;
        }
        if let Some(property) = self.pending.take() {
            self.fail(format!("property '{property}' has no operator before {name}"));
            return None;
        }
        let group = self.current();
        if group.terms.is_empty() || group.awaiting_operand {
            self.fail(format!("{name} must follow an operand"));
            return None;
        }
        let group = self.current();
        group.awaiting_operand = true;
        Some(group)
    }

    /// Names the property the next comparison applies to.
    pub fn property(mut self, property: PropertyId) -> Self {
        if let Some(previous) = self.pending.replace(property) {
            self.fail(format!("property '{previous}' has no operator"));
        }
        self
    }

    fn compare(mut self, operator: Option<ComparisonOperator>, value: Value) -> Self {
        match self.pending.take() {
            Some(property) => {
                let operand = match operator {
                    None => Predicate::Equality { property, value },
                    Some(operator) => Predicate::Comparison {
                        property,
                        operator,
                        value,
                    },
                };
                self.push_operand(operand);
            }
            None => self.fail("comparison without a preceding property"),
        }
        self
    }

    pub fn equals(self, value: impl Into<Value>) -> Self {
        self.compare(None, value.into())
    }

    pub fn not_equals(self, value: impl Into<Value>) -> Self {
        self.compare(Some(ComparisonOperator::NotEqual), value.into())
    }

    pub fn greater_than(self, value: impl Into<Value>) -> Self {
        self.compare(Some(ComparisonOperator::GreaterThan), value.into())
    }

    pub fn greater_than_equal_to(self, value: impl Into<Value>) -> Self {
        self.compare(Some(ComparisonOperator::GreaterOrEqual), value.into())
    }

    pub fn less_than(self, value: impl Into<Value>) -> Self {
        self.compare(Some(ComparisonOperator::LessThan), value.into())
    }

    pub fn less_than_equal_to(self, value: impl Into<Value>) -> Self {
        self.compare(Some(ComparisonOperator::LessOrEqual), value.into())
    }

    pub fn category_is_empty(mut self, category: impl Into<String>) -> Self {
        self.push_operand(Predicate::category_is_empty(category));
        self
    }

    pub fn category_not_empty(mut self, category: impl Into<String>) -> Self {
        self.push_operand(Predicate::category_not_empty(category));
        self
    }

    pub fn and(mut self) -> Self {
        self.junction("AND");
        self
    }

    pub fn or(mut self) -> Self {
        let closed = self.junction("OR").map(Group::close_branch);
        if let Some(Err(message)) = closed {
            self.fail(message);
        }
        self
    }

    /// Opens a parenthesised group.
    pub fn begin(mut self) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.pending.is_some() {
            self.fail("group opened between a property and its operator");
        } else if !self.current().accepts_operand() {
            self.fail("missing AND/OR before group");
        } else {
            self.groups.push(Group::default());
        }
        self
    }

    /// Closes the innermost group opened by [`PredicateBuilder::begin`].
    pub fn end(mut self) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.groups.len() < 2 {
            self.fail("end() without a matching begin()");
            return self;
        }
        if let Some(property) = self.pending.take() {
            self.fail(format!("property '{property}' has no operator"));
            return self;
        }
        let group = self.groups.pop().unwrap_or_default();
        match group.finish() {
            Ok(operand) => self.push_operand(operand),
            Err(message) => self.fail(message),
        }
        self
    }

    pub fn to_predicate(mut self) -> Result<Predicate, PushdownError> {
        if let Some(message) = self.error.take() {
            return Err(PushdownError::InvalidPredicate(message));
        }
        if let Some(property) = self.pending.take() {
            return Err(PushdownError::invalid(format!(
                "property '{property}' has no operator"
            )));
        }
        if self.groups.len() != 1 {
            return Err(PushdownError::invalid(format!(
                "{} group(s) left open",
                self.groups.len() - 1
            )));
        }
        let root = self.groups.pop().unwrap_or_default();
        root.finish().map_err(PushdownError::InvalidPredicate)
    }
}

impl Default for PredicateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
