//! Push-down compilation of predicate trees.
//!
//! The compiler rewrites a filter into the list of clauses a backend can answer
//! natively. Leaves the backend cannot evaluate are replaced by "true", and the
//! result is expanded into disjunctive form: every clause is an independent
//! sufficient condition and the backend is queried once per clause. An empty
//! list means no usable push-down exists.
//!
//! Results are a superset of the true matches. Callers must re-apply the
//! original predicate to whatever the backend returns.

use crate::{error::PushdownError, predicate::ast::Predicate, pushdown::oracle::CapabilityOracle};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
enum Junction {
    And,
    Or,
}

enum Frame<'a> {
    Visit(&'a Predicate),
    Combine(Junction),
}

/// Compiles `predicate` into the ordered clause list `oracle`'s backend can
/// execute.
///
/// The tree is folded with an explicit work stack, so depth is bounded only
/// by memory; dropping a tree is iterative as well. Leaves are visited left to right and the oracle is consulted
/// once per equality leaf.
pub fn compile<O>(predicate: &Predicate, oracle: &O) -> Result<Vec<Predicate>, PushdownError>
where
    O: CapabilityOracle + ?Sized,
{
    let mut work = vec![Frame::Visit(predicate)];
    let mut results: Vec<Vec<Predicate>> = Vec::new();

    while let Some(frame) = work.pop() {
        match frame {
            Frame::Visit(node) => match node {
                Predicate::Equality { .. } => results.push(compile_equality(node, oracle)?),
                // Order predicates cannot be answered by a key lookup.
                Predicate::Comparison { .. } => results.push(Vec::new()),
                Predicate::CategoryExistence { .. } => results.push(vec![node.clone()]),
                Predicate::And { left, right } => {
                    work.push(Frame::Combine(Junction::And));
                    work.push(Frame::Visit(right));
                    work.push(Frame::Visit(left));
                }
                Predicate::Or { left, right } => {
                    work.push(Frame::Combine(Junction::Or));
                    work.push(Frame::Visit(right));
                    work.push(Frame::Visit(left));
                }
            },
            Frame::Combine(junction) => {
                let right = pop_operand(&mut results)?;
                let left = pop_operand(&mut results)?;
                results.push(match junction {
                    Junction::And => conjoin(left, right),
                    Junction::Or => disjoin(left, right),
                });
            }
        }
    }

    let clauses = pop_operand(&mut results)?;
    if !results.is_empty() {
        return Err(PushdownError::invalid("unbalanced predicate tree"));
    }

    debug!(
        backend = oracle.backend(),
        clauses = clauses.len(),
        "Compiled push-down filter"
    );
    Ok(clauses)
}

fn pop_operand(results: &mut Vec<Vec<Predicate>>) -> Result<Vec<Predicate>, PushdownError> {
    results
        .pop()
        .ok_or_else(|| PushdownError::invalid("composite predicate is missing an operand"))
}

fn compile_equality<O>(leaf: &Predicate, oracle: &O) -> Result<Vec<Predicate>, PushdownError>
where
    O: CapabilityOracle + ?Sized,
{
    let Predicate::Equality { property, .. } = leaf else {
        return Ok(Vec::new());
    };

    let query = BTreeSet::from([property.clone()]);
    let unsupported =
        oracle
            .unsupported(&query)
            .map_err(|source| PushdownError::OracleUnavailable {
                backend: oracle.backend().to_string(),
                source,
            })?;

    if unsupported.is_empty() {
        Ok(vec![leaf.clone()])
    } else {
        debug!(
            backend = oracle.backend(),
            property = %property,
            "Dropping unsupported equality from push-down"
        );
        Ok(Vec::new())
    }
}

/// AND of two clause lists. An empty side is "true" and vanishes; two single
/// clauses stay one combined clause; otherwise AND distributes over the
/// alternatives, left-major.
fn conjoin(left: Vec<Predicate>, right: Vec<Predicate>) -> Vec<Predicate> {
    match (left.len(), right.len()) {
        (0, _) => right,
        (_, 0) => left,
        (1, 1) => {
            let mut left = left;
            let mut right = right;
            match (left.pop(), right.pop()) {
                (Some(l), Some(r)) => vec![Predicate::and(l, r)],
                _ => Vec::new(),
            }
        }
        _ => {
            let mut product = Vec::with_capacity(left.len() * right.len());
            for l in &left {
                for r in &right {
                    product.push(Predicate::and(l.clone(), r.clone()));
                }
            }
            product
        }
    }
}

/// OR of two clause lists: left clauses then right clauses. If either side is
/// unconstrained the disjunction is too, since dropping that branch would
/// exclude resources that only it matches.
fn disjoin(mut left: Vec<Predicate>, right: Vec<Predicate>) -> Vec<Predicate> {
    if left.is_empty() || right.is_empty() {
        return Vec::new();
    }
    left.extend(right);
    left
}
