use crate::error::EngineError;
use engine_config::ValidatedSettings;
use planner::{CapabilityOracle, Predicate, PushdownError, compile};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// How one backend is queried for one filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPlan {
    pub backend: String,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// One unfiltered fetch.
    FetchAll { reason: FetchAllReason },
    /// One fetch per clause; the union covers every match of the filter.
    Clauses(Vec<Predicate>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchAllReason {
    /// No usable push-down for this filter.
    Unconstrained,
    OracleUnavailable(String),
    TooManyClauses(usize),
}

impl QueryPlan {
    pub fn clause_count(&self) -> usize {
        match &self.strategy {
            Strategy::FetchAll { .. } => 0,
            Strategy::Clauses(clauses) => clauses.len(),
        }
    }

    pub fn is_fetch_all(&self) -> bool {
        matches!(self.strategy, Strategy::FetchAll { .. })
    }
}

impl fmt::Display for FetchAllReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchAllReason::Unconstrained => write!(f, "no usable push-down"),
            FetchAllReason::OracleUnavailable(msg) => write!(f, "capability oracle unavailable: {msg}"),
            FetchAllReason::TooManyClauses(n) => write!(f, "{n} clauses exceed the limit"),
        }
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.strategy {
            Strategy::FetchAll { reason } => write!(f, "{}: fetch all ({reason})", self.backend),
            Strategy::Clauses(clauses) => {
                writeln!(f, "{}: {} clause(s)", self.backend, clauses.len())?;
                for clause in clauses {
                    writeln!(f, "  {clause}")?;
                }
                Ok(())
            }
        }
    }
}

/// Plans the queries issued to the backend behind `oracle` for `predicate`.
///
/// An unreachable oracle degrades the backend to an unfiltered fetch; the
/// caller's post-filter keeps the result exact. Only a malformed predicate
/// is an error.
pub fn plan<O: CapabilityOracle + ?Sized>(
    oracle: &O,
    predicate: &Predicate,
    settings: &ValidatedSettings,
) -> Result<QueryPlan, EngineError> {
    let backend = oracle.backend().to_string();

    let strategy = match compile(predicate, oracle) {
        Ok(clauses) if clauses.is_empty() => Strategy::FetchAll {
            reason: FetchAllReason::Unconstrained,
        },
        Ok(clauses) if clauses.len() > settings.max_clauses() => {
            debug!(
                backend = %backend,
                clauses = clauses.len(),
                limit = settings.max_clauses(),
                "Clause list too long, falling back to an unfiltered fetch"
            );
            Strategy::FetchAll {
                reason: FetchAllReason::TooManyClauses(clauses.len()),
            }
        }
        Ok(clauses) => Strategy::Clauses(clauses),
        Err(PushdownError::OracleUnavailable { backend: _, source }) => {
            warn!(
                backend = %backend,
                "Capability oracle unavailable, fetching all resources: {source}"
            );
            Strategy::FetchAll {
                reason: FetchAllReason::OracleUnavailable(source.to_string()),
            }
        }
        Err(err) => return Err(err.into()),
    };

    Ok(QueryPlan { backend, strategy })
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_config::settings::validated::ValidatedSettingsBuilder;
    use model::core::identifiers::PropertyId;
    use planner::{OracleError, SchemaOracle};
    use std::collections::BTreeSet;
    use tracing_test::traced_test;

    struct DownOracle;

    impl CapabilityOracle for DownOracle {
        fn backend(&self) -> &str {
            "down"
        }

        fn unsupported(
            &self,
            _: &BTreeSet<PropertyId>,
        ) -> Result<BTreeSet<PropertyId>, OracleError> {
            Err(OracleError::Unreachable("connection refused".into()))
        }
    }

    fn id(path: &str) -> PropertyId {
        path.parse().unwrap()
    }

    fn three_way_or() -> Predicate {
        Predicate::or(
            Predicate::or(
                Predicate::equality(id("a/A"), "x"),
                Predicate::equality(id("a/A"), "y"),
            ),
            Predicate::equality(id("a/A"), "z"),
        )
    }

    #[test]
    fn test_supported_filter_becomes_clauses() {
        let oracle = SchemaOracle::new("b1", [id("a/A")]);
        let plan = plan(&oracle, &three_way_or(), &ValidatedSettings::default()).unwrap();

        assert_eq!(plan.backend, "b1");
        assert_eq!(plan.clause_count(), 3);
        assert!(!plan.is_fetch_all());
    }

    #[test]
    fn test_unsupported_filter_fetches_all() {
        let oracle = SchemaOracle::new("b1", [id("a/B")]);
        let plan = plan(&oracle, &three_way_or(), &ValidatedSettings::default()).unwrap();

        assert_eq!(
            plan.strategy,
            Strategy::FetchAll {
                reason: FetchAllReason::Unconstrained
            }
        );
    }

    #[test]
    fn test_clause_limit_falls_back_to_fetch_all() {
        let mut builder = ValidatedSettingsBuilder::new();
        builder.max_clauses(2);
        let settings = builder.build();

        let oracle = SchemaOracle::new("b1", [id("a/A")]);
        let plan = plan(&oracle, &three_way_or(), &settings).unwrap();

        assert_eq!(
            plan.strategy,
            Strategy::FetchAll {
                reason: FetchAllReason::TooManyClauses(3)
            }
        );
    }

    #[test]
    #[traced_test]
    fn test_unavailable_oracle_degrades_with_warning() {
        let plan = plan(&DownOracle, &three_way_or(), &ValidatedSettings::default()).unwrap();

        assert!(matches!(
            plan.strategy,
            Strategy::FetchAll {
                reason: FetchAllReason::OracleUnavailable(ref msg)
            } if msg.contains("connection refused")
        ));
        assert!(logs_contain("Capability oracle unavailable"));
    }

    #[test]
    fn test_category_filter_never_consults_oracle() {
        let plan = plan(
            &DownOracle,
            &Predicate::category_is_empty("ServiceInfo"),
            &ValidatedSettings::default(),
        )
        .unwrap();

        assert_eq!(
            plan.strategy,
            Strategy::Clauses(vec![Predicate::category_is_empty("ServiceInfo")])
        );
    }

    #[test]
    fn test_plan_serializes_for_explain() {
        let oracle = SchemaOracle::new("b1", [id("a/A")]);
        let plan = plan(
            &oracle,
            &Predicate::equality(id("a/A"), "x"),
            &ValidatedSettings::default(),
        )
        .unwrap();

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["backend"], "b1");
        assert_eq!(json["strategy"]["clauses"][0]["kind"], "equality");
    }

    #[test]
    fn test_fetch_all_reason_serializes_tagged() {
        let json = serde_json::to_value(FetchAllReason::TooManyClauses(9)).unwrap();
        assert_eq!(json, serde_json::json!({ "too_many_clauses": 9 }));
        let json = serde_json::to_value(FetchAllReason::Unconstrained).unwrap();
        assert_eq!(json, serde_json::json!("unconstrained"));
    }
}
