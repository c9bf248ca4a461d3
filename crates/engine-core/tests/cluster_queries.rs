use engine_config::parse_config;
use engine_core::{ProviderRegistry, QueryExecutor, Strategy};
use model::records::{resource::Resource, resource_type::ResourceType};
use planner::{Predicate, PredicateBuilder};
use std::sync::Arc;

const CONFIG: &str = r#"{
    "settings": { "max_clauses": 8, "concurrent_fetches": 2 },
    "backends": [
        {
            "name": "prod",
            "cluster": {
                "cluster_name": "prod",
                "version": "HDP-2.6",
                "services": {
                    "HDFS": { "state": "STARTED", "components": { "NAMENODE": ["nn1"], "DATANODE": ["dn1", "dn2"] } },
                    "YARN": { "components": { "RESOURCEMANAGER": ["nn1"] } }
                },
                "hosts": {
                    "nn1": { "total_mem": 65536, "cpu_count": 16 },
                    "dn1": { "total_mem": 32768, "cpu_count": 8 },
                    "dn2": { "host_status": "UNHEALTHY", "total_mem": 32768, "cpu_count": 8 }
                }
            },
            "native_properties": {
                "host_component": ["HostRoles/host_name", "HostRoles/component_name"],
                "host": ["Hosts/host_name"]
            }
        },
        {
            "name": "staging",
            "cluster": {
                "cluster_name": "staging",
                "services": { "HDFS": { "components": { "DATANODE": ["st1"] } } }
            }
        }
    ]
}"#;

fn executor() -> QueryExecutor {
    let config = parse_config(CONFIG).unwrap();
    let registry = ProviderRegistry::from_config(&config).unwrap();
    QueryExecutor::new(Arc::new(registry), config.settings)
}

fn keys(resources: &[Resource]) -> Vec<String> {
    resources.iter().map(|r| r.key().to_string()).collect()
}

fn filter(build: impl FnOnce(PredicateBuilder) -> PredicateBuilder) -> Predicate {
    build(PredicateBuilder::new()).to_predicate().unwrap()
}

#[tokio::test]
async fn test_lists_every_resource_without_filter() {
    let executor = executor();

    let clusters = executor.execute(ResourceType::Cluster, None).await.unwrap();
    assert_eq!(keys(&clusters), ["cluster:prod", "cluster:staging"]);

    let host_components = executor.execute(ResourceType::HostComponent, None).await.unwrap();
    assert_eq!(host_components.len(), 5);
}

#[tokio::test]
async fn test_filters_on_natively_unsupported_property() {
    let executor = executor();
    let predicate = filter(|b| b.property(ResourceType::HostComponent.property_id("service_name")).equals("HDFS"));

    let plans = executor.explain(ResourceType::HostComponent, &predicate).unwrap();
    assert!(plans[0].is_fetch_all());
    assert_eq!(plans[1].clause_count(), 1);

    let result = executor.execute(ResourceType::HostComponent, Some(&predicate)).await.unwrap();
    assert_eq!(
        keys(&result),
        [
            "host_component:prod/dn1/DATANODE",
            "host_component:prod/dn2/DATANODE",
            "host_component:prod/nn1/NAMENODE",
            "host_component:staging/st1/DATANODE",
        ]
    );
}

#[tokio::test]
async fn test_mixed_conjunction_pushes_supported_leaves_only() {
    let executor = executor();
    let host = ResourceType::Host;
    let predicate = filter(|b| {
        b.property(host.property_id("host_name"))
            .equals("dn1")
            .or()
            .property(host.property_id("host_name"))
            .equals("dn2")
            .and()
            .property(host.property_id("cpu_count"))
            .greater_than(4)
    });

    let plans = executor.explain(host, &predicate).unwrap();
    match &plans[0].strategy {
        Strategy::Clauses(clauses) => {
            assert_eq!(clauses.len(), 2);
            assert!(clauses.iter().all(|c| c.property_ids() == [host.property_id("host_name")]));
        }
        other => panic!("expected clauses, got {other:?}"),
    }

    let result = executor.execute(host, Some(&predicate)).await.unwrap();
    assert_eq!(keys(&result), ["host:prod/dn1", "host:prod/dn2"]);
}

#[tokio::test]
async fn test_category_existence_is_pushed_and_exact() {
    let executor = executor();
    let predicate = Predicate::and(
        Predicate::category_not_empty("Clusters"),
        Predicate::category_is_empty("metrics"),
    );

    let plans = executor.explain(ResourceType::Cluster, &predicate).unwrap();
    assert!(plans.iter().all(|p| p.clause_count() == 1));

    let result = executor.execute(ResourceType::Cluster, Some(&predicate)).await.unwrap();
    assert_eq!(result.len(), 2);
}

#[tokio::test]
async fn test_malformed_filters_are_invalid_predicates() {
    let err = PredicateBuilder::new().and().to_predicate().unwrap_err();
    assert!(matches!(err, planner::PushdownError::InvalidPredicate(_)));

    let err = Predicate::from_json(r#"{"kind":"and","left":{"kind":"category_existence","category":"Hosts","must_be_empty":true}}"#)
        .unwrap_err();
    assert!(matches!(err, planner::PushdownError::InvalidPredicate(_)));
}
