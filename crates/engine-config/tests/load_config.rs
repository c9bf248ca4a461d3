use engine_config::{ConfigError, load_config};
use std::io::Write;

#[tokio::test]
async fn test_loads_config_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "settings": {{ "concurrent_fetches": 2 }},
            "backends": [
                {{ "name": "east", "cluster": {{ "cluster_name": "c1", "hosts": {{ "h1": {{}} }} }} }}
            ]
        }}"#
    )
    .unwrap();

    let config = load_config(file.path()).await.unwrap();
    assert_eq!(config.settings.concurrent_fetches(), 2);
    assert_eq!(config.settings.max_clauses(), 64);
    assert_eq!(config.backends[0].name, "east");
    assert_eq!(config.backends[0].cluster.cluster_name, "c1");
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config(dir.path().join("absent.json")).await;
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[tokio::test]
async fn test_malformed_json_is_json_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ \"backends\": [ ").unwrap();
    let result = load_config(file.path()).await;
    assert!(matches!(result, Err(ConfigError::Json(_))));
}
