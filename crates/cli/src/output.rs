use crate::error::CliError;
use engine_config::ValidatedConfig;
use serde::Serialize;
use std::fmt::Write;

pub async fn emit_json<T: Serialize + ?Sized>(value: &T, path: Option<String>) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => tokio::fs::write(path, json).await?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Human-readable overview printed by `check-config`.
pub fn config_summary(config: &ValidatedConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Configuration OK: {} backend(s), max_clauses={}, concurrent_fetches={}",
        config.backends.len(),
        config.settings.max_clauses(),
        config.settings.concurrent_fetches()
    );

    for backend in &config.backends {
        let _ = writeln!(
            out,
            "  {} -> cluster '{}' ({} service(s), {} host(s))",
            backend.name,
            backend.cluster.cluster_name,
            backend.cluster.services.len(),
            backend.cluster.hosts.len()
        );
        for (resource_type, properties) in &backend.native_properties {
            let names: Vec<String> = properties.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "    {resource_type}: native [{}]", names.join(", "));
        }
    }
    out
}
