//! CLI command implementations
//!
//! Each command loads configuration, then schemas, then does its one job.
//! The returned integer is the process exit code.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::attributes::{AttributeService, FailurePolicy};
use crate::config::Config;
use crate::observability::{log_event_with_fields, Event, Logger, MetricsRegistry};
use crate::schema::{SchemaLoader, TypeId};

use super::args::{Cli, Command};
use super::errors::CliResult;
use super::io::{read_attributes, report_response, write_json, write_response};

/// Exit code for a rejected attribute bag
pub const EXIT_INVALID: i32 = 2;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<i32> {
    run_command(Cli::parse_args().command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<i32> {
    match command {
        Command::Validate {
            config,
            type_id,
            attributes,
            all,
        } => {
            let config = load_config(config.as_deref())?;
            validate(&config, type_id.map(TypeId), attributes.as_deref(), all)
        }
        Command::Types { config } => types(&load_config(config.as_deref())?),
        Command::Check { config } => check(&load_config(config.as_deref())?),
    }
}

/// Loads configuration (defaults when no path is given) and applies the
/// log level.
pub fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    Logger::set_min_severity(config.severity()?);

    let schema_dir = config.schema_dir.display().to_string();
    log_event_with_fields(Event::ConfigLoaded, &[("schema_dir", schema_dir.as_str())]);

    Ok(config)
}

fn load_schemas(config: &Config, metrics: &MetricsRegistry) -> CliResult<SchemaLoader> {
    let mut loader = SchemaLoader::new(&config.schema_dir);
    let count = loader.load_all()?;
    metrics.add_schemas_loaded(count as u64);
    Ok(loader)
}

/// Validate one attribute bag
pub fn validate(
    config: &Config,
    type_id: Option<TypeId>,
    attributes: Option<&Path>,
    all: bool,
) -> CliResult<i32> {
    let metrics = Arc::new(MetricsRegistry::new());
    let loader = load_schemas(config, &metrics)?;
    let text = read_attributes(attributes)?;

    let policy = if all {
        FailurePolicy::AllFailures
    } else {
        config.failure_policy
    };

    let service = AttributeService::new(loader)
        .with_validator(config.validator())
        .with_policy(policy)
        .with_metrics(metrics);

    let report = service.report(type_id, Some(text.as_str()))?;
    write_json(&report_response(&report, policy == FailurePolicy::AllFailures))?;

    Ok(if report.is_valid() { 0 } else { EXIT_INVALID })
}

/// List loaded product types
pub fn types(config: &Config) -> CliResult<i32> {
    let metrics = MetricsRegistry::new();
    let loader = load_schemas(config, &metrics)?;

    let listed: Vec<Value> = loader
        .registry()
        .all_types()
        .map(|t| {
            json!({
                "id": t.id,
                "code": t.code,
                "name": t.name,
                "is_active": t.is_active,
                "fields": t.active_definitions().len(),
            })
        })
        .collect();

    write_response(Value::Array(listed))?;
    Ok(0)
}

/// Load and structure-check every schema file
pub fn check(config: &Config) -> CliResult<i32> {
    let metrics = MetricsRegistry::new();
    let loader = load_schemas(config, &metrics)?;

    write_response(json!({
        "schema_dir": loader.schema_dir().display().to_string(),
        "types": loader.registry().type_count(),
    }))?;
    Ok(0)
}
