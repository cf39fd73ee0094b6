//! Immunization Report Binary
//!
//! Reads a dependency edge list, runs one immunization strategy and prints
//! the resulting [`ImmunizationReport`] as JSON on stdout. Logs go to stderr.
//!
//! ## Input
//!
//! One edge per line, `dependency dependent`, separated by whitespace. A line
//! with a single name adds an isolated package. Blank lines and lines starting
//! with `#` are skipped.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `IMMUNIZE_INPUT`: edge list file (default: stdin)
//! - `IMMUNIZE_STRATEGY`: strategy as JSON (default: `{"strategy": "delta_frame_reach"}`)
//! - `IMMUNIZE_EVALUATE`: metric to evaluate the set under (default: no evaluation)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! IMMUNIZE_STRATEGY='{"strategy": "naive_ranking", "size": 5}' IMMUNIZE_EVALUATE=reach \
//!     cargo run --bin immunization_report --features cli < edges.txt
//! ```

use std::io::Read;
use std::time::Instant;

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use immunization_kernel::{
    DependencyNetwork, ImmunizationReport, ImmunizationStrategy, MetricKind, NetworkModel,
};

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "immunization_report=info,immunization_kernel=info".into());

    if log_format == "pretty" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Parse an edge list into a network.
fn parse_edge_list(input: &str) -> Result<DependencyNetwork, String> {
    let mut network = DependencyNetwork::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        match fields.as_slice() {
            [package] => {
                network.add_package(*package);
            }
            [dependency, dependent] => {
                network.add_dependency(*dependency, *dependent);
            }
            _ => {
                return Err(format!(
                    "line {}: expected `dependency dependent`, got {} fields",
                    index + 1,
                    fields.len()
                ))
            }
        }
    }

    Ok(network)
}

fn read_input() -> std::io::Result<String> {
    match std::env::var("IMMUNIZE_INPUT") {
        Ok(path) => std::fs::read_to_string(path),
        Err(_) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let strategy: ImmunizationStrategy = match std::env::var("IMMUNIZE_STRATEGY") {
        Ok(json) => serde_json::from_str(&json)?,
        Err(_) => ImmunizationStrategy::default(),
    };

    let evaluate: Option<MetricKind> = match std::env::var("IMMUNIZE_EVALUATE") {
        Ok(name) => Some(name.parse()?),
        Err(_) => None,
    };

    info!(
        strategy = strategy.name(),
        params_hash = %strategy.params_hash(),
        evaluate = ?evaluate,
        "Starting immunization report"
    );

    let start = Instant::now();
    let network = parse_edge_list(&read_input()?)?;
    let model = NetworkModel::build(network);

    info!(
        packages = model.len(),
        edges = model.network().num_edges(),
        fingerprint = %model.fingerprint().fingerprint_id,
        build_ms = start.elapsed().as_millis() as u64,
        "Network model built"
    );

    let report = ImmunizationReport::run(&model, &strategy, evaluate)?;

    info!(
        selected = report.set.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Report complete"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use immunization_kernel::PackageId;

    #[test]
    fn test_parse_edges_and_comments() {
        let network = parse_edge_list(
            "# core libraries\n\
             serde serde_json\n\
             \n\
             serde   toml\n\
             standalone\n",
        )
        .unwrap();

        assert_eq!(network.len(), 4);
        assert_eq!(network.num_edges(), 2);
        assert!(network.contains(&PackageId::from("standalone")));
        assert_eq!(network.dependents(&PackageId::from("serde")).len(), 2);
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        let err = parse_edge_list("a b\na b c\n").unwrap_err();
        assert!(err.starts_with("line 2"));
    }
}
