//! Replicates a sample entity through both streams and reports the sizes.
//!
//! ```text
//! replistream-demo [config.json]
//! ```
//!
//! The optional argument is a JSON [StreamConfigDef]. `REPLISTREAM_LOG=debug`
//! (any tracing level name) also prints the per-round-trip events.

mod robo_cat;

use std::{env, fs, path::PathBuf};

use replistream::{
    config::StreamConfig,
    errors::{ConfigError, ReplicationError},
    replication::ReplicationSimulator,
    serde::StreamConfigDef,
};
use tracing::Level;

use crate::robo_cat::RoboCat;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Replication(#[from] ReplicationError),
    #[error("{stream} replication produced a different entity")]
    Mismatch { stream: &'static str },
}

fn main() {
    let level = env::var("REPLISTREAM_LOG")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Err(error) = run(env::args().nth(1).map(PathBuf::from)) {
        tracing::error!(%error, "demo failed");
        std::process::exit(1);
    }
}

fn run(config_path: Option<PathBuf>) -> Result<(), DemoError> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => StreamConfig::default(),
    };
    tracing::info!(?config, "stream configuration");

    let simulator = ReplicationSimulator::with_config(config)?;
    let source = RoboCat::new(5, 1)
        .with_name("Abel")
        .with_mice(vec![0, 1, 2, 3]);

    let mut destination = RoboCat::default();
    let report = simulator.simulate_replication(&source, &mut destination)?;
    if !source.same_replicated_state(&destination) {
        return Err(DemoError::Mismatch { stream: "byte" });
    }
    tracing::info!(
        name = destination.name(),
        bytes = report.transmitted_bytes,
        "byte stream replication succeeded"
    );

    let mut destination = RoboCat::default();
    let report = simulator.simulate_bit_replication(&source, &mut destination)?;
    if !source.same_replicated_state(&destination) {
        return Err(DemoError::Mismatch { stream: "bit" });
    }
    tracing::info!(
        name = destination.name(),
        bits = report.transmitted_bits,
        bytes = report.transmitted_bytes,
        "bit stream replication succeeded"
    );

    if destination.mice_indices() != source.mice_indices() {
        tracing::info!(
            mice = source.mice_indices().len(),
            "variable-length mice list is not replicated"
        );
    }

    Ok(())
}

fn load_config(path: PathBuf) -> Result<StreamConfig, DemoError> {
    let json = fs::read_to_string(&path).map_err(|source| DemoError::ReadConfig {
        path: path.clone(),
        source,
    })?;
    let def: StreamConfigDef = serde_json::from_str(&json)?;
    Ok(StreamConfig::try_from_def(def)?)
}
